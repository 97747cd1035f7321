use std::io::{Read, Seek};

use super::{extract_paragraph_lines, read_entries, ArchiveError};
use crate::domain::volume::ChapterId;

const CHAPTER_SUFFIXES: [&str; 3] = [".xhtml", ".html", ".htm"];

/// 条目是否为章节文档
pub fn is_chapter_entry(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    CHAPTER_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix))
}

/// 解包 EPUB，按条目顺序返回各章节的段落文本
pub fn extract_chapters<R: Read + Seek>(
    reader: R,
) -> Result<Vec<(ChapterId, Vec<String>)>, ArchiveError> {
    let mut chapters = Vec::new();
    read_entries::<_, ArchiveError, _>(reader, |name, bytes| {
        if is_chapter_entry(name) {
            let lines = extract_paragraph_lines(bytes)?;
            chapters.push((ChapterId::from_entry_name(name), lines));
        }
        Ok(())
    })?;
    Ok(chapters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epub::archive::tests::build_epub;

    #[test]
    fn test_extract_chapters() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("v.epub");
        build_epub(
            &path,
            &[
                ("OEBPS/content.opf", "<package/>"),
                (
                    "OEBPS/Text/ch1.xhtml",
                    "<html><body><p>一</p><p> </p><p>二<rt>に</rt></p></body></html>",
                ),
                ("OEBPS/style.css", "p{}"),
            ],
        );

        let chapters = extract_chapters(std::fs::File::open(&path).unwrap()).unwrap();
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].0.as_str(), "OEBPS.Text.ch1.xhtml");
        assert_eq!(chapters[0].1, vec!["一", "二"]);
    }

    #[test]
    fn test_chapter_suffixes() {
        assert!(is_chapter_entry("a/B.XHTML"));
        assert!(is_chapter_entry("index.htm"));
        assert!(!is_chapter_entry("toc.ncx"));
    }
}
