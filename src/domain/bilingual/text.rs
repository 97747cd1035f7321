//! 纯文本分卷组装
//!
//! 与 EPUB 不同，缺少译文的章节不会中断组装，而是写入一行占位说明。

use std::io::Write;

use crate::domain::translation::{AssemblyError, NovelFileMode};
use crate::domain::volume::ChapterId;

/// 缺少译文时写入的占位行
pub const MISSING_TRANSLATION_LINE: &str = "// 该分段翻译缺失。";

/// 按章节顺序写出纯文本
///
/// - `translations` 返回按策略选取后的译文（可能为空）
/// - `original` 返回章节原文行
///
/// 每个原文行号依次写出模式规定的各语言版本，每个版本占一行。
pub fn write_text_volume<W, E, T, O>(
    out: &mut W,
    mode: NovelFileMode,
    chapter_ids: &[ChapterId],
    mut translations: T,
    mut original: O,
) -> Result<(), E>
where
    W: Write,
    E: From<AssemblyError>,
    T: FnMut(&ChapterId) -> Result<Vec<Vec<String>>, E>,
    O: FnMut(&ChapterId) -> Result<Option<Vec<String>>, E>,
{
    if mode == NovelFileMode::Jp {
        return Err(AssemblyError::JpDownloadForbidden.into());
    }

    for chapter_id in chapter_ids {
        let zh_lines_list = translations(chapter_id)?;
        if zh_lines_list.is_empty() {
            tracing::debug!(chapter_id = %chapter_id, "Translation missing, placeholder written");
            writeln!(out, "{}", MISSING_TRANSLATION_LINE).map_err(AssemblyError::from)?;
            continue;
        }

        let jp_lines = original(chapter_id)?
            .ok_or_else(|| AssemblyError::MissingChapter(chapter_id.to_string()))?;

        for (index, lines) in zh_lines_list.iter().enumerate() {
            if lines.len() != jp_lines.len() {
                return Err(AssemblyError::LineCountMismatch {
                    chapter_id: chapter_id.to_string(),
                    index,
                    translated: lines.len(),
                    original: jp_lines.len(),
                }
                .into());
            }
        }

        let columns: Vec<&Vec<String>> = match mode {
            NovelFileMode::Jp => return Err(AssemblyError::JpDownloadForbidden.into()),
            NovelFileMode::Zh => zh_lines_list.iter().collect(),
            NovelFileMode::JpZh => std::iter::once(&jp_lines).chain(zh_lines_list.iter()).collect(),
            NovelFileMode::ZhJp => zh_lines_list.iter().chain(std::iter::once(&jp_lines)).collect(),
        };

        for index in 0..jp_lines.len() {
            for lines in &columns {
                writeln!(out, "{}", lines[index]).map_err(AssemblyError::from)?;
            }
        }
    }

    Ok(())
}
