//! 双语合并引擎
//!
//! 把一份或多份译文按下载模式写入原文段落列表。

use super::ParagraphList;
use crate::domain::translation::{AssemblyError, NovelFileMode};
use crate::domain::volume::ChapterId;

/// 双语模式下原文段落的淡化样式
pub const DIMMED_STYLE: &str = "opacity:0.4;";

/// 将译文合并进章节段落
///
/// `zh_lines_list` 为空时不做任何修改。每份译文的行数必须与原文段落数一致，
/// 任何一份不一致都会在修改文档之前报错。
pub fn merge_paragraphs<D>(
    doc: &mut D,
    chapter_id: &ChapterId,
    mode: NovelFileMode,
    zh_lines_list: &[Vec<String>],
) -> Result<(), AssemblyError>
where
    D: ParagraphList + ?Sized,
{
    if mode == NovelFileMode::Jp {
        return Err(AssemblyError::JpDownloadForbidden);
    }
    if zh_lines_list.is_empty() {
        return Ok(());
    }

    let jp_size = doc.len();
    for (index, lines) in zh_lines_list.iter().enumerate() {
        if lines.len() != jp_size {
            return Err(AssemblyError::LineCountMismatch {
                chapter_id: chapter_id.to_string(),
                index,
                translated: lines.len(),
                original: jp_size,
            });
        }
    }

    for index in 0..jp_size {
        match mode {
            NovelFileMode::Jp => return Err(AssemblyError::JpDownloadForbidden),
            NovelFileMode::Zh => {
                for lines in zh_lines_list {
                    doc.insert_before(index, &lines[index]);
                }
                doc.remove(index);
            }
            NovelFileMode::JpZh => {
                // 每次都紧贴原文插入，倒序插入后阅读顺序为正序
                for lines in zh_lines_list.iter().rev() {
                    doc.insert_after(index, &lines[index]);
                }
                doc.set_attribute(index, "style", DIMMED_STYLE);
            }
            NovelFileMode::ZhJp => {
                for lines in zh_lines_list {
                    doc.insert_before(index, &lines[index]);
                }
                doc.set_attribute(index, "style", DIMMED_STYLE);
            }
        }
    }

    Ok(())
}
