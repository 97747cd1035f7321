//! 双语组装
//!
//! - 段落合并：EPUB 章节按段落插入译文
//! - 纯文本组装：TXT 分卷按行交错写出

mod merge;
mod paragraphs;
mod text;

pub use merge::{merge_paragraphs, DIMMED_STYLE};
pub use paragraphs::ParagraphList;
pub use text::{write_text_volume, MISSING_TRANSLATION_LINE};
