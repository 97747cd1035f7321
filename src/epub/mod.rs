//! EPUB 处理
//!
//! - 归档重写与原子写入
//! - XHTML 章节段落的解析与修改
//! - OPF 包文档规范化
//! - 解包章节文本

mod archive;
mod atomic;
mod error;
mod opf;
mod text;
mod unpack;
mod xhtml;

pub use archive::{read_entries, rewrite_archive};
pub use atomic::{is_partial_file, write_atomic};
pub use error::ArchiveError;
pub use opf::{normalize_package_document, PACKAGE_LANGUAGE, WRITING_MODE_NAME, WRITING_MODE_VALUE};
pub use unpack::{extract_chapters, is_chapter_entry};
pub use xhtml::{extract_paragraph_lines, XhtmlDocument};

#[cfg(test)]
pub(crate) use archive::tests::{build_epub, read_all};
