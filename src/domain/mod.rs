//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Volume Context: 文库分卷与章节
//! - Translation Context: 翻译来源、下载模式与选取策略
//!
//! 以及在两者之上的双语组装规则和文件名生成。

pub mod bilingual;
pub mod translation;
pub mod volume;

mod file_name;

pub use file_name::translation_file_name;
