//! Translation Context - 翻译限界上下文
//!
//! 职责:
//! - 翻译来源与下载模式
//! - 多份翻译的选取策略
//! - 组装错误

mod errors;
mod resolution;
mod value_objects;

pub use errors::{AssemblyError, UnknownValueError};
pub use resolution::resolve_translations;
pub use value_objects::{NovelFileMode, NovelFileTranslationsMode, TranslatorId};
