//! Volume Context - 文库分卷限界上下文
//!
//! 职责:
//! - 小说/分卷/章节标识
//! - 分卷概况
//! - TXT 分卷切分

mod entities;
mod errors;
mod text_chunks;
mod value_objects;

pub use entities::VolumeSummary;
pub use errors::VolumeError;
pub use text_chunks::{split_text_volume, DEFAULT_CHUNK_LINES};
pub use value_objects::{ChapterId, NovelId, VolumeId};
