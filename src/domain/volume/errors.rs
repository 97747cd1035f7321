//! Volume Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VolumeError {
    #[error("无效的小说 ID: {0}")]
    InvalidNovelId(String),

    #[error("无效的分卷 ID: {0}")]
    InvalidVolumeId(String),

    #[error("无效的章节 ID: {0}")]
    InvalidChapterId(String),

    #[error("不支持的分卷格式: {0}")]
    UnsupportedFormat(String),
}
