//! Temp File Store Port - 出站端口
//!
//! 按需生成的下载文件存放在临时目录，过期后统一清理

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// 临时文件错误
#[derive(Debug, Error)]
pub enum TempFileError {
    #[error("Invalid file name: {0}")]
    InvalidName(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// 临时文件类别，对应临时目录下的子目录
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TempFileType {
    Web,
    Wenku,
}

impl TempFileType {
    pub const ALL: [TempFileType; 2] = [TempFileType::Web, TempFileType::Wenku];

    pub fn as_str(&self) -> &'static str {
        match self {
            TempFileType::Web => "web",
            TempFileType::Wenku => "wenku",
        }
    }
}

/// 临时文件 GC 结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TempGcResult {
    /// 删除的文件数量
    pub deleted_files: u64,
    /// 释放的空间（字节）
    pub freed_bytes: u64,
}

/// Temp File Store Port - 出站端口
#[async_trait]
pub trait TempFileStorePort: Send + Sync {
    /// 临时目录根路径
    fn root(&self) -> &Path;

    /// 分配文件路径 `{root}/{type}/{name}`，并确保父目录存在
    fn create_file(&self, file_type: TempFileType, name: &str) -> Result<PathBuf, TempFileError>;

    /// 删除修改时间早于 `max_age` 之前的文件
    async fn collect_garbage(&self, max_age: Duration) -> Result<TempGcResult, TempFileError>;
}
