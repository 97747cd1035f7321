//! Temp File Store - 文件系统临时文件存储
//!
//! 实现 TempFileStorePort trait

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tokio::fs;

use crate::application::ports::{TempFileError, TempFileStorePort, TempFileType, TempGcResult};

/// 文件系统临时文件存储
///
/// 目录结构：`{root}/{web|wenku}/{文件名}`
pub struct DiskTempFileStore {
    /// 临时目录根路径
    root: PathBuf,
}

impl DiskTempFileStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn type_dir(&self, file_type: TempFileType) -> PathBuf {
        self.root.join(file_type.as_str())
    }
}

fn validate_name(name: &str) -> Result<(), TempFileError> {
    if name.is_empty() || name.starts_with('.') || name.contains('/') || name.contains('\\') {
        return Err(TempFileError::InvalidName(name.to_string()));
    }
    Ok(())
}

#[async_trait]
impl TempFileStorePort for DiskTempFileStore {
    fn root(&self) -> &Path {
        &self.root
    }

    fn create_file(&self, file_type: TempFileType, name: &str) -> Result<PathBuf, TempFileError> {
        validate_name(name)?;

        let dir = self.type_dir(file_type);
        std::fs::create_dir_all(&dir).map_err(|e| TempFileError::IoError(e.to_string()))?;

        Ok(dir.join(name))
    }

    async fn collect_garbage(&self, max_age: Duration) -> Result<TempGcResult, TempFileError> {
        let mut result = TempGcResult::default();
        let now = SystemTime::now();

        for file_type in TempFileType::ALL {
            let dir = self.type_dir(file_type);
            if !dir.exists() {
                continue;
            }

            let mut entries = fs::read_dir(&dir)
                .await
                .map_err(|e| TempFileError::IoError(e.to_string()))?;

            while let Some(entry) = entries
                .next_entry()
                .await
                .map_err(|e| TempFileError::IoError(e.to_string()))?
            {
                let metadata = match entry.metadata().await {
                    Ok(metadata) if metadata.is_file() => metadata,
                    _ => continue,
                };

                // 修改时间晚于当前时间（时钟回拨）视为刚创建
                let age = metadata
                    .modified()
                    .ok()
                    .and_then(|modified| now.duration_since(modified).ok())
                    .unwrap_or(Duration::ZERO);
                if age < max_age {
                    continue;
                }

                match fs::remove_file(entry.path()).await {
                    Ok(()) => {
                        result.deleted_files += 1;
                        result.freed_bytes += metadata.len();
                    }
                    Err(e) => {
                        tracing::warn!(path = ?entry.path(), error = %e, "Failed to delete temp file");
                    }
                }
            }
        }

        tracing::debug!(
            deleted_files = result.deleted_files,
            freed_bytes = result.freed_bytes,
            "Temp file GC completed"
        );

        Ok(result)
    }
}
