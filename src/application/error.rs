//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::{RepositoryError, TempFileError};
use crate::domain::translation::AssemblyError;
use crate::domain::volume::VolumeError;
use crate::epub::ArchiveError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 翻译文件组装失败
    #[error("{0}")]
    AssemblyError(#[from] AssemblyError),

    /// 仓储错误
    #[error("Repository error: {0}")]
    RepositoryError(String),

    /// 存储错误
    #[error("Storage error: {0}")]
    StorageError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            id: id.into(),
        }
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Invalid(message) => Self::ValidationError(message),
            other => Self::RepositoryError(other.to_string()),
        }
    }
}

impl From<TempFileError> for ApplicationError {
    fn from(err: TempFileError) -> Self {
        Self::StorageError(err.to_string())
    }
}

impl From<ArchiveError> for ApplicationError {
    fn from(err: ArchiveError) -> Self {
        Self::StorageError(err.to_string())
    }
}

impl From<VolumeError> for ApplicationError {
    fn from(err: VolumeError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ApplicationError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::InternalError(format!("Blocking task failed: {}", err))
    }
}
