//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（VolumeRepository、TempFileStore）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports
pub use commands::{
    CollectTempFiles,
    CreateVolume,
    DeleteVolume,
    MakeTranslationFile,
    SaveTranslation,
    // Handlers
    handlers::{
        CollectTempFilesHandler, CreateVolumeHandler, CreateVolumeResponse, DeleteVolumeHandler,
        MakeTranslationFileHandler, MakeTranslationFileResponse, SaveTranslationHandler,
    },
};

pub use error::ApplicationError;

pub use ports::{
    RepositoryError, TempFileError, TempFileStorePort, TempFileType, TempGcResult, VolumeContent,
    VolumeRepositoryPort,
};

pub use queries::{
    GetChapter,
    ListVolumes,
    // Handlers
    handlers::{ChapterResponse, GetChapterHandler, ListVolumesHandler},
};
