//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod temp_file;
mod volume_repository;

pub use temp_file::{TempFileError, TempFileStorePort, TempFileType, TempGcResult};
pub use volume_repository::{RepositoryError, VolumeContent, VolumeRepositoryPort};
