//! Persistence Layer - 数据持久化
//!
//! 文件系统存储实现

pub mod disk;

pub use self::disk::DiskVolumeRepository;
