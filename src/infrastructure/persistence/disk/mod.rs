//! Disk Persistence - 文件系统持久化实现

mod volume_repo;

pub use volume_repo::*;
