//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现

pub mod adapters;
pub mod context;
pub mod persistence;

pub use adapters::DiskTempFileStore;
pub use context::AppContext;
pub use persistence::DiskVolumeRepository;
