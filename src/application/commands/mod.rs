//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：处理所有写操作

mod temp_commands;
mod translation_file_commands;
mod volume_commands;

pub mod handlers;

pub use temp_commands::*;
pub use translation_file_commands::*;
pub use volume_commands::*;
