//! Wenku - 文库小说分卷与翻译文件
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Volume Context: 小说/分卷/章节标识与分卷概况
//! - Translation Context: 翻译来源、下载模式与选取策略
//! - Bilingual: 双语段落合并与 TXT 组装
//!
//! EPUB 编解码 (epub/):
//! - 归档重写、XHTML 段落文档、OPF 规范化、章节解包
//!
//! 应用层 (application/):
//! - Ports: 端口定义（VolumeRepository, TempFileStore）
//! - Commands: CQRS 命令处理器
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - Persistence: 文件系统分卷仓储
//! - Adapters: 临时文件存储
//! - Context: 端口与处理器的组装

pub mod application;
pub mod config;
pub mod domain;
pub mod epub;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
pub use infrastructure::AppContext;
