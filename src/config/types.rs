//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::volume::DEFAULT_CHUNK_LINES;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// GC 配置
    #[serde(default)]
    pub gc: GcConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 文库分卷目录，每部小说一个子目录
    #[serde(default = "default_volumes_dir")]
    pub volumes_dir: PathBuf,

    /// 临时文件目录（生成的下载文件）
    #[serde(default = "default_temp_dir")]
    pub temp_dir: PathBuf,

    /// 解包 TXT 分卷时每个章节的行数
    #[serde(default = "default_txt_chunk_lines")]
    pub txt_chunk_lines: usize,
}

fn default_volumes_dir() -> PathBuf {
    PathBuf::from("data/files-wenku")
}

fn default_temp_dir() -> PathBuf {
    PathBuf::from("data/files-temp")
}

fn default_txt_chunk_lines() -> usize {
    DEFAULT_CHUNK_LINES
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            volumes_dir: default_volumes_dir(),
            temp_dir: default_temp_dir(),
            txt_chunk_lines: default_txt_chunk_lines(),
        }
    }
}

/// GC（垃圾回收）配置
#[derive(Debug, Clone, Deserialize)]
pub struct GcConfig {
    /// 临时文件过期时间（秒）
    #[serde(default = "default_temp_expire")]
    pub temp_expire_secs: u64,
}

fn default_temp_expire() -> u64 {
    86400 // 24 小时
}

impl Default for GcConfig {
    fn default() -> Self {
        Self {
            temp_expire_secs: default_temp_expire(),
        }
    }
}

impl GcConfig {
    pub fn temp_expire(&self) -> Duration {
        Duration::from_secs(self.temp_expire_secs)
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl LogConfig {
    /// 默认的 EnvFilter 指令，`RUST_LOG` 未设置时使用
    pub fn filter_directive(&self) -> String {
        format!("{},wenku={}", self.level, self.level)
    }
}
