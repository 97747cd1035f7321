//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 环境变量前缀
const ENV_PREFIX: &str = "WENKU";

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `WENKU_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `WENKU_STORAGE__VOLUMES_DIR=/data/files-wenku`
/// - `WENKU_STORAGE__TEMP_DIR=/tmp/wenku`
/// - `WENKU_GC__TEMP_EXPIRE_SECS=3600`
/// - `WENKU_LOG__JSON=true`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    builder = builder
        .set_default("storage.volumes_dir", "data/files-wenku")?
        .set_default("storage.temp_dir", "data/files-temp")?
        .set_default("storage.txt_chunk_lines", 1000)?
        .set_default("gc.temp_expire_secs", 86400)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    // 例如: WENKU_STORAGE__TEMP_DIR=/tmp/wenku
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.storage.volumes_dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Volumes directory cannot be empty".to_string(),
        ));
    }

    if config.storage.temp_dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Temp directory cannot be empty".to_string(),
        ));
    }

    if config.storage.txt_chunk_lines == 0 {
        return Err(ConfigError::ValidationError(
            "TXT chunk lines cannot be 0".to_string(),
        ));
    }

    if config.gc.temp_expire_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Temp file expire time cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Volumes Directory: {:?}", config.storage.volumes_dir);
    tracing::info!("Temp Directory: {:?}", config.storage.temp_dir);
    tracing::info!("TXT Chunk Lines: {}", config.storage.txt_chunk_lines);
    tracing::info!("Temp Expire: {}s", config.gc.temp_expire_secs);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
