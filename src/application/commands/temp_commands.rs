//! Temp File Commands

use std::time::Duration;

/// 清理过期临时文件命令
#[derive(Debug, Clone)]
pub struct CollectTempFiles {
    pub max_age: Duration,
}
