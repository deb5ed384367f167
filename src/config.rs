use std::env;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::events::DEFAULT_EVENT_CAPACITY;
use crate::model::Platform;

/// 桥接配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// 方法通道名称
    pub channel_name: String,
    /// 事件广播缓冲容量
    pub event_capacity: usize,
    /// 平台覆盖（默认编译期探测）
    pub platform: Option<Platform>,
    /// 日志级别
    pub log_level: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            channel_name: "plugins.pushbridge".to_string(),
            event_capacity: DEFAULT_EVENT_CAPACITY,
            platform: None,
            log_level: "info".to_string(),
        }
    }
}

impl BridgeConfig {
    /// 创建默认配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 TOML 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("读取配置文件失败: {}", path.as_ref().display()))?;
        let config: Self = toml::from_str(&content).context("解析配置文件失败")?;
        config.validate()?;
        Ok(config)
    }

    /// 从环境变量加载配置（PUSHBRIDGE_* 覆盖默认值）
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let mut config = Self::default();
        if let Ok(name) = env::var("PUSHBRIDGE_CHANNEL_NAME") {
            config.channel_name = name;
        }
        if let Ok(capacity) = env::var("PUSHBRIDGE_EVENT_CAPACITY") {
            config.event_capacity = capacity
                .parse()
                .context("PUSHBRIDGE_EVENT_CAPACITY 必须是正整数")?;
        }
        if let Ok(platform) = env::var("PUSHBRIDGE_PLATFORM") {
            config.platform = Some(
                Platform::from_str(&platform)
                    .ok_or_else(|| anyhow::anyhow!("无效的平台: {}", platform))?,
            );
        }
        if let Ok(level) = env::var("PUSHBRIDGE_LOG_LEVEL") {
            config.log_level = level;
        }
        config.validate()?;
        Ok(config)
    }

    /// 校验配置
    pub fn validate(&self) -> Result<()> {
        if self.channel_name.is_empty() {
            anyhow::bail!("channel_name 不能为空");
        }
        if self.event_capacity == 0 {
            anyhow::bail!("event_capacity 必须大于 0");
        }
        Ok(())
    }
}
