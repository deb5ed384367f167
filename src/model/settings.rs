use serde::{Deserialize, Serialize};

use crate::error::Result;

/// 通知权限设置（权限授予快照）
///
/// 三个布尔开关，默认全部开启。与原生侧以键值 map 往返，
/// 缺失的键按默认值 true 处理。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    /// 声音
    pub sound: bool,
    /// 弹窗提醒
    pub alert: bool,
    /// 应用角标
    pub badge: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            sound: true,
            alert: true,
            badge: true,
        }
    }
}

impl NotificationSettings {
    /// 编码为 JSON map（发送给原生侧）
    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// 从原生侧回传的 JSON map 解码
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}
