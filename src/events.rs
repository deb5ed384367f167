use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tracing::debug;

use crate::model::NotificationSettings;

/// 默认广播缓冲容量
pub const DEFAULT_EVENT_CAPACITY: usize = 1000;

/// In-process 推送事件总线（进程内事件广播）
///
/// 使用 tokio::sync::broadcast，两条相互独立的事件流：
/// - Token 刷新
/// - 通知权限设置注册
///
/// 任意数量的订阅者可以在任意时刻订阅；订阅者只能看到订阅之后
/// 发布的事件，事件按到达顺序投递。
pub struct PushEvents {
    token_tx: broadcast::Sender<String>,
    settings_tx: broadcast::Sender<NotificationSettings>,
}

impl PushEvents {
    /// 创建事件总线（指定广播缓冲容量）
    pub fn new(capacity: usize) -> Self {
        let (token_tx, _) = broadcast::channel(capacity);
        let (settings_tx, _) = broadcast::channel(capacity);
        Self {
            token_tx,
            settings_tx,
        }
    }

    /// 发布 Token 刷新事件
    ///
    /// 没有订阅者时事件被丢弃，不算错误。
    pub fn publish_token(&self, token: String) {
        if self.token_tx.send(token).is_err() {
            debug!("[EVENTS] No token subscribers, event dropped");
        }
    }

    /// 发布设置注册事件
    pub fn publish_settings(&self, settings: NotificationSettings) {
        if self.settings_tx.send(settings).is_err() {
            debug!("[EVENTS] No settings subscribers, event dropped");
        }
    }

    /// 订阅 Token 刷新事件流
    pub fn token_stream(&self) -> BroadcastStream<String> {
        BroadcastStream::new(self.token_tx.subscribe())
    }

    /// 订阅设置注册事件流
    pub fn settings_stream(&self) -> BroadcastStream<NotificationSettings> {
        BroadcastStream::new(self.settings_tx.subscribe())
    }
}

impl Default for PushEvents {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}
