use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::channel::MethodCall;
use crate::error::{BridgeError, Result};
use crate::events::PushEvents;
use crate::handler::PushCallbacks;
use crate::model::{NotificationSettings, Payload};

/// 入站回调类别（原生侧回调的固定 tag 集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallbackKind {
    /// Token 签发/刷新
    Token,
    /// 通知权限设置注册完成（iOS）
    IosSettingsRegistered,
    /// 前台收到消息
    Message,
    /// 点击通知冷启动应用
    Launch,
    /// 点击通知把应用唤回前台
    Resume,
}

impl CallbackKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallbackKind::Token => "onToken",
            CallbackKind::IosSettingsRegistered => "onIosSettingsRegistered",
            CallbackKind::Message => "onMessage",
            CallbackKind::Launch => "onLaunch",
            CallbackKind::Resume => "onResume",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "onToken" => Some(CallbackKind::Token),
            "onIosSettingsRegistered" => Some(CallbackKind::IosSettingsRegistered),
            "onMessage" => Some(CallbackKind::Message),
            "onLaunch" => Some(CallbackKind::Launch),
            "onResume" => Some(CallbackKind::Resume),
            _ => None,
        }
    }
}

/// 回调分发器
///
/// 按 tag 把入站调用分发为本地动作：两类进事件流，三类交给
/// 应用层处理器，处理器的返回值回传给原生侧。
/// tag 不在固定集合内视为协议不匹配，返回致命的 Unsupported 错误。
pub struct CallbackDispatcher {
    events: Arc<PushEvents>,
    callbacks: RwLock<PushCallbacks>,
}

impl CallbackDispatcher {
    pub fn new(events: Arc<PushEvents>) -> Self {
        Self {
            events,
            callbacks: RwLock::new(PushCallbacks::new()),
        }
    }

    /// 设置应用层回调（配置时调用一次）
    pub fn set_callbacks(&self, callbacks: PushCallbacks) {
        *self.callbacks.write() = callbacks;
    }

    /// 分发一次入站调用，返回值回传给原生侧
    pub async fn dispatch(&self, call: &MethodCall) -> Result<serde_json::Value> {
        let kind = CallbackKind::from_str(&call.method).ok_or_else(|| {
            BridgeError::Unsupported(format!("unknown callback tag: {}", call.method))
        })?;

        match kind {
            CallbackKind::Token => {
                let token: String = call.get_arguments()?;
                debug!("[DISPATCH] Token refreshed");
                self.events.publish_token(token);
                Ok(serde_json::Value::Null)
            }
            CallbackKind::IosSettingsRegistered => {
                let settings = NotificationSettings::from_value(call.arguments.clone())?;
                debug!("[DISPATCH] Settings registered: {:?}", settings);
                self.events.publish_settings(settings);
                Ok(serde_json::Value::Null)
            }
            CallbackKind::Message | CallbackKind::Launch | CallbackKind::Resume => {
                self.run_handler(kind, call).await
            }
        }
    }

    async fn run_handler(&self, kind: CallbackKind, call: &MethodCall) -> Result<serde_json::Value> {
        // 只在查找期间持锁，处理器执行时不持锁
        let handler = {
            let callbacks = self.callbacks.read();
            match kind {
                CallbackKind::Message => callbacks.on_message.clone(),
                CallbackKind::Launch => callbacks.on_launch.clone(),
                CallbackKind::Resume => callbacks.on_resume.clone(),
                _ => None,
            }
        };

        if let Some(handler) = handler {
            let payload: Payload = call.get_arguments()?;
            debug!(
                "[DISPATCH] Running handler {} for {}",
                handler.name(),
                kind.as_str()
            );
            handler.handle(payload).await
        } else {
            warn!("[DISPATCH] No handler registered for {}", kind.as_str());
            Ok(serde_json::Value::Null)
        }
    }
}
