use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{debug, error, info};

use crate::channel::{
    InboundCall, MethodCall, MethodReply, NativeChannel, OutboundMethod, ReplyError,
};
use crate::config::BridgeConfig;
use crate::dispatcher::CallbackDispatcher;
use crate::error::{BridgeError, Result};
use crate::events::PushEvents;
use crate::handler::PushCallbacks;
use crate::model::{validate_topic, NotificationSettings, Platform};

/// 推送桥接门面
///
/// 所有操作都是对原生通道的一次转发调用；需要结果的操作等待回复。
/// 各操作之间相互独立、无序，除非原生侧自行施加顺序。
/// 两条广播事件流（Token 刷新 / 设置注册）供任意数量的订阅者使用。
pub struct PushMessaging {
    channel: Arc<dyn NativeChannel>,
    platform: Platform,
    events: Arc<PushEvents>,
    dispatcher: CallbackDispatcher,
}

impl PushMessaging {
    /// 以默认配置创建桥接
    pub fn new(channel: Arc<dyn NativeChannel>) -> Self {
        Self::with_config(channel, BridgeConfig::default())
    }

    /// 以指定配置创建桥接
    pub fn with_config(channel: Arc<dyn NativeChannel>, config: BridgeConfig) -> Self {
        let platform = config.platform.unwrap_or_else(Platform::detect);
        debug!(
            "[BRIDGE] Creating bridge: channel={}, platform={}, event_capacity={}",
            config.channel_name,
            platform.as_str(),
            config.event_capacity
        );
        let events = Arc::new(PushEvents::new(config.event_capacity));
        let dispatcher = CallbackDispatcher::new(events.clone());
        Self {
            channel,
            platform,
            events,
            dispatcher,
        }
    }

    /// 当前平台
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// 请求通知权限
    ///
    /// 权限弹窗只在 iOS 上存在；其他平台不产生转发调用。
    pub async fn request_notification_permissions(
        &self,
        settings: NotificationSettings,
    ) -> Result<()> {
        if !self.platform.supports_permission_prompt() {
            debug!(
                "[BRIDGE] Permission prompt not applicable on {}, skipping",
                self.platform.as_str()
            );
            return Ok(());
        }

        let call = MethodCall::outbound(OutboundMethod::RequestNotificationPermissions)
            .with_arguments(settings)?;
        self.channel.invoke(call).await?;
        Ok(())
    }

    /// 配置应用层回调并通知原生侧开始投递
    pub async fn configure(&self, callbacks: PushCallbacks) -> Result<()> {
        self.dispatcher.set_callbacks(callbacks);

        let call = MethodCall::outbound(OutboundMethod::Configure);
        self.channel.invoke(call).await?;
        info!("[BRIDGE] Configured");
        Ok(())
    }

    /// 获取当前注册 Token
    ///
    /// 原生侧可能尚未签发 Token，此时返回 None。
    pub async fn token(&self) -> Result<Option<String>> {
        let call = MethodCall::outbound(OutboundMethod::GetToken);
        let value = self.channel.invoke(call).await?;
        match value {
            serde_json::Value::Null => Ok(None),
            other => Ok(Some(serde_json::from_value(other)?)),
        }
    }

    /// 订阅主题
    pub async fn subscribe_to_topic(&self, topic: &str) -> Result<()> {
        validate_topic(topic)?;

        let call = MethodCall::outbound(OutboundMethod::SubscribeToTopic).with_arguments(topic)?;
        self.channel.invoke(call).await?;
        Ok(())
    }

    /// 退订主题
    pub async fn unsubscribe_from_topic(&self, topic: &str) -> Result<()> {
        validate_topic(topic)?;

        let call =
            MethodCall::outbound(OutboundMethod::UnsubscribeFromTopic).with_arguments(topic)?;
        self.channel.invoke(call).await?;
        Ok(())
    }

    /// 删除 Instance ID（当前 Token 随之失效）
    pub async fn delete_instance_id(&self) -> Result<bool> {
        let call = MethodCall::outbound(OutboundMethod::DeleteInstanceId);
        let value = self.channel.invoke(call).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// 查询自动初始化开关
    pub async fn auto_init_enabled(&self) -> Result<bool> {
        let call = MethodCall::outbound(OutboundMethod::AutoInitEnabled);
        let value = self.channel.invoke(call).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// 设置自动初始化开关
    pub async fn set_auto_init_enabled(&self, enabled: bool) -> Result<()> {
        let call =
            MethodCall::outbound(OutboundMethod::SetAutoInitEnabled).with_arguments(enabled)?;
        self.channel.invoke(call).await?;
        Ok(())
    }

    /// 订阅 Token 刷新事件流
    pub fn on_token_refresh(&self) -> BroadcastStream<String> {
        self.events.token_stream()
    }

    /// 订阅设置注册事件流
    pub fn on_settings_registered(&self) -> BroadcastStream<NotificationSettings> {
        self.events.settings_stream()
    }

    /// 处理一次原生侧入站调用，返回值由平台胶水层回传给原生侧
    pub async fn handle_native_call(&self, call: &MethodCall) -> Result<serde_json::Value> {
        self.dispatcher.dispatch(call).await
    }

    /// 入站调用泵：持续消费原生侧调用直到通道关闭
    ///
    /// 处理器错误记录日志后继续；未知 tag 属协议不匹配，
    /// 回执错误后终止并返回该错误。
    pub async fn serve(&self, mut inbound: mpsc::Receiver<InboundCall>) -> Result<()> {
        info!("[BRIDGE] Inbound pump started");

        while let Some(InboundCall { call, reply_to }) = inbound.recv().await {
            let result = self.dispatcher.dispatch(&call).await;

            let reply = match &result {
                Ok(value) => MethodReply::ok(call.call_id.clone(), value.clone()),
                Err(e) => MethodReply::error(call.call_id.clone(), ReplyError::from(e)),
            };
            if let Some(tx) = reply_to {
                // 原生侧可能已放弃等待
                let _ = tx.send(reply);
            }

            match result {
                Ok(_) => {}
                Err(e @ BridgeError::Unsupported(_)) => {
                    error!("[BRIDGE] Protocol mismatch: {}", e);
                    return Err(e);
                }
                Err(e) => {
                    error!("[BRIDGE] Failed to handle {}: {}", call.method, e);
                }
            }
        }

        info!("[BRIDGE] Inbound pump stopped");
        Ok(())
    }
}
