/// 方法调用信封定义
///
/// 桥接层与原生侧之间的标准消息格式，包括：
/// - 调用/回复信封结构
/// - 出站方法名的固定集合
/// - 序列化/反序列化

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use uuid::Uuid;

use crate::error::{BridgeError, ErrorCode};

/// 出站操作（桥接层转发给原生侧的固定方法集合）
///
/// 方法名即线上协议的一部分，与原生侧逐字对应。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutboundMethod {
    RequestNotificationPermissions,
    Configure,
    GetToken,
    SubscribeToTopic,
    UnsubscribeFromTopic,
    DeleteInstanceId,
    AutoInitEnabled,
    SetAutoInitEnabled,
}

impl OutboundMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutboundMethod::RequestNotificationPermissions => "requestNotificationPermissions",
            OutboundMethod::Configure => "configure",
            OutboundMethod::GetToken => "getToken",
            OutboundMethod::SubscribeToTopic => "subscribeToTopic",
            OutboundMethod::UnsubscribeFromTopic => "unsubscribeFromTopic",
            OutboundMethod::DeleteInstanceId => "deleteInstanceID",
            OutboundMethod::AutoInitEnabled => "autoInitEnabled",
            OutboundMethod::SetAutoInitEnabled => "setAutoInitEnabled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "requestNotificationPermissions" => Some(OutboundMethod::RequestNotificationPermissions),
            "configure" => Some(OutboundMethod::Configure),
            "getToken" => Some(OutboundMethod::GetToken),
            "subscribeToTopic" => Some(OutboundMethod::SubscribeToTopic),
            "unsubscribeFromTopic" => Some(OutboundMethod::UnsubscribeFromTopic),
            "deleteInstanceID" => Some(OutboundMethod::DeleteInstanceId),
            "autoInitEnabled" => Some(OutboundMethod::AutoInitEnabled),
            "setAutoInitEnabled" => Some(OutboundMethod::SetAutoInitEnabled),
            _ => None,
        }
    }
}

/// 方法调用信封
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodCall {
    /// 调用ID（用于追踪和匹配回复）
    pub call_id: String,
    /// 方法名
    pub method: String,
    /// 调用参数
    pub arguments: serde_json::Value,
    /// 调用时间戳
    pub timestamp: DateTime<Utc>,
}

impl MethodCall {
    /// 创建新的方法调用
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            call_id: Uuid::new_v4().to_string(),
            method: method.into(),
            arguments: serde_json::Value::Null,
            timestamp: Utc::now(),
        }
    }

    /// 创建出站方法调用
    pub fn outbound(method: OutboundMethod) -> Self {
        Self::new(method.as_str())
    }

    /// 设置调用参数
    pub fn with_arguments<T: Serialize>(mut self, arguments: T) -> Result<Self, serde_json::Error> {
        self.arguments = serde_json::to_value(arguments)?;
        Ok(self)
    }

    /// 获取调用参数
    pub fn get_arguments<T: for<'de> Deserialize<'de>>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.arguments.clone())
    }

    /// 序列化为字节数组
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// 从字节数组反序列化
    pub fn from_bytes(data: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(data)
    }
}

/// 方法回复信封
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodReply {
    /// 对应的调用ID
    pub call_id: String,
    /// 回复结果
    pub result: serde_json::Value,
    /// 错误信息（如果有）
    pub error: Option<ReplyError>,
    /// 回复时间戳
    pub timestamp: DateTime<Utc>,
}

impl MethodReply {
    /// 创建成功回复
    pub fn ok(call_id: String, result: serde_json::Value) -> Self {
        Self {
            call_id,
            result,
            error: None,
            timestamp: Utc::now(),
        }
    }

    /// 创建错误回复
    pub fn error(call_id: String, error: ReplyError) -> Self {
        Self {
            call_id,
            result: serde_json::Value::Null,
            error: Some(error),
            timestamp: Utc::now(),
        }
    }

    /// 检查是否成功
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// 序列化为字节数组
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// 从字节数组反序列化
    pub fn from_bytes(data: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(data)
    }
}

/// 回复错误信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyError {
    /// 错误代码
    pub code: ErrorCode,
    /// 错误消息
    pub message: String,
}

impl ReplyError {
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self { code, message }
    }
}

impl From<&BridgeError> for ReplyError {
    fn from(error: &BridgeError) -> Self {
        Self {
            code: ErrorCode::from(error),
            message: error.to_string(),
        }
    }
}

/// 入站调用（原生侧发起，可携带回执槽）
#[derive(Debug)]
pub struct InboundCall {
    /// 调用信封
    pub call: MethodCall,
    /// 回执槽（原生侧等待处理结果时提供）
    pub reply_to: Option<oneshot::Sender<MethodReply>>,
}

impl InboundCall {
    /// 创建不要求回执的入站调用
    pub fn fire_and_forget(call: MethodCall) -> Self {
        Self {
            call,
            reply_to: None,
        }
    }

    /// 创建要求回执的入站调用，返回调用与回执接收端
    pub fn with_reply(call: MethodCall) -> (Self, oneshot::Receiver<MethodReply>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                call,
                reply_to: Some(tx),
            },
            rx,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outbound_method_names() {
        assert_eq!(OutboundMethod::GetToken.as_str(), "getToken");
        assert_eq!(OutboundMethod::DeleteInstanceId.as_str(), "deleteInstanceID");
        assert_eq!(
            OutboundMethod::from_str("subscribeToTopic"),
            Some(OutboundMethod::SubscribeToTopic)
        );
        assert_eq!(OutboundMethod::from_str("unknownMethod"), None);
    }

    #[test]
    fn test_method_call_arguments() {
        let call = MethodCall::outbound(OutboundMethod::SubscribeToTopic)
            .with_arguments("news")
            .unwrap();

        assert_eq!(call.method, "subscribeToTopic");
        let topic: String = call.get_arguments().unwrap();
        assert_eq!(topic, "news");
    }

    #[test]
    fn test_reply_error_carries_code() {
        let error = BridgeError::Unsupported("unknown callback tag: onFoo".to_string());
        let reply = MethodReply::error("call_1".to_string(), ReplyError::from(&error));

        assert!(!reply.is_success());
        assert_eq!(reply.error.as_ref().unwrap().code, ErrorCode::Unsupported);
    }
}
