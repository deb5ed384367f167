use std::fmt;
use std::error::Error as StdError;
use serde::{Serialize, Deserialize};

/// 桥接层错误类型
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BridgeError {
    /// 通道错误（原生侧调用失败，原样传递）
    Channel(String),
    /// 序列化错误
    Serialization(String),
    /// 验证错误
    Validation(String),
    /// 配置错误
    Configuration(String),
    /// 处理器执行错误
    Handler(String),
    /// 不支持的操作（入站 tag 不在固定集合内，协议不匹配）
    Unsupported(String),
    /// 内部错误
    Internal(String),
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeError::Channel(msg) => write!(f, "Channel error: {}", msg),
            BridgeError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            BridgeError::Validation(msg) => write!(f, "Validation error: {}", msg),
            BridgeError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            BridgeError::Handler(msg) => write!(f, "Handler error: {}", msg),
            BridgeError::Unsupported(msg) => write!(f, "Unsupported operation: {}", msg),
            BridgeError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl StdError for BridgeError {}

impl From<std::io::Error> for BridgeError {
    fn from(err: std::io::Error) -> Self {
        BridgeError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        BridgeError::Serialization(err.to_string())
    }
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, BridgeError>;

/// 错误代码（随回复信封回传给原生侧）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    /// 成功
    Success = 0,
    /// 通道错误
    Channel = 1000,
    /// 序列化错误
    Serialization = 1001,
    /// 验证错误
    Validation = 1002,
    /// 配置错误
    Configuration = 1003,
    /// 处理器执行错误
    Handler = 1004,
    /// 不支持的操作
    Unsupported = 4000,
    /// 内部错误
    Internal = 9999,
}

impl From<&BridgeError> for ErrorCode {
    fn from(error: &BridgeError) -> Self {
        match error {
            BridgeError::Channel(_) => ErrorCode::Channel,
            BridgeError::Serialization(_) => ErrorCode::Serialization,
            BridgeError::Validation(_) => ErrorCode::Validation,
            BridgeError::Configuration(_) => ErrorCode::Configuration,
            BridgeError::Handler(_) => ErrorCode::Handler,
            BridgeError::Unsupported(_) => ErrorCode::Unsupported,
            BridgeError::Internal(_) => ErrorCode::Internal,
        }
    }
}
