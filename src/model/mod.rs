pub mod platform;
pub mod settings;
pub mod topic;

pub use platform::Platform;
pub use settings::NotificationSettings;
pub use topic::validate_topic;

/// 透传的消息负载（键值映射，不做类型化处理）
pub type Payload = serde_json::Map<String, serde_json::Value>;
