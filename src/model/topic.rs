use crate::error::{BridgeError, Result};

/// 校验主题名
///
/// 推送后端对主题名的约束：非空，且只允许 `[a-zA-Z0-9-_.~%]` 字符。
/// 不合法的主题名在本地拒绝，不产生转发调用。
pub fn validate_topic(topic: &str) -> Result<()> {
    if topic.is_empty() {
        return Err(BridgeError::Validation("topic must not be empty".to_string()));
    }

    let valid = topic
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~' | '%'));

    if !valid {
        return Err(BridgeError::Validation(format!(
            "invalid topic name: {}",
            topic
        )));
    }

    Ok(())
}
