use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::info;

use crate::channel::channel_trait::NativeChannel;
use crate::channel::envelope::MethodCall;
use crate::error::{BridgeError, Result};

/// Mock 通道（用于测试和本地联调）
///
/// 不调用真实原生 SDK：记录所有出站调用，按方法名返回预置回复。
pub struct MockChannel {
    name: String,
    calls: Mutex<Vec<MethodCall>>,
    replies: DashMap<String, serde_json::Value>,
    failures: DashMap<String, String>,
}

impl MockChannel {
    pub fn new() -> Self {
        Self {
            name: "mock".to_string(),
            calls: Mutex::new(Vec::new()),
            replies: DashMap::new(),
            failures: DashMap::new(),
        }
    }

    /// 预置某方法的回复
    pub fn script_reply(&self, method: &str, reply: serde_json::Value) {
        self.replies.insert(method.to_string(), reply);
    }

    /// 预置某方法的失败
    pub fn script_failure(&self, method: &str, message: &str) {
        self.failures.insert(method.to_string(), message.to_string());
    }

    /// 已记录的出站调用
    pub fn recorded_calls(&self) -> Vec<MethodCall> {
        self.calls.lock().clone()
    }

    /// 某方法被调用的次数
    pub fn call_count(&self, method: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| call.method == method)
            .count()
    }
}

impl Default for MockChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NativeChannel for MockChannel {
    async fn invoke(&self, call: MethodCall) -> Result<serde_json::Value> {
        info!(
            "[MOCK CHANNEL] Invoking: method={}, call_id={}",
            call.method, call.call_id
        );

        let method = call.method.clone();
        self.calls.lock().push(call);

        if let Some(message) = self.failures.get(&method) {
            return Err(BridgeError::Channel(message.clone()));
        }

        match self.replies.get(&method) {
            Some(reply) => Ok(reply.clone()),
            None => Ok(serde_json::Value::Null),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
