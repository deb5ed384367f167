use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;

use crate::error::Result;
use crate::model::Payload;

/// 负载处理器 trait（应用层提供的回调）
///
/// 处理结果会回传给原生侧，因此处理完成对原生侧可见。
#[async_trait]
pub trait PayloadHandler: Send + Sync {
    async fn handle(&self, payload: Payload) -> Result<serde_json::Value>;
    fn name(&self) -> &'static str;
}

/// 闭包适配器：把异步闭包包装成 PayloadHandler
pub struct FnHandler<F> {
    name: &'static str,
    func: F,
}

impl<F> FnHandler<F>
where
    F: Fn(Payload) -> BoxFuture<'static, Result<serde_json::Value>> + Send + Sync,
{
    pub fn new(name: &'static str, func: F) -> Self {
        Self { name, func }
    }
}

#[async_trait]
impl<F> PayloadHandler for FnHandler<F>
where
    F: Fn(Payload) -> BoxFuture<'static, Result<serde_json::Value>> + Send + Sync,
{
    async fn handle(&self, payload: Payload) -> Result<serde_json::Value> {
        (self.func)(payload).await
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

/// 回调注册表
///
/// 三个可选的处理器引用，配置时设置，回调时读取。
#[derive(Clone, Default)]
pub struct PushCallbacks {
    pub(crate) on_message: Option<Arc<dyn PayloadHandler>>,
    pub(crate) on_launch: Option<Arc<dyn PayloadHandler>>,
    pub(crate) on_resume: Option<Arc<dyn PayloadHandler>>,
}

impl PushCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置前台消息处理器
    pub fn with_on_message(mut self, handler: Arc<dyn PayloadHandler>) -> Self {
        self.on_message = Some(handler);
        self
    }

    /// 设置通知冷启动处理器
    pub fn with_on_launch(mut self, handler: Arc<dyn PayloadHandler>) -> Self {
        self.on_launch = Some(handler);
        self
    }

    /// 设置通知唤回前台处理器
    pub fn with_on_resume(mut self, handler: Arc<dyn PayloadHandler>) -> Self {
        self.on_resume = Some(handler);
        self
    }
}
