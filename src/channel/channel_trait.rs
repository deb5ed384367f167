use async_trait::async_trait;

use crate::channel::envelope::MethodCall;
use crate::error::Result;

/// 原生通道 trait（桥接层唯一的对外缝隙）
///
/// 每个受支持的平台提供一个实现。所有出站操作都是对该通道的
/// 一次转发调用；原生侧的失败原样向上传递，桥接层不做重试。
#[async_trait]
pub trait NativeChannel: Send + Sync {
    /// 转发一次方法调用并等待原生侧回复
    async fn invoke(&self, call: MethodCall) -> Result<serde_json::Value>;

    /// 通道名称
    fn name(&self) -> &str;
}
