/// 推送桥接演示程序
///
/// 展示完整的桥接使用流程：
/// - 初始化日志与配置
/// - 请求通知权限
/// - 配置前台/启动/唤回处理器
/// - 订阅事件流并消费原生侧回调
/// - 主题订阅与 Token 查询

use std::sync::Arc;

use serde_json::json;
use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tracing::info;

use pushbridge::{
    BridgeConfig, FnHandler, InboundCall, MethodCall, MockChannel, NotificationSettings, Platform,
    PushCallbacks, PushMessaging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _guard = pushbridge::logging::init_logging("info", Some("pretty"), None, false)?;

    // 演示环境用 Mock 通道代替真实的原生 SDK
    let channel = Arc::new(MockChannel::new());
    channel.script_reply("getToken", json!("demo_token_001"));
    channel.script_reply("autoInitEnabled", json!(true));

    let config = BridgeConfig {
        platform: Some(Platform::Ios),
        ..BridgeConfig::default()
    };
    let bridge = Arc::new(PushMessaging::with_config(channel.clone(), config));

    // 1. 请求通知权限
    bridge
        .request_notification_permissions(NotificationSettings::default())
        .await?;

    // 2. 配置应用层回调
    let callbacks = PushCallbacks::new().with_on_message(Arc::new(FnHandler::new(
        "demo_on_message",
        |payload| {
            Box::pin(async move {
                info!("收到前台消息: {:?}", payload);
                Ok(json!(true))
            })
        },
    )));
    bridge.configure(callbacks).await?;

    // 3. 订阅 Token 刷新事件流
    let mut token_stream = bridge.on_token_refresh();
    let watcher = tokio::spawn(async move {
        while let Some(Ok(token)) = token_stream.next().await {
            info!("Token 刷新: {}", token);
        }
    });

    // 4. 启动入站调用泵，模拟原生侧回调
    let (inbound_tx, inbound_rx) = mpsc::channel(16);
    let pump = {
        let bridge = bridge.clone();
        tokio::spawn(async move { bridge.serve(inbound_rx).await })
    };

    let mut token_call = MethodCall::new("onToken");
    token_call.arguments = json!("demo_token_002");
    inbound_tx
        .send(InboundCall::fire_and_forget(token_call))
        .await?;

    let mut message_call = MethodCall::new("onMessage");
    message_call.arguments = json!({ "title": "hello", "body": "world" });
    let (call, reply_rx) = InboundCall::with_reply(message_call);
    inbound_tx.send(call).await?;
    info!("onMessage 处理结果: {:?}", reply_rx.await?.result);

    // 5. 主题与 Token 操作
    bridge.subscribe_to_topic("news").await?;
    info!("当前 Token: {:?}", bridge.token().await?);
    info!("自动初始化: {}", bridge.auto_init_enabled().await?);
    bridge.unsubscribe_from_topic("news").await?;

    info!("出站调用共 {} 次", channel.recorded_calls().len());

    drop(inbound_tx);
    pump.await??;
    watcher.abort();

    Ok(())
}
