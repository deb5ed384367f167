use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::mpsc;
use tokio_stream::StreamExt;

use pushbridge::{
    BridgeConfig, BridgeError, ErrorCode, InboundCall, MethodCall, MockChannel,
    NotificationSettings, Payload, PayloadHandler, Platform, PushCallbacks, PushMessaging, Result,
};

/// 计数处理器：记录调用次数并返回预置结果
struct CountingHandler {
    name: &'static str,
    count: AtomicUsize,
    reply: serde_json::Value,
}

impl CountingHandler {
    fn new(name: &'static str, reply: serde_json::Value) -> Arc<Self> {
        Arc::new(Self {
            name,
            count: AtomicUsize::new(0),
            reply,
        })
    }

    fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PayloadHandler for CountingHandler {
    async fn handle(&self, _payload: Payload) -> Result<serde_json::Value> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

/// 创建测试用的桥接
fn create_test_bridge() -> PushMessaging {
    let channel = Arc::new(MockChannel::new());
    let config = BridgeConfig {
        platform: Some(Platform::Ios),
        ..BridgeConfig::default()
    };
    PushMessaging::with_config(channel, config)
}

/// 构造入站调用
fn inbound(tag: &str, arguments: serde_json::Value) -> MethodCall {
    let mut call = MethodCall::new(tag);
    call.arguments = arguments;
    call
}

#[tokio::test]
async fn test_on_token_publishes_exactly_one_event() {
    let bridge = create_test_bridge();
    let mut stream = bridge.on_token_refresh();

    let result = bridge
        .handle_native_call(&inbound("onToken", json!("token_v1")))
        .await
        .unwrap();
    assert_eq!(result, serde_json::Value::Null);

    assert_eq!(stream.next().await.unwrap().unwrap(), "token_v1");

    // 哨兵事件紧随其后，证明上面的调用只发布了一个事件
    bridge
        .handle_native_call(&inbound("onToken", json!("sentinel")))
        .await
        .unwrap();
    assert_eq!(stream.next().await.unwrap().unwrap(), "sentinel");
}

#[tokio::test]
async fn test_on_settings_registered_publishes_decoded_settings() {
    let bridge = create_test_bridge();
    let mut stream = bridge.on_settings_registered();

    bridge
        .handle_native_call(&inbound(
            "onIosSettingsRegistered",
            json!({ "sound": false, "alert": true, "badge": false }),
        ))
        .await
        .unwrap();

    let settings = stream.next().await.unwrap().unwrap();
    assert_eq!(
        settings,
        NotificationSettings {
            sound: false,
            alert: true,
            badge: false,
        }
    );
}

#[tokio::test]
async fn test_handler_tags_invoke_documented_handler_once() {
    let bridge = create_test_bridge();

    let on_message = CountingHandler::new("on_message", json!(true));
    let on_launch = CountingHandler::new("on_launch", json!("launched"));
    let on_resume = CountingHandler::new("on_resume", json!(null));

    bridge
        .configure(
            PushCallbacks::new()
                .with_on_message(on_message.clone())
                .with_on_launch(on_launch.clone())
                .with_on_resume(on_resume.clone()),
        )
        .await
        .unwrap();

    // onMessage 只触发 message 处理器，结果回传
    let result = bridge
        .handle_native_call(&inbound("onMessage", json!({ "body": "hello" })))
        .await
        .unwrap();
    assert_eq!(result, json!(true));
    assert_eq!(on_message.count(), 1);
    assert_eq!(on_launch.count(), 0);
    assert_eq!(on_resume.count(), 0);

    let result = bridge
        .handle_native_call(&inbound("onLaunch", json!({ "from": "notification" })))
        .await
        .unwrap();
    assert_eq!(result, json!("launched"));
    assert_eq!(on_launch.count(), 1);

    bridge
        .handle_native_call(&inbound("onResume", json!({})))
        .await
        .unwrap();
    assert_eq!(on_resume.count(), 1);

    // 每个 tag 恰好触发一次文档动作
    assert_eq!(on_message.count(), 1);
    assert_eq!(on_launch.count(), 1);
    assert_eq!(on_resume.count(), 1);
}

#[tokio::test]
async fn test_unset_handler_answers_null() {
    let bridge = create_test_bridge();

    // 未配置任何处理器
    let result = bridge
        .handle_native_call(&inbound("onMessage", json!({ "body": "hello" })))
        .await
        .unwrap();
    assert_eq!(result, serde_json::Value::Null);
}

#[tokio::test]
async fn test_unknown_tag_is_fatal_unsupported() {
    let bridge = create_test_bridge();

    let result = bridge
        .handle_native_call(&inbound("onBackgroundMessage", json!({})))
        .await;

    assert!(matches!(result, Err(BridgeError::Unsupported(_))));
}

#[tokio::test]
async fn test_subscribers_before_and_after_only_see_later_events() {
    let bridge = create_test_bridge();

    let mut early = bridge.on_token_refresh();
    bridge
        .handle_native_call(&inbound("onToken", json!("token_1")))
        .await
        .unwrap();

    // 事件之后订阅的流看不到 token_1
    let mut late = bridge.on_token_refresh();
    bridge
        .handle_native_call(&inbound("onToken", json!("token_2")))
        .await
        .unwrap();

    assert_eq!(early.next().await.unwrap().unwrap(), "token_1");
    assert_eq!(early.next().await.unwrap().unwrap(), "token_2");
    assert_eq!(late.next().await.unwrap().unwrap(), "token_2");
}

#[tokio::test]
async fn test_serve_replies_and_stops_on_protocol_mismatch() {
    let bridge = Arc::new(create_test_bridge());
    let (tx, rx) = mpsc::channel(16);

    let pump = {
        let bridge = bridge.clone();
        tokio::spawn(async move { bridge.serve(rx).await })
    };

    // 正常调用：回执成功
    let (call, reply_rx) = InboundCall::with_reply(inbound("onToken", json!("token_v1")));
    tx.send(call).await.unwrap();
    let reply = reply_rx.await.unwrap();
    assert!(reply.is_success());

    // 未知 tag：回执错误并终止泵
    let (call, reply_rx) = InboundCall::with_reply(inbound("onWeirdTag", json!({})));
    tx.send(call).await.unwrap();
    let reply = reply_rx.await.unwrap();
    assert!(!reply.is_success());
    assert_eq!(reply.error.as_ref().unwrap().code, ErrorCode::Unsupported);

    let outcome = pump.await.unwrap();
    assert!(matches!(outcome, Err(BridgeError::Unsupported(_))));
}

#[tokio::test]
async fn test_serve_continues_after_handler_error() {
    /// 总是失败的处理器
    struct FailingHandler;

    #[async_trait]
    impl PayloadHandler for FailingHandler {
        async fn handle(&self, _payload: Payload) -> Result<serde_json::Value> {
            Err(BridgeError::Handler("boom".to_string()))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    let bridge = Arc::new(create_test_bridge());
    bridge
        .configure(PushCallbacks::new().with_on_message(Arc::new(FailingHandler)))
        .await
        .unwrap();

    let (tx, rx) = mpsc::channel(16);
    let pump = {
        let bridge = bridge.clone();
        tokio::spawn(async move { bridge.serve(rx).await })
    };

    let (call, reply_rx) = InboundCall::with_reply(inbound("onMessage", json!({})));
    tx.send(call).await.unwrap();
    let reply = reply_rx.await.unwrap();
    assert_eq!(reply.error.as_ref().unwrap().code, ErrorCode::Handler);

    // 处理器错误不终止泵，后续调用照常处理
    let (call, reply_rx) = InboundCall::with_reply(inbound("onToken", json!("still_alive")));
    tx.send(call).await.unwrap();
    assert!(reply_rx.await.unwrap().is_success());

    drop(tx);
    assert!(pump.await.unwrap().is_ok());
}
