pub mod channel;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod events;
pub mod handler;
pub mod logging;
pub mod messaging;
pub mod model;

pub use channel::{
    InboundCall, MethodCall, MethodReply, MockChannel, NativeChannel, OutboundMethod, ReplyError,
};
pub use config::BridgeConfig;
pub use dispatcher::{CallbackDispatcher, CallbackKind};
pub use error::{BridgeError, ErrorCode, Result};
pub use events::PushEvents;
pub use handler::{FnHandler, PayloadHandler, PushCallbacks};
pub use messaging::PushMessaging;
pub use model::{validate_topic, NotificationSettings, Payload, Platform};
