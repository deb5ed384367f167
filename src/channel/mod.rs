pub mod channel_trait;
pub mod envelope;
pub mod mock;

pub use channel_trait::NativeChannel;
pub use envelope::{InboundCall, MethodCall, MethodReply, OutboundMethod, ReplyError};
pub use mock::MockChannel;
