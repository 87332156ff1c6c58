mod client;
mod types;

pub use client::SlackClient;

use crate::error::Result;
use async_trait::async_trait;

/// Identifies a message accepted by the messaging service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageHandle {
    /// Channel the message landed in, as resolved by the service.
    pub channel: String,
    /// Service-assigned message timestamp, unique within the channel.
    pub ts: String,
}

#[async_trait]
pub trait MessageSink {
    async fn post_message(&self, channel: &str, text: &str) -> Result<MessageHandle>;
}
