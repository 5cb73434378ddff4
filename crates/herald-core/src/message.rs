use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An incoming message from a channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingMessage {
    /// Platform channel id the message was seen in. Replies go back here.
    pub channel_id: String,
    /// Platform-specific author id.
    pub author_id: String,
    /// Human-readable author name.
    pub author_name: String,
    /// Message text content.
    pub text: String,
    pub timestamp: DateTime<Utc>,
}
