use crate::{
    error::HeraldError, message::IncomingMessage, notification::Notification, post::Post,
};
use async_trait::async_trait;

/// Social feed client -- where posts come from.
///
/// Implementations talk to an external timeline API; the scheduler and the
/// command handler only see this interface.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch the single most recent post for an account.
    ///
    /// An account with no posts, or one that does not exist, is an error,
    /// never an empty success.
    async fn latest_post(&self, username: &str) -> Result<Post, HeraldError>;
}

/// Messaging channel -- where announcements go and commands come from.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Human-readable channel name.
    fn name(&self) -> &str;

    /// Start listening for incoming messages.
    /// Returns a receiver that yields incoming messages.
    async fn start(&self) -> Result<tokio::sync::mpsc::Receiver<IncomingMessage>, HeraldError>;

    /// Send plain text to a channel.
    async fn send_text(&self, channel_id: &str, text: &str) -> Result<(), HeraldError>;

    /// Deliver a rendered announcement to a channel.
    async fn send_notification(
        &self,
        channel_id: &str,
        notification: &Notification,
    ) -> Result<(), HeraldError>;

    /// Graceful shutdown.
    async fn stop(&self) -> Result<(), HeraldError>;
}

/// Durable mapping from account name to last-delivered post id.
///
/// The store is the sole source of truth for "have we announced this
/// already"; nothing caches ids in memory across cycles.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Idempotently guarantee a row exists for an account. New rows start
    /// with an empty id so the first observed post is always announced.
    async fn ensure_tracked(&self, username: &str) -> Result<(), HeraldError>;

    /// Last delivered post id for an account. `None` for an unknown account;
    /// a freshly bootstrapped row reads back as an empty string.
    async fn last_post_id(&self, username: &str) -> Result<Option<String>, HeraldError>;

    /// Record a delivered post id. Upsert, durable once this returns.
    async fn set_last_post_id(&self, username: &str, post_id: &str) -> Result<(), HeraldError>;
}
