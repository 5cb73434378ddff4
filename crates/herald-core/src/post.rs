use chrono::{DateTime, Utc};

/// A fetched social post.
///
/// Transient: fetched fresh each cycle and dropped after delivery. Only the
/// id outlives the cycle, in the user store.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    /// Opaque platform id. The deduplication key.
    pub id: String,
    /// Author display name.
    pub author_name: String,
    /// Author handle, without the leading `@`.
    pub author_handle: String,
    pub author_avatar_url: String,
    /// Canonical link to the post.
    pub permalink: String,
    /// Full body text.
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub retweets: i64,
    pub favorites: i64,
    /// First attached image URL, when the post carries media.
    pub media_url: Option<String>,
}
