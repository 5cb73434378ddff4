//! Twitter API v1.1 deserialization types.

use chrono::{DateTime, Utc};
use herald_core::{error::HeraldError, post::Post};
use serde::Deserialize;

/// Format of `created_at` fields, e.g. `Wed Oct 10 20:19:24 +0000 2018`.
pub(crate) const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

#[derive(Debug, Deserialize)]
pub(crate) struct BearerToken {
    pub access_token: String,
}

/// Timeline entries are read only for their id.
#[derive(Debug, Deserialize)]
pub(crate) struct TweetRef {
    pub id_str: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Tweet {
    pub id_str: String,
    /// Present when the request asked for `tweet_mode=extended`.
    pub full_text: Option<String>,
    /// Classic-mode fallback.
    pub text: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub retweet_count: i64,
    #[serde(default)]
    pub favorite_count: i64,
    pub user: TweetUser,
    #[serde(default)]
    pub entities: TweetEntities,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TweetUser {
    pub name: String,
    pub screen_name: String,
    pub profile_image_url_https: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TweetEntities {
    #[serde(default)]
    pub media: Vec<TweetMedia>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TweetMedia {
    pub media_url_https: String,
}

impl Tweet {
    /// Convert into the domain post. The only fallible part is the
    /// timestamp; Twitter's format is fixed but not self-describing.
    pub(crate) fn into_post(self) -> Result<Post, HeraldError> {
        let created_at = DateTime::parse_from_str(&self.created_at, CREATED_AT_FORMAT)
            .map_err(|e| {
                HeraldError::Feed(format!("unparseable created_at '{}': {e}", self.created_at))
            })?
            .with_timezone(&Utc);

        let body = self.full_text.or(self.text).unwrap_or_default();
        let media_url = self
            .entities
            .media
            .into_iter()
            .next()
            .map(|m| m.media_url_https);
        let permalink = format!(
            "https://twitter.com/{}/status/{}",
            self.user.screen_name, self.id_str
        );

        Ok(Post {
            id: self.id_str,
            author_name: self.user.name,
            author_handle: self.user.screen_name,
            author_avatar_url: self.user.profile_image_url_https.unwrap_or_default(),
            permalink,
            body,
            created_at,
            retweets: self.retweet_count,
            favorites: self.favorite_count,
            media_url,
        })
    }
}
