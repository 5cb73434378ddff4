//! Twitter API v1.1 client.
//!
//! Authenticates app-only (OAuth2 client credentials) and reads public
//! timelines. Docs: <https://developer.twitter.com/en/docs/twitter-api/v1>

pub(crate) mod types;

#[cfg(test)]
mod tests;

use async_trait::async_trait;
use herald_core::{config::TwitterConfig, error::HeraldError, post::Post, traits::FeedSource};
use tracing::{debug, info};
use types::{BearerToken, Tweet, TweetRef};

const API_BASE: &str = "https://api.twitter.com/1.1";
const TOKEN_URL: &str = "https://api.twitter.com/oauth2/token";

/// Twitter client holding an app-only bearer token.
pub struct TwitterClient {
    client: reqwest::Client,
    bearer: String,
}

impl TwitterClient {
    /// Exchange the consumer key pair for a bearer token.
    ///
    /// Bad credentials surface here, at startup, rather than on the first
    /// poll cycle.
    pub async fn connect(config: &TwitterConfig) -> Result<Self, HeraldError> {
        let client = reqwest::Client::new();

        let resp = client
            .post(TOKEN_URL)
            .basic_auth(&config.consumer_key, Some(&config.consumer_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| HeraldError::Feed(format!("token request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(HeraldError::Feed(format!(
                "token request failed ({status}): {body}"
            )));
        }

        let token: BearerToken = resp
            .json()
            .await
            .map_err(|e| HeraldError::Feed(format!("token parse failed: {e}")))?;

        info!("Twitter session ready (app-only)");

        Ok(Self {
            client,
            bearer: token.access_token,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, HeraldError> {
        let resp = self
            .client
            .get(url)
            .bearer_auth(&self.bearer)
            .query(query)
            .send()
            .await
            .map_err(|e| HeraldError::Feed(format!("request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(HeraldError::Feed(format!(
                "request failed ({status}): {body}"
            )));
        }

        resp.json()
            .await
            .map_err(|e| HeraldError::Feed(format!("response parse failed: {e}")))
    }
}

#[async_trait]
impl FeedSource for TwitterClient {
    async fn latest_post(&self, username: &str) -> Result<Post, HeraldError> {
        debug!("fetching latest post for {username}");

        // The timeline call returns truncated text, so it only supplies the
        // id; the show call fetches the complete tweet.
        let timeline: Vec<TweetRef> = self
            .get_json(
                &format!("{API_BASE}/statuses/user_timeline.json"),
                &[("screen_name", username), ("count", "1")],
            )
            .await?;

        let head = timeline
            .first()
            .ok_or_else(|| HeraldError::Feed(format!("account '{username}' has no posts")))?;

        let tweet: Tweet = self
            .get_json(
                &format!("{API_BASE}/statuses/show.json"),
                &[("id", head.id_str.as_str()), ("tweet_mode", "extended")],
            )
            .await?;

        tweet.into_post()
    }
}
