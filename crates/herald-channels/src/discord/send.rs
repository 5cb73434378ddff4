//! Message sending against the Discord REST API.

use super::types::CreateMessage;
use super::{DiscordChannel, API_BASE};
use herald_core::error::HeraldError;
use tracing::warn;

impl DiscordChannel {
    /// POST a message payload to a channel.
    pub(crate) async fn create_message(
        &self,
        channel_id: &str,
        payload: &CreateMessage,
    ) -> Result<(), HeraldError> {
        let url = format!("{API_BASE}/channels/{channel_id}/messages");

        let resp = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, &self.auth)
            .json(payload)
            .send()
            .await
            .map_err(|e| HeraldError::Channel(format!("discord send failed: {e}")))?;

        let status = resp.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = resp
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("?")
                .to_string();
            warn!("discord send to {channel_id} rate limited (retry after {retry_after}s)");
            return Err(HeraldError::Channel(format!(
                "discord send rate limited (retry after {retry_after}s)"
            )));
        }
        if !status.is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            return Err(HeraldError::Channel(format!(
                "discord send failed ({status}): {error_text}"
            )));
        }

        Ok(())
    }
}
