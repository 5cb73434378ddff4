//! Command polling loop and Channel trait implementation.

use super::types::{CreateMessage, DiscordMessage, Embed};
use super::{DiscordChannel, API_BASE, SWEEP_INTERVAL_SECS};
use async_trait::async_trait;
use herald_core::{
    error::HeraldError, message::IncomingMessage, notification::Notification, traits::Channel,
};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

#[async_trait]
impl Channel for DiscordChannel {
    fn name(&self) -> &str {
        "discord"
    }

    async fn start(&self) -> Result<mpsc::Receiver<IncomingMessage>, HeraldError> {
        let me = self.current_user().await?;
        info!("Discord session ready as {} ({})", me.username, me.id);

        let watched = self.watchable_channels().await?;
        info!("Discord watching {} channels for commands", watched.len());

        let (tx, rx) = mpsc::channel(64);
        let client = self.client.clone();
        let auth = self.auth.clone();
        let self_id = me.id;

        tokio::spawn(async move {
            let mut cursors: HashMap<u64, u64> = watched.into_iter().collect();
            let mut backoff_secs: u64 = 1;

            loop {
                let mut unwatched: Vec<u64> = Vec::new();
                let mut transport_error = false;

                for (&channel_id, cursor) in cursors.iter_mut() {
                    let url = format!(
                        "{API_BASE}/channels/{channel_id}/messages?after={cursor}&limit=100"
                    );

                    let resp = match client
                        .get(&url)
                        .header(reqwest::header::AUTHORIZATION, &auth)
                        .send()
                        .await
                    {
                        Ok(r) => r,
                        Err(e) => {
                            error!("discord poll error (retry in {backoff_secs}s): {e}");
                            transport_error = true;
                            break;
                        }
                    };

                    let status = resp.status();
                    if status == reqwest::StatusCode::FORBIDDEN {
                        debug!("no read access to channel {channel_id}, unwatching");
                        unwatched.push(channel_id);
                        continue;
                    }
                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        let pause = retry_after_secs(&resp);
                        warn!("discord rate limited, pausing {pause:.1}s");
                        tokio::time::sleep(std::time::Duration::from_secs_f64(pause)).await;
                        continue;
                    }
                    if !status.is_success() {
                        let body = resp.text().await.unwrap_or_default();
                        warn!("discord poll failed for {channel_id} ({status}): {body}");
                        continue;
                    }

                    let mut messages: Vec<DiscordMessage> = match resp.json().await {
                        Ok(m) => m,
                        Err(e) => {
                            warn!("discord poll parse failed for {channel_id}: {e}");
                            continue;
                        }
                    };

                    // The API does not promise an order; process oldest first.
                    messages.sort_by_key(|m| m.id.parse::<u64>().unwrap_or(0));

                    for msg in messages {
                        if let Ok(id) = msg.id.parse::<u64>() {
                            *cursor = (*cursor).max(id);
                        }

                        if !should_forward(&msg, &self_id) {
                            continue;
                        }

                        let incoming = IncomingMessage {
                            channel_id: msg.channel_id,
                            author_id: msg.author.id,
                            author_name: msg.author.username,
                            text: msg.content,
                            timestamp: chrono::Utc::now(),
                        };

                        if tx.send(incoming).await.is_err() {
                            info!("discord channel receiver dropped, stopping poll");
                            return;
                        }
                    }
                }

                for id in unwatched {
                    cursors.remove(&id);
                }

                if transport_error {
                    tokio::time::sleep(std::time::Duration::from_secs(backoff_secs)).await;
                    backoff_secs = (backoff_secs * 2).min(60);
                    continue;
                }

                // Clean sweep -- reset backoff.
                backoff_secs = 1;
                tokio::time::sleep(std::time::Duration::from_secs(SWEEP_INTERVAL_SECS)).await;
            }
        });

        Ok(rx)
    }

    async fn send_text(&self, channel_id: &str, text: &str) -> Result<(), HeraldError> {
        self.create_message(channel_id, &CreateMessage::text(text))
            .await
    }

    async fn send_notification(
        &self,
        channel_id: &str,
        notification: &Notification,
    ) -> Result<(), HeraldError> {
        self.create_message(channel_id, &CreateMessage::embed(Embed::from(notification)))
            .await
    }

    async fn stop(&self) -> Result<(), HeraldError> {
        info!("Discord channel stopped");
        Ok(())
    }
}

/// Whether an inbound message is forwarded to the core. The bot's own
/// messages are dropped to avoid feedback loops.
pub(crate) fn should_forward(msg: &DiscordMessage, self_id: &str) -> bool {
    msg.author.id != self_id
}

/// Seconds to wait out a rate limit, from the `Retry-After` header.
fn retry_after_secs(resp: &reqwest::Response) -> f64 {
    parse_retry_after(
        resp.headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok()),
    )
}

/// Negative, non-finite, or unparseable values fall back to a short pause;
/// the result must be safe to hand to `Duration::from_secs_f64`.
pub(crate) fn parse_retry_after(header: Option<&str>) -> f64 {
    header
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|s| s.is_finite() && *s >= 0.0)
        .unwrap_or(5.0)
}
