//! Discord REST API channel.
//!
//! Sends announcement embeds and polls watched guild channels for commands.
//! Docs: <https://discord.com/developers/docs/resources/channel>

mod polling;
pub(crate) mod send;
pub(crate) mod types;


use herald_core::{config::DiscordConfig, error::HeraldError};
use tracing::debug;
use types::{DiscordUser, Guild, GuildChannel};

pub(crate) const API_BASE: &str = "https://discord.com/api/v10";

/// How often watched channels are swept for new messages.
const SWEEP_INTERVAL_SECS: u64 = 5;

/// Discord channel using the REST API.
pub struct DiscordChannel {
    client: reqwest::Client,
    /// `Bot <token>` authorization header value.
    auth: String,
}

impl DiscordChannel {
    /// Create a new Discord channel from config.
    pub fn new(config: DiscordConfig) -> Self {
        // Discord wants a DiscordBot user agent on API traffic.
        let client = reqwest::Client::builder()
            .user_agent(concat!(
                "DiscordBot (https://github.com/herald-bot/herald, ",
                env!("CARGO_PKG_VERSION"),
                ")"
            ))
            .build()
            .unwrap_or_default();

        Self {
            client,
            auth: format!("Bot {}", config.token),
        }
    }

    /// The bot's own identity as `username (id)`. Doubles as a token check.
    pub async fn identity(&self) -> Result<String, HeraldError> {
        let me = self.current_user().await?;
        Ok(format!("{} ({})", me.username, me.id))
    }

    pub(crate) async fn current_user(&self) -> Result<DiscordUser, HeraldError> {
        self.get_json(&format!("{API_BASE}/users/@me")).await
    }

    /// Text channels of every guild the bot belongs to, paired with the
    /// snowflake to poll after: the channel's last message at startup, or the
    /// channel's own id when it has never had one.
    pub(crate) async fn watchable_channels(&self) -> Result<Vec<(u64, u64)>, HeraldError> {
        let guilds: Vec<Guild> = self
            .get_json(&format!("{API_BASE}/users/@me/guilds"))
            .await?;

        let mut watched = Vec::new();
        for guild in &guilds {
            let channels: Vec<GuildChannel> = self
                .get_json(&format!("{API_BASE}/guilds/{}/channels", guild.id))
                .await?;

            for ch in channels {
                if !ch.is_text() {
                    continue;
                }
                let Ok(id) = ch.id.parse::<u64>() else {
                    continue;
                };
                let cursor = ch
                    .last_message_id
                    .as_deref()
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(id);
                debug!(
                    "watching #{} in {}",
                    ch.name.as_deref().unwrap_or("?"),
                    guild.name
                );
                watched.push((id, cursor));
            }
        }

        Ok(watched)
    }

    pub(crate) async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<T, HeraldError> {
        let resp = self
            .client
            .get(url)
            .header(reqwest::header::AUTHORIZATION, &self.auth)
            .send()
            .await
            .map_err(|e| HeraldError::Channel(format!("discord request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(HeraldError::Channel(format!(
                "discord request failed ({status}): {body}"
            )));
        }

        resp.json()
            .await
            .map_err(|e| HeraldError::Channel(format!("discord response parse failed: {e}")))
    }
}
