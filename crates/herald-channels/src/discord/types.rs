//! Discord REST API types.

use herald_core::notification::Notification;
use serde::{Deserialize, Serialize};

const GUILD_TEXT: u8 = 0;
const GUILD_ANNOUNCEMENT: u8 = 5;

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub(crate) struct DiscordUser {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub bot: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DiscordMessage {
    pub id: String,
    pub channel_id: String,
    pub content: String,
    pub author: DiscordUser,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Guild {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GuildChannel {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: u8,
    pub name: Option<String>,
    pub last_message_id: Option<String>,
}

impl GuildChannel {
    /// Whether this channel carries readable text messages.
    pub(crate) fn is_text(&self) -> bool {
        self.kind == GUILD_TEXT || self.kind == GUILD_ANNOUNCEMENT
    }
}

/// Body for `POST /channels/{id}/messages`.
#[derive(Debug, Serialize)]
pub(crate) struct CreateMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
}

impl CreateMessage {
    pub(crate) fn text(text: &str) -> Self {
        Self {
            content: Some(text.to_string()),
            embeds: Vec::new(),
        }
    }

    pub(crate) fn embed(embed: Embed) -> Self {
        Self {
            content: None,
            embeds: vec![embed],
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub author: EmbedAuthor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbedImage>,
    pub footer: EmbedFooter,
}

#[derive(Debug, Serialize)]
pub(crate) struct EmbedAuthor {
    pub name: String,
    pub url: String,
    pub icon_url: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct EmbedImage {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct EmbedFooter {
    pub text: String,
}

impl From<&Notification> for Embed {
    fn from(n: &Notification) -> Self {
        Self {
            title: n.title.clone(),
            description: n.body.clone(),
            color: n.color,
            author: EmbedAuthor {
                name: n.author_name.clone(),
                url: n.author_url.clone(),
                icon_url: n.author_icon_url.clone(),
            },
            image: n
                .image_url
                .as_ref()
                .map(|url| EmbedImage { url: url.clone() }),
            footer: EmbedFooter {
                text: n.footer.clone(),
            },
        }
    }
}
