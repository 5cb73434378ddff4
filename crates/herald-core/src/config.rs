use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::HeraldError;

/// Top-level Herald configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub discord: DiscordConfig,
    pub twitter: TwitterConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub params: Params,
}

/// Discord bot credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordConfig {
    /// Bot token from the developer portal.
    pub token: String,
}

/// Twitter API credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwitterConfig {
    pub consumer_key: String,
    pub consumer_secret: String,
    /// User-context OAuth pair. App-only authentication uses the consumer
    /// pair; these are accepted so the full credential set can live here.
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub access_secret: String,
}

/// MySQL connection parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_db_host")]
    pub host: String,
    #[serde(default = "default_db_port")]
    pub port: u16,
    pub database: String,
}

/// Operational parameters: who to watch and where to announce.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Params {
    /// Tracked account names, polled in order. May be empty.
    #[serde(default)]
    pub users: Vec<String>,
    /// Destination channel ids, fanned out in order. May be empty.
    #[serde(default)]
    pub channels: Vec<String>,
    /// Seconds to sleep between poll cycles.
    #[serde(default = "default_interval")]
    pub interval_secs: u64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            channels: Vec::new(),
            interval_secs: default_interval(),
        }
    }
}

fn default_db_host() -> String {
    "127.0.0.1".to_string()
}

fn default_db_port() -> u16 {
    3306
}

fn default_interval() -> u64 {
    60
}

/// Load configuration from a TOML file.
///
/// The file is mandatory: the bot cannot run without credentials, so a
/// missing or malformed file is an error for the caller to treat as fatal.
pub fn load(path: &str) -> Result<Config, HeraldError> {
    let path = Path::new(path);
    let content = std::fs::read_to_string(path)
        .map_err(|e| HeraldError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| HeraldError::Config(format!("failed to parse config: {}", e)))?;

    if config.params.interval_secs == 0 {
        return Err(HeraldError::Config(
            "params.interval_secs must be greater than zero".to_string(),
        ));
    }

    Ok(config)
}
