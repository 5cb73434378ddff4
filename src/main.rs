//! Herald -- announces new posts from tracked Twitter accounts to Discord.

mod commands;
mod gateway;

use clap::{Parser, Subcommand};
use gateway::Gateway;
use herald_channels::discord::DiscordChannel;
use herald_core::config;
use herald_feed::twitter::TwitterClient;
use herald_store::MySqlUserStore;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "herald",
    about = "Announces new posts from tracked Twitter accounts to Discord",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Start,
    /// Check configuration and connectivity
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Start => start(&cli.config).await,
        Commands::Status => status(&cli.config).await,
    }
}

async fn start(config_path: &str) -> anyhow::Result<()> {
    let config = config::load(config_path)?;

    let feed = TwitterClient::connect(&config.twitter).await?;
    let store = MySqlUserStore::connect(&config.database).await?;
    let channel = DiscordChannel::new(config.discord);

    let gateway = Arc::new(Gateway::new(
        Arc::new(channel),
        Arc::new(feed),
        Arc::new(store),
        config.params,
    ));
    gateway.run().await
}

async fn status(config_path: &str) -> anyhow::Result<()> {
    println!("Herald -- Status Check\n");

    let config = match config::load(config_path) {
        Ok(config) => {
            println!("Config: OK ({config_path})");
            config
        }
        Err(e) => {
            println!("Config: FAILED ({e})");
            anyhow::bail!("configuration check failed");
        }
    };

    println!(
        "Params: {} tracked account(s), {} destination channel(s), every {}s",
        config.params.users.len(),
        config.params.channels.len(),
        config.params.interval_secs,
    );

    match TwitterClient::connect(&config.twitter).await {
        Ok(_) => println!("Twitter: OK (app-only token issued)"),
        Err(e) => println!("Twitter: FAILED ({e})"),
    }

    match MySqlUserStore::connect(&config.database).await {
        Ok(store) => match store.ping().await {
            Ok(()) => println!(
                "Database: OK ({}:{}/{})",
                config.database.host, config.database.port, config.database.database
            ),
            Err(e) => println!("Database: FAILED ({e})"),
        },
        Err(e) => println!("Database: FAILED ({e})"),
    }

    let channel = DiscordChannel::new(config.discord);
    match channel.identity().await {
        Ok(identity) => println!("Discord: OK (logged in as {identity})"),
        Err(e) => println!("Discord: FAILED ({e})"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    #[tokio::test]
    async fn test_status_exits_nonzero_without_config() {
        let err = super::status("/nonexistent/herald-config.toml")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("configuration"));
    }
}
