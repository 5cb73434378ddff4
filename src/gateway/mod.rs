//! Gateway -- the application context wiring channel, feed, and store.
//!
//! Owns the main event loop: inbound chat commands are dispatched from here,
//! and the background poller that announces new posts is spawned from here.

mod poller;


use crate::commands::Command;
use herald_core::{
    config::Params,
    message::IncomingMessage,
    traits::{Channel, FeedSource, UserStore},
};
use std::sync::Arc;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info, warn};

/// Every long-lived handle the bot needs, built once at startup and shared
/// by the poller and the command path. No ambient globals.
pub struct Gateway {
    channel: Arc<dyn Channel>,
    feed: Arc<dyn FeedSource>,
    store: Arc<dyn UserStore>,
    params: Params,
}

impl Gateway {
    /// Create a new gateway.
    pub fn new(
        channel: Arc<dyn Channel>,
        feed: Arc<dyn FeedSource>,
        store: Arc<dyn UserStore>,
        params: Params,
    ) -> Self {
        Self {
            channel,
            feed,
            store,
            params,
        }
    }

    /// Run the main event loop until SIGINT or SIGTERM.
    pub async fn run(self: Arc<Self>) -> anyhow::Result<()> {
        let mut rx = self.channel.start().await.map_err(|e| {
            anyhow::anyhow!("failed to start channel {}: {e}", self.channel.name())
        })?;

        // Every configured account has a row before the first cycle reads it.
        for username in &self.params.users {
            self.store
                .ensure_tracked(username)
                .await
                .map_err(|e| anyhow::anyhow!("failed to bootstrap account {username}: {e}"))?;
        }

        info!(
            "Herald gateway running | channel: {} | accounts: {} | destinations: {} | interval: {}s",
            self.channel.name(),
            self.params.users.len(),
            self.params.channels.len(),
            self.params.interval_secs,
        );
        println!("Herald is now running. Press CTRL-C to exit.");

        let poll_handle = {
            let store = self.store.clone();
            let feed = self.feed.clone();
            let channel = self.channel.clone();
            let params = self.params.clone();
            tokio::spawn(async move {
                poller::poll_loop(store, feed, channel, params).await;
            })
        };

        let mut sigterm = signal(SignalKind::terminate())?;
        loop {
            tokio::select! {
                Some(incoming) = rx.recv() => {
                    let gw = self.clone();
                    tokio::spawn(async move {
                        gw.handle_message(incoming).await;
                    });
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Received shutdown signal");
                    break;
                }
                _ = sigterm.recv() => {
                    info!("Received terminate signal");
                    break;
                }
            }
        }

        poll_handle.abort();
        if let Err(e) = self.channel.stop().await {
            warn!("failed to stop channel {}: {e}", self.channel.name());
        }
        info!("Shutdown complete.");
        Ok(())
    }

    /// Handle one inbound message: commands get a reply, chatter is ignored.
    async fn handle_message(&self, incoming: IncomingMessage) {
        let Some(command) = Command::parse(&incoming.text) else {
            return;
        };

        match command {
            Command::News { account } => {
                info!(
                    "{} requested the latest post for '{account}'",
                    incoming.author_name
                );
                let reply = match self.feed.latest_post(&account).await {
                    Ok(post) => post.body,
                    Err(e) => {
                        warn!("on-demand fetch for '{account}' failed: {e}");
                        format!("Could not fetch the latest post for '{account}'.")
                    }
                };
                if let Err(e) = self.channel.send_text(&incoming.channel_id, &reply).await {
                    error!("failed to reply in {}: {e}", incoming.channel_id);
                }
            }
        }
    }
}
