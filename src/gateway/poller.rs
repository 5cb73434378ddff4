//! Background polling -- detects new posts and fans them out.

use herald_core::{
    config::Params,
    notification::{render, Notification},
    traits::{Channel, FeedSource, UserStore},
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Background task: poll every tracked account forever.
///
/// One cycle visits each account in configured order, then sleeps for the
/// configured interval. Errors never escape a cycle; the loop must outlive
/// any transient API or database outage.
pub(super) async fn poll_loop(
    store: Arc<dyn UserStore>,
    feed: Arc<dyn FeedSource>,
    channel: Arc<dyn Channel>,
    params: Params,
) {
    loop {
        run_cycle(
            store.as_ref(),
            feed.as_ref(),
            channel.as_ref(),
            &params.users,
            &params.channels,
        )
        .await;

        debug!("poll cycle done, sleeping {}s", params.interval_secs);
        tokio::time::sleep(std::time::Duration::from_secs(params.interval_secs)).await;
    }
}

/// One pass over all tracked accounts.
///
/// Per account: read the stored id and fetch the latest post; when the id
/// changed, record it and announce to every destination channel. An error
/// anywhere skips that account only; a failed send skips that channel only.
pub(super) async fn run_cycle(
    store: &dyn UserStore,
    feed: &dyn FeedSource,
    channel: &dyn Channel,
    users: &[String],
    channels: &[String],
) {
    for username in users {
        let stored = match store.last_post_id(username).await {
            Ok(id) => id.unwrap_or_default(),
            Err(e) => {
                error!("failed to read stored id for '{username}': {e}");
                continue;
            }
        };

        let post = match feed.latest_post(username).await {
            Ok(post) => post,
            Err(e) => {
                warn!("failed to fetch latest post for '{username}': {e}");
                continue;
            }
        };

        // An empty stored id never equals a real one, so the first post seen
        // for a freshly tracked account is always announced once.
        if post.id == stored {
            debug!("'{username}' has nothing new");
            continue;
        }

        // The new id must be durable before any send goes out: a crash mid
        // fan-out must not re-announce the post on restart.
        if let Err(e) = store.set_last_post_id(username, &post.id).await {
            error!("failed to record post {} for '{username}': {e}", post.id);
            continue;
        }

        let notification = render(&post);
        let delivered = fan_out(channel, channels, &post.id, &notification).await;
        if delivered > 0 {
            info!(
                "announced post {} by '{username}' to {delivered} of {} channels",
                post.id,
                channels.len()
            );
        } else if !channels.is_empty() {
            warn!("post {} by '{username}' reached no channels", post.id);
        }
    }
}

/// Deliver one announcement to every destination channel, in order. Returns
/// the number of sends that succeeded; each failure is logged and skipped.
pub(super) async fn fan_out(
    channel: &dyn Channel,
    channels: &[String],
    post_id: &str,
    notification: &Notification,
) -> usize {
    let mut delivered = 0;
    for channel_id in channels {
        match channel.send_notification(channel_id, notification).await {
            Ok(()) => delivered += 1,
            Err(e) => error!("failed to announce post {post_id} in {channel_id}: {e}"),
        }
    }
    delivered
}
