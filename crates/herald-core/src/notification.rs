use crate::post::Post;

/// Accent color for announcement embeds.
pub const ACCENT_COLOR: u32 = 0xFF0000;

/// A rendered announcement, ready for a channel to deliver.
///
/// Produced once per delivered post and consumed by the fan-out; channels map
/// it onto their own wire format.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// The author's display name.
    pub title: String,
    /// Author line: `Name (@handle)`.
    pub author_name: String,
    /// Link target for the author line: the post permalink.
    pub author_url: String,
    pub author_icon_url: String,
    /// The post body.
    pub body: String,
    /// First attached image, when the post carries media.
    pub image_url: Option<String>,
    pub color: u32,
    /// Post date and engagement counts, pipe-separated.
    pub footer: String,
}

/// Render a post into an announcement.
///
/// Never fails for a well-formed post: media only adds the image and a footer
/// marker.
pub fn render(post: &Post) -> Notification {
    let created = post.created_at.format("%a %b %d %H:%M:%S %z %Y");
    let mut footer = format!(
        "{}   |   {}  🔄   |   {}  ❤",
        created, post.retweets, post.favorites
    );
    if post.media_url.is_some() {
        footer.push_str("   |   media");
    }

    Notification {
        title: post.author_name.clone(),
        author_name: format!("{} (@{})", post.author_name, post.author_handle),
        author_url: post.permalink.clone(),
        author_icon_url: post.author_avatar_url.clone(),
        body: post.body.clone(),
        image_url: post.media_url.clone(),
        color: ACCENT_COLOR,
        footer,
    }
}
