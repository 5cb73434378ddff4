//! Tests for the Twitter client module.

use super::types::*;

const SHOW_JSON: &str = r#"{
    "id_str": "1050118621198921728",
    "full_text": "To make room for more expression, we will now count all emojis as equal.",
    "created_at": "Wed Oct 10 20:19:24 +0000 2018",
    "retweet_count": 12,
    "favorite_count": 175,
    "user": {
        "name": "Twitter API",
        "screen_name": "TwitterAPI",
        "profile_image_url_https": "https://pbs.twimg.com/profile_images/942858479592005632/BcvqmYMT_normal.jpg"
    },
    "entities": {
        "hashtags": [],
        "media": [
            {
                "media_url_https": "https://pbs.twimg.com/media/DpB1VMdV4AAqdWT.jpg",
                "type": "photo"
            }
        ]
    }
}"#;

#[test]
fn test_timeline_entry_parse() {
    let json = r#"[{"id_str": "1050118621198921728", "text": "truncated..."}]"#;
    let timeline: Vec<TweetRef> = serde_json::from_str(json).unwrap();
    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline[0].id_str, "1050118621198921728");
}

#[test]
fn test_empty_timeline_parse() {
    let timeline: Vec<TweetRef> = serde_json::from_str("[]").unwrap();
    assert!(timeline.is_empty());
}

#[test]
fn test_tweet_parse_and_into_post() {
    let tweet: Tweet = serde_json::from_str(SHOW_JSON).unwrap();
    let post = tweet.into_post().unwrap();

    assert_eq!(post.id, "1050118621198921728");
    assert_eq!(post.author_name, "Twitter API");
    assert_eq!(post.author_handle, "TwitterAPI");
    assert_eq!(
        post.permalink,
        "https://twitter.com/TwitterAPI/status/1050118621198921728"
    );
    assert!(post.body.starts_with("To make room"));
    assert_eq!(post.retweets, 12);
    assert_eq!(post.favorites, 175);
    assert_eq!(
        post.media_url.as_deref(),
        Some("https://pbs.twimg.com/media/DpB1VMdV4AAqdWT.jpg")
    );
    assert_eq!(post.created_at.to_rfc3339(), "2018-10-10T20:19:24+00:00");
}

#[test]
fn test_into_post_without_media() {
    let json = r#"{
        "id_str": "42",
        "text": "plain tweet",
        "created_at": "Mon Jan 06 08:00:00 +0000 2020",
        "user": {"name": "Alice", "screen_name": "alice"}
    }"#;
    let tweet: Tweet = serde_json::from_str(json).unwrap();
    let post = tweet.into_post().unwrap();

    assert!(post.media_url.is_none());
    assert_eq!(post.body, "plain tweet");
    assert_eq!(post.retweets, 0, "missing counts default to zero");
    assert_eq!(post.author_avatar_url, "", "missing avatar becomes empty");
}

#[test]
fn test_full_text_preferred_over_text() {
    let json = r#"{
        "id_str": "7",
        "full_text": "the whole thing",
        "text": "the whole…",
        "created_at": "Mon Jan 06 08:00:00 +0000 2020",
        "user": {"name": "A", "screen_name": "a"}
    }"#;
    let tweet: Tweet = serde_json::from_str(json).unwrap();
    assert_eq!(tweet.into_post().unwrap().body, "the whole thing");
}

#[test]
fn test_unparseable_created_at_is_an_error() {
    let json = r#"{
        "id_str": "7",
        "text": "x",
        "created_at": "not a date",
        "user": {"name": "A", "screen_name": "a"}
    }"#;
    let tweet: Tweet = serde_json::from_str(json).unwrap();
    let err = tweet.into_post().unwrap_err();
    assert!(err.to_string().contains("created_at"));
}

#[test]
fn test_bearer_token_parse() {
    let json = r#"{"token_type": "bearer", "access_token": "AAAA%2FAAA"}"#;
    let token: BearerToken = serde_json::from_str(json).unwrap();
    assert_eq!(token.access_token, "AAAA%2FAAA");
}
