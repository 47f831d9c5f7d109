//! X API v2 request and response bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct CreatePostRequest<'a> {
    pub(crate) text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) reply: Option<ReplySettings<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ReplySettings<'a> {
    pub(crate) in_reply_to_tweet_id: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatePostResponse {
    pub(crate) data: Option<CreatedPost>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatedPost {
    pub(crate) id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TimelineResponse {
    #[serde(default)]
    pub(crate) data: Vec<TimelinePost>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TimelinePost {
    pub(crate) id: String,
    #[serde(default)]
    pub(crate) text: String,
    #[serde(default)]
    pub(crate) created_at: Option<DateTime<Utc>>,
}
