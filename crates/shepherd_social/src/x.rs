//! X (Twitter) API v2 client.

use crate::text::truncate_for_post;
use crate::wire::{CreatePostRequest, CreatePostResponse, ReplySettings, TimelineResponse};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shepherd_core::{AccountId, FetchedPost, PostId};
use shepherd_error::{PlatformError, PlatformErrorKind, PlatformResult};
use shepherd_interface::SocialClient;
use tracing::{debug, error, instrument, warn};

/// Public X API endpoint.
pub const X_API_BASE_URL: &str = "https://api.x.com";

const MIN_RESULTS: u32 = 5;
const MAX_RESULTS: u32 = 100;
const MAX_ERROR_BODY: usize = 512;

/// X API v2 client authenticated with an OAuth 2.0 user-context bearer token.
///
/// Each method issues exactly one request. Timeouts and quota accounting are
/// handled by the caller.
#[derive(Clone)]
pub struct XClient {
    client: Client,
    base_url: String,
    bearer_token: String,
}

impl std::fmt::Debug for XClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl XClient {
    /// Client for the public API.
    pub fn new(bearer_token: impl Into<String>) -> Self {
        Self::with_base_url(bearer_token, X_API_BASE_URL)
    }

    /// Client for an alternative endpoint, such as a test server.
    pub fn with_base_url(bearer_token: impl Into<String>, base_url: impl Into<String>) -> Self {
        debug!("Creating X client");
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bearer_token: bearer_token.into(),
        }
    }

    async fn create_post(&self, text: &str, reply_to: Option<&PostId>) -> PlatformResult<PostId> {
        let text = truncate_for_post(text);
        let body = CreatePostRequest {
            text: &text,
            reply: reply_to.map(|id| ReplySettings {
                in_reply_to_tweet_id: id.as_str(),
            }),
        };

        let response = self
            .client
            .post(format!("{}/2/tweets", self.base_url))
            .bearer_auth(&self.bearer_token)
            .json(&body)
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        if status != StatusCode::CREATED && status != StatusCode::OK {
            return Err(status_error(status, response).await);
        }

        let created: CreatePostResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse create post response");
            PlatformError::new(PlatformErrorKind::MalformedResponse(e.to_string()))
        })?;

        created
            .data
            .and_then(|data| data.id)
            .map(PostId)
            .ok_or_else(|| {
                PlatformError::new(PlatformErrorKind::MalformedResponse(
                    "response carries no data.id".to_string(),
                ))
            })
    }
}

#[async_trait]
impl SocialClient for XClient {
    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    async fn post(&self, text: &str) -> PlatformResult<PostId> {
        let id = self.create_post(text, None).await?;
        debug!(id = %id, "Post created");
        Ok(id)
    }

    #[instrument(skip_all, fields(target = %target))]
    async fn reply(&self, target: &PostId, text: &str) -> PlatformResult<PostId> {
        let id = self.create_post(text, Some(target)).await?;
        debug!(id = %id, "Reply created");
        Ok(id)
    }

    #[instrument(skip_all, fields(account = %account, max_count))]
    async fn fetch_recent(
        &self,
        account: &AccountId,
        max_count: u32,
    ) -> PlatformResult<Vec<FetchedPost>> {
        let max_results = max_count.clamp(MIN_RESULTS, MAX_RESULTS);
        let response = self
            .client
            .get(format!("{}/2/users/{}/tweets", self.base_url, account))
            .bearer_auth(&self.bearer_token)
            .query(&[
                ("max_results", max_results.to_string()),
                ("tweet.fields", "created_at".to_string()),
                ("exclude", "retweets,replies".to_string()),
            ])
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(status_error(status, response).await);
        }

        let timeline: TimelineResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse timeline response");
            PlatformError::new(PlatformErrorKind::MalformedResponse(e.to_string()))
        })?;

        let posts = timeline
            .data
            .into_iter()
            .map(|post| FetchedPost::new(PostId(post.id), post.text, post.created_at))
            .collect::<Vec<_>>();
        debug!(count = posts.len(), "Timeline fetched");
        Ok(posts)
    }

    fn platform_name(&self) -> &str {
        "x"
    }
}

fn network_error(e: reqwest::Error) -> PlatformError {
    error!(error = ?e, "Request to X failed");
    PlatformError::new(PlatformErrorKind::Network(e.to_string()))
}

async fn status_error(status: StatusCode, response: reqwest::Response) -> PlatformError {
    let mut body = response.text().await.unwrap_or_default();
    if body.len() > MAX_ERROR_BODY {
        let cut = (0..=MAX_ERROR_BODY)
            .rev()
            .find(|i| body.is_char_boundary(*i))
            .unwrap_or(0);
        body.truncate(cut);
    }
    warn!(status = %status, body = %body, "X API returned error");
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        PlatformError::new(PlatformErrorKind::Authentication(format!(
            "{}: {}",
            status, body
        )))
    } else {
        PlatformError::new(PlatformErrorKind::Status {
            status: status.as_u16(),
            body,
        })
    }
}
