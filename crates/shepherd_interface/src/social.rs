//! Social platform transport.

use async_trait::async_trait;
use shepherd_core::{AccountId, FetchedPost, PostId};
use shepherd_error::PlatformResult;

/// Transport for posting to and reading from a social platform.
///
/// Implementations perform exactly one platform request per call and never
/// retry. Quota accounting happens above this trait.
#[async_trait]
pub trait SocialClient: Send + Sync {
    /// Publish a standalone post.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The network request fails
    /// - The platform answers with an unexpected status
    /// - The response carries no post id
    async fn post(&self, text: &str) -> PlatformResult<PostId>;

    /// Publish a post as a reply to `target`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`SocialClient::post`].
    async fn reply(&self, target: &PostId, text: &str) -> PlatformResult<PostId>;

    /// Read up to `max_count` recent posts from `account`, newest first.
    ///
    /// An empty vector means the account had nothing to return; failures are
    /// reported as errors, never as an empty result.
    async fn fetch_recent(
        &self,
        account: &AccountId,
        max_count: u32,
    ) -> PlatformResult<Vec<FetchedPost>>;

    /// Short platform name for logs.
    fn platform_name(&self) -> &str;
}
