//! Transport that logs instead of publishing.

use async_trait::async_trait;
use shepherd_core::{AccountId, FetchedPost, PostId};
use shepherd_error::PlatformResult;
use shepherd_interface::SocialClient;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

/// Accepts every post and returns synthetic ids; reads return nothing.
#[derive(Debug, Default)]
pub struct DryRunClient {
    next_id: AtomicU64,
}

impl DryRunClient {
    /// New client.
    pub fn new() -> Self {
        Self::default()
    }

    fn next(&self) -> PostId {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed);
        PostId::new(format!("dry-run-{}", n))
    }
}

#[async_trait]
impl SocialClient for DryRunClient {
    async fn post(&self, text: &str) -> PlatformResult<PostId> {
        let id = self.next();
        info!(id = %id, text, "Dry run: would post");
        Ok(id)
    }

    async fn reply(&self, target: &PostId, text: &str) -> PlatformResult<PostId> {
        let id = self.next();
        info!(id = %id, target = %target, text, "Dry run: would reply");
        Ok(id)
    }

    async fn fetch_recent(
        &self,
        account: &AccountId,
        max_count: u32,
    ) -> PlatformResult<Vec<FetchedPost>> {
        info!(account = %account, max_count, "Dry run: would fetch recent posts");
        Ok(Vec::new())
    }

    fn platform_name(&self) -> &str {
        "dry-run"
    }
}
