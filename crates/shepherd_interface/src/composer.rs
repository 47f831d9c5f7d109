//! Post body composition.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shepherd_core::{FetchedPost, Theme, Thread};
use shepherd_error::SourceResult;

/// Renders the bodies the daily routine and interaction pass publish.
///
/// Composition may call out to verse or market sources. Any failure means the
/// corresponding action is not attempted and consumes no quota.
#[async_trait]
pub trait ContentComposer: Send + Sync {
    /// Bilingual verse thread for the weekday theme of `now`.
    async fn morning_thread(&self, now: DateTime<Utc>) -> SourceResult<Thread>;

    /// Bilingual ecosystem news thread.
    async fn ecosystem_news_thread(&self) -> SourceResult<Thread>;

    /// Bilingual thread listing trending ecosystem tokens.
    async fn trending_coins_thread(&self) -> SourceResult<Thread>;

    /// Bilingual thread of upcoming projects grouped by backer.
    async fn upcoming_projects_thread(&self) -> SourceResult<Thread>;

    /// Bilingual market summary thread.
    async fn market_thread(&self) -> SourceResult<Thread>;

    /// Ecosystem insight post.
    async fn insight(&self) -> SourceResult<String>;

    /// Security tip post.
    async fn tip(&self) -> SourceResult<String>;

    /// Educational post.
    async fn educational(&self) -> SourceResult<String>;

    /// Bilingual verse thread themed on current market conditions.
    async fn themed_verse_thread(&self) -> SourceResult<Thread>;

    /// Reply to `post` built around a verse for `theme`.
    async fn reply_text(&self, post: &FetchedPost, theme: Theme) -> SourceResult<String>;
}
