//! Verse, market and theme collaborators.

use async_trait::async_trait;
use shepherd_core::{BilingualVerse, MarketSnapshot, Theme, TrendingCoin};
use shepherd_error::SourceResult;

/// Looks up a verse in English and Chinese.
#[async_trait]
pub trait VerseSource: Send + Sync {
    /// Look up a reference such as `john 3:16` or `1 corinthians 13:4-7`.
    async fn lookup(&self, reference: &str) -> SourceResult<BilingualVerse>;
}

/// Provides current market data for a token.
#[async_trait]
pub trait MarketSource: Send + Sync {
    /// Fetch a snapshot for the provider's token id.
    async fn snapshot(&self, token_id: &str) -> SourceResult<MarketSnapshot>;

    /// Up to `limit` trending tokens of the ecosystem, most relevant first.
    async fn trending(&self, limit: usize) -> SourceResult<Vec<TrendingCoin>>;
}

/// Decides whether a post deserves a reply and which theme fits it.
///
/// Both methods are infallible: implementations fall back to their own
/// defaults when classification fails.
#[async_trait]
pub trait ThemeSelector: Send + Sync {
    /// Pick the theme that best fits `text`.
    async fn classify(&self, text: &str) -> Theme;

    /// Whether `text` is worth replying to.
    async fn is_eligible(&self, text: &str) -> bool;
}
