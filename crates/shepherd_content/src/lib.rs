//! Content collaborators for the Shepherd posting bot.
//!
//! - [`BibleApiClient`] looks verses up in English and Chinese on bible-api.com.
//! - [`CoinGeckoClient`] reads token prices and trending BSC tokens.
//! - [`KeywordThemeSelector`] and, with the `ollama` feature,
//!   `OllamaThemeSelector` decide which posts to answer and with what theme.
//! - [`RoutineComposer`] turns all of the above into post bodies.
//!
//! # Example
//!
//! ```
//! use shepherd_content::{VerseReference, keyword_theme, market_theme};
//! use shepherd_core::Theme;
//!
//! let reference = VerseReference::parse("1 Corinthians 13:4-7").unwrap();
//! assert_eq!(reference.chinese(), "哥林多前书 13:4-7");
//!
//! assert_eq!(keyword_theme("Bitcoin is up again"), Theme::Crypto);
//! assert_eq!(market_theme(-7.5), Theme::Perseverance);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod bible;
mod composer;
mod market;
#[cfg(feature = "ollama")]
mod ollama;
mod reference;
mod tables;
mod themes;

pub use bible::{BIBLE_API_BASE_URL, BibleApiClient};
pub use composer::{
    DEFAULT_TOKEN_ID, RoutineComposer, TRENDING_LIMIT, chinese_market_post, chinese_news_post,
    chinese_projects_post, chinese_trending_post, market_post, news_post, projects_post,
    trending_post,
};
pub use market::{
    COINGECKO_BASE_URL, CoinGeckoClient, format_coin_price, format_price, group_thousands,
    market_theme,
};
#[cfg(feature = "ollama")]
pub use ollama::OllamaThemeSelector;
pub use reference::{VerseReference, book_key, chinese_book_name};
pub use tables::{
    BSC_TOKENS, Backer, FALLBACK_CHINESE_POST, FALLBACK_ENGLISH_POST, FALLBACK_VERSES, INSIGHTS,
    NEWS_ITEMS, NewsItem, PROJECTS, Project, SECURITY_TIPS, TOPICS, Topic, daily_theme,
    morning_verse, theme_verses,
};
pub use themes::{KeywordThemeSelector, keyword_eligible, keyword_theme};
