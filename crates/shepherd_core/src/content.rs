//! Values returned by the verse and market collaborators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One verse in English and Chinese.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct BilingualVerse {
    /// English reference, e.g. `John 3:16`.
    reference: String,
    /// English text.
    english: String,
    /// Chinese reference, e.g. `约翰福音 3:16`.
    chinese_reference: String,
    /// Chinese text.
    chinese: String,
}

impl BilingualVerse {
    /// Verse from its two references and texts.
    pub fn new(
        reference: impl Into<String>,
        english: impl Into<String>,
        chinese_reference: impl Into<String>,
        chinese: impl Into<String>,
    ) -> Self {
        Self {
            reference: reference.into(),
            english: english.into(),
            chinese_reference: chinese_reference.into(),
            chinese: chinese.into(),
        }
    }

    /// English post body: text followed by the reference.
    pub fn english_post(&self) -> String {
        format!("{}\n\n— {}", self.english, self.reference)
    }

    /// Chinese post body: text followed by the Chinese reference.
    pub fn chinese_post(&self) -> String {
        format!("{}\n\n— {}", self.chinese, self.chinese_reference)
    }
}

/// Market data for one token.
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters, derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct MarketSnapshot {
    /// Market data provider's token id, e.g. `binancecoin`.
    token_id: String,
    /// Price in USD.
    price_usd: f64,
    /// Percentage change over 24 hours.
    change_24h_pct: f64,
    /// Traded volume over 24 hours in USD.
    volume_24h_usd: f64,
    /// When the snapshot was taken.
    #[builder(default = "chrono::Utc::now()")]
    fetched_at: DateTime<Utc>,
}

impl MarketSnapshot {
    /// Snapshot taken at `fetched_at`.
    pub fn new(
        token_id: impl Into<String>,
        price_usd: f64,
        change_24h_pct: f64,
        volume_24h_usd: f64,
        fetched_at: DateTime<Utc>,
    ) -> Self {
        Self {
            token_id: token_id.into(),
            price_usd,
            change_24h_pct,
            volume_24h_usd,
            fetched_at,
        }
    }
}

/// A token in a trending list, with its market data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct TrendingCoin {
    /// Market data provider's token id.
    id: String,
    /// Display name.
    name: String,
    /// Upper-case ticker.
    symbol: String,
    /// Price in USD.
    price_usd: f64,
    /// Percentage change over 24 hours.
    change_24h_pct: f64,
    /// Rank by market capitalisation, when known.
    market_cap_rank: Option<u32>,
}

impl TrendingCoin {
    /// Trending entry for `id`.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        symbol: impl Into<String>,
        price_usd: f64,
        change_24h_pct: f64,
        market_cap_rank: Option<u32>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            symbol: symbol.into().to_uppercase(),
            price_usd,
            change_24h_pct,
            market_cap_rank,
        }
    }
}
