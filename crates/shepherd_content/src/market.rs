//! CoinGecko market data and market-driven themes.

use crate::tables::BSC_TOKENS;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use shepherd_core::{MarketSnapshot, Theme, TrendingCoin};
use shepherd_error::{SourceError, SourceErrorKind, SourceResult};
use shepherd_interface::MarketSource;
use std::collections::HashMap;
use tracing::{debug, error, instrument, warn};

/// Public CoinGecko API endpoint.
pub const COINGECKO_BASE_URL: &str = "https://api.coingecko.com/api/v3";

#[derive(Debug, Deserialize)]
struct PriceEntry {
    usd: f64,
    #[serde(default)]
    usd_24h_change: Option<f64>,
    #[serde(default)]
    usd_24h_vol: Option<f64>,
}

/// Reads spot prices from `/simple/price` and trending BSC tokens from
/// `/search/trending` and `/coins/markets`.
#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    client: Client,
    base_url: String,
}

impl Default for CoinGeckoClient {
    fn default() -> Self {
        Self::new(COINGECKO_BASE_URL)
    }
}

impl CoinGeckoClient {
    /// Client for `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TrendingResponse {
    #[serde(default)]
    coins: Vec<TrendingEntry>,
}

#[derive(Debug, Deserialize)]
struct TrendingEntry {
    item: TrendingItem,
}

#[derive(Debug, Deserialize)]
struct TrendingItem {
    id: String,
}

#[derive(Debug, Deserialize)]
struct MarketEntry {
    id: String,
    name: String,
    symbol: String,
    #[serde(default)]
    current_price: Option<f64>,
    #[serde(default)]
    price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    market_cap_rank: Option<u32>,
}

impl MarketEntry {
    fn into_coin(self) -> Option<TrendingCoin> {
        let price = self.current_price?;
        Some(TrendingCoin::new(
            self.id,
            self.name,
            self.symbol,
            price,
            self.price_change_percentage_24h.unwrap_or_default(),
            self.market_cap_rank,
        ))
    }
}

/// Most ids sent in one `/coins/markets` query.
const MARKET_QUERY_IDS: usize = 20;

impl CoinGeckoClient {
    async fn get_json<T: DeserializeOwned>(
        &self,
        route: &str,
        query: &[(&str, String)],
    ) -> SourceResult<T> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, route))
            .query(query)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, route, "Market request failed");
                SourceError::new(SourceErrorKind::Http(e.to_string()))
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, route, "Market service returned error");
            return Err(SourceError::new(SourceErrorKind::Status(status.as_u16())));
        }

        response.json().await.map_err(|e| {
            error!(error = ?e, route, "Failed to parse market response");
            SourceError::new(SourceErrorKind::Malformed(e.to_string()))
        })
    }

    /// Ids of BSC tokens on the trending list, in trending order.
    async fn trending_bsc_ids(&self) -> SourceResult<Vec<String>> {
        let trending: TrendingResponse = self.get_json("/search/trending", &[]).await?;
        Ok(trending
            .coins
            .into_iter()
            .map(|entry| entry.item.id)
            .filter(|id| BSC_TOKENS.contains(&id.as_str()))
            .collect())
    }
}

#[async_trait]
impl MarketSource for CoinGeckoClient {
    #[instrument(skip(self))]
    async fn snapshot(&self, token_id: &str) -> SourceResult<MarketSnapshot> {
        let mut prices: HashMap<String, PriceEntry> = self
            .get_json(
                "/simple/price",
                &[
                    ("ids", token_id.to_string()),
                    ("vs_currencies", "usd".to_string()),
                    ("include_24hr_change", "true".to_string()),
                    ("include_24hr_vol", "true".to_string()),
                ],
            )
            .await?;

        let entry = prices.remove(token_id).ok_or_else(|| {
            SourceError::new(SourceErrorKind::Malformed(format!(
                "no price for {}",
                token_id
            )))
        })?;
        debug!(price = entry.usd, change = ?entry.usd_24h_change, "Market snapshot fetched");

        Ok(MarketSnapshot::new(
            token_id,
            entry.usd,
            entry.usd_24h_change.unwrap_or_default(),
            entry.usd_24h_vol.unwrap_or_default(),
            Utc::now(),
        ))
    }

    /// Trending BSC tokens first, topped up with the largest BSC tokens by
    /// market cap. Prices come from `/coins/markets`.
    #[instrument(skip(self))]
    async fn trending(&self, limit: usize) -> SourceResult<Vec<TrendingCoin>> {
        let trending = self.trending_bsc_ids().await.unwrap_or_else(|e| {
            warn!(error = %e, "Trending list unavailable, using top BSC tokens");
            Vec::new()
        });

        let mut ids: Vec<&str> = trending.iter().map(String::as_str).collect();
        for token in BSC_TOKENS {
            if ids.len() >= MARKET_QUERY_IDS.max(limit) {
                break;
            }
            if !ids.contains(token) {
                ids.push(token);
            }
        }

        let mut entries: Vec<MarketEntry> = self
            .get_json(
                "/coins/markets",
                &[
                    ("vs_currency", "usd".to_string()),
                    ("ids", ids.join(",")),
                    ("order", "market_cap_desc".to_string()),
                    ("per_page", ids.len().to_string()),
                    ("page", "1".to_string()),
                    ("sparkline", "false".to_string()),
                ],
            )
            .await?;

        let mut coins = Vec::with_capacity(limit);
        for id in &trending {
            if let Some(index) = entries.iter().position(|entry| &entry.id == id) {
                coins.extend(entries.remove(index).into_coin());
            }
        }
        coins.extend(entries.into_iter().filter_map(MarketEntry::into_coin));
        coins.truncate(limit);

        debug!(count = coins.len(), trending = trending.len(), "Trending tokens fetched");
        Ok(coins)
    }
}

/// Theme matching a 24h price change in percent.
pub fn market_theme(change_24h_pct: f64) -> Theme {
    if change_24h_pct > 10.0 {
        Theme::Gratitude
    } else if change_24h_pct > 5.0 {
        Theme::Joy
    } else if change_24h_pct > 0.0 {
        Theme::Hope
    } else if change_24h_pct > -5.0 {
        Theme::Patience
    } else if change_24h_pct > -10.0 {
        Theme::Perseverance
    } else {
        Theme::Strength
    }
}

/// Arrow for the direction of a price change.
pub fn trend_marker(change_24h_pct: f64) -> &'static str {
    if change_24h_pct > 0.0 {
        "📈"
    } else if change_24h_pct < 0.0 {
        "📉"
    } else {
        "➡️"
    }
}

/// Price of a trending token: two decimals from $1 up, six below.
pub fn format_coin_price(value: f64) -> String {
    if value >= 1.0 {
        format_price(value)
    } else {
        format!("{:.6}", value)
    }
}

/// `1234567.891` as `1,234,568`.
pub fn group_thousands(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    signed(value, group_digits(&digits))
}

/// `1234.567` as `1,234.57`.
pub fn format_price(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    signed(value, format!("{}.{}", group_digits(whole), cents))
}

fn signed(value: f64, magnitude: String) -> String {
    if value < 0.0 && magnitude.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-{}", magnitude)
    } else {
        magnitude
    }
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(999.4), "999");
        assert_eq!(group_thousands(1_234_567.891), "1,234,568");
        assert_eq!(group_thousands(-12_000.0), "-12,000");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(612.346), "612.35");
        assert_eq!(format_price(1234.5), "1,234.50");
        assert_eq!(format_price(-0.001), "0.00");
    }

    #[test]
    fn test_format_coin_price() {
        assert_eq!(format_coin_price(2345.678), "2,345.68");
        assert_eq!(format_coin_price(0.0123456), "0.012346");
    }
}
