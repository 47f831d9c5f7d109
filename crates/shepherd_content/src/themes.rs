//! Keyword theme detection.

use async_trait::async_trait;
use shepherd_core::Theme;
use shepherd_interface::ThemeSelector;
use tracing::debug;

/// Keyword groups checked in order; the first group with a hit wins.
const THEME_KEYWORDS: &[(Theme, &[&str])] = &[
    (Theme::MarketCrash, &["crash", "drop", "fall", "bear", "recession"]),
    (Theme::Crypto, &["bitcoin", "crypto", "blockchain", "ethereum"]),
    (Theme::Finance, &["market", "trading", "investment", "finance"]),
    (Theme::Hope, &["hope", "optimistic", "bullish", "recovery"]),
    (Theme::Wisdom, &["wisdom", "learn", "insight", "knowledge"]),
    (Theme::Perseverance, &["persevere", "patience", "endure", "difficult"]),
    (Theme::Faith, &["faith", "believe", "trust", "confidence"]),
    (Theme::Love, &["love", "care", "compassion", "kindness"]),
    (Theme::Peace, &["peace", "calm", "serene", "tranquil"]),
    (Theme::Gratitude, &["thank", "grateful", "blessed", "appreciate"]),
];

/// Topics that make a post worth answering.
const ELIGIBILITY_KEYWORDS: &[&str] = &[
    "market",
    "crypto",
    "bitcoin",
    "finance",
    "trading",
    "investment",
    "business",
];

/// Theme from keyword matches, defaulting to wisdom.
pub fn keyword_theme(text: &str) -> Theme {
    let text = text.to_lowercase();
    THEME_KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|word| text.contains(word)))
        .map(|(theme, _)| *theme)
        .unwrap_or(Theme::Wisdom)
}

/// Whether `text` mentions a market or finance topic.
pub fn keyword_eligible(text: &str) -> bool {
    let text = text.to_lowercase();
    ELIGIBILITY_KEYWORDS.iter().any(|word| text.contains(word))
}

/// Selector that relies on keyword matching alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordThemeSelector;

#[async_trait]
impl ThemeSelector for KeywordThemeSelector {
    async fn classify(&self, text: &str) -> Theme {
        let theme = keyword_theme(text);
        debug!(theme = %theme, "Keyword theme");
        theme
    }

    async fn is_eligible(&self, text: &str) -> bool {
        keyword_eligible(text)
    }
}
