//! Verse themes and routine action kinds.

use serde::{Deserialize, Serialize};

/// Biblical theme used to pick a verse.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Theme {
    /// Hope and encouragement.
    Hope,
    /// Wisdom and judgment.
    Wisdom,
    /// Endurance through difficulty.
    Perseverance,
    /// Trust and belief.
    Faith,
    /// Love and compassion.
    Love,
    /// Calm and peace.
    Peace,
    /// Thankfulness.
    Gratitude,
    /// Strength in hardship.
    Strength,
    /// Joy.
    Joy,
    /// Grace.
    Grace,
    /// Patience while waiting.
    Patience,
    /// Financial loss and downturns.
    MarketCrash,
    /// Digital assets and speculation.
    Crypto,
    /// Money and stewardship.
    Finance,
}

/// Kinds of actions a daily routine performs, in routine order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    /// Bilingual verse thread for the weekday theme.
    MorningThread,
    /// Bilingual ecosystem news thread.
    EcosystemNews,
    /// Bilingual thread of trending BSC tokens.
    TrendingCoins,
    /// Bilingual thread of upcoming ecosystem projects.
    UpcomingProjects,
    /// Bilingual market summary thread.
    MarketUpdate,
    /// Ecosystem insight post.
    Insight,
    /// Security tip post.
    Tip,
    /// Educational post.
    Educational,
    /// Bilingual verse thread chosen from market conditions.
    ThemedVerseThread,
    /// Replies to target accounts.
    Interaction,
}
