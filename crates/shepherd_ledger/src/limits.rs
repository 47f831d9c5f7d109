//! Configured usage ceilings.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use shepherd_error::ConfigError;

/// Monthly and daily ceilings for post and read units.
///
/// Defaults match the X free tier: 500 posts and 100 reads a month, spread
/// as 17 posts and 4 reads a day.
///
/// # Examples
///
/// ```
/// use shepherd_ledger::{UsageLimits, UsageLimitsBuilder};
///
/// let limits = UsageLimitsBuilder::default()
///     .daily_post_limit(10u32)
///     .build()
///     .expect("Valid limits");
///
/// assert_eq!(*limits.monthly_post_limit(), 500);
/// assert_eq!(*limits.daily_post_limit(), 10);
/// assert!(limits.validate().expect("Valid").is_empty());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder,
)]
#[builder(setter(into), default)]
pub struct UsageLimits {
    /// Post units allowed per billing month.
    #[serde(default = "default_monthly_post_limit")]
    monthly_post_limit: u32,

    /// Read units allowed per billing month.
    #[serde(default = "default_monthly_read_limit")]
    monthly_read_limit: u32,

    /// Post units allowed per calendar day.
    #[serde(default = "default_daily_post_limit")]
    daily_post_limit: u32,

    /// Read units allowed per calendar day.
    #[serde(default = "default_daily_read_limit")]
    daily_read_limit: u32,

    /// Length of the verse threads the routine composes.
    #[serde(default = "default_posts_per_thread")]
    posts_per_thread: u32,
}

fn default_monthly_post_limit() -> u32 {
    500
}

fn default_monthly_read_limit() -> u32 {
    100
}

fn default_daily_post_limit() -> u32 {
    17
}

fn default_daily_read_limit() -> u32 {
    4
}

fn default_posts_per_thread() -> u32 {
    2
}

impl Default for UsageLimits {
    fn default() -> Self {
        Self {
            monthly_post_limit: default_monthly_post_limit(),
            monthly_read_limit: default_monthly_read_limit(),
            daily_post_limit: default_daily_post_limit(),
            daily_read_limit: default_daily_read_limit(),
            posts_per_thread: default_posts_per_thread(),
        }
    }
}

impl UsageLimits {
    /// Check the limits for contradictions.
    ///
    /// # Returns
    ///
    /// Warnings for settings that are legal but probably unintended.
    ///
    /// # Errors
    ///
    /// Returns error if `posts_per_thread` is zero.
    #[tracing::instrument(skip(self))]
    pub fn validate(&self) -> Result<Vec<String>, ConfigError> {
        if self.posts_per_thread == 0 {
            return Err(ConfigError::new("posts_per_thread must be at least 1"));
        }

        let mut warnings = Vec::new();

        if self.daily_post_limit > self.monthly_post_limit {
            warnings.push(format!(
                "daily_post_limit ({}) exceeds monthly_post_limit ({})",
                self.daily_post_limit, self.monthly_post_limit
            ));
        }

        if self.daily_read_limit > self.monthly_read_limit {
            warnings.push(format!(
                "daily_read_limit ({}) exceeds monthly_read_limit ({})",
                self.daily_read_limit, self.monthly_read_limit
            ));
        }

        if self.monthly_post_limit == 0 || self.daily_post_limit == 0 {
            warnings.push("Post limit is 0, nothing will be posted".to_string());
        }

        if self.monthly_read_limit == 0 || self.daily_read_limit == 0 {
            warnings.push("Read limit is 0, interaction passes will be skipped".to_string());
        }

        if self.posts_per_thread > self.daily_post_limit {
            warnings.push(format!(
                "posts_per_thread ({}) exceeds daily_post_limit ({}), threads can never be admitted",
                self.posts_per_thread, self.daily_post_limit
            ));
        }

        tracing::debug!(warnings = warnings.len(), "Usage limits validated");
        Ok(warnings)
    }
}
