//! Dispatcher tuning.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timeouts and pacing for the dispatcher.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use shepherd_dispatch::DispatchSettingsBuilder;
///
/// let settings = DispatchSettingsBuilder::default()
///     .thread_post_delay_millis(0u64)
///     .build()
///     .expect("Valid settings");
///
/// assert_eq!(settings.transport_timeout(), Duration::from_secs(30));
/// assert_eq!(settings.thread_post_delay(), Duration::ZERO);
/// assert!(settings.max_post_age().is_none());
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder,
)]
#[builder(setter(into), default)]
pub struct DispatchSettings {
    /// Upper bound on a single social platform call.
    #[serde(default = "default_transport_timeout_secs")]
    transport_timeout_secs: u64,

    /// Pause between consecutive posts of a thread.
    #[serde(default = "default_thread_post_delay_millis")]
    thread_post_delay_millis: u64,

    /// Posts requested per account during an interaction pass.
    #[serde(default = "default_fetch_count")]
    fetch_count: u32,

    /// Skip fetched posts older than this many hours.
    #[serde(default)]
    max_post_age_hours: Option<u64>,
}

fn default_transport_timeout_secs() -> u64 {
    30
}

fn default_thread_post_delay_millis() -> u64 {
    1000
}

fn default_fetch_count() -> u32 {
    5
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            transport_timeout_secs: default_transport_timeout_secs(),
            thread_post_delay_millis: default_thread_post_delay_millis(),
            fetch_count: default_fetch_count(),
            max_post_age_hours: None,
        }
    }
}

impl DispatchSettings {
    /// Transport timeout as a duration.
    pub fn transport_timeout(&self) -> Duration {
        Duration::from_secs(self.transport_timeout_secs)
    }

    /// Thread pause as a duration.
    pub fn thread_post_delay(&self) -> Duration {
        Duration::from_millis(self.thread_post_delay_millis)
    }

    /// Maximum age of a post worth replying to.
    pub fn max_post_age(&self) -> Option<chrono::Duration> {
        self.max_post_age_hours
            .and_then(|hours| i64::try_from(hours).ok())
            .map(chrono::Duration::hours)
    }

    /// Check the settings for values that are legal but probably unintended.
    #[tracing::instrument(skip(self))]
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.transport_timeout_secs == 0 {
            warnings.push("transport_timeout_secs is 0, every call will time out".to_string());
        }

        if self.fetch_count == 0 {
            warnings.push("fetch_count is 0, interaction passes find nothing".to_string());
        }

        if self.max_post_age_hours == Some(0) {
            warnings.push("max_post_age_hours is 0, every post counts as stale".to_string());
        }

        tracing::debug!(warnings = warnings.len(), "Dispatch settings validated");
        warnings
    }
}
