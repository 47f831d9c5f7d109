//! Daily routine plan and report.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use shepherd_core::ActionKind;
use shepherd_ledger::UsageSummary;
use std::collections::BTreeMap;

/// How many of each repeatable action the daily routine runs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder,
)]
#[builder(setter(into), default)]
pub struct RoutinePlan {
    /// Whether the ecosystem news thread runs.
    #[serde(default = "default_enabled")]
    ecosystem_news: bool,
    /// Whether the trending token thread runs.
    #[serde(default = "default_enabled")]
    trending_coins: bool,
    /// Whether the upcoming projects thread runs.
    #[serde(default = "default_enabled")]
    upcoming_projects: bool,
    /// Whether the market update thread runs.
    #[serde(default = "default_enabled")]
    market_update: bool,
    /// Ecosystem insight posts.
    #[serde(default = "default_count")]
    insights: u32,
    /// Security tip posts.
    #[serde(default = "default_count")]
    tips: u32,
    /// Educational posts.
    #[serde(default = "default_count")]
    educational: u32,
    /// Market-themed verse threads.
    #[serde(default = "default_count")]
    themed_verse_threads: u32,
    /// Whether the routine ends with an interaction pass.
    #[serde(default = "default_enabled")]
    interactions: bool,
}

fn default_count() -> u32 {
    2
}

fn default_enabled() -> bool {
    true
}

impl Default for RoutinePlan {
    fn default() -> Self {
        Self {
            ecosystem_news: default_enabled(),
            trending_coins: default_enabled(),
            upcoming_projects: default_enabled(),
            market_update: default_enabled(),
            insights: default_count(),
            tips: default_count(),
            educational: default_count(),
            themed_verse_threads: default_count(),
            interactions: default_enabled(),
        }
    }
}

impl RoutinePlan {
    /// Upper bound on post units a full routine may consume, excluding replies.
    pub fn post_units(&self, posts_per_thread: u32) -> u32 {
        let headlines = [
            self.ecosystem_news,
            self.trending_coins,
            self.upcoming_projects,
            self.market_update,
        ]
        .into_iter()
        .filter(|enabled| *enabled)
        .count() as u32;
        let threads = 1 + headlines + self.themed_verse_threads;
        threads * posts_per_thread + self.insights + self.tips + self.educational
    }
}

/// How one kind of action fared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct KindTally {
    /// Actions that were composed and sent to the platform.
    attempted: u32,
    /// Attempts that fully succeeded.
    succeeded: u32,
    /// Attempts that failed or went out partially.
    failed: u32,
    /// Actions skipped because quota was exhausted.
    skipped: u32,
}

/// Classification of one routine step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The action completed.
    Succeeded,
    /// The action was attempted and did not complete.
    Failed,
    /// The action was not attempted for lack of quota.
    Skipped,
}

/// Outcome of one daily routine, for logs and the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct RoutineReport {
    /// When the routine started.
    started_at: DateTime<Utc>,
    /// When the routine finished.
    finished_at: DateTime<Utc>,
    /// Tallies per action kind.
    tallies: BTreeMap<ActionKind, KindTally>,
    /// Replies sent by the interaction pass.
    replies: u32,
    /// Ledger before the first action.
    usage_before: UsageSummary,
    /// Ledger after the last action.
    usage_after: UsageSummary,
}

impl RoutineReport {
    pub(crate) fn new(started_at: DateTime<Utc>, usage_before: UsageSummary) -> Self {
        Self {
            started_at,
            finished_at: started_at,
            tallies: BTreeMap::new(),
            replies: 0,
            usage_after: usage_before.clone(),
            usage_before,
        }
    }

    pub(crate) fn record(&mut self, kind: ActionKind, outcome: StepOutcome) {
        let tally = self.tallies.entry(kind).or_default();
        match outcome {
            StepOutcome::Succeeded => {
                tally.attempted += 1;
                tally.succeeded += 1;
            }
            StepOutcome::Failed => {
                tally.attempted += 1;
                tally.failed += 1;
            }
            StepOutcome::Skipped => tally.skipped += 1,
        }
    }

    pub(crate) fn record_replies(&mut self, replies: u32) {
        self.replies = replies;
        let tally = self.tallies.entry(ActionKind::Interaction).or_default();
        tally.attempted += replies;
        tally.succeeded += replies;
    }

    pub(crate) fn finish(&mut self, finished_at: DateTime<Utc>, usage_after: UsageSummary) {
        self.finished_at = finished_at;
        self.usage_after = usage_after;
    }

    /// Tally for `kind`, zero when it never ran.
    pub fn tally(&self, kind: ActionKind) -> KindTally {
        self.tallies.get(&kind).copied().unwrap_or_default()
    }

    /// Total successful actions across kinds, counting each reply once.
    pub fn total_succeeded(&self) -> u32 {
        self.tallies.values().map(|t| t.succeeded).sum()
    }
}

impl std::fmt::Display for RoutineReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Daily routine {}", self.started_at.format("%Y-%m-%d %H:%M UTC"))?;
        for (kind, tally) in &self.tallies {
            writeln!(
                f,
                "  {:<20} {} ok, {} failed, {} skipped",
                kind.to_string(),
                tally.succeeded,
                tally.failed,
                tally.skipped
            )?;
        }
        writeln!(f, "  replies: {}", self.replies)?;
        write!(f, "{}", self.usage_after)
    }
}
