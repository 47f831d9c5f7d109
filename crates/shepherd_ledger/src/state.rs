//! Persisted ledger state.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Billing month key, `YYYY-MM`.
pub fn month_key(at: DateTime<Utc>) -> String {
    at.format("%Y-%m").to_string()
}

/// Calendar day key, `YYYY-MM-DD`.
pub fn day_key(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// Usage counts as written to disk.
///
/// The monthly totals always equal the sum of the daily entries of the
/// current month. Reservations are units admitted for an in-flight action
/// that have not been settled yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct UsageState {
    /// Billing month the counts belong to.
    month: String,
    /// Post units consumed this month.
    posts_used_this_month: u32,
    /// Read units consumed this month.
    reads_used_this_month: u32,
    /// Post units per day.
    #[serde(default)]
    daily_posts: BTreeMap<String, u32>,
    /// Read units per day.
    #[serde(default)]
    daily_reads: BTreeMap<String, u32>,
    /// When the month last rolled over.
    last_reset: DateTime<Utc>,
    /// Post units reserved for an unsettled action.
    #[serde(default)]
    reserved_posts: u32,
    /// Read units reserved for an unsettled action.
    #[serde(default)]
    reserved_reads: u32,
}

/// Which pair of counters an operation touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Unit {
    /// Post units.
    #[display("posts")]
    Post,
    /// Read units.
    #[display("reads")]
    Read,
}

impl UsageState {
    /// Zero state for the month containing `now`.
    pub fn fresh(now: DateTime<Utc>) -> Self {
        Self {
            month: month_key(now),
            posts_used_this_month: 0,
            reads_used_this_month: 0,
            daily_posts: BTreeMap::new(),
            daily_reads: BTreeMap::new(),
            last_reset: now,
            reserved_posts: 0,
            reserved_reads: 0,
        }
    }

    /// Reset the counters when `now` falls in a later month.
    ///
    /// Returns whether a rollover happened. Daily entries of earlier months
    /// are pruned. A clock that reads an earlier month than the stored one
    /// never reopens that month.
    pub(crate) fn roll_over(&mut self, now: DateTime<Utc>) -> bool {
        let current = month_key(now);
        // `YYYY-MM` keys order chronologically as text.
        if current <= self.month {
            return false;
        }
        let prefix = format!("{}-", current);
        self.daily_posts.retain(|day, _| day.starts_with(&prefix));
        self.daily_reads.retain(|day, _| day.starts_with(&prefix));
        self.month = current;
        self.posts_used_this_month = self.daily_posts.values().sum();
        self.reads_used_this_month = self.daily_reads.values().sum();
        self.last_reset = now;
        true
    }

    /// Day key that usage at `now` is booked under.
    ///
    /// This is the calendar day of `now` while it lies in the stored month.
    /// When the clock reads an earlier month, usage stays in the stored month
    /// on its latest recorded day, or its first day when nothing is recorded.
    pub fn booking_day(&self, now: DateTime<Utc>) -> String {
        let today = day_key(now);
        let prefix = format!("{}-", self.month);
        if today.starts_with(&prefix) {
            return today;
        }
        self.daily_posts
            .keys()
            .chain(self.daily_reads.keys())
            .filter(|day| day.starts_with(&prefix))
            .max()
            .cloned()
            .unwrap_or_else(|| format!("{}01", prefix))
    }

    /// Units consumed this month.
    pub fn used_this_month(&self, unit: Unit) -> u32 {
        match unit {
            Unit::Post => self.posts_used_this_month,
            Unit::Read => self.reads_used_this_month,
        }
    }

    /// Units consumed on the day `day`.
    pub fn used_on(&self, unit: Unit, day: &str) -> u32 {
        self.daily(unit).get(day).copied().unwrap_or(0)
    }

    /// Units currently reserved.
    pub fn reserved(&self, unit: Unit) -> u32 {
        match unit {
            Unit::Post => self.reserved_posts,
            Unit::Read => self.reserved_reads,
        }
    }

    fn daily(&self, unit: Unit) -> &BTreeMap<String, u32> {
        match unit {
            Unit::Post => &self.daily_posts,
            Unit::Read => &self.daily_reads,
        }
    }

    pub(crate) fn consume(&mut self, unit: Unit, day: String, n: u32) {
        let (monthly, daily) = match unit {
            Unit::Post => (&mut self.posts_used_this_month, &mut self.daily_posts),
            Unit::Read => (&mut self.reads_used_this_month, &mut self.daily_reads),
        };
        *monthly = monthly.saturating_add(n);
        let entry = daily.entry(day).or_insert(0);
        *entry = entry.saturating_add(n);
    }

    pub(crate) fn reserve(&mut self, unit: Unit, n: u32) {
        let slot = self.reserved_mut(unit);
        *slot = slot.saturating_add(n);
    }

    pub(crate) fn release(&mut self, unit: Unit, n: u32) {
        let slot = self.reserved_mut(unit);
        *slot = slot.saturating_sub(n);
    }

    /// Convert leftover reservations into consumed units on `day`.
    ///
    /// Returns whether anything was folded.
    pub(crate) fn fold_reservations(&mut self, day: &str) -> bool {
        let posts = std::mem::take(&mut self.reserved_posts);
        let reads = std::mem::take(&mut self.reserved_reads);
        if posts > 0 {
            self.consume(Unit::Post, day.to_string(), posts);
        }
        if reads > 0 {
            self.consume(Unit::Read, day.to_string(), reads);
        }
        posts > 0 || reads > 0
    }

    fn reserved_mut(&mut self, unit: Unit) -> &mut u32 {
        match unit {
            Unit::Post => &mut self.reserved_posts,
            Unit::Read => &mut self.reserved_reads,
        }
    }
}
