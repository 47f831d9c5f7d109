//! The usage ledger and its admission checks.

use crate::{LedgerStore, Unit, UsageLimits, UsageState};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use shepherd_core::Clock;
use shepherd_error::StorageResult;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// When quota is written relative to the external action.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CommitMode {
    /// Record units only after the action succeeds. A crash between the
    /// action and the write may under-count.
    #[default]
    CommitAfter,
    /// Persist a reservation before the action and settle it afterwards.
    /// A reservation left by a crash is counted as used at the next start.
    ReserveThenCommit,
}

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Admission {
    /// The request fits in both windows.
    #[display("granted")]
    Granted,
    /// The monthly window would be exceeded.
    #[display("monthly limit reached ({}/{})", used, limit)]
    MonthlyExhausted {
        /// Units used or reserved this month.
        used: u32,
        /// Monthly limit.
        limit: u32,
    },
    /// The daily window would be exceeded.
    #[display("daily limit reached ({}/{})", used, limit)]
    DailyExhausted {
        /// Units used or reserved today.
        used: u32,
        /// Daily limit.
        limit: u32,
    },
}

impl Admission {
    /// Whether the request was admitted.
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Used and allowed units of one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct WindowUsage {
    /// Units used this month.
    used_this_month: u32,
    /// Monthly limit.
    monthly_limit: u32,
    /// Units used today.
    used_today: u32,
    /// Daily limit.
    daily_limit: u32,
}

impl WindowUsage {
    /// Units left this month.
    pub fn remaining_this_month(&self) -> u32 {
        self.monthly_limit.saturating_sub(self.used_this_month)
    }

    /// Units left today, bounded by what is left this month.
    pub fn remaining_today(&self) -> u32 {
        self.daily_limit
            .saturating_sub(self.used_today)
            .min(self.remaining_this_month())
    }
}

impl std::fmt::Display for WindowUsage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{} this month ({} left), {}/{} today ({} left)",
            self.used_this_month,
            self.monthly_limit,
            self.remaining_this_month(),
            self.used_today,
            self.daily_limit,
            self.remaining_today()
        )
    }
}

/// Point-in-time view of the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct UsageSummary {
    /// Billing month.
    month: String,
    /// Day the daily figures refer to.
    day: String,
    /// Post usage.
    posts: WindowUsage,
    /// Read usage.
    reads: WindowUsage,
}

impl std::fmt::Display for UsageSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Usage for {} (today {})", self.month, self.day)?;
        writeln!(f, "  posts: {}", self.posts)?;
        write!(f, "  reads: {}", self.reads)
    }
}

/// Durable record of post and read units consumed per month and per day.
///
/// Every check and record call first rolls the counters over when the clock
/// has entered a new month. Every mutation is persisted before the call
/// returns.
pub struct UsageLedger {
    limits: UsageLimits,
    mode: CommitMode,
    state: UsageState,
    store: Box<dyn LedgerStore>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for UsageLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsageLedger")
            .field("limits", &self.limits)
            .field("mode", &self.mode)
            .field("state", &self.state)
            .field("store", &self.store.describe())
            .finish_non_exhaustive()
    }
}

impl UsageLedger {
    /// Load the ledger from `store`.
    ///
    /// A missing or unreadable state starts a fresh month at zero. A
    /// reservation left by an interrupted action is counted as used in the
    /// month it was made, before any rollover.
    #[instrument(skip_all, fields(store = %store.describe(), mode = %mode))]
    pub async fn open(
        limits: UsageLimits,
        mode: CommitMode,
        store: Box<dyn LedgerStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let now = clock.now();
        let (mut state, mut dirty) = match store.load().await {
            Ok(Some(state)) => (state, false),
            Ok(None) => {
                info!("No saved usage, starting fresh");
                (UsageState::fresh(now), true)
            }
            Err(e) => {
                warn!(error = %e, "Saved usage unreadable, starting fresh");
                (UsageState::fresh(now), true)
            }
        };

        // Leftover reservations belong to the month that made them, so they
        // are folded before any rollover.
        let (reserved_posts, reserved_reads) =
            (state.reserved(Unit::Post), state.reserved(Unit::Read));
        let booking_day = state.booking_day(now);
        if state.fold_reservations(&booking_day) {
            warn!(
                reserved_posts,
                reserved_reads,
                day = %booking_day,
                "Unsettled reservation found, counted as used"
            );
            dirty = true;
        }

        if state.roll_over(now) {
            info!(month = %state.month(), "New billing month, usage reset");
            dirty = true;
        }

        let ledger = Self {
            limits,
            mode,
            state,
            store,
            clock,
        };
        if dirty {
            if let Err(e) = ledger.persist().await {
                error!(error = %e, "Failed to persist usage after load");
            }
        }
        ledger
    }

    /// Configured limits.
    pub fn limits(&self) -> &UsageLimits {
        &self.limits
    }

    /// Configured commit mode.
    pub fn mode(&self) -> CommitMode {
        self.mode
    }

    /// Current in-memory state.
    pub fn state(&self) -> &UsageState {
        &self.state
    }

    /// Roll the counters over if the clock has entered a new month.
    ///
    /// Returns whether a rollover happened. Calling it again within the
    /// same month is a no-op.
    pub async fn refresh_period(&mut self) -> bool {
        let now = self.clock.now();
        if !self.state.roll_over(now) {
            return false;
        }
        info!(month = %self.state.month(), "New billing month, usage reset");
        if let Err(e) = self.persist().await {
            error!(error = %e, "Failed to persist usage after rollover");
        }
        true
    }

    /// Whether `n` more post units fit in both windows.
    pub async fn can_post(&mut self, n: u32) -> bool {
        self.check_post(n).await.is_granted()
    }

    /// Whether `n` more read units fit in both windows.
    pub async fn can_read(&mut self, n: u32) -> bool {
        self.check_read(n).await.is_granted()
    }

    /// Admission check for `n` post units, naming the window that denied it.
    pub async fn check_post(&mut self, n: u32) -> Admission {
        self.check(Unit::Post, n).await
    }

    /// Admission check for `n` read units, naming the window that denied it.
    pub async fn check_read(&mut self, n: u32) -> Admission {
        self.check(Unit::Read, n).await
    }

    /// Add `n` consumed post units to this month and today, then persist.
    ///
    /// Limits are not checked. When persisting fails the in-memory count is
    /// kept and the error is returned for the caller to log.
    ///
    /// # Errors
    ///
    /// Returns error if the state cannot be written.
    pub async fn record_post(&mut self, n: u32) -> StorageResult<()> {
        self.record(Unit::Post, n).await
    }

    /// Add `n` consumed read units to this month and today, then persist.
    ///
    /// # Errors
    ///
    /// Returns error if the state cannot be written.
    pub async fn record_read(&mut self, n: u32) -> StorageResult<()> {
        self.record(Unit::Read, n).await
    }

    /// Reserve `n` post units ahead of an external action.
    ///
    /// No-op in [`CommitMode::CommitAfter`].
    ///
    /// # Errors
    ///
    /// Returns error if the reservation cannot be persisted; the reservation
    /// is then dropped and the action must not be attempted.
    pub async fn begin_posts(&mut self, n: u32) -> StorageResult<()> {
        self.begin(Unit::Post, n).await
    }

    /// Reserve `n` read units ahead of an external action.
    ///
    /// # Errors
    ///
    /// Returns error if the reservation cannot be persisted.
    pub async fn begin_reads(&mut self, n: u32) -> StorageResult<()> {
        self.begin(Unit::Read, n).await
    }

    /// Settle a post action that reserved `reserved` units and consumed `used`.
    ///
    /// # Errors
    ///
    /// Returns error if the settled state cannot be persisted. The in-memory
    /// counts are updated regardless.
    pub async fn settle_posts(&mut self, reserved: u32, used: u32) -> StorageResult<()> {
        self.settle(Unit::Post, reserved, used).await
    }

    /// Settle a read action that reserved `reserved` units and consumed `used`.
    ///
    /// # Errors
    ///
    /// Returns error if the settled state cannot be persisted.
    pub async fn settle_reads(&mut self, reserved: u32, used: u32) -> StorageResult<()> {
        self.settle(Unit::Read, reserved, used).await
    }

    /// Used and remaining units in every window.
    pub async fn summary(&mut self) -> UsageSummary {
        self.refresh_period().await;
        let today = self.state.booking_day(self.clock.now());
        let window = |unit: Unit, monthly_limit: u32, daily_limit: u32| WindowUsage {
            used_this_month: self.state.used_this_month(unit),
            monthly_limit,
            used_today: self.state.used_on(unit, &today),
            daily_limit,
        };
        let posts = window(
            Unit::Post,
            *self.limits.monthly_post_limit(),
            *self.limits.daily_post_limit(),
        );
        let reads = window(
            Unit::Read,
            *self.limits.monthly_read_limit(),
            *self.limits.daily_read_limit(),
        );
        UsageSummary {
            month: self.state.month().clone(),
            day: today,
            posts,
            reads,
        }
    }

    async fn check(&mut self, unit: Unit, n: u32) -> Admission {
        self.refresh_period().await;
        let today = self.state.booking_day(self.clock.now());
        let (monthly_limit, daily_limit) = self.limits_for(unit);
        let reserved = self.state.reserved(unit);

        let used_month = self.state.used_this_month(unit).saturating_add(reserved);
        let used_today = self.state.used_on(unit, &today).saturating_add(reserved);

        let admission = if u64::from(used_month) + u64::from(n) > u64::from(monthly_limit) {
            Admission::MonthlyExhausted {
                used: used_month,
                limit: monthly_limit,
            }
        } else if u64::from(used_today) + u64::from(n) > u64::from(daily_limit) {
            Admission::DailyExhausted {
                used: used_today,
                limit: daily_limit,
            }
        } else {
            Admission::Granted
        };

        match admission {
            Admission::Granted => debug!(%unit, requested = n, "Admitted"),
            denied => warn!(%unit, requested = n, reason = %denied, "Quota denied"),
        }
        admission
    }

    #[instrument(skip(self))]
    async fn record(&mut self, unit: Unit, n: u32) -> StorageResult<()> {
        self.refresh_period().await;
        let today = self.state.booking_day(self.clock.now());
        self.state.consume(unit, today, n);
        let (monthly_limit, _) = self.limits_for(unit);
        info!(
            %unit,
            count = n,
            used = self.state.used_this_month(unit),
            limit = monthly_limit,
            "Recorded usage"
        );
        self.persist().await
    }

    async fn begin(&mut self, unit: Unit, n: u32) -> StorageResult<()> {
        if self.mode == CommitMode::CommitAfter {
            return Ok(());
        }
        self.refresh_period().await;
        self.state.reserve(unit, n);
        if let Err(e) = self.persist().await {
            self.state.release(unit, n);
            return Err(e);
        }
        debug!(%unit, reserved = n, "Reservation persisted");
        Ok(())
    }

    async fn settle(&mut self, unit: Unit, reserved: u32, used: u32) -> StorageResult<()> {
        match self.mode {
            CommitMode::CommitAfter => {
                if used == 0 {
                    return Ok(());
                }
                self.record(unit, used).await
            }
            CommitMode::ReserveThenCommit => {
                self.refresh_period().await;
                self.state.release(unit, reserved);
                if used > 0 {
                    let today = self.state.booking_day(self.clock.now());
                    self.state.consume(unit, today, used);
                }
                info!(%unit, reserved, used, "Settled reservation");
                self.persist().await
            }
        }
    }

    fn limits_for(&self, unit: Unit) -> (u32, u32) {
        match unit {
            Unit::Post => (
                *self.limits.monthly_post_limit(),
                *self.limits.daily_post_limit(),
            ),
            Unit::Read => (
                *self.limits.monthly_read_limit(),
                *self.limits.daily_read_limit(),
            ),
        }
    }

    async fn persist(&self) -> StorageResult<()> {
        self.store.save(&self.state).await
    }
}
