//! Durable usage ledger for the Shepherd posting bot.
//!
//! The ledger tracks post and read units against monthly and daily limits,
//! answers admission checks before any external action, and persists every
//! change through a [`LedgerStore`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use shepherd_core::SystemClock;
//! use shepherd_ledger::{CommitMode, MemoryStore, UsageLedger, UsageLimits};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let mut ledger = UsageLedger::open(
//!     UsageLimits::default(),
//!     CommitMode::CommitAfter,
//!     Box::new(MemoryStore::new()),
//!     Arc::new(SystemClock),
//! )
//! .await;
//!
//! assert!(ledger.can_post(2).await);
//! ledger.record_post(2).await.expect("Persisted");
//! assert_eq!(*ledger.state().posts_used_this_month(), 2);
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod ledger;
mod limits;
mod state;
mod store;

pub use ledger::{Admission, CommitMode, UsageLedger, UsageSummary, WindowUsage};
pub use limits::{UsageLimits, UsageLimitsBuilder, UsageLimitsBuilderError};
pub use state::{Unit, UsageState, day_key, month_key};
pub use store::{JsonFileStore, LedgerStore, MemoryStore};
