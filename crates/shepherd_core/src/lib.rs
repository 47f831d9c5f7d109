//! Core data types for the Shepherd posting bot.
//!
//! This crate provides the value types shared by the usage ledger, the action
//! dispatcher and the platform collaborators.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod action;
mod clock;
mod content;
mod ids;
mod post;
mod theme;

pub use action::{QuotaCost, ScheduledAction};
pub use clock::{Clock, ManualClock, SystemClock};
pub use content::{
    BilingualVerse, BilingualVerseBuilder, BilingualVerseBuilderError, MarketSnapshot,
    MarketSnapshotBuilder, MarketSnapshotBuilderError, TrendingCoin,
};
pub use ids::{AccountId, PostId, TargetAccount};
pub use post::{FetchedPost, FetchedPostBuilder, FetchedPostBuilderError, Thread};
pub use theme::{ActionKind, Theme};
