//! Shepherd: a quota-gated verse and market-commentary bot for X.
//!
//! This crate wires the workspace together:
//! - [`ShepherdConfig`] loads layered TOML configuration
//! - [`Shepherd`] builds the ledger, collaborators and dispatcher
//! - [`run_scheduler`] runs jobs on their cron schedule
//! - [`init_observability`] installs the tracing subscriber
//!
//! The `shepherd` binary exposes all of it on the command line.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod app;
mod config;
mod observability;
mod runner;

pub use app::{JobOutcome, RunOptions, Shepherd, open_ledger};
pub use config::{
    DEFAULT_CONFIG, InferenceConfig, LedgerConfig, LogFormat, LoggingConfig, MarketConfig,
    ShepherdConfig, VersesConfig, XConfig,
};
pub use observability::init_observability;
pub use runner::run_scheduler;

pub use shepherd_content as content;
pub use shepherd_core as core;
pub use shepherd_dispatch as dispatch;
pub use shepherd_error as error;
pub use shepherd_interface as interface;
pub use shepherd_ledger as ledger;
pub use shepherd_social as social;
