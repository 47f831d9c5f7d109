//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Shepherd - quota-gated Bible verse and BNB market bot for X
#[derive(Parser, Debug)]
#[command(name = "shepherd")]
#[command(about = "Quota-gated Bible verse and BNB market bot for X", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file layered over the defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log posts instead of publishing them; usage is not saved
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// X OAuth 2.0 user-context bearer token
    #[arg(long, env = "X_BEARER_TOKEN", hide_env_values = true, global = true)]
    pub bearer_token: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Run scheduled jobs until interrupted
    Run,
    /// Run the daily routine once and print its report as JSON
    Daily,
    /// Run one interaction pass
    Interact,
    /// Post one insight, one tip and one educational post
    Insights,
    /// Show this month's and today's usage
    Usage,
    /// Load and validate the configuration
    CheckConfig,
}
