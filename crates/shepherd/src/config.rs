//! Layered configuration.
//!
//! Sources, lowest precedence first:
//! 1. Bundled defaults (`shepherd.toml` compiled into the binary)
//! 2. `~/.config/shepherd/shepherd.toml`
//! 3. `./shepherd.toml`
//! 4. An explicit `--config` file
//! 5. `SHEPHERD__SECTION__KEY` environment variables
//!
//! The X bearer token is never read from these files; it comes from the
//! `X_BEARER_TOKEN` environment variable.

use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use shepherd_content::{BIBLE_API_BASE_URL, COINGECKO_BASE_URL, DEFAULT_TOKEN_ID};
use shepherd_core::TargetAccount;
use shepherd_dispatch::{DispatchSettings, JobSchedule, RoutinePlan, ScheduledJob, default_job_list};
use shepherd_error::{ConfigError, ShepherdResult};
use shepherd_ledger::{CommitMode, UsageLimits};
use shepherd_social::X_API_BASE_URL;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Bundled default configuration.
pub const DEFAULT_CONFIG: &str = include_str!("../shepherd.toml");

/// Where and how usage is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct LedgerConfig {
    /// Usage file.
    #[serde(default = "default_ledger_path")]
    path: PathBuf,
    /// When usage is written relative to the transport call.
    #[serde(default)]
    commit_mode: CommitMode,
}

fn default_ledger_path() -> PathBuf {
    PathBuf::from("api_usage.json")
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            path: default_ledger_path(),
            commit_mode: CommitMode::default(),
        }
    }
}

/// X API endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct XConfig {
    /// API base URL.
    #[serde(default = "default_x_base_url")]
    base_url: String,
}

fn default_x_base_url() -> String {
    X_API_BASE_URL.to_string()
}

impl Default for XConfig {
    fn default() -> Self {
        Self {
            base_url: default_x_base_url(),
        }
    }
}

/// Verse lookup service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct VersesConfig {
    /// bible-api.com compatible base URL.
    #[serde(default = "default_verses_base_url")]
    base_url: String,
    /// English translation id.
    #[serde(default = "default_english_translation")]
    english_translation: String,
    /// Chinese translation id.
    #[serde(default = "default_chinese_translation")]
    chinese_translation: String,
}

fn default_verses_base_url() -> String {
    BIBLE_API_BASE_URL.to_string()
}

fn default_english_translation() -> String {
    "web".to_string()
}

fn default_chinese_translation() -> String {
    "cuv".to_string()
}

impl Default for VersesConfig {
    fn default() -> Self {
        Self {
            base_url: default_verses_base_url(),
            english_translation: default_english_translation(),
            chinese_translation: default_chinese_translation(),
        }
    }
}

/// Market data service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct MarketConfig {
    /// CoinGecko compatible base URL.
    #[serde(default = "default_market_base_url")]
    base_url: String,
    /// Token described by market posts.
    #[serde(default = "default_token_id")]
    token_id: String,
}

fn default_market_base_url() -> String {
    COINGECKO_BASE_URL.to_string()
}

fn default_token_id() -> String {
    DEFAULT_TOKEN_ID.to_string()
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            base_url: default_market_base_url(),
            token_id: default_token_id(),
        }
    }
}

/// Local model used for theme selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct InferenceConfig {
    /// Use the model instead of keyword matching.
    #[serde(default)]
    enabled: bool,
    /// Ollama host including scheme.
    #[serde(default = "default_inference_host")]
    host: String,
    /// Ollama port.
    #[serde(default = "default_inference_port")]
    port: u16,
    /// Model name.
    #[serde(default = "default_inference_model")]
    model: String,
}

fn default_inference_host() -> String {
    "http://localhost".to_string()
}

fn default_inference_port() -> u16 {
    11434
}

fn default_inference_model() -> String {
    "llama3".to_string()
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            host: default_inference_host(),
            port: default_inference_port(),
            model: default_inference_model(),
        }
    }
}

/// Log output format.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Logging settings. `RUST_LOG` takes precedence over `level`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `shepherd_dispatch=debug`.
    #[serde(default = "default_log_level")]
    level: String,
    /// Output format.
    #[serde(default)]
    format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Complete bot configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct ShepherdConfig {
    /// Usage budget.
    #[serde(default)]
    limits: UsageLimits,
    /// Usage persistence.
    #[serde(default)]
    ledger: LedgerConfig,
    /// Transport behaviour.
    #[serde(default)]
    dispatch: DispatchSettings,
    /// Daily routine counts.
    #[serde(default)]
    routine: RoutinePlan,
    /// Accounts the interaction pass reads, in order.
    #[serde(default)]
    accounts: Vec<TargetAccount>,
    /// Wall-clock jobs.
    #[serde(default = "default_job_list")]
    schedule: Vec<ScheduledJob>,
    /// X API.
    #[serde(default)]
    x: XConfig,
    /// Verse lookup.
    #[serde(default)]
    verses: VersesConfig,
    /// Market data.
    #[serde(default)]
    market: MarketConfig,
    /// Theme inference.
    #[serde(default)]
    inference: InferenceConfig,
    /// Logging.
    #[serde(default)]
    logging: LoggingConfig,
}

impl ShepherdConfig {
    /// Load from every source, adding `explicit` when given.
    ///
    /// # Errors
    ///
    /// Fails when `explicit` does not exist or any source cannot be parsed.
    #[instrument]
    pub fn load(explicit: Option<&Path>) -> ShepherdResult<Self> {
        debug!("Loading configuration: env > --config > current dir > home dir > bundled defaults");

        let mut builder = bundled();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/shepherd/shepherd.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("shepherd").required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix("SHEPHERD")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        finish(builder)
    }

    /// Bundled defaults overlaid with one file and nothing else.
    pub fn from_file(path: impl AsRef<Path>) -> ShepherdResult<Self> {
        finish(bundled().add_source(File::from(path.as_ref())))
    }

    /// Bundled defaults overlaid with TOML text.
    pub fn from_toml_str(text: &str) -> ShepherdResult<Self> {
        finish(bundled().add_source(File::from_str(text, FileFormat::Toml)))
    }

    /// The bundled defaults alone.
    pub fn bundled() -> ShepherdResult<Self> {
        finish(bundled())
    }

    /// Check the configuration for errors and questionable values.
    ///
    /// # Returns
    ///
    /// Warnings that do not prevent running.
    ///
    /// # Errors
    ///
    /// Invalid limits or an unparsable schedule.
    pub fn validate(&self) -> ShepherdResult<Vec<String>> {
        let mut warnings = self.limits.validate()?;
        warnings.extend(self.dispatch.validate());

        let schedule = JobSchedule::new(self.schedule.clone())?;
        if schedule.is_empty() {
            warnings.push("schedule is empty; `run` would exit immediately".to_string());
        }

        if self.accounts.is_empty() && *self.routine.interactions() {
            warnings.push("no accounts configured; interaction passes will do nothing".to_string());
        }

        let routine_units = self.routine.post_units(*self.limits.posts_per_thread());
        if routine_units > *self.limits.daily_post_limit() {
            warnings.push(format!(
                "daily routine needs {} posts but daily_post_limit is {}; later steps will be skipped",
                routine_units,
                self.limits.daily_post_limit()
            ));
        }

        Ok(warnings)
    }

    /// Compiled wall-clock schedule.
    pub fn job_schedule(&self) -> ShepherdResult<JobSchedule> {
        Ok(JobSchedule::new(self.schedule.clone())?)
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> ShepherdResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::new(format!("Failed to render configuration: {}", e)).into())
    }
}

fn bundled() -> ConfigBuilder<DefaultState> {
    Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
}

fn finish(builder: ConfigBuilder<DefaultState>) -> ShepherdResult<ShepherdConfig> {
    let config = builder
        .build()
        .map_err(|e| ConfigError::new(format!("Failed to read configuration: {}", e)))?
        .try_deserialize()
        .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;
    Ok(config)
}
