//! Wiring configuration into a running bot.

use crate::config::ShepherdConfig;
use shepherd_content::{BibleApiClient, CoinGeckoClient, KeywordThemeSelector, RoutineComposer};
use shepherd_core::{Clock, SystemClock, TargetAccount};
use shepherd_dispatch::{ActionDispatcher, JobKind, JobSchedule, RoutinePlan, RoutineReport};
use shepherd_error::{ConfigError, ShepherdResult};
use shepherd_interface::{ContentComposer, SocialClient, ThemeSelector};
use shepherd_ledger::{JsonFileStore, LedgerStore, MemoryStore, UsageLedger, UsageSummary};
use shepherd_social::{DryRunClient, XClient};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// How the bot talks to the outside world.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Log posts instead of publishing them and keep usage in memory.
    pub dry_run: bool,
    /// X OAuth 2.0 user-context token. Required unless `dry_run`.
    pub bearer_token: Option<String>,
}

/// What a single job did.
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    /// Daily routine report.
    Routine(Box<RoutineReport>),
    /// Replies sent by an interaction pass.
    Replies(u32),
    /// Posts sent by an insight burst.
    Posts(u32),
}

/// A dispatcher plus everything the scheduled jobs need.
pub struct Shepherd {
    dispatcher: ActionDispatcher,
    schedule: JobSchedule,
    accounts: Vec<TargetAccount>,
    plan: RoutinePlan,
    clock: Arc<dyn Clock>,
}

impl Shepherd {
    /// Build every collaborator from `config`.
    ///
    /// # Errors
    ///
    /// Invalid configuration, or a missing bearer token outside dry runs.
    #[instrument(skip_all, fields(dry_run = options.dry_run))]
    pub async fn build(config: &ShepherdConfig, options: RunOptions) -> ShepherdResult<Self> {
        for warning in config.validate()? {
            warn!(warning = %warning, "Configuration warning");
        }
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let social: Arc<dyn SocialClient> = if options.dry_run {
            Arc::new(DryRunClient::new())
        } else {
            let token = options.bearer_token.filter(|t| !t.is_empty()).ok_or_else(|| {
                ConfigError::new("X_BEARER_TOKEN is required unless --dry-run is given")
            })?;
            Arc::new(XClient::with_base_url(token, config.x().base_url()))
        };

        let verses = BibleApiClient::new(config.verses().base_url()).with_translations(
            config.verses().english_translation(),
            config.verses().chinese_translation(),
        );
        let market = CoinGeckoClient::new(config.market().base_url());
        let composer: Arc<dyn ContentComposer> = Arc::new(
            RoutineComposer::new(Arc::new(verses), Arc::new(market))
                .with_token_id(config.market().token_id()),
        );

        let ledger = open_ledger(config, options.dry_run, Arc::clone(&clock)).await;
        let dispatcher = ActionDispatcher::new(
            ledger,
            social,
            theme_selector(config),
            composer,
            Arc::clone(&clock),
            config.dispatch().clone(),
        );

        info!(
            accounts = config.accounts().len(),
            jobs = config.schedule().len(),
            "Shepherd ready"
        );
        Ok(Self::from_parts(
            dispatcher,
            config.job_schedule()?,
            config.accounts().clone(),
            *config.routine(),
            clock,
        ))
    }

    /// Assemble from already-built parts.
    pub fn from_parts(
        dispatcher: ActionDispatcher,
        schedule: JobSchedule,
        accounts: Vec<TargetAccount>,
        plan: RoutinePlan,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            dispatcher,
            schedule,
            accounts,
            plan,
            clock,
        }
    }

    /// The dispatcher and its ledger.
    pub fn dispatcher(&self) -> &ActionDispatcher {
        &self.dispatcher
    }

    /// Wall-clock jobs.
    pub fn schedule(&self) -> &JobSchedule {
        &self.schedule
    }

    /// Time source shared with the dispatcher.
    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    /// Run the whole daily routine once.
    pub async fn daily(&mut self) -> RoutineReport {
        self.dispatcher
            .run_daily_routine(&self.plan, &self.accounts)
            .await
    }

    /// Run one interaction pass.
    pub async fn interact(&mut self) -> u32 {
        self.dispatcher.run_interaction_pass(&self.accounts).await
    }

    /// Post one insight, one tip and one educational post.
    pub async fn insights(&mut self) -> u32 {
        self.dispatcher.run_insight_burst().await
    }

    /// Current usage.
    pub async fn usage(&mut self) -> UsageSummary {
        self.dispatcher.ledger_mut().summary().await
    }

    /// Run one scheduled job.
    #[instrument(skip(self))]
    pub async fn run_job(&mut self, job: JobKind) -> JobOutcome {
        match job {
            JobKind::DailyRoutine => JobOutcome::Routine(Box::new(self.daily().await)),
            JobKind::Interactions => JobOutcome::Replies(self.interact().await),
            JobKind::Insights => JobOutcome::Posts(self.insights().await),
        }
    }
}

/// Open the usage ledger described by `config`.
///
/// In a dry run the stored usage is loaded but never written back.
pub async fn open_ledger(
    config: &ShepherdConfig,
    dry_run: bool,
    clock: Arc<dyn Clock>,
) -> UsageLedger {
    let file = JsonFileStore::new(config.ledger().path());
    let store: Box<dyn LedgerStore> = if dry_run {
        match file.load().await {
            Ok(Some(state)) => Box::new(MemoryStore::with_state(state)),
            Ok(None) => Box::new(MemoryStore::new()),
            Err(e) => {
                warn!(error = %e, "Could not read usage file, starting dry run from zero");
                Box::new(MemoryStore::new())
            }
        }
    } else {
        Box::new(file)
    };

    UsageLedger::open(*config.limits(), *config.ledger().commit_mode(), store, clock).await
}

#[cfg(feature = "ollama")]
fn theme_selector(config: &ShepherdConfig) -> Arc<dyn ThemeSelector> {
    let inference = config.inference();
    if *inference.enabled() {
        Arc::new(shepherd_content::OllamaThemeSelector::new(
            inference.host(),
            *inference.port(),
            inference.model(),
        ))
    } else {
        Arc::new(KeywordThemeSelector)
    }
}

#[cfg(not(feature = "ollama"))]
fn theme_selector(config: &ShepherdConfig) -> Arc<dyn ThemeSelector> {
    if *config.inference().enabled() {
        warn!("Inference enabled but built without the `ollama` feature; using keywords");
    }
    Arc::new(KeywordThemeSelector)
}
