//! Tests for wiring and the scheduler loop.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shepherd::{JobOutcome, RunOptions, Shepherd, ShepherdConfig, open_ledger, run_scheduler};
use shepherd_content::KeywordThemeSelector;
use shepherd_core::{Clock, FetchedPost, SystemClock, TargetAccount, Theme, Thread};
use shepherd_dispatch::{
    ActionDispatcher, DispatchSettingsBuilder, JobKind, JobSchedule, RoutinePlan, ScheduledJob,
};
use shepherd_error::SourceResult;
use shepherd_interface::ContentComposer;
use shepherd_ledger::{CommitMode, MemoryStore, Unit, UsageLedger, UsageLimits};
use shepherd_social::DryRunClient;
use std::sync::Arc;

struct CannedComposer;

fn pair(label: &str) -> Thread {
    Thread::new(vec![format!("{label} en"), format!("{label} zh")]).expect("Non-empty")
}

#[async_trait]
impl ContentComposer for CannedComposer {
    async fn morning_thread(&self, _now: DateTime<Utc>) -> SourceResult<Thread> {
        Ok(pair("morning"))
    }

    async fn ecosystem_news_thread(&self) -> SourceResult<Thread> {
        Ok(pair("news"))
    }

    async fn trending_coins_thread(&self) -> SourceResult<Thread> {
        Ok(pair("trending"))
    }

    async fn upcoming_projects_thread(&self) -> SourceResult<Thread> {
        Ok(pair("projects"))
    }

    async fn market_thread(&self) -> SourceResult<Thread> {
        Ok(pair("market"))
    }

    async fn insight(&self) -> SourceResult<String> {
        Ok("insight".to_string())
    }

    async fn tip(&self) -> SourceResult<String> {
        Ok("tip".to_string())
    }

    async fn educational(&self) -> SourceResult<String> {
        Ok("educational".to_string())
    }

    async fn themed_verse_thread(&self) -> SourceResult<Thread> {
        Ok(pair("themed"))
    }

    async fn reply_text(&self, _post: &FetchedPost, theme: Theme) -> SourceResult<String> {
        Ok(format!("{theme} verse"))
    }
}

async fn dry_run_shepherd(schedule: JobSchedule) -> (Shepherd, MemoryStore) {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let store = MemoryStore::new();
    let ledger = UsageLedger::open(
        UsageLimits::default(),
        CommitMode::CommitAfter,
        Box::new(store.clone()),
        Arc::clone(&clock),
    )
    .await;
    let settings = DispatchSettingsBuilder::default()
        .thread_post_delay_millis(0u64)
        .build()
        .expect("Valid settings");
    let dispatcher = ActionDispatcher::new(
        ledger,
        Arc::new(DryRunClient::new()),
        Arc::new(KeywordThemeSelector),
        Arc::new(CannedComposer),
        Arc::clone(&clock),
        settings,
    );
    let accounts = vec![TargetAccount::new("binance", "877807935493033984")];
    let shepherd = Shepherd::from_parts(
        dispatcher,
        schedule,
        accounts,
        RoutinePlan::default(),
        clock,
    );
    (shepherd, store)
}

#[tokio::test]
async fn test_build_requires_token_outside_dry_run() {
    let config = ShepherdConfig::bundled().expect("Bundled config parses");

    let result = Shepherd::build(&config, RunOptions::default()).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_dry_run_build_never_writes_usage_file() {
    let dir = tempfile::tempdir().expect("Temp dir");
    let path = dir.path().join("usage.json");
    let config = ShepherdConfig::from_toml_str(&format!(
        "[ledger]\npath = {:?}",
        path.display().to_string()
    ))
    .expect("Parsed");

    let mut shepherd = Shepherd::build(
        &config,
        RunOptions {
            dry_run: true,
            bearer_token: None,
        },
    )
    .await
    .expect("Built");
    let summary = shepherd.usage().await;

    assert_eq!(*summary.posts().used_this_month(), 0);
    assert!(!path.exists());
}

#[tokio::test]
async fn test_dry_run_ledger_starts_from_stored_usage() {
    let dir = tempfile::tempdir().expect("Temp dir");
    let path = dir.path().join("usage.json");
    let config = ShepherdConfig::from_toml_str(&format!(
        "[ledger]\npath = {:?}",
        path.display().to_string()
    ))
    .expect("Parsed");

    let mut real = open_ledger(&config, false, Arc::new(SystemClock)).await;
    real.record_post(3).await.expect("Persisted");

    let mut dry = open_ledger(&config, true, Arc::new(SystemClock)).await;
    assert_eq!(*dry.summary().await.posts().used_today(), 3);
    dry.record_post(2).await.expect("Recorded in memory");

    let mut reopened = open_ledger(&config, false, Arc::new(SystemClock)).await;
    assert_eq!(*reopened.summary().await.posts().used_today(), 3);
}

#[tokio::test]
async fn test_insight_job_posts_three_times() {
    let (mut shepherd, store) = dry_run_shepherd(JobSchedule::default_jobs()).await;

    let outcome = shepherd.run_job(JobKind::Insights).await;

    assert_eq!(outcome, JobOutcome::Posts(3));
    let state = store.snapshot().expect("Saved");
    assert_eq!(state.used_this_month(Unit::Post), 3);
}

#[tokio::test]
async fn test_interaction_job_with_empty_timeline_replies_to_nobody() {
    let (mut shepherd, store) = dry_run_shepherd(JobSchedule::default_jobs()).await;

    let outcome = shepherd.run_job(JobKind::Interactions).await;

    assert_eq!(outcome, JobOutcome::Replies(0));
    let state = store.snapshot().expect("Saved");
    assert_eq!(state.used_this_month(Unit::Read), 1);
}

#[tokio::test]
async fn test_daily_job_reports_routine() {
    let (mut shepherd, _store) = dry_run_shepherd(JobSchedule::default_jobs()).await;

    let outcome = shepherd.run_job(JobKind::DailyRoutine).await;

    match outcome {
        // Five threads and six singles fill 16 of 17 posts; themed threads no longer fit.
        JobOutcome::Routine(report) => assert_eq!(report.total_succeeded(), 11),
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[tokio::test]
async fn test_scheduler_stops_on_shutdown_before_any_job() {
    let schedule = JobSchedule::new(vec![ScheduledJob::new(
        "every-second",
        "* * * * * * *",
        JobKind::Insights,
    )])
    .expect("Valid schedule");
    let (mut shepherd, store) = dry_run_shepherd(schedule).await;
    let saves_at_open = store.save_count();

    run_scheduler(&mut shepherd, async {}).await;

    assert_eq!(store.save_count(), saves_at_open);
}

#[tokio::test]
async fn test_scheduler_with_no_jobs_returns() {
    let schedule = JobSchedule::new(Vec::new()).expect("Empty schedule");
    let (mut shepherd, _store) = dry_run_shepherd(schedule).await;

    run_scheduler(&mut shepherd, std::future::pending::<()>()).await;

    assert!(shepherd.schedule().is_empty());
}
