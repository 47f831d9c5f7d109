//! Tests for quota-gated dispatch against fake collaborators.

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use shepherd_core::{
    AccountId, ActionKind, FetchedPost, FetchedPostBuilder, ManualClock, PostId, ScheduledAction,
    TargetAccount, Theme, Thread,
};
use shepherd_dispatch::{
    ActionDispatcher, ActionOutcome, DispatchSettings, DispatchSettingsBuilder, KindTally,
    RoutinePlan, RoutinePlanBuilder,
};
use shepherd_error::{
    DispatchErrorKind, PlatformError, PlatformErrorKind, PlatformResult, QuotaWindow, SourceError,
    SourceErrorKind, SourceResult,
};
use shepherd_interface::{ContentComposer, SocialClient, ThemeSelector};
use shepherd_ledger::{CommitMode, MemoryStore, Unit, UsageLedger, UsageLimits, UsageLimitsBuilder};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

// ============================================================================
// Fakes
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Post(String),
    Reply { target: String, text: String },
    Fetch(String),
}

#[derive(Default)]
struct FakeSocial {
    calls: Mutex<Vec<Call>>,
    failing_sends: HashSet<usize>,
    failing_reply_targets: HashSet<String>,
    timelines: HashMap<String, Vec<FetchedPost>>,
    failing_fetches: HashSet<String>,
    sends: Mutex<usize>,
    store: Option<MemoryStore>,
    reserved_at_send: Mutex<Vec<u32>>,
}

impl FakeSocial {
    fn fail_send(mut self, index: usize) -> Self {
        self.failing_sends.insert(index);
        self
    }

    fn fail_reply_to(mut self, post: &str) -> Self {
        self.failing_reply_targets.insert(post.to_string());
        self
    }

    fn timeline(mut self, account: &str, posts: Vec<FetchedPost>) -> Self {
        self.timelines.insert(account.to_string(), posts);
        self
    }

    fn fail_fetch(mut self, account: &str) -> Self {
        self.failing_fetches.insert(account.to_string());
        self
    }

    fn watch_store(mut self, store: &MemoryStore) -> Self {
        self.store = Some(store.clone());
        self
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("Lock").clone()
    }

    fn send_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| !matches!(c, Call::Fetch(_)))
            .count()
    }

    fn send(&self, call: Call, target: Option<&str>) -> PlatformResult<PostId> {
        if let Some(store) = &self.store {
            let reserved = store
                .snapshot()
                .map(|s| s.reserved(Unit::Post))
                .unwrap_or(0);
            self.reserved_at_send.lock().expect("Lock").push(reserved);
        }
        self.calls.lock().expect("Lock").push(call);

        let mut sends = self.sends.lock().expect("Lock");
        let index = *sends;
        *sends += 1;

        let rejected = target.is_some_and(|t| self.failing_reply_targets.contains(t));
        if self.failing_sends.contains(&index) || rejected {
            return Err(PlatformError::new(PlatformErrorKind::Status {
                status: 503,
                body: "Service Unavailable".to_string(),
            }));
        }
        Ok(PostId::new(format!("id-{}", index)))
    }
}

#[async_trait]
impl SocialClient for FakeSocial {
    async fn post(&self, text: &str) -> PlatformResult<PostId> {
        self.send(Call::Post(text.to_string()), None)
    }

    async fn reply(&self, target: &PostId, text: &str) -> PlatformResult<PostId> {
        self.send(
            Call::Reply {
                target: target.to_string(),
                text: text.to_string(),
            },
            Some(target.as_str()),
        )
    }

    async fn fetch_recent(
        &self,
        account: &AccountId,
        _max_count: u32,
    ) -> PlatformResult<Vec<FetchedPost>> {
        self.calls
            .lock()
            .expect("Lock")
            .push(Call::Fetch(account.to_string()));
        if self.failing_fetches.contains(account.as_str()) {
            return Err(PlatformError::new(PlatformErrorKind::Network(
                "connection reset".to_string(),
            )));
        }
        Ok(self
            .timelines
            .get(account.as_str())
            .cloned()
            .unwrap_or_default())
    }

    fn platform_name(&self) -> &str {
        "fake"
    }
}

struct SlowSocial;

#[async_trait]
impl SocialClient for SlowSocial {
    async fn post(&self, _text: &str) -> PlatformResult<PostId> {
        tokio::time::sleep(std::time::Duration::from_secs(30)).await;
        Ok(PostId::new("late"))
    }

    async fn reply(&self, _target: &PostId, _text: &str) -> PlatformResult<PostId> {
        tokio::time::sleep(std::time::Duration::from_secs(30)).await;
        Ok(PostId::new("late"))
    }

    async fn fetch_recent(
        &self,
        _account: &AccountId,
        _max_count: u32,
    ) -> PlatformResult<Vec<FetchedPost>> {
        Ok(Vec::new())
    }

    fn platform_name(&self) -> &str {
        "slow"
    }
}

/// Replies to anything mentioning markets.
struct MarketThemes;

#[async_trait]
impl ThemeSelector for MarketThemes {
    async fn classify(&self, _text: &str) -> Theme {
        Theme::Finance
    }

    async fn is_eligible(&self, text: &str) -> bool {
        text.contains("market")
    }
}

#[derive(Default)]
struct StaticComposer {
    fail_market: bool,
}

fn two_posts(label: &str) -> Thread {
    Thread::new(vec![format!("{} en", label), format!("{} zh", label)]).expect("Non-empty")
}

#[async_trait]
impl ContentComposer for StaticComposer {
    async fn morning_thread(&self, _now: DateTime<Utc>) -> SourceResult<Thread> {
        Ok(two_posts("morning"))
    }

    async fn ecosystem_news_thread(&self) -> SourceResult<Thread> {
        Ok(two_posts("news"))
    }

    async fn trending_coins_thread(&self) -> SourceResult<Thread> {
        Ok(two_posts("trending"))
    }

    async fn upcoming_projects_thread(&self) -> SourceResult<Thread> {
        Ok(two_posts("projects"))
    }

    async fn market_thread(&self) -> SourceResult<Thread> {
        if self.fail_market {
            return Err(SourceError::new(SourceErrorKind::Status(500)));
        }
        Ok(two_posts("market"))
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
        Ok(two_posts("themed"))
    }

    async fn reply_text(&self, post: &FetchedPost, theme: Theme) -> SourceResult<String> {
        Ok(format!("{} verse for {}", theme, post.id()))
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 14, 8, 0, 0).unwrap()
}

fn fast_settings() -> DispatchSettings {
    DispatchSettingsBuilder::default()
        .thread_post_delay_millis(0u64)
        .build()
        .expect("Valid settings")
}

fn limits(daily_posts: u32, daily_reads: u32) -> UsageLimits {
    UsageLimitsBuilder::default()
        .daily_post_limit(daily_posts)
        .daily_read_limit(daily_reads)
        .build()
        .expect("Valid limits")
}

async fn dispatcher_with(
    social: Arc<dyn SocialClient>,
    composer: StaticComposer,
    limits: UsageLimits,
    mode: CommitMode,
    store: &MemoryStore,
    settings: DispatchSettings,
) -> ActionDispatcher {
    let clock = Arc::new(ManualClock::new(now()));
    let ledger = UsageLedger::open(limits, mode, Box::new(store.clone()), clock.clone()).await;
    ActionDispatcher::new(
        ledger,
        social,
        Arc::new(MarketThemes),
        Arc::new(composer),
        clock,
        settings,
    )
}

async fn dispatcher(social: Arc<FakeSocial>, limits: UsageLimits) -> ActionDispatcher {
    dispatcher_with(
        social,
        StaticComposer::default(),
        limits,
        CommitMode::CommitAfter,
        &MemoryStore::new(),
        fast_settings(),
    )
    .await
}

fn post(id: &str, text: &str) -> FetchedPost {
    FetchedPostBuilder::default()
        .id(PostId::new(id))
        .text(text)
        .build()
        .expect("Valid post")
}

fn abc() -> Thread {
    Thread::new(vec!["a".into(), "b".into(), "c".into()]).expect("Non-empty")
}

// ============================================================================
// Threads
// ============================================================================

#[tokio::test]
async fn test_thread_failure_on_second_post_records_one_unit() {
    let social = Arc::new(FakeSocial::default().fail_send(1));
    let mut dispatcher = dispatcher(social.clone(), UsageLimits::default()).await;

    let err = dispatcher
        .post_thread(abc())
        .await
        .expect_err("Second post fails");

    assert!(matches!(
        err.kind,
        DispatchErrorKind::PartialThread {
            posted: 1,
            requested: 3,
            ..
        }
    ));
    assert_eq!(*dispatcher.ledger().state().posts_used_this_month(), 1);
    assert_eq!(
        social.calls(),
        vec![
            Call::Post("a".to_string()),
            Call::Reply {
                target: "id-0".to_string(),
                text: "b".to_string()
            },
        ]
    );
}

#[tokio::test]
async fn test_thread_denied_makes_no_transport_calls() {
    let social = Arc::new(FakeSocial::default());
    let mut dispatcher = dispatcher(social.clone(), limits(2, 4)).await;

    assert!(!dispatcher.ledger_mut().can_post(3).await);
    let err = dispatcher.post_thread(abc()).await.expect_err("Denied");

    assert!(matches!(
        err.kind,
        DispatchErrorKind::QuotaExceeded {
            window: QuotaWindow::DailyPosts,
            requested: 3,
            ..
        }
    ));
    assert!(social.calls().is_empty());
    assert_eq!(*dispatcher.ledger().state().posts_used_this_month(), 0);
}

#[tokio::test]
async fn test_thread_chains_replies_to_previous_post() {
    let social = Arc::new(FakeSocial::default());
    let mut dispatcher = dispatcher(social.clone(), UsageLimits::default()).await;

    let ids = dispatcher.post_thread(abc()).await.expect("Thread posted");

    assert_eq!(
        ids,
        vec![PostId::new("id-0"), PostId::new("id-1"), PostId::new("id-2")]
    );
    assert_eq!(
        social.calls()[2],
        Call::Reply {
            target: "id-1".to_string(),
            text: "c".to_string()
        }
    );
    assert_eq!(*dispatcher.ledger().state().posts_used_this_month(), 3);
}

#[tokio::test]
async fn test_thread_failure_on_first_post_is_transport_error() {
    let social = Arc::new(FakeSocial::default().fail_send(0));
    let mut dispatcher = dispatcher(social.clone(), UsageLimits::default()).await;

    let err = dispatcher.post_thread(abc()).await.expect_err("Fails");

    assert!(matches!(err.kind, DispatchErrorKind::Transport(_)));
    assert_eq!(social.send_calls(), 1);
    assert_eq!(*dispatcher.ledger().state().posts_used_this_month(), 0);
}

// ============================================================================
// Single posts, replies and reads
// ============================================================================

#[tokio::test]
async fn test_denied_post_is_never_rendered() {
    let social = Arc::new(FakeSocial::default());
    let mut dispatcher = dispatcher(social.clone(), limits(0, 4)).await;
    let rendered = AtomicBool::new(false);

    let err = dispatcher
        .post_single(|| async {
            rendered.store(true, Ordering::SeqCst);
            Ok("never".to_string())
        })
        .await
        .expect_err("Denied");

    assert!(err.is_quota());
    assert!(!rendered.load(Ordering::SeqCst));
    assert!(social.calls().is_empty());
}

#[tokio::test]
async fn test_render_failure_costs_nothing() {
    let social = Arc::new(FakeSocial::default());
    let mut dispatcher = dispatcher(social.clone(), UsageLimits::default()).await;

    let err = dispatcher
        .post_single(|| async { Err(SourceError::new(SourceErrorKind::Status(502))) })
        .await
        .expect_err("Render fails");

    assert!(matches!(err.kind, DispatchErrorKind::Compose(_)));
    assert!(social.calls().is_empty());
    assert_eq!(*dispatcher.ledger().state().posts_used_this_month(), 0);
}

#[tokio::test]
async fn test_failed_fetch_costs_no_read() {
    let social = Arc::new(FakeSocial::default().fail_fetch("1"));
    let mut dispatcher = dispatcher(social.clone(), UsageLimits::default()).await;

    let err = dispatcher
        .fetch_recent(&AccountId::new("1"), 5)
        .await
        .expect_err("Fetch fails");
    assert!(matches!(err.kind, DispatchErrorKind::Transport(_)));
    assert_eq!(*dispatcher.ledger().state().reads_used_this_month(), 0);

    let posts = dispatcher
        .fetch_recent(&AccountId::new("2"), 5)
        .await
        .expect("Empty timeline");
    assert!(posts.is_empty());
    assert_eq!(*dispatcher.ledger().state().reads_used_this_month(), 1);
}

#[tokio::test]
async fn test_execute_dispatches_each_variant() {
    let social = Arc::new(FakeSocial::default().timeline("7", vec![post("p1", "market")]));
    let mut dispatcher = dispatcher(social.clone(), UsageLimits::default()).await;

    let outcome = dispatcher
        .execute(ScheduledAction::SinglePost {
            text: "hello".to_string(),
        })
        .await
        .expect("Posted");
    assert_eq!(outcome, ActionOutcome::Posted(PostId::new("id-0")));

    let outcome = dispatcher
        .execute(ScheduledAction::Reply {
            target: PostId::new("p1"),
            text: "Psalm 23".to_string(),
        })
        .await
        .expect("Replied");
    assert_eq!(outcome, ActionOutcome::Posted(PostId::new("id-1")));

    let outcome = dispatcher
        .execute(ScheduledAction::ReadQuery {
            account: AccountId::new("7"),
            max_count: 5,
        })
        .await
        .expect("Fetched");
    assert!(matches!(outcome, ActionOutcome::Fetched(posts) if posts.len() == 1));

    let state = dispatcher.ledger().state();
    assert_eq!(*state.posts_used_this_month(), 2);
    assert_eq!(*state.reads_used_this_month(), 1);
}

#[tokio::test]
async fn test_transport_timeout_costs_nothing() {
    let settings = DispatchSettingsBuilder::default()
        .transport_timeout_secs(1u64)
        .build()
        .expect("Valid settings");
    let mut dispatcher = dispatcher_with(
        Arc::new(SlowSocial),
        StaticComposer::default(),
        UsageLimits::default(),
        CommitMode::CommitAfter,
        &MemoryStore::new(),
        settings,
    )
    .await;

    let err = dispatcher
        .post_single(|| async { Ok("slow".to_string()) })
        .await
        .expect_err("Times out");

    assert!(matches!(
        err.kind,
        DispatchErrorKind::Transport(PlatformErrorKind::Timeout(1000))
    ));
    assert_eq!(*dispatcher.ledger().state().posts_used_this_month(), 0);
}

#[tokio::test]
async fn test_reserve_mode_persists_before_transport() {
    let store = MemoryStore::new();
    let social = Arc::new(FakeSocial::default().fail_send(1).watch_store(&store));
    let mut dispatcher = dispatcher_with(
        social.clone(),
        StaticComposer::default(),
        UsageLimits::default(),
        CommitMode::ReserveThenCommit,
        &store,
        fast_settings(),
    )
    .await;

    dispatcher
        .post_thread(abc())
        .await
        .expect_err("Second post fails");

    assert_eq!(*social.reserved_at_send.lock().expect("Lock"), vec![3, 3]);
    let saved = store.snapshot().expect("Saved");
    assert_eq!(saved.reserved(Unit::Post), 0);
    assert_eq!(*saved.posts_used_this_month(), 1);
}

#[tokio::test]
async fn test_reserve_mode_skips_action_when_reservation_fails() {
    let store = MemoryStore::new();
    let social = Arc::new(FakeSocial::default());
    let mut dispatcher = dispatcher_with(
        social.clone(),
        StaticComposer::default(),
        UsageLimits::default(),
        CommitMode::ReserveThenCommit,
        &store,
        fast_settings(),
    )
    .await;

    store.fail_writes(true);
    let err = dispatcher
        .reply(&PostId::new("p1"), "text")
        .await
        .expect_err("Not attempted");

    assert!(matches!(err.kind, DispatchErrorKind::Persistence(_)));
    assert!(social.calls().is_empty());
}

// ============================================================================
// Interaction pass
// ============================================================================

fn three_accounts() -> Vec<TargetAccount> {
    vec![
        TargetAccount::new("first", "1"),
        TargetAccount::new("second", "2"),
        TargetAccount::new("third", "3"),
    ]
}

#[tokio::test]
async fn test_interaction_pass_stops_when_post_quota_runs_out() {
    let social = Arc::new(
        FakeSocial::default()
            .timeline("1", vec![post("p1", "market update")])
            .timeline("2", vec![post("p2", "market update")])
            .timeline("3", vec![post("p3", "market update")]),
    );
    let mut dispatcher = dispatcher(social.clone(), limits(2, 4)).await;

    let replies = dispatcher.run_interaction_pass(&three_accounts()).await;

    assert_eq!(replies, 2);
    let calls = social.calls();
    assert!(!calls.iter().any(|c| matches!(
        c,
        Call::Reply { target, .. } if target == "p3"
    )));
    assert_eq!(social.send_calls(), 2);
}

#[tokio::test]
async fn test_interaction_pass_replies_once_per_account() {
    let social = Arc::new(
        FakeSocial::default()
            .timeline(
                "1",
                vec![
                    post("p1", "market down"),
                    post("p2", "market up"),
                    post("p3", "market flat"),
                ],
            )
            .fail_reply_to("p1"),
    );
    let mut dispatcher = dispatcher(social.clone(), UsageLimits::default()).await;

    let replies = dispatcher
        .run_interaction_pass(&[TargetAccount::new("first", "1")])
        .await;

    assert_eq!(replies, 1);
    let targets: Vec<String> = social
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            Call::Reply { target, .. } => Some(target),
            _ => None,
        })
        .collect();
    assert_eq!(targets, vec!["p1".to_string(), "p2".to_string()]);
    assert_eq!(*dispatcher.ledger().state().posts_used_this_month(), 1);
}

#[tokio::test]
async fn test_interaction_pass_skips_ineligible_and_failed_accounts() {
    let social = Arc::new(
        FakeSocial::default()
            .fail_fetch("1")
            .timeline("2", vec![post("p2", "good morning")])
            .timeline("3", vec![post("p3", "market open")]),
    );
    let mut dispatcher = dispatcher(social.clone(), UsageLimits::default()).await;

    let replies = dispatcher.run_interaction_pass(&three_accounts()).await;

    assert_eq!(replies, 1);
    // The failed fetch is free; the two completed ones are charged.
    assert_eq!(*dispatcher.ledger().state().reads_used_this_month(), 2);
}

#[tokio::test]
async fn test_interaction_pass_ends_when_reads_run_out() {
    let social = Arc::new(FakeSocial::default());
    let mut dispatcher = dispatcher(social.clone(), limits(17, 1)).await;

    let replies = dispatcher.run_interaction_pass(&three_accounts()).await;

    assert_eq!(replies, 0);
    assert_eq!(social.calls(), vec![Call::Fetch("1".to_string())]);
}

#[tokio::test]
async fn test_interaction_pass_skips_stale_posts() {
    let stale = FetchedPostBuilder::default()
        .id(PostId::new("old"))
        .text("market crash")
        .created_at(Some(now() - Duration::hours(48)))
        .build()
        .expect("Valid post");
    let fresh = FetchedPostBuilder::default()
        .id(PostId::new("new"))
        .text("market rally")
        .created_at(Some(now() - Duration::hours(2)))
        .build()
        .expect("Valid post");
    let social = Arc::new(FakeSocial::default().timeline("1", vec![stale, fresh]));
    let settings = DispatchSettingsBuilder::default()
        .thread_post_delay_millis(0u64)
        .max_post_age_hours(Some(24u64))
        .build()
        .expect("Valid settings");
    let mut dispatcher = dispatcher_with(
        social.clone(),
        StaticComposer::default(),
        UsageLimits::default(),
        CommitMode::CommitAfter,
        &MemoryStore::new(),
        settings,
    )
    .await;

    let replies = dispatcher
        .run_interaction_pass(&[TargetAccount::new("first", "1")])
        .await;

    assert_eq!(replies, 1);
    assert!(social.calls().contains(&Call::Reply {
        target: "new".to_string(),
        text: "finance verse for new".to_string(),
    }));
}

// ============================================================================
// Daily routine
// ============================================================================

#[tokio::test]
async fn test_daily_routine_continues_after_failure() {
    let social = Arc::new(
        FakeSocial::default().timeline("1", vec![post("p1", "market news")]),
    );
    let mut dispatcher = dispatcher_with(
        social.clone(),
        StaticComposer { fail_market: true },
        UsageLimits::default(),
        CommitMode::CommitAfter,
        &MemoryStore::new(),
        fast_settings(),
    )
    .await;
    let plan = RoutinePlanBuilder::default()
        .insights(1u32)
        .tips(1u32)
        .educational(1u32)
        .themed_verse_threads(1u32)
        .build()
        .expect("Valid plan");

    let report = dispatcher
        .run_daily_routine(&plan, &[TargetAccount::new("first", "1")])
        .await;

    assert_eq!(*report.tally(ActionKind::MorningThread).succeeded(), 1);
    assert_eq!(*report.tally(ActionKind::EcosystemNews).succeeded(), 1);
    assert_eq!(*report.tally(ActionKind::TrendingCoins).succeeded(), 1);
    assert_eq!(*report.tally(ActionKind::UpcomingProjects).succeeded(), 1);
    assert_eq!(*report.tally(ActionKind::MarketUpdate).failed(), 1);
    assert_eq!(*report.tally(ActionKind::Insight).succeeded(), 1);
    assert_eq!(*report.tally(ActionKind::Tip).succeeded(), 1);
    assert_eq!(*report.tally(ActionKind::Educational).succeeded(), 1);
    assert_eq!(*report.tally(ActionKind::ThemedVerseThread).succeeded(), 1);
    assert_eq!(*report.replies(), 1);

    // Five threads of two, 3 singles, 1 reply.
    assert_eq!(*report.usage_before().posts().used_today(), 0);
    assert_eq!(*report.usage_after().posts().used_today(), 14);
    assert_eq!(*report.usage_after().reads().used_today(), 1);

    let json = serde_json::to_value(&report).expect("Serializable");
    assert_eq!(json["tallies"]["market_update"]["failed"], 1);
}

#[tokio::test]
async fn test_daily_routine_skips_when_quota_exhausted() {
    let social = Arc::new(FakeSocial::default());
    let mut dispatcher = dispatcher(social.clone(), limits(3, 4)).await;
    let plan = RoutinePlanBuilder::default()
        .insights(1u32)
        .tips(0u32)
        .educational(0u32)
        .themed_verse_threads(1u32)
        .interactions(false)
        .build()
        .expect("Valid plan");

    let report = dispatcher.run_daily_routine(&plan, &[]).await;

    // Morning thread uses 2 of 3; no later thread fits; the insight does.
    assert_eq!(*report.tally(ActionKind::MorningThread).succeeded(), 1);
    assert_eq!(*report.tally(ActionKind::EcosystemNews).skipped(), 1);
    assert_eq!(*report.tally(ActionKind::TrendingCoins).skipped(), 1);
    assert_eq!(*report.tally(ActionKind::UpcomingProjects).skipped(), 1);
    assert_eq!(*report.tally(ActionKind::MarketUpdate).skipped(), 1);
    assert_eq!(*report.tally(ActionKind::Insight).succeeded(), 1);
    assert_eq!(*report.tally(ActionKind::ThemedVerseThread).skipped(), 1);
    assert_eq!(social.send_calls(), 3);
}

#[tokio::test]
async fn test_daily_routine_headline_threads_in_order() {
    let social = Arc::new(FakeSocial::default());
    let mut dispatcher = dispatcher(social.clone(), UsageLimits::default()).await;
    let plan = RoutinePlanBuilder::default()
        .market_update(false)
        .insights(0u32)
        .tips(0u32)
        .educational(0u32)
        .themed_verse_threads(0u32)
        .interactions(false)
        .build()
        .expect("Valid plan");

    let report = dispatcher.run_daily_routine(&plan, &[]).await;

    let openers: Vec<String> = social
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            Call::Post(text) => Some(text),
            _ => None,
        })
        .collect();
    assert_eq!(
        openers,
        vec!["morning en", "news en", "trending en", "projects en"]
    );
    assert_eq!(social.send_calls(), 8);
    assert_eq!(report.tally(ActionKind::MarketUpdate), KindTally::default());
}

#[test]
fn test_plan_counts_enabled_threads() {
    let plan = RoutinePlan::default();
    // Six threads of two plus six singles.
    assert_eq!(plan.post_units(2), 18);

    let trimmed = RoutinePlanBuilder::default()
        .ecosystem_news(false)
        .market_update(false)
        .themed_verse_threads(1u32)
        .build()
        .expect("Valid plan");
    assert_eq!(trimmed.post_units(2), 14);
}

#[tokio::test]
async fn test_insight_burst_posts_three() {
    let social = Arc::new(FakeSocial::default());
    let mut dispatcher = dispatcher(social.clone(), UsageLimits::default()).await;

    assert_eq!(dispatcher.run_insight_burst().await, 3);
    assert_eq!(
        social.calls(),
        vec![
            Call::Post("insight".to_string()),
            Call::Post("tip".to_string()),
            Call::Post("educational".to_string()),
        ]
    );
}
