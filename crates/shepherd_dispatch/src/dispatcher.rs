//! Quota-gated execution of posts, replies, reads and threads.

use crate::{DispatchSettings, RoutinePlan, RoutineReport, StepOutcome, ThreadEvent, ThreadPhase};
use shepherd_core::{
    AccountId, ActionKind, Clock, FetchedPost, PostId, ScheduledAction, TargetAccount, Thread,
};
use shepherd_error::{
    DispatchError, DispatchErrorKind, DispatchResult, PlatformErrorKind, PlatformResult,
    QuotaWindow, SourceResult,
};
use shepherd_interface::{ContentComposer, SocialClient, ThemeSelector};
use shepherd_ledger::{Admission, Unit, UsageLedger};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// What a successfully executed [`ScheduledAction`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// A single post or reply went out.
    Posted(PostId),
    /// Every post of a thread went out, in order.
    Threaded(Vec<PostId>),
    /// A read completed.
    Fetched(Vec<FetchedPost>),
}

/// Runs scheduled actions against the usage ledger.
///
/// Every operation checks admission before touching the transport and
/// records exactly the units that were consumed. Operations take `&mut self`,
/// so two of them can never interleave.
pub struct ActionDispatcher {
    ledger: UsageLedger,
    social: Arc<dyn SocialClient>,
    themes: Arc<dyn ThemeSelector>,
    composer: Arc<dyn ContentComposer>,
    clock: Arc<dyn Clock>,
    settings: DispatchSettings,
}

impl std::fmt::Debug for ActionDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionDispatcher")
            .field("ledger", &self.ledger)
            .field("platform", &self.social.platform_name())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl ActionDispatcher {
    /// Assemble a dispatcher from its collaborators.
    pub fn new(
        ledger: UsageLedger,
        social: Arc<dyn SocialClient>,
        themes: Arc<dyn ThemeSelector>,
        composer: Arc<dyn ContentComposer>,
        clock: Arc<dyn Clock>,
        settings: DispatchSettings,
    ) -> Self {
        Self {
            ledger,
            social,
            themes,
            composer,
            clock,
            settings,
        }
    }

    /// The ledger the dispatcher charges.
    pub fn ledger(&self) -> &UsageLedger {
        &self.ledger
    }

    /// Mutable access for summaries and manual records.
    pub fn ledger_mut(&mut self) -> &mut UsageLedger {
        &mut self.ledger
    }

    /// Publish one post whose body is produced by `render`.
    ///
    /// `render` is only invoked after admission, so a denied post costs
    /// nothing. A render failure consumes no quota.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Post quota is exhausted
    /// - Rendering fails
    /// - The transport fails or times out
    /// - A reservation cannot be persisted
    #[instrument(skip_all)]
    pub async fn post_single<F, Fut>(&mut self, render: F) -> DispatchResult<PostId>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = SourceResult<String>>,
    {
        self.admit(Unit::Post, 1).await?;
        let text = render()
            .await
            .map_err(|e| DispatchError::new(DispatchErrorKind::Compose(e.kind.to_string())))?;
        self.send_one(None, &text).await
    }

    /// Publish `thread` as a reply chain.
    ///
    /// The whole thread is admitted up front. Posting stops at the first
    /// failure without retries; the posts that went out are charged.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Post quota cannot cover the whole thread (nothing is sent)
    /// - The first post fails ([`DispatchErrorKind::Transport`])
    /// - A later post fails ([`DispatchErrorKind::PartialThread`])
    /// - A reservation cannot be persisted
    #[instrument(skip_all, fields(posts = thread.len()))]
    pub async fn post_thread(&mut self, thread: Thread) -> DispatchResult<Vec<PostId>> {
        let texts = thread.into_posts();
        let total = texts.len();
        let requested = u32::try_from(total).unwrap_or(u32::MAX);
        if total == 0 {
            return Err(DispatchError::new(DispatchErrorKind::EmptyThread));
        }

        self.admit(Unit::Post, requested).await?;
        let mut phase = ThreadPhase::Idle.on(ThreadEvent::Admit, total);
        self.ledger
            .begin_posts(requested)
            .await
            .map_err(|e| DispatchError::new(DispatchErrorKind::Persistence(e.kind.to_string())))?;

        phase = phase.on(ThreadEvent::Start, total);
        let mut ids: Vec<PostId> = Vec::with_capacity(total);
        let mut cause = None;

        while let ThreadPhase::Posting(index) = phase {
            if index > 0 && !self.settings.thread_post_delay().is_zero() {
                tokio::time::sleep(self.settings.thread_post_delay()).await;
            }
            let text = &texts[index];
            let sent = match ids.last() {
                None => self.bounded(self.social.post(text)).await,
                Some(previous) => self.bounded(self.social.reply(previous, text)).await,
            };
            match sent {
                Ok(id) => {
                    debug!(index, id = %id, "Thread post sent");
                    ids.push(id);
                    phase = phase.on(ThreadEvent::Sent, total);
                }
                Err(kind) => {
                    warn!(index, error = %kind, "Thread post failed, stopping thread");
                    cause = Some(kind);
                    phase = phase.on(ThreadEvent::Fail, total);
                }
            }
        }

        let posted = phase.posted(total);
        self.settle_posts(requested, u32::try_from(posted).unwrap_or(u32::MAX))
            .await;

        match (phase, cause) {
            (ThreadPhase::Failed(0), Some(cause)) => {
                Err(DispatchError::new(DispatchErrorKind::Transport(cause)))
            }
            (ThreadPhase::Failed(posted), Some(cause)) => {
                Err(DispatchError::new(DispatchErrorKind::PartialThread {
                    posted: u32::try_from(posted).unwrap_or(u32::MAX),
                    requested,
                    cause,
                }))
            }
            _ => {
                info!(posts = ids.len(), "Thread posted");
                Ok(ids)
            }
        }
    }

    /// Reply to `target` with `text`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`ActionDispatcher::post_single`], minus rendering.
    #[instrument(skip_all, fields(target = %target))]
    pub async fn reply(&mut self, target: &PostId, text: &str) -> DispatchResult<PostId> {
        self.admit(Unit::Post, 1).await?;
        self.send_one(Some(target), text).await
    }

    /// Read up to `count` recent posts from `account`.
    ///
    /// A completed read costs one read unit even when it returns nothing. A
    /// failed read costs nothing.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Read quota is exhausted
    /// - The transport fails or times out
    /// - A reservation cannot be persisted
    #[instrument(skip_all, fields(account = %account, count))]
    pub async fn fetch_recent(
        &mut self,
        account: &AccountId,
        count: u32,
    ) -> DispatchResult<Vec<FetchedPost>> {
        self.admit(Unit::Read, 1).await?;
        self.ledger
            .begin_reads(1)
            .await
            .map_err(|e| DispatchError::new(DispatchErrorKind::Persistence(e.kind.to_string())))?;

        let fetched = self
            .bounded(self.social.fetch_recent(account, count))
            .await;
        let used = u32::from(fetched.is_ok());
        if let Err(e) = self.ledger.settle_reads(1, used).await {
            error!(error = %e, "Read completed but usage could not be persisted");
        }

        match fetched {
            Ok(posts) => {
                info!(count = posts.len(), "Fetched recent posts");
                Ok(posts)
            }
            Err(kind) => {
                warn!(error = %kind, "Fetch failed");
                Err(DispatchError::new(DispatchErrorKind::Transport(kind)))
            }
        }
    }

    /// Run any scheduled action.
    ///
    /// # Errors
    ///
    /// Returns whatever the underlying operation returns.
    pub async fn execute(&mut self, action: ScheduledAction) -> DispatchResult<ActionOutcome> {
        debug!(cost = ?action.cost(), "Executing action");
        match action {
            ScheduledAction::SinglePost { text } => self
                .post_single(|| async move { Ok(text) })
                .await
                .map(ActionOutcome::Posted),
            ScheduledAction::Thread(thread) => {
                self.post_thread(thread).await.map(ActionOutcome::Threaded)
            }
            ScheduledAction::Reply { target, text } => {
                self.reply(&target, &text).await.map(ActionOutcome::Posted)
            }
            ScheduledAction::ReadQuery { account, max_count } => self
                .fetch_recent(&account, max_count)
                .await
                .map(ActionOutcome::Fetched),
        }
    }

    /// Reply to at most one eligible post per account.
    ///
    /// Accounts are visited in order. The pass ends as soon as post or read
    /// quota runs out. Within an account, posts are tried in the order the
    /// platform returned them until one reply succeeds.
    ///
    /// # Returns
    ///
    /// Number of replies sent.
    #[instrument(skip_all, fields(accounts = accounts.len()))]
    pub async fn run_interaction_pass(&mut self, accounts: &[TargetAccount]) -> u32 {
        let mut replies = 0;

        'accounts: for account in accounts {
            if !self.ledger.can_post(1).await {
                info!("Post quota exhausted, ending interaction pass");
                break;
            }
            if !self.ledger.can_read(1).await {
                info!("Read quota exhausted, ending interaction pass");
                break;
            }

            let posts = match self
                .fetch_recent(account.id(), *self.settings.fetch_count())
                .await
            {
                Ok(posts) => posts,
                Err(e) => {
                    warn!(handle = %account.handle(), error = %e, "Skipping account");
                    continue;
                }
            };

            for post in posts {
                if self.is_stale(&post) {
                    debug!(post = %post.id(), "Skipping stale post");
                    continue;
                }
                if !self.themes.is_eligible(post.text()).await {
                    debug!(post = %post.id(), "Post not eligible for a reply");
                    continue;
                }

                let theme = self.themes.classify(post.text()).await;
                let text = match self.composer.reply_text(&post, theme).await {
                    Ok(text) => text,
                    Err(e) => {
                        warn!(post = %post.id(), error = %e, "Could not compose reply");
                        continue;
                    }
                };

                match self.reply(post.id(), &text).await {
                    Ok(id) => {
                        replies += 1;
                        info!(handle = %account.handle(), %theme, reply = %id, "Replied");
                        continue 'accounts;
                    }
                    Err(e) if e.is_quota() => {
                        info!("Post quota exhausted, ending interaction pass");
                        break 'accounts;
                    }
                    Err(e) => {
                        warn!(handle = %account.handle(), error = %e, "Reply failed, trying next post");
                    }
                }
            }
        }

        info!(replies, "Interaction pass finished");
        replies
    }

    /// Run the full daily routine.
    ///
    /// Order: morning thread, ecosystem news, trending tokens, upcoming
    /// projects, market update, insights, tips, educational posts, themed
    /// verse threads, then one interaction pass.
    /// Each step is independent; a failure never stops the routine.
    #[instrument(skip_all)]
    pub async fn run_daily_routine(
        &mut self,
        plan: &RoutinePlan,
        accounts: &[TargetAccount],
    ) -> RoutineReport {
        let started_at = self.clock.now();
        let before = self.ledger.summary().await;
        info!(posts_today = before.posts().used_today(), "Starting daily routine");
        let mut report = RoutineReport::new(started_at, before);

        let outcome = self
            .routine_thread(|composer| async move { composer.morning_thread(started_at).await })
            .await;
        report.record(ActionKind::MorningThread, outcome);

        if *plan.ecosystem_news() {
            let outcome = self
                .routine_thread(|composer| async move { composer.ecosystem_news_thread().await })
                .await;
            report.record(ActionKind::EcosystemNews, outcome);
        }

        if *plan.trending_coins() {
            let outcome = self
                .routine_thread(|composer| async move { composer.trending_coins_thread().await })
                .await;
            report.record(ActionKind::TrendingCoins, outcome);
        }

        if *plan.upcoming_projects() {
            let outcome = self
                .routine_thread(|composer| async move { composer.upcoming_projects_thread().await })
                .await;
            report.record(ActionKind::UpcomingProjects, outcome);
        }

        if *plan.market_update() {
            let outcome = self
                .routine_thread(|composer| async move { composer.market_thread().await })
                .await;
            report.record(ActionKind::MarketUpdate, outcome);
        }

        for _ in 0..*plan.insights() {
            let outcome = self.routine_single(SinglePost::Insight).await;
            report.record(ActionKind::Insight, outcome);
        }

        for _ in 0..*plan.tips() {
            let outcome = self.routine_single(SinglePost::Tip).await;
            report.record(ActionKind::Tip, outcome);
        }

        for _ in 0..*plan.educational() {
            let outcome = self.routine_single(SinglePost::Educational).await;
            report.record(ActionKind::Educational, outcome);
        }

        for _ in 0..*plan.themed_verse_threads() {
            let outcome = self
                .routine_thread(|composer| async move { composer.themed_verse_thread().await })
                .await;
            report.record(ActionKind::ThemedVerseThread, outcome);
        }

        if *plan.interactions() {
            let replies = self.run_interaction_pass(accounts).await;
            report.record_replies(replies);
        }

        let after = self.ledger.summary().await;
        report.finish(self.clock.now(), after);
        info!(
            succeeded = report.total_succeeded(),
            replies = report.replies(),
            "Daily routine finished"
        );
        report
    }

    /// One insight, one tip and one educational post.
    ///
    /// # Returns
    ///
    /// Number of posts that went out.
    #[instrument(skip_all)]
    pub async fn run_insight_burst(&mut self) -> u32 {
        let mut posted = 0;
        for kind in [SinglePost::Insight, SinglePost::Tip, SinglePost::Educational] {
            if self.routine_single(kind).await == StepOutcome::Succeeded {
                posted += 1;
            }
        }
        info!(posted, "Insight burst finished");
        posted
    }

    async fn routine_thread<F, Fut>(&mut self, render: F) -> StepOutcome
    where
        F: FnOnce(Arc<dyn ContentComposer>) -> Fut,
        Fut: Future<Output = SourceResult<Thread>>,
    {
        let expected = *self.ledger.limits().posts_per_thread();
        if !self.ledger.can_post(expected).await {
            return StepOutcome::Skipped;
        }

        let thread = match render(Arc::clone(&self.composer)).await {
            Ok(thread) => thread,
            Err(e) => {
                warn!(error = %e, "Could not compose thread");
                return StepOutcome::Failed;
            }
        };

        classify(self.post_thread(thread).await)
    }

    async fn routine_single(&mut self, kind: SinglePost) -> StepOutcome {
        let composer = Arc::clone(&self.composer);
        let result = self
            .post_single(|| async move {
                match kind {
                    SinglePost::Insight => composer.insight().await,
                    SinglePost::Tip => composer.tip().await,
                    SinglePost::Educational => composer.educational().await,
                }
            })
            .await;
        classify(result)
    }

    async fn admit(&mut self, unit: Unit, n: u32) -> DispatchResult<()> {
        let admission = match unit {
            Unit::Post => self.ledger.check_post(n).await,
            Unit::Read => self.ledger.check_read(n).await,
        };
        let (window, used, limit) = match (unit, admission) {
            (_, Admission::Granted) => return Ok(()),
            (Unit::Post, Admission::MonthlyExhausted { used, limit }) => {
                (QuotaWindow::MonthlyPosts, used, limit)
            }
            (Unit::Post, Admission::DailyExhausted { used, limit }) => {
                (QuotaWindow::DailyPosts, used, limit)
            }
            (Unit::Read, Admission::MonthlyExhausted { used, limit }) => {
                (QuotaWindow::MonthlyReads, used, limit)
            }
            (Unit::Read, Admission::DailyExhausted { used, limit }) => {
                (QuotaWindow::DailyReads, used, limit)
            }
        };
        Err(DispatchError::new(DispatchErrorKind::QuotaExceeded {
            window,
            requested: n,
            used,
            limit,
        }))
    }

    async fn send_one(&mut self, target: Option<&PostId>, text: &str) -> DispatchResult<PostId> {
        self.ledger
            .begin_posts(1)
            .await
            .map_err(|e| DispatchError::new(DispatchErrorKind::Persistence(e.kind.to_string())))?;

        let sent = match target {
            None => self.bounded(self.social.post(text)).await,
            Some(target) => self.bounded(self.social.reply(target, text)).await,
        };
        self.settle_posts(1, u32::from(sent.is_ok())).await;

        match sent {
            Ok(id) => {
                info!(id = %id, "Posted");
                Ok(id)
            }
            Err(kind) => {
                warn!(error = %kind, "Post failed");
                Err(DispatchError::new(DispatchErrorKind::Transport(kind)))
            }
        }
    }

    async fn settle_posts(&mut self, reserved: u32, used: u32) {
        if let Err(e) = self.ledger.settle_posts(reserved, used).await {
            error!(error = %e, used, "Posts went out but usage could not be persisted");
        }
    }

    async fn bounded<T>(
        &self,
        call: impl Future<Output = PlatformResult<T>>,
    ) -> Result<T, PlatformErrorKind> {
        let limit = self.settings.transport_timeout();
        match tokio::time::timeout(limit, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(e.kind),
            Err(_) => Err(PlatformErrorKind::Timeout(
                u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
            )),
        }
    }

    fn is_stale(&self, post: &FetchedPost) -> bool {
        match (self.settings.max_post_age(), post.created_at()) {
            (Some(max_age), Some(created_at)) => self.clock.now() - *created_at > max_age,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum SinglePost {
    Insight,
    Tip,
    Educational,
}

fn classify<T>(result: DispatchResult<T>) -> StepOutcome {
    match result {
        Ok(_) => StepOutcome::Succeeded,
        Err(e) if e.is_quota() => StepOutcome::Skipped,
        Err(e) => {
            warn!(error = %e, "Routine step failed");
            StepOutcome::Failed
        }
    }
}
