//! Wall-clock scheduler loop.

use crate::app::{JobOutcome, Shepherd};
use std::future::Future;
use tracing::{debug, info, instrument, warn};

/// Run scheduled jobs until `shutdown` completes.
///
/// Sleeps until the earliest due job, runs exactly that one, and repeats.
/// Shutdown is only observed between jobs; a running job always finishes.
/// Returns immediately when the schedule has no upcoming jobs.
#[instrument(skip_all)]
pub async fn run_scheduler<F>(shepherd: &mut Shepherd, shutdown: F)
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let clock = shepherd.clock();

    loop {
        let now = clock.now();
        let Some((due, job)) = shepherd.schedule().next_due(now) else {
            warn!("No upcoming jobs, scheduler stopping");
            return;
        };
        let name = job.name().clone();
        let kind = *job.job();
        let wait = (due - now).to_std().unwrap_or_default();
        info!(job = %name, due = %due, wait_secs = wait.as_secs(), "Waiting for next job");

        tokio::select! {
            biased;
            _ = &mut shutdown => {
                info!("Shutdown requested, scheduler stopping");
                return;
            }
            _ = tokio::time::sleep(wait) => {}
        }

        info!(job = %name, "Running scheduled job");
        match shepherd.run_job(kind).await {
            JobOutcome::Routine(report) => debug!(report = %report, "Routine report"),
            JobOutcome::Replies(replies) => info!(job = %name, replies, "Job finished"),
            JobOutcome::Posts(posts) => info!(job = %name, posts, "Job finished"),
        }
    }
}
