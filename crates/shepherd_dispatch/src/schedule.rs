//! Wall-clock job schedule.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use shepherd_error::ConfigError;
use std::str::FromStr;

/// Work the runner can perform at a scheduled time.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum JobKind {
    /// Full daily routine.
    DailyRoutine,
    /// One interaction pass.
    Interactions,
    /// One insight, tip and educational post.
    Insights,
}

/// A named job and its seven-field cron expression.
///
/// Fields are `sec min hour day-of-month month day-of-week year`, in UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ScheduledJob {
    /// Name for logs.
    name: String,
    /// Cron expression.
    cron: String,
    /// What to run.
    job: JobKind,
}

impl ScheduledJob {
    /// Create a job.
    pub fn new(name: impl Into<String>, cron: impl Into<String>, job: JobKind) -> Self {
        Self {
            name: name.into(),
            cron: cron.into(),
            job,
        }
    }
}

#[derive(Debug, Clone)]
struct CompiledJob {
    job: ScheduledJob,
    schedule: cron::Schedule,
}

/// Parsed set of jobs.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use shepherd_dispatch::{JobKind, JobSchedule};
///
/// let schedule = JobSchedule::default_jobs();
/// let after = Utc.with_ymd_and_hms(2026, 4, 14, 11, 0, 0).unwrap();
/// let (at, job) = schedule.next_due(after).expect("Job due");
///
/// assert_eq!(at, Utc.with_ymd_and_hms(2026, 4, 14, 12, 0, 0).unwrap());
/// assert_eq!(*job.job(), JobKind::Interactions);
/// ```
#[derive(Debug, Clone)]
pub struct JobSchedule {
    jobs: Vec<CompiledJob>,
}

impl JobSchedule {
    /// Parse the cron expressions of `jobs`.
    ///
    /// # Errors
    ///
    /// Returns error if any expression is invalid.
    pub fn new(jobs: Vec<ScheduledJob>) -> Result<Self, ConfigError> {
        let jobs = jobs
            .into_iter()
            .map(|job| {
                let schedule = cron::Schedule::from_str(&job.cron).map_err(|e| {
                    ConfigError::new(format!(
                        "Invalid cron expression '{}' for job '{}': {}",
                        job.cron, job.name, e
                    ))
                })?;
                Ok(CompiledJob { job, schedule })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;
        Ok(Self { jobs })
    }

    /// Routine at 08:00, insights at 10:00, 14:00 and 18:00, interactions at
    /// 12:00, 16:00 and 20:00 UTC.
    pub fn default_jobs() -> Self {
        let jobs = default_job_list()
            .into_iter()
            .filter_map(|job| {
                cron::Schedule::from_str(&job.cron)
                    .ok()
                    .map(|schedule| CompiledJob { job, schedule })
            })
            .collect();
        Self { jobs }
    }

    /// Earliest job due strictly after `after`.
    ///
    /// Ties go to the job listed first.
    pub fn next_due(&self, after: DateTime<Utc>) -> Option<(DateTime<Utc>, &ScheduledJob)> {
        self.jobs
            .iter()
            .filter_map(|compiled| {
                compiled
                    .schedule
                    .after(&after)
                    .next()
                    .map(|at| (at, &compiled.job))
            })
            .fold(None, |best, candidate| match best {
                Some((best_at, _)) if best_at <= candidate.0 => best,
                _ => Some(candidate),
            })
    }

    /// Configured jobs in order.
    pub fn jobs(&self) -> impl Iterator<Item = &ScheduledJob> {
        self.jobs.iter().map(|compiled| &compiled.job)
    }

    /// Whether no job is configured.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

/// The default job list, also used when configuration names none.
pub fn default_job_list() -> Vec<ScheduledJob> {
    vec![
        ScheduledJob::new("daily_routine", "0 0 8 * * * *", JobKind::DailyRoutine),
        ScheduledJob::new("insights", "0 0 10,14,18 * * * *", JobKind::Insights),
        ScheduledJob::new("interactions", "0 0 12,16,20 * * * *", JobKind::Interactions),
    ]
}
