//! Quota-gated action dispatch for the Shepherd posting bot.
//!
//! [`ActionDispatcher`] owns the [`UsageLedger`](shepherd_ledger::UsageLedger)
//! and the collaborators, and is the only component that calls the social
//! platform. [`JobSchedule`] decides when the runner invokes it.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod dispatcher;
mod routine;
mod schedule;
mod settings;
mod thread;

pub use dispatcher::{ActionDispatcher, ActionOutcome};
pub use routine::{KindTally, RoutinePlan, RoutinePlanBuilder, RoutineReport, StepOutcome};
pub use schedule::{JobKind, JobSchedule, ScheduledJob, default_job_list};
pub use settings::{DispatchSettings, DispatchSettingsBuilder, DispatchSettingsBuilderError};
pub use thread::{ThreadEvent, ThreadPhase};
