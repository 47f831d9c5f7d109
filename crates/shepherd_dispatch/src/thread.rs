//! Reply-chained thread posting as a small state machine.

use serde::Serialize;

/// Where a thread is in its lifecycle.
///
/// `Posting(i)` means post `i` is the next to go out. `Failed(i)` means posts
/// `0..i` went out and post `i` did not. Both `Failed` and `Completed` are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ThreadPhase {
    /// Not yet admitted.
    Idle,
    /// Admitted against the ledger, nothing sent.
    Admitted,
    /// Sending post `i`.
    Posting(usize),
    /// Post `i` failed; `i` posts went out.
    Failed(usize),
    /// Every post went out.
    Completed,
}

/// Inputs that move a thread between phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadEvent {
    /// The ledger admitted the whole thread.
    Admit,
    /// Transmission begins.
    Start,
    /// The current post was accepted by the platform.
    Sent,
    /// The current post was rejected or timed out.
    Fail,
}

impl ThreadPhase {
    /// Apply `event` to a thread of `total` posts.
    ///
    /// Events that do not apply to the current phase leave it unchanged, so
    /// terminal phases absorb everything.
    pub fn on(self, event: ThreadEvent, total: usize) -> Self {
        match (self, event) {
            (Self::Idle, ThreadEvent::Admit) => Self::Admitted,
            (Self::Admitted, ThreadEvent::Start) if total == 0 => Self::Completed,
            (Self::Admitted, ThreadEvent::Start) => Self::Posting(0),
            (Self::Posting(i), ThreadEvent::Sent) if i + 1 >= total => Self::Completed,
            (Self::Posting(i), ThreadEvent::Sent) => Self::Posting(i + 1),
            (Self::Posting(i), ThreadEvent::Fail) => Self::Failed(i),
            (phase, _) => phase,
        }
    }

    /// Whether no further event can change the phase.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Failed(_) | Self::Completed)
    }

    /// Posts that went out, given the thread length.
    pub fn posted(&self, total: usize) -> usize {
        match self {
            Self::Idle | Self::Admitted => 0,
            Self::Posting(i) | Self::Failed(i) => *i,
            Self::Completed => total,
        }
    }
}
