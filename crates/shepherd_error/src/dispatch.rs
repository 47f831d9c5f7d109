//! Errors surfaced by scheduled actions.

use crate::PlatformErrorKind;

/// Quota window that denied an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum QuotaWindow {
    /// Monthly post allowance.
    #[display("monthly posts")]
    MonthlyPosts,
    /// Daily post allowance.
    #[display("daily posts")]
    DailyPosts,
    /// Monthly read allowance.
    #[display("monthly reads")]
    MonthlyReads,
    /// Daily read allowance.
    #[display("daily reads")]
    DailyReads,
}

/// Why a scheduled action did not run to completion.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum DispatchErrorKind {
    /// Admission check failed; nothing was attempted.
    #[display("Quota exceeded ({}): requested {} with {} of {} used", window, requested, used, limit)]
    QuotaExceeded {
        /// Window that denied the request.
        window: QuotaWindow,
        /// Units the action needed.
        requested: u32,
        /// Units already consumed in the window.
        used: u32,
        /// Configured limit of the window.
        limit: u32,
    },

    /// Transport call failed; no quota was consumed.
    #[display("Transport failure: {}", _0)]
    Transport(PlatformErrorKind),

    /// Thread stopped after a prefix was posted; the prefix was charged.
    #[display("Thread failed after {} of {} posts: {}", posted, requested, cause)]
    PartialThread {
        /// Posts that went out before the failure.
        posted: u32,
        /// Posts the thread contained.
        requested: u32,
        /// Failure of the first post that did not go out.
        cause: PlatformErrorKind,
    },

    /// Post body could not be composed.
    #[display("Composition failed: {}", _0)]
    Compose(String),

    /// Ledger could not persist a reservation, so the action was not attempted.
    #[display("Ledger persistence failed: {}", _0)]
    Persistence(String),

    /// Thread contained no posts.
    #[display("Thread is empty")]
    EmptyThread,
}

impl DispatchErrorKind {
    /// True when the action was skipped by an admission check.
    pub fn is_quota(&self) -> bool {
        matches!(self, Self::QuotaExceeded { .. })
    }
}

/// Dispatch error with location tracking.
///
/// # Examples
///
/// ```
/// use shepherd_error::{DispatchError, DispatchErrorKind, QuotaWindow};
///
/// let err = DispatchError::new(DispatchErrorKind::QuotaExceeded {
///     window: QuotaWindow::DailyPosts,
///     requested: 2,
///     used: 17,
///     limit: 17,
/// });
/// assert!(err.is_quota());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Dispatch Error: {} at line {} in {}", kind, line, file)]
pub struct DispatchError {
    /// The kind of error that occurred
    pub kind: DispatchErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl DispatchError {
    /// Create a new dispatch error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: DispatchErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// True when the action was skipped by an admission check.
    pub fn is_quota(&self) -> bool {
        self.kind.is_quota()
    }
}

/// Result type for dispatcher operations.
pub type DispatchResult<T> = Result<T, DispatchError>;
