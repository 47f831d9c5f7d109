//! Social platform transport errors.

/// Kinds of failures reported by a social platform transport.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PlatformErrorKind {
    /// Network-level failure before a response arrived.
    #[display("Network failure: {}", _0)]
    Network(String),

    /// Platform answered with an unexpected status code.
    #[display("Unexpected status {}: {}", status, body)]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly truncated.
        body: String,
    },

    /// No response within the configured bound.
    #[display("Timed out after {}ms", _0)]
    Timeout(u64),

    /// Response arrived but did not carry the expected data.
    #[display("Malformed response: {}", _0)]
    MalformedResponse(String),

    /// Credentials missing or rejected.
    #[display("Authentication failed: {}", _0)]
    Authentication(String),
}

/// Platform error with location tracking.
///
/// # Examples
///
/// ```
/// use shepherd_error::{PlatformError, PlatformErrorKind};
///
/// let err = PlatformError::new(PlatformErrorKind::Status {
///     status: 429,
///     body: "Too Many Requests".to_string(),
/// });
/// assert!(format!("{}", err).contains("429"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Platform Error: {} at line {} in {}", kind, line, file)]
pub struct PlatformError {
    /// The kind of error that occurred
    pub kind: PlatformErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PlatformError {
    /// Create a new platform error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PlatformErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for social platform operations.
pub type PlatformResult<T> = Result<T, PlatformError>;
