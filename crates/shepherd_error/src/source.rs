//! Errors from content collaborators (verse lookup, market data, inference).

/// Kinds of content source failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SourceErrorKind {
    /// Request could not be sent or the connection failed.
    #[display("Request failed: {}", _0)]
    Http(String),

    /// Service answered with an unexpected status code.
    #[display("Unexpected status {}", _0)]
    Status(u16),

    /// Service answered without usable data.
    #[display("Malformed response: {}", _0)]
    Malformed(String),

    /// Verse reference could not be parsed or mapped.
    #[display("Unknown reference: {}", _0)]
    UnknownReference(String),

    /// Local language model failed.
    #[display("Inference failed: {}", _0)]
    Inference(String),

    /// Static content table had nothing to offer.
    #[display("No content available: {}", _0)]
    Empty(String),
}

/// Content source error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Source Error: {} at line {} in {}", kind, line, file)]
pub struct SourceError {
    /// The kind of error that occurred
    pub kind: SourceErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl SourceError {
    /// Create a new source error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SourceErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for content source operations.
pub type SourceResult<T> = Result<T, SourceError>;
