//! Top-level error wrapper types.

use crate::{ConfigError, DispatchError, PlatformError, SourceError, StorageError};

/// Every error the Shepherd crates can produce.
///
/// # Examples
///
/// ```
/// use shepherd_error::{ConfigError, ShepherdError, ShepherdErrorKind};
///
/// let err: ShepherdError = ConfigError::new("Missing field").into();
/// assert!(matches!(err.kind(), ShepherdErrorKind::Config(_)));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ShepherdErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Ledger storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Social platform error
    #[from(PlatformError)]
    Platform(PlatformError),
    /// Verse, market or inference source error
    #[from(SourceError)]
    Source(SourceError),
    /// Scheduled action error
    #[from(DispatchError)]
    Dispatch(DispatchError),
}

/// Shepherd error with kind discrimination.
///
/// # Examples
///
/// ```
/// use shepherd_error::{ShepherdResult, ConfigError};
///
/// fn might_fail() -> ShepherdResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Shepherd Error: {}", _0)]
pub struct ShepherdError(Box<ShepherdErrorKind>);

impl ShepherdError {
    /// Create a new error from a kind.
    pub fn new(kind: ShepherdErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ShepherdErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to ShepherdErrorKind
impl<T> From<T> for ShepherdError
where
    T: Into<ShepherdErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Shepherd operations.
pub type ShepherdResult<T> = std::result::Result<T, ShepherdError>;
