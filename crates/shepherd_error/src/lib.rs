//! Error types for the Shepherd posting bot.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! `ShepherdError` aggregates every layer for binaries and facades.
//!
//! # Examples
//!
//! ```
//! use shepherd_error::{ShepherdResult, StorageError, StorageErrorKind};
//!
//! fn load_usage() -> ShepherdResult<String> {
//!     Err(StorageError::new(StorageErrorKind::FileWrite("disk full".to_string())))?
//! }
//!
//! assert!(load_usage().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod dispatch;
mod error;
mod platform;
mod source;
mod storage;

pub use config::ConfigError;
pub use dispatch::{DispatchError, DispatchErrorKind, DispatchResult, QuotaWindow};
pub use error::{ShepherdError, ShepherdErrorKind, ShepherdResult};
pub use platform::{PlatformError, PlatformErrorKind, PlatformResult};
pub use source::{SourceError, SourceErrorKind, SourceResult};
pub use storage::{StorageError, StorageErrorKind, StorageResult};
