//! Social platform transports for the Shepherd posting bot.
//!
//! [`XClient`] talks to the X API v2. [`DryRunClient`] logs what would have
//! been published.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod dry_run;
mod text;
mod wire;
mod x;

pub use dry_run::DryRunClient;
pub use text::{MAX_POST_CHARS, truncate_for_post};
pub use x::{X_API_BASE_URL, XClient};
