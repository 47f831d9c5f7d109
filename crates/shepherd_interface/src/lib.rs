//! Trait seams between the Shepherd dispatcher and its collaborators.
//!
//! - [`SocialClient`] posts, replies and reads on the social platform
//! - [`VerseSource`] and [`MarketSource`] supply content data
//! - [`ThemeSelector`] classifies fetched posts
//! - [`ContentComposer`] renders post bodies
//!
//! The dispatcher only ever sees these traits, so tests substitute fakes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod composer;
mod social;
mod source;

pub use composer::ContentComposer;
pub use social::SocialClient;
pub use source::{MarketSource, ThemeSelector, VerseSource};
