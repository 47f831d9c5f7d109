//! Scheduled actions and their quota cost.

use crate::{AccountId, PostId, Thread};
use serde::{Deserialize, Serialize};

/// Quota units an action consumes when it fully succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct QuotaCost {
    /// Post units.
    pub posts: u32,
    /// Read units.
    pub reads: u32,
}

impl QuotaCost {
    /// Cost of `n` post units.
    pub fn posts(n: u32) -> Self {
        Self { posts: n, reads: 0 }
    }

    /// Cost of `n` read units.
    pub fn reads(n: u32) -> Self {
        Self { posts: 0, reads: n }
    }
}

/// One unit of work the dispatcher can execute.
///
/// # Examples
///
/// ```
/// use shepherd_core::{QuotaCost, ScheduledAction, Thread};
///
/// let thread = Thread::new(vec!["a".into(), "b".into(), "c".into()]).expect("Non-empty");
/// assert_eq!(ScheduledAction::Thread(thread).cost(), QuotaCost::posts(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScheduledAction {
    /// A standalone post.
    SinglePost {
        /// Post body.
        text: String,
    },
    /// A reply-chained thread.
    Thread(Thread),
    /// A reply to another account's post.
    Reply {
        /// Post being replied to.
        target: PostId,
        /// Reply body.
        text: String,
    },
    /// A read of an account's recent posts.
    ReadQuery {
        /// Account to read.
        account: AccountId,
        /// Maximum posts to return.
        max_count: u32,
    },
}

impl ScheduledAction {
    /// Quota consumed when the action fully succeeds.
    pub fn cost(&self) -> QuotaCost {
        match self {
            Self::SinglePost { .. } | Self::Reply { .. } => QuotaCost::posts(1),
            Self::Thread(thread) => QuotaCost::posts(thread.len() as u32),
            Self::ReadQuery { .. } => QuotaCost::reads(1),
        }
    }
}
