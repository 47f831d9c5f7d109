//! Posts fetched from and sent to the platform.

use crate::PostId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A post read from another account's timeline.
///
/// # Examples
///
/// ```
/// use shepherd_core::{FetchedPostBuilder, PostId};
///
/// let post = FetchedPostBuilder::default()
///     .id(PostId::new("1850000000000000000"))
///     .text("Markets are choppy today")
///     .build()
///     .expect("Valid post");
///
/// assert_eq!(post.text(), "Markets are choppy today");
/// assert!(post.created_at().is_none());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct FetchedPost {
    /// Platform id of the post.
    id: PostId,
    /// Post body.
    text: String,
    /// Creation time, when the platform reported one.
    #[builder(default)]
    created_at: Option<DateTime<Utc>>,
}

impl FetchedPost {
    /// Create a fetched post.
    pub fn new(id: PostId, text: impl Into<String>, created_at: Option<DateTime<Utc>>) -> Self {
        Self {
            id,
            text: text.into(),
            created_at,
        }
    }
}

/// An ordered, non-empty sequence of post bodies sent as a reply chain.
///
/// Post `i > 0` is transmitted as a reply to the id returned for post `i - 1`.
/// A thread costs one post unit per body.
///
/// # Examples
///
/// ```
/// use shepherd_core::Thread;
///
/// let thread = Thread::new(vec!["English".to_string(), "中文".to_string()])
///     .expect("Non-empty thread");
/// assert_eq!(thread.len(), 2);
/// assert!(Thread::new(Vec::new()).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Thread(Vec<String>);

impl Thread {
    /// Build a thread, rejecting an empty body list.
    pub fn new(posts: Vec<String>) -> Option<Self> {
        if posts.is_empty() {
            None
        } else {
            Some(Self(posts))
        }
    }

    /// Number of posts, which is also the quota cost.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Threads are never empty; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the post bodies in order.
    pub fn posts(&self) -> &[String] {
        &self.0
    }

    /// Consume the thread into its post bodies.
    pub fn into_posts(self) -> Vec<String> {
        self.0
    }
}

impl TryFrom<Vec<String>> for Thread {
    type Error = String;

    fn try_from(posts: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(posts).ok_or_else(|| "thread must contain at least one post".to_string())
    }
}

impl From<Thread> for Vec<String> {
    fn from(thread: Thread) -> Self {
        thread.0
    }
}
