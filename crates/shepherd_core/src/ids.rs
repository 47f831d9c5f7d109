//! Platform identifiers.

use serde::{Deserialize, Serialize};

/// Platform-assigned post identifier.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[display("{}", _0)]
#[serde(transparent)]
pub struct PostId(pub String);

impl PostId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Platform-assigned account identifier.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[display("{}", _0)]
#[serde(transparent)]
pub struct AccountId(pub String);

impl AccountId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// An account the interaction pass reads from, in configured order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct TargetAccount {
    /// Handle without the leading `@`.
    handle: String,
    /// Numeric account id.
    id: AccountId,
}

impl TargetAccount {
    /// Create a target account.
    pub fn new(handle: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            id: AccountId::new(id),
        }
    }
}
