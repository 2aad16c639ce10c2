//! Identifier newtypes issued by the feed API.
//!
//! The feed service hands out plain numeric identifiers; these wrappers
//! keep a feed id from ever being passed where a user id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a posted feed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FeedId(pub u64);

impl FeedId {
    /// Wrap a raw API identifier.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw identifier value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for FeedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "feed-{}", self.0)
    }
}

impl From<u64> for FeedId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<FeedId> for u64 {
    fn from(id: FeedId) -> Self {
        id.0
    }
}

/// Identifier of a member account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub u64);

impl UserId {
    /// Wrap a raw API identifier.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw identifier value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user-{}", self.0)
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<UserId> for u64 {
    fn from(id: UserId) -> Self {
        id.0
    }
}
