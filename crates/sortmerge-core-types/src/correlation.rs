//! Pass identifiers
//!
//! A pass starts when `checked()` wraps a join, grouping or declared-length
//! iterator, and ends when that iterator is exhausted or yields its one
//! order or length error. Trusted iterators have no pass and log nothing
//! per item.
//!
//! The id of a pass is written to its `start`, `end` and `end_error`
//! events, and to the `ExError` built for its failure, so a rendered error
//! can be matched with the log lines of the walk that found it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of one checked pass
///
/// Ids are UUIDv7 strings and sort by start time to the millisecond.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PassId(String);

impl PassId {
    /// Id for a pass starting now
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Wrap an id read back from a log line or serialized error
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for PassId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PassId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
