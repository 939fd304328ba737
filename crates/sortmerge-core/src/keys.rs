//! Key types with a total order
//!
//! Floating point values are not `Ord`, so they cannot be used as join or
//! grouping keys directly. Wrap them in [`TotalF64`].
//!
//! For keys that may be missing, use `Option<K>`: all `None`s form one key
//! class and sort before every present key.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// An `f64` ordered by [`f64::total_cmp`]
///
/// `-0.0` sorts before `+0.0` and the two are distinct keys. A NaN equals
/// another NaN with the same bit pattern.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TotalF64(pub f64);

impl TotalF64 {
    pub fn get(self) -> f64 {
        self.0
    }
}

impl PartialEq for TotalF64 {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TotalF64 {}

impl PartialOrd for TotalF64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TotalF64 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for TotalF64 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl From<f64> for TotalF64 {
    fn from(value: f64) -> Self {
        TotalF64(value)
    }
}

impl From<TotalF64> for f64 {
    fn from(value: TotalF64) -> Self {
        value.0
    }
}

impl std::fmt::Display for TotalF64 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}
