//! Sortedness validation
//!
//! Every algorithm in this crate trusts the caller's claim that its input
//! is sorted. Checking costs a comparison per element, so it is opt-in:
//!
//! - [`check_sorted`] validates a whole slice eagerly.
//! - [`OrderCheck`] is the policy type parameter of the lazy iterators.
//!   [`Unchecked`] compiles down to nothing; [`Checked`] compares each new
//!   key with the previous one on the same side as items are pulled.

use crate::errors::{MergeError, Result};
use crate::{log_op_end, log_op_error, log_op_start};
use serde::{Deserialize, Serialize};
use sortmerge_core_types::schema::OP_CHECK_SORTED;
use sortmerge_core_types::PassId;
use std::convert::Infallible;
use std::fmt::Debug;
use std::time::Instant;

/// Which input a cursor reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// First input of a join
    Left,
    /// Second input of a join
    Right,
    /// The only input of a grouping or a slice check
    Single,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
            Side::Single => write!(f, "input"),
        }
    }
}

/// How strictly consecutive keys must increase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Equal neighbours allowed (grouping input)
    #[default]
    NonDescending,
    /// Equal neighbours rejected (join input)
    StrictlyIncreasing,
}

impl Strictness {
    /// Whether `next` may follow `previous`
    pub fn admits<K: Ord>(self, previous: &K, next: &K) -> bool {
        match self {
            Strictness::NonDescending => previous <= next,
            Strictness::StrictlyIncreasing => previous < next,
        }
    }
}

/// Build the error describing a rejected neighbour pair
pub(crate) fn violation<K: Ord + Debug>(
    side: Side,
    position: usize,
    previous: &K,
    next: &K,
) -> MergeError {
    if previous == next {
        MergeError::DuplicateKey {
            side,
            position,
            key: format!("{:?}", next),
        }
    } else {
        MergeError::OutOfOrder {
            side,
            position,
            previous: format!("{:?}", previous),
            next: format!("{:?}", next),
        }
    }
}

/// Policy deciding whether a lazy pass validates key order
pub trait OrderCheck<K> {
    /// Error produced when validation fails
    type Error;

    /// Validate that `next`, found at `position` on `side`, may follow `previous`
    ///
    /// # Errors
    ///
    /// Returns `Self::Error` when the pair breaks the policy.
    fn check(
        &self,
        side: Side,
        position: usize,
        previous: &K,
        next: &K,
    ) -> std::result::Result<(), Self::Error>;

    /// Called once when the pass runs out of input
    fn pass_finished(&self, _op: &'static str, _emitted: usize) {}
}

/// Trust the caller; never compare neighbouring keys
#[derive(Debug, Clone, Copy, Default)]
pub struct Unchecked;

impl<K> OrderCheck<K> for Unchecked {
    type Error = Infallible;

    #[inline]
    fn check(&self, _: Side, _: usize, _: &K, _: &K) -> std::result::Result<(), Infallible> {
        Ok(())
    }
}

/// Validate every neighbouring pair and fail fast on the first violation
#[derive(Debug, Clone)]
pub struct Checked {
    strictness: Strictness,
    pass_id: PassId,
    started: Instant,
}

impl Checked {
    pub fn new(strictness: Strictness) -> Self {
        Self {
            strictness,
            pass_id: PassId::new(),
            started: Instant::now(),
        }
    }

    pub fn strictness(&self) -> Strictness {
        self.strictness
    }

    /// Correlation id attached to every event of this pass
    pub fn pass_id(&self) -> &PassId {
        &self.pass_id
    }

    pub(crate) fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}

impl<K: Ord + Debug> OrderCheck<K> for Checked {
    type Error = MergeError;

    fn check(
        &self,
        side: Side,
        position: usize,
        previous: &K,
        next: &K,
    ) -> std::result::Result<(), MergeError> {
        if self.strictness.admits(previous, next) {
            Ok(())
        } else {
            Err(violation(side, position, previous, next))
        }
    }

    fn pass_finished(&self, op: &'static str, emitted: usize) {
        log_op_end!(
            op,
            duration_ms = self.elapsed_ms(),
            pass_id = %self.pass_id,
            len = emitted
        );
    }
}

/// Verify that `items` is sorted by `key`
///
/// Runs one comparison per neighbouring pair and stops at the first
/// violation. Positions in the error are zero-based indices into `items`.
///
/// # Errors
///
/// * `OutOfOrder` - a key is smaller than the key before it
/// * `DuplicateKey` - a key repeats under `Strictness::StrictlyIncreasing`
pub fn check_sorted<T, K, F>(items: &[T], key: F, strictness: Strictness) -> Result<()>
where
    F: Fn(&T) -> K,
    K: Ord + Debug,
{
    let started = Instant::now();
    log_op_start!(OP_CHECK_SORTED, len = items.len());

    let mut keys = items.iter().map(&key);
    if let Some(mut previous) = keys.next() {
        for (offset, next) in keys.enumerate() {
            if !strictness.admits(&previous, &next) {
                let err = violation(Side::Single, offset + 1, &previous, &next);
                log_op_error!(
                    OP_CHECK_SORTED,
                    err.clone(),
                    duration_ms = started.elapsed().as_millis() as u64
                );
                return Err(err);
            }
            previous = next;
        }
    }

    log_op_end!(
        OP_CHECK_SORTED,
        duration_ms = started.elapsed().as_millis() as u64,
        len = items.len()
    );
    Ok(())
}
