//! SortMerge Core - Merge-join and run-length grouping over presorted data
//!
//! This crate provides single-pass, lazy transformations over sequences the
//! caller declares sorted by a key:
//! - The presorted marker [`By`] and the [`order`] helper that produces one
//! - Run-length grouping ([`group_by_key`], [`Groups`], [`Group`])
//! - Full outer merge-join ([`merge_join`], [`FullJoin`], [`JoinedPair`])
//!   and the inner / left / right flavors derived from it
//! - Opt-in order validation ([`check_sorted`], `checked()` adaptors)
//! - Canonical error and logging facilities
//!
//! # Joining inputs with repeated keys
//!
//! [`merge_join`] expects each side to be strictly increasing. To join
//! sides whose keys repeat, group each side first and join the groups:
//!
//! ```
//! use sortmerge_core::{group_by_key, merge_join};
//!
//! let left = [(1, 'a'), (1, 'b'), (2, 'c')];
//! let right = [(1, 'x'), (3, 'y'), (3, 'z')];
//!
//! let rows: Vec<(Option<usize>, Option<usize>)> = merge_join(
//!     group_by_key(&left, |r| r.0),
//!     |g| *g.key(),
//!     group_by_key(&right, |r| r.0),
//!     |g| *g.key(),
//! )
//! .map(|pair| {
//!     let (l, r) = pair.into_options();
//!     (l.map(|g| g.len()), r.map(|g| g.len()))
//! })
//! .collect();
//!
//! assert_eq!(rows, vec![(Some(2), Some(1)), (Some(1), None), (None, Some(2))]);
//! ```

pub mod check;
pub mod errors;
pub mod group;
pub mod join;
pub mod keys;
pub mod length;
pub mod logging_facility;
pub mod order;
pub mod pair;
pub mod sorted;

#[doc(hidden)]
pub use sortmerge_core_types as core_types;

// Re-export commonly used types
pub use check::{check_sorted, Checked, OrderCheck, Side, Strictness, Unchecked};
pub use errors::{ExError, ExErrorKind, MergeError, Result};
pub use group::{group_by_key, Group, Groups};
pub use join::{merge_join, FullJoin, JoinStats};
pub use keys::TotalF64;
pub use length::{with_length, CheckedLength, Length};
pub use order::{order, order_where};
pub use pair::JoinedPair;
pub use sorted::By;
