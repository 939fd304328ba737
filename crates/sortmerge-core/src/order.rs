//! Sort-and-mark helpers
//!
//! The one place this crate establishes sortedness itself rather than
//! trusting the caller.

use crate::sorted::By;
use crate::{log_op_end, log_op_start};
use sortmerge_core_types::schema::OP_ORDER;
use std::time::Instant;

/// Stable-sort `items` by `key` and mark the result as sorted
///
/// Each key is computed once. Elements with equal keys keep their
/// relative order, so grouping the result preserves input order within
/// each group.
///
/// # Example
///
/// ```
/// use sortmerge_core::order;
///
/// let sorted = order(vec!["pear", "fig", "apple"], |s: &&str| s.len());
/// assert_eq!(sorted.get_ref(), &vec!["fig", "pear", "apple"]);
/// ```
pub fn order<T, F, K>(mut items: Vec<T>, key: F) -> By<Vec<T>, F>
where
    F: Fn(&T) -> K,
    K: Ord,
{
    let started = Instant::now();
    log_op_start!(OP_ORDER, len = items.len());

    items.sort_by_cached_key(&key);

    log_op_end!(
        OP_ORDER,
        duration_ms = started.elapsed().as_millis() as u64,
        len = items.len()
    );
    By::assume_sorted(items, key)
}

/// Drop the items failing `keep`, then [`order`] the rest
///
/// Typical use is discarding rows whose key is missing before sorting:
///
/// ```
/// use sortmerge_core::order_where;
///
/// let rows = vec![(Some(3), "c"), (None, "x"), (Some(1), "a")];
/// let sorted = order_where(rows, |r| r.0, |r| r.0.is_some());
/// let names: Vec<&str> = sorted.into_inner().into_iter().map(|r| r.1).collect();
/// assert_eq!(names, vec!["a", "c"]);
/// ```
pub fn order_where<T, F, K, P>(mut items: Vec<T>, key: F, keep: P) -> By<Vec<T>, F>
where
    F: Fn(&T) -> K,
    K: Ord,
    P: FnMut(&T) -> bool,
{
    let before = items.len();
    items.retain(keep);
    tracing::debug!(
        op = OP_ORDER,
        dropped = before - items.len(),
        "filtered before sort"
    );
    order(items, key)
}
