//! Run-length grouping of a presorted slice
//!
//! A run is a maximal stretch of neighbouring elements with equal keys.
//! Runs are found with key equality only, so the input only needs equal
//! keys to be adjacent; a total order is required only when validating.
//!
//! Each [`Group`] borrows its members from the source slice. The borrow
//! checker keeps the slice from being mutated while any group is alive.

use crate::check::{Checked, OrderCheck, Side, Strictness, Unchecked};
use crate::errors::MergeError;
use crate::{log_op_error, log_op_start};
use serde::Serialize;
use sortmerge_core_types::schema::OP_GROUP;
use sortmerge_core_types::PassId;
use std::fmt::Debug;
use std::iter::FusedIterator;

/// One run of equal keys: the key and a view of its members
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Group<'a, K, T> {
    key: K,
    members: &'a [T],
}

impl<'a, K, T> Group<'a, K, T> {
    pub fn new(key: K, members: &'a [T]) -> Self {
        Self { key, members }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    /// Members of the run, borrowed from the source slice
    pub fn members(&self) -> &'a [T] {
        self.members
    }

    pub fn into_key(self) -> K {
        self.key
    }

    pub fn into_parts(self) -> (K, &'a [T]) {
        (self.key, self.members)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false for groups produced by [`Groups`]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'a, T> {
        self.members.iter()
    }
}

impl<K: Clone, T> Clone for Group<'_, K, T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            members: self.members,
        }
    }
}

impl<'a, K, T> IntoIterator for Group<'a, K, T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl<'a, K, T> IntoIterator for &Group<'a, K, T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

/// Lazy iterator over the runs of a presorted slice
///
/// Each call to `next` scans exactly one run, computing the key of every
/// element once. The key of the element that ends a run is kept for the
/// next call rather than recomputed.
///
/// The slice must be sorted by `key` (or at least have equal keys
/// adjacent). This is not checked: if equal keys are split apart, each
/// piece comes out as its own group. Call [`Groups::checked`] to get
/// `Result` items and an error at the first decreasing run key instead.
pub struct Groups<'a, T, F, K, C: OrderCheck<K> = Unchecked> {
    items: &'a [T],
    key: F,
    start: usize,
    boundary_key: Option<K>,
    check: C,
    pending: Option<C::Error>,
    emitted: usize,
    done: bool,
}

/// Group a presorted slice into runs of equal key
///
/// # Example
///
/// ```
/// use sortmerge_core::group_by_key;
///
/// let items = [1, 3, 2, 4];
/// let groups: Vec<(bool, Vec<i32>)> = group_by_key(&items, |x| x % 2 == 0)
///     .map(|g| (*g.key(), g.members().to_vec()))
///     .collect();
/// assert_eq!(groups, vec![(false, vec![1, 3]), (true, vec![2, 4])]);
/// ```
pub fn group_by_key<T, F, K>(items: &[T], key: F) -> Groups<'_, T, F, K>
where
    F: Fn(&T) -> K,
    K: PartialEq,
{
    Groups::new(items, key)
}

impl<'a, T, F, K> Groups<'a, T, F, K, Unchecked>
where
    F: Fn(&T) -> K,
    K: PartialEq,
{
    pub fn new(items: &'a [T], key: F) -> Self {
        Self {
            items,
            key,
            start: 0,
            boundary_key: None,
            check: Unchecked,
            pending: None,
            emitted: 0,
            done: false,
        }
    }

    /// Validate that run keys strictly increase as groups are pulled
    ///
    /// Items become `Result`s. The run closed by the first decreasing key
    /// is still yielded; the next pull yields one `Err` and ends the
    /// iteration.
    pub fn checked(self) -> Groups<'a, T, F, K, Checked>
    where
        K: Ord + Debug,
    {
        // neighbouring runs never share a key, so this rejects equal run keys too
        let check = Checked::new(Strictness::NonDescending);
        log_op_start!(
            OP_GROUP,
            pass_id = %check.pass_id(),
            len = self.items.len() - self.start
        );
        Groups {
            items: self.items,
            key: self.key,
            start: self.start,
            boundary_key: self.boundary_key,
            check,
            pending: None,
            emitted: self.emitted,
            done: self.done,
        }
    }
}

impl<'a, T, F, K, C> Groups<'a, T, F, K, C>
where
    F: Fn(&T) -> K,
    K: PartialEq,
    C: OrderCheck<K>,
{
    /// Number of groups produced so far
    pub fn groups_emitted(&self) -> usize {
        self.emitted
    }

    /// Elements not yet assigned to a group
    pub fn remaining(&self) -> &'a [T] {
        &self.items[self.start..]
    }

    fn advance(&mut self) -> Result<Option<Group<'a, K, T>>, C::Error> {
        if self.done {
            return Ok(None);
        }
        if let Some(err) = self.pending.take() {
            self.done = true;
            return Err(err);
        }
        let items = self.items;
        let start = self.start;
        let Some(first) = items.get(start) else {
            self.done = true;
            self.check.pass_finished(OP_GROUP, self.emitted);
            return Ok(None);
        };

        let run_key = match self.boundary_key.take() {
            Some(key) => key,
            None => (self.key)(first),
        };

        let mut end = start + 1;
        while let Some(item) = items.get(end) {
            let key = (self.key)(item);
            if key != run_key {
                if let Err(err) = self.check.check(Side::Single, end, &run_key, &key) {
                    // the run is complete; report the violation on the next pull
                    self.pending = Some(err);
                }
                self.boundary_key = Some(key);
                break;
            }
            end += 1;
        }

        self.start = end;
        self.emitted += 1;
        Ok(Some(Group::new(run_key, &items[start..end])))
    }

    fn remaining_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let remaining = self.items.len() - self.start;
        (remaining.min(1), Some(remaining))
    }
}

impl<'a, T, F, K> Iterator for Groups<'a, T, F, K, Unchecked>
where
    F: Fn(&T) -> K,
    K: PartialEq,
{
    type Item = Group<'a, K, T>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.advance() {
            Ok(group) => group,
            Err(never) => match never {},
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.remaining_hint()
    }
}

impl<'a, T, F, K> FusedIterator for Groups<'a, T, F, K, Unchecked>
where
    F: Fn(&T) -> K,
    K: PartialEq,
{
}

impl<T, F, K: Ord + Debug> Groups<'_, T, F, K, Checked> {
    pub fn pass_id(&self) -> &PassId {
        self.check.pass_id()
    }
}

impl<'a, T, F, K> Iterator for Groups<'a, T, F, K, Checked>
where
    F: Fn(&T) -> K,
    K: Ord + Debug,
{
    type Item = Result<Group<'a, K, T>, MergeError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.advance() {
            Ok(group) => group.map(Ok),
            Err(err) => {
                log_op_error!(
                    OP_GROUP,
                    err.clone(),
                    pass_id = self.check.pass_id(),
                    duration_ms = self.check.elapsed_ms(),
                    position = ?err.position()
                );
                Some(Err(err))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (_, upper) = self.remaining_hint();
        (0, upper)
    }
}

impl<'a, T, F, K> FusedIterator for Groups<'a, T, F, K, Checked>
where
    F: Fn(&T) -> K,
    K: Ord + Debug,
{
}
