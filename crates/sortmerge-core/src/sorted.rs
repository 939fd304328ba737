//! The presorted marker
//!
//! [`By`] pairs a sequence with the key function it is sorted by. Building
//! one is a promise, not a proof: nothing re-sorts or re-checks the data
//! unless one of the validating constructors is used. Keeping the promise
//! visible in the type makes every call site that relies on it explicit.
//!
//! # Unsorted input
//!
//! Breaking the promise is not detected on the trusted path. Grouping then
//! splits runs that should have merged, and joining skips or misorders
//! matches. The output looks plausible and is wrong. Use
//! [`By::checked`], [`By::checked_strict`], or the `checked()` adaptors
//! while developing against untrusted data.

use crate::check::{check_sorted, Strictness};
use crate::errors::Result;
use crate::group::Groups;
use crate::join::FullJoin;
use std::fmt::Debug;

/// A sequence marked as sorted by `key`
///
/// The key function receives a reference to the element:
/// - for slices and vectors, `&T` of the stored element
/// - for any other iterable used in a join, `&Item` of what it yields
#[derive(Clone, Copy)]
pub struct By<I, F> {
    it: I,
    key: F,
}

impl<I, F> By<I, F> {
    /// Mark `it` as sorted by `key` without checking
    ///
    /// # Example
    ///
    /// ```
    /// use sortmerge_core::By;
    ///
    /// let by = By::assume_sorted(vec![1, 2], |x: &i32| *x);
    /// assert_eq!(by.get_ref(), &vec![1, 2]);
    /// ```
    pub fn assume_sorted(it: I, key: F) -> Self {
        Self { it, key }
    }

    pub fn get_ref(&self) -> &I {
        &self.it
    }

    pub fn key_fn(&self) -> &F {
        &self.key
    }

    pub fn into_parts(self) -> (I, F) {
        (self.it, self.key)
    }

    pub fn into_inner(self) -> I {
        self.it
    }
}

impl<'a, T, F, K> By<&'a [T], F>
where
    F: Fn(&T) -> K,
{
    /// Mark `items` as sorted after verifying keys never decrease
    ///
    /// # Errors
    ///
    /// * `OutOfOrder` - the first position where a key decreases
    pub fn checked(items: &'a [T], key: F) -> Result<Self>
    where
        K: Ord + Debug,
    {
        check_sorted(items, &key, Strictness::NonDescending)?;
        Ok(Self::assume_sorted(items, key))
    }

    /// Mark `items` as sorted after verifying keys strictly increase
    ///
    /// Use this for inputs that go straight into a join.
    ///
    /// # Errors
    ///
    /// * `OutOfOrder` - the first position where a key decreases
    /// * `DuplicateKey` - the first position where a key repeats
    pub fn checked_strict(items: &'a [T], key: F) -> Result<Self>
    where
        K: Ord + Debug,
    {
        check_sorted(items, &key, Strictness::StrictlyIncreasing)?;
        Ok(Self::assume_sorted(items, key))
    }

    /// Group consecutive equal keys; see [`Groups`]
    pub fn groups(self) -> Groups<'a, T, F, K>
    where
        K: PartialEq,
    {
        Groups::new(self.it, self.key)
    }
}

impl<T, F, K> By<Vec<T>, F>
where
    F: Fn(&T) -> K,
{
    /// Borrow as a sorted slice
    pub fn as_slice(&self) -> By<&[T], &F> {
        By::assume_sorted(self.it.as_slice(), &self.key)
    }

    /// Group consecutive equal keys of the owned vector
    pub fn groups(&self) -> Groups<'_, T, &F, K>
    where
        K: PartialEq,
    {
        Groups::new(self.it.as_slice(), &self.key)
    }
}

impl<I, F> By<I, F>
where
    I: IntoIterator,
{
    /// Full outer join with another presorted sequence; see [`FullJoin`]
    pub fn full_join<J, G, K>(self, right: By<J, G>) -> FullJoin<I::IntoIter, J::IntoIter, F, G, K>
    where
        J: IntoIterator,
        F: Fn(&I::Item) -> K,
        G: Fn(&J::Item) -> K,
        K: Ord,
    {
        let (right_it, right_key) = right.into_parts();
        FullJoin::new(self.it.into_iter(), self.key, right_it.into_iter(), right_key)
    }
}

impl<I: Debug, F> Debug for By<I, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("By")
            .field("it", &self.it)
            .finish_non_exhaustive()
    }
}
