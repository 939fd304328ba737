//! Full outer merge-join of two presorted sequences
//!
//! Both inputs are walked once, in lockstep, holding at most one pulled
//! element per side. The side with the smaller key is emitted alone and
//! advanced; equal keys are emitted together and both sides advance. When
//! one side runs dry the other is drained.
//!
//! # Preconditions
//!
//! Each side must be strictly increasing under its key: sorted, and with
//! no key repeated. Neither is checked on the trusted path.
//!
//! - A repeated key on one side matches at most one element of the other
//!   side; the remaining repeats come out unmatched.
//! - A decreasing key makes the merge skip past matches it has already
//!   passed, so those keys come out as unmatched pairs.
//!
//! To join inputs with repeated keys, group each side first and join the
//! groups by their key. [`FullJoin::checked`] turns both preconditions
//! into errors. A violation found while refilling a cursor is held back
//! until the pair already built has been yielded, so every pair before
//! the violation comes out.

use crate::check::{Checked, OrderCheck, Side, Strictness, Unchecked};
use crate::errors::MergeError;
use crate::pair::JoinedPair;
use crate::sorted::By;
use crate::{log_op_error, log_op_start};
use serde::{Deserialize, Serialize};
use sortmerge_core_types::schema::OP_FULL_JOIN;
use sortmerge_core_types::PassId;
use std::cmp::Ordering;
use std::fmt::Debug;
use std::iter::{FilterMap, FusedIterator};

/// Counts of the pairs a join has produced so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinStats {
    pub left_only: usize,
    pub right_only: usize,
    pub both: usize,
}

impl JoinStats {
    pub fn total(&self) -> usize {
        self.left_only + self.right_only + self.both
    }

    fn record<L, R>(&mut self, pair: &JoinedPair<L, R>) {
        match pair {
            JoinedPair::Left(_) => self.left_only += 1,
            JoinedPair::Right(_) => self.right_only += 1,
            JoinedPair::Both(..) => self.both += 1,
        }
    }
}

/// One side of the merge: the iterator and its single pulled element
struct Cursor<I: Iterator, F, K> {
    iter: I,
    key: F,
    head: Option<(I::Item, K)>,
    pulled: usize,
}

impl<I, F, K> Cursor<I, F, K>
where
    I: Iterator,
    F: Fn(&I::Item) -> K,
{
    fn new(iter: I, key: F) -> Self {
        Self {
            iter,
            key,
            head: None,
            pulled: 0,
        }
    }

    fn pull(&mut self) -> Option<(I::Item, K)> {
        let item = self.iter.next()?;
        let key = (self.key)(&item);
        self.pulled += 1;
        Some((item, key))
    }

    fn prime(&mut self) {
        self.head = self.pull();
    }

    /// Replace the consumed head, checking the new key against `previous`
    fn refill<C: OrderCheck<K>>(
        &mut self,
        previous: K,
        check: &C,
        side: Side,
    ) -> Result<(), C::Error> {
        self.head = self.pull();
        if let Some((_, next)) = &self.head {
            check.check(side, self.pulled - 1, &previous, next)?;
        }
        Ok(())
    }

    fn remaining_hint(&self) -> (usize, Option<usize>) {
        let held = usize::from(self.head.is_some());
        let (lower, upper) = self.iter.size_hint();
        (
            lower.saturating_add(held),
            upper.and_then(|u| u.checked_add(held)),
        )
    }
}

/// Lazy full outer join of two presorted, duplicate-free sequences
///
/// Yields [`JoinedPair`]s in merged key order. The number of pairs is the
/// number of distinct keys across both sides. Nothing is pulled from
/// either input until the first call to `next`.
///
/// See the [module docs](self) for what happens when the inputs are not
/// strictly sorted.
pub struct FullJoin<L: Iterator, R: Iterator, FL, FR, K, C: OrderCheck<K> = Unchecked> {
    left: Cursor<L, FL, K>,
    right: Cursor<R, FR, K>,
    check: C,
    pending: Option<C::Error>,
    primed: bool,
    done: bool,
    stats: JoinStats,
}

/// Full outer join of two presorted sequences by their keys
///
/// # Example
///
/// ```
/// use sortmerge_core::{merge_join, JoinedPair};
///
/// let pairs: Vec<_> = merge_join(vec![1, 2, 5, 6], |x| *x, vec![1, 3, 4, 6], |x| *x).collect();
/// assert_eq!(
///     pairs,
///     vec![
///         JoinedPair::Both(1, 1),
///         JoinedPair::Left(2),
///         JoinedPair::Right(3),
///         JoinedPair::Right(4),
///         JoinedPair::Left(5),
///         JoinedPair::Both(6, 6),
///     ]
/// );
/// ```
pub fn merge_join<LI, RI, FL, FR, K>(
    left: LI,
    key_l: FL,
    right: RI,
    key_r: FR,
) -> FullJoin<LI::IntoIter, RI::IntoIter, FL, FR, K>
where
    LI: IntoIterator,
    RI: IntoIterator,
    FL: Fn(&LI::Item) -> K,
    FR: Fn(&RI::Item) -> K,
    K: Ord,
{
    FullJoin::new(left.into_iter(), key_l, right.into_iter(), key_r)
}

type InnerRow<A, B> = fn(JoinedPair<A, B>) -> Option<(A, B)>;
type LeftOuterRow<A, B> = fn(JoinedPair<A, B>) -> Option<(A, Option<B>)>;
type RightOuterRow<A, B> = fn(JoinedPair<A, B>) -> Option<(Option<A>, B)>;

impl<L, R, FL, FR, K> FullJoin<L, R, FL, FR, K, Unchecked>
where
    L: Iterator,
    R: Iterator,
    FL: Fn(&L::Item) -> K,
    FR: Fn(&R::Item) -> K,
    K: Ord,
{
    pub fn new(left: L, key_l: FL, right: R, key_r: FR) -> Self {
        Self {
            left: Cursor::new(left, key_l),
            right: Cursor::new(right, key_r),
            check: Unchecked,
            pending: None,
            primed: false,
            done: false,
            stats: JoinStats::default(),
        }
    }

    /// Join two [`By`] markers
    pub fn from_sorted<LI, RI>(left: By<LI, FL>, right: By<RI, FR>) -> Self
    where
        LI: IntoIterator<IntoIter = L>,
        RI: IntoIterator<IntoIter = R>,
    {
        let (left_it, key_l) = left.into_parts();
        let (right_it, key_r) = right.into_parts();
        Self::new(left_it.into_iter(), key_l, right_it.into_iter(), key_r)
    }

    /// Validate both sides as pairs are pulled
    ///
    /// Items become `Result`s. A key that does not strictly increase on
    /// its side yields one `Err` naming the side and position, after every
    /// pair built before it, and the iteration ends.
    pub fn checked(self) -> FullJoin<L, R, FL, FR, K, Checked>
    where
        K: Debug,
    {
        let check = Checked::new(Strictness::StrictlyIncreasing);
        log_op_start!(OP_FULL_JOIN, pass_id = %check.pass_id());
        FullJoin {
            left: self.left,
            right: self.right,
            check,
            pending: None,
            primed: self.primed,
            done: self.done,
            stats: self.stats,
        }
    }

    /// Matched keys only
    pub fn inner(self) -> FilterMap<Self, InnerRow<L::Item, R::Item>> {
        let project: InnerRow<L::Item, R::Item> = JoinedPair::into_both;
        self.filter_map(project)
    }

    /// Every left element, with its match if any
    pub fn left_outer(self) -> FilterMap<Self, LeftOuterRow<L::Item, R::Item>> {
        let project: LeftOuterRow<L::Item, R::Item> = JoinedPair::into_left_outer;
        self.filter_map(project)
    }

    /// Every right element, with its match if any
    pub fn right_outer(self) -> FilterMap<Self, RightOuterRow<L::Item, R::Item>> {
        let project: RightOuterRow<L::Item, R::Item> = JoinedPair::into_right_outer;
        self.filter_map(project)
    }
}

impl<L, R, FL, FR, K, C> FullJoin<L, R, FL, FR, K, C>
where
    L: Iterator,
    R: Iterator,
    FL: Fn(&L::Item) -> K,
    FR: Fn(&R::Item) -> K,
    K: Ord,
    C: OrderCheck<K>,
{
    /// Pairs produced so far, by kind
    pub fn stats(&self) -> JoinStats {
        self.stats
    }

    fn advance(&mut self) -> Result<Option<JoinedPair<L::Item, R::Item>>, C::Error> {
        if self.done {
            return Ok(None);
        }
        if let Some(err) = self.pending.take() {
            self.done = true;
            return Err(err);
        }
        match self.step() {
            Some(pair) => {
                self.stats.record(&pair);
                Ok(Some(pair))
            }
            None => {
                self.done = true;
                tracing::debug!(
                    op = OP_FULL_JOIN,
                    left_only = self.stats.left_only,
                    right_only = self.stats.right_only,
                    both = self.stats.both,
                    "join exhausted"
                );
                self.check.pass_finished(OP_FULL_JOIN, self.stats.total());
                Ok(None)
            }
        }
    }

    /// Hold a refill violation until the current pair has been yielded
    fn defer(&mut self, refilled: Result<(), C::Error>) {
        if let Err(err) = refilled {
            self.pending.get_or_insert(err);
        }
    }

    fn step(&mut self) -> Option<JoinedPair<L::Item, R::Item>> {
        if !self.primed {
            self.left.prime();
            self.right.prime();
            self.primed = true;
        }

        let pair = match (self.left.head.take(), self.right.head.take()) {
            (Some((l, lk)), Some((r, rk))) => match lk.cmp(&rk) {
                Ordering::Less => {
                    self.right.head = Some((r, rk));
                    let refilled = self.left.refill(lk, &self.check, Side::Left);
                    self.defer(refilled);
                    JoinedPair::Left(l)
                }
                Ordering::Greater => {
                    self.left.head = Some((l, lk));
                    let refilled = self.right.refill(rk, &self.check, Side::Right);
                    self.defer(refilled);
                    JoinedPair::Right(r)
                }
                Ordering::Equal => {
                    let refilled = self.left.refill(lk, &self.check, Side::Left);
                    self.defer(refilled);
                    let refilled = self.right.refill(rk, &self.check, Side::Right);
                    self.defer(refilled);
                    JoinedPair::Both(l, r)
                }
            },
            (Some((l, lk)), None) => {
                let refilled = self.left.refill(lk, &self.check, Side::Left);
                self.defer(refilled);
                JoinedPair::Left(l)
            }
            (None, Some((r, rk))) => {
                let refilled = self.right.refill(rk, &self.check, Side::Right);
                self.defer(refilled);
                JoinedPair::Right(r)
            }
            (None, None) => return None,
        };
        Some(pair)
    }

    fn remaining_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let (left_lower, left_upper) = self.left.remaining_hint();
        let (right_lower, right_upper) = self.right.remaining_hint();
        let upper = match (left_upper, right_upper) {
            (Some(l), Some(r)) => l.checked_add(r),
            _ => None,
        };
        (left_lower.max(right_lower), upper)
    }
}

impl<L, R, FL, FR, K> Iterator for FullJoin<L, R, FL, FR, K, Unchecked>
where
    L: Iterator,
    R: Iterator,
    FL: Fn(&L::Item) -> K,
    FR: Fn(&R::Item) -> K,
    K: Ord,
{
    type Item = JoinedPair<L::Item, R::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.advance() {
            Ok(pair) => pair,
            Err(never) => match never {},
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.remaining_hint()
    }
}

impl<L, R, FL, FR, K> FusedIterator for FullJoin<L, R, FL, FR, K, Unchecked>
where
    L: Iterator,
    R: Iterator,
    FL: Fn(&L::Item) -> K,
    FR: Fn(&R::Item) -> K,
    K: Ord,
{
}

impl<L: Iterator, R: Iterator, FL, FR, K: Ord + Debug> FullJoin<L, R, FL, FR, K, Checked> {
    /// Correlation id carried by this pass's log events
    pub fn pass_id(&self) -> &PassId {
        self.check.pass_id()
    }
}

impl<L, R, FL, FR, K> Iterator for FullJoin<L, R, FL, FR, K, Checked>
where
    L: Iterator,
    R: Iterator,
    FL: Fn(&L::Item) -> K,
    FR: Fn(&R::Item) -> K,
    K: Ord + Debug,
{
    type Item = Result<JoinedPair<L::Item, R::Item>, MergeError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.advance() {
            Ok(pair) => pair.map(Ok),
            Err(err) => {
                log_op_error!(
                    OP_FULL_JOIN,
                    err.clone(),
                    pass_id = self.check.pass_id(),
                    duration_ms = self.check.elapsed_ms(),
                    side = ?err.side(),
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

impl<L, R, FL, FR, K> FusedIterator for FullJoin<L, R, FL, FR, K, Checked>
where
    L: Iterator,
    R: Iterator,
    FL: Fn(&L::Item) -> K,
    FR: Fn(&R::Item) -> K,
    K: Ord + Debug,
{
}
