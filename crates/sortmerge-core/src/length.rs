//! Declared-length iterators
//!
//! Joins and groupings cannot know their output size up front, so their
//! `size_hint` is a range. When the caller knows the exact count,
//! [`with_length`] declares it so `collect` allocates once.

use crate::errors::MergeError;
use crate::{log_op_end, log_op_error, log_op_start};
use sortmerge_core_types::schema::OP_LENGTH;
use sortmerge_core_types::PassId;
use std::iter::FusedIterator;
use std::time::Instant;

/// An iterator with a caller-declared number of items
///
/// The declaration is trusted: `len()` reports what is left of the
/// declared count, not what the inner iterator will really yield. Use
/// [`Length::checked`] to verify it.
#[derive(Debug, Clone)]
pub struct Length<I> {
    iter: I,
    declared: usize,
    yielded: usize,
}

/// Declare that `iter` yields exactly `len` items
///
/// ```
/// use sortmerge_core::{merge_join, with_length};
///
/// // both sides share every key, so there is one pair per key
/// let joined = with_length(merge_join(0..3, |x| *x, 0..3, |x| *x), 3);
/// assert_eq!(joined.len(), 3);
/// assert_eq!(joined.count(), 3);
/// ```
pub fn with_length<I: IntoIterator>(iter: I, len: usize) -> Length<I::IntoIter> {
    Length {
        iter: iter.into_iter(),
        declared: len,
        yielded: 0,
    }
}

impl<I: Iterator> Length<I> {
    pub fn declared(&self) -> usize {
        self.declared
    }

    /// Verify the declared count while iterating
    ///
    /// Items become `Result`s. If the inner iterator ends early, or still
    /// has items once the declared count is reached, one `Err` is yielded
    /// and the iteration ends.
    pub fn checked(self) -> CheckedLength<I> {
        let pass_id = PassId::new();
        log_op_start!(OP_LENGTH, pass_id = %pass_id, len = self.declared);
        CheckedLength {
            inner: self,
            pass_id,
            started: Instant::now(),
            done: false,
        }
    }

    pub fn into_inner(self) -> I {
        self.iter
    }
}

impl<I: Iterator> Iterator for Length<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        let item = self.iter.next()?;
        self.yielded += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.declared.saturating_sub(self.yielded);
        (left, Some(left))
    }
}

impl<I: Iterator> ExactSizeIterator for Length<I> {}

/// A [`Length`] that reports a wrong declaration as an error
pub struct CheckedLength<I> {
    inner: Length<I>,
    pass_id: PassId,
    started: Instant,
    done: bool,
}

impl<I: Iterator> CheckedLength<I> {
    pub fn pass_id(&self) -> &PassId {
        &self.pass_id
    }

    fn fail(&mut self, err: MergeError) -> Option<Result<I::Item, MergeError>> {
        self.done = true;
        log_op_error!(
            OP_LENGTH,
            err.clone(),
            pass_id = &self.pass_id,
            duration_ms = self.started.elapsed().as_millis() as u64
        );
        Some(Err(err))
    }
}

impl<I: Iterator> Iterator for CheckedLength<I> {
    type Item = Result<I::Item, MergeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let declared = self.inner.declared;
        match self.inner.next() {
            Some(_) if self.inner.yielded > declared => {
                self.fail(MergeError::TooManyItems { declared })
            }
            Some(item) => Some(Ok(item)),
            None if self.inner.yielded < declared => self.fail(MergeError::TooFewItems {
                declared,
                actual: self.inner.yielded,
            }),
            None => {
                self.done = true;
                log_op_end!(
                    OP_LENGTH,
                    duration_ms = self.started.elapsed().as_millis() as u64,
                    pass_id = %self.pass_id,
                    len = declared
                );
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        // one extra slot for a possible error item
        let left = self.inner.declared.saturating_sub(self.inner.yielded);
        (left, left.checked_add(1))
    }
}

impl<I: Iterator> FusedIterator for CheckedLength<I> {}
