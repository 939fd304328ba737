use serde::{Deserialize, Serialize};

/// One row of a full outer join
///
/// The side with no matching key is simply absent; there is no sentinel
/// value, so a legitimately "empty" element on either side is never
/// confused with a missing match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinedPair<L, R> {
    /// Key present on the left only
    Left(L),
    /// Key present on the right only
    Right(R),
    /// Key present on both sides
    Both(L, R),
}

impl<L, R> JoinedPair<L, R> {
    /// Left element, if present
    pub fn left(&self) -> Option<&L> {
        match self {
            JoinedPair::Left(l) | JoinedPair::Both(l, _) => Some(l),
            JoinedPair::Right(_) => None,
        }
    }

    /// Right element, if present
    pub fn right(&self) -> Option<&R> {
        match self {
            JoinedPair::Right(r) | JoinedPair::Both(_, r) => Some(r),
            JoinedPair::Left(_) => None,
        }
    }

    pub fn is_both(&self) -> bool {
        matches!(self, JoinedPair::Both(..))
    }

    pub fn is_left_only(&self) -> bool {
        matches!(self, JoinedPair::Left(_))
    }

    pub fn is_right_only(&self) -> bool {
        matches!(self, JoinedPair::Right(_))
    }

    /// Split into the `(left, right)` optional pair
    pub fn into_options(self) -> (Option<L>, Option<R>) {
        match self {
            JoinedPair::Left(l) => (Some(l), None),
            JoinedPair::Right(r) => (None, Some(r)),
            JoinedPair::Both(l, r) => (Some(l), Some(r)),
        }
    }

    /// Matched pair only (inner join row)
    pub fn into_both(self) -> Option<(L, R)> {
        match self {
            JoinedPair::Both(l, r) => Some((l, r)),
            _ => None,
        }
    }

    /// Row of a left outer join, or `None` for right-only keys
    pub fn into_left_outer(self) -> Option<(L, Option<R>)> {
        match self {
            JoinedPair::Left(l) => Some((l, None)),
            JoinedPair::Both(l, r) => Some((l, Some(r))),
            JoinedPair::Right(_) => None,
        }
    }

    /// Row of a right outer join, or `None` for left-only keys
    pub fn into_right_outer(self) -> Option<(Option<L>, R)> {
        match self {
            JoinedPair::Right(r) => Some((None, r)),
            JoinedPair::Both(l, r) => Some((Some(l), r)),
            JoinedPair::Left(_) => None,
        }
    }

    /// Exchange the sides
    pub fn swap(self) -> JoinedPair<R, L> {
        match self {
            JoinedPair::Left(l) => JoinedPair::Right(l),
            JoinedPair::Right(r) => JoinedPair::Left(r),
            JoinedPair::Both(l, r) => JoinedPair::Both(r, l),
        }
    }

    pub fn as_ref(&self) -> JoinedPair<&L, &R> {
        match self {
            JoinedPair::Left(l) => JoinedPair::Left(l),
            JoinedPair::Right(r) => JoinedPair::Right(r),
            JoinedPair::Both(l, r) => JoinedPair::Both(l, r),
        }
    }

    pub fn map_left<T, F: FnOnce(L) -> T>(self, f: F) -> JoinedPair<T, R> {
        match self {
            JoinedPair::Left(l) => JoinedPair::Left(f(l)),
            JoinedPair::Right(r) => JoinedPair::Right(r),
            JoinedPair::Both(l, r) => JoinedPair::Both(f(l), r),
        }
    }

    pub fn map_right<T, F: FnOnce(R) -> T>(self, f: F) -> JoinedPair<L, T> {
        match self {
            JoinedPair::Left(l) => JoinedPair::Left(l),
            JoinedPair::Right(r) => JoinedPair::Right(f(r)),
            JoinedPair::Both(l, r) => JoinedPair::Both(l, f(r)),
        }
    }
}

impl<L, R> From<JoinedPair<L, R>> for (Option<L>, Option<R>) {
    fn from(pair: JoinedPair<L, R>) -> Self {
        pair.into_options()
    }
}
