//! Membership abstraction used by the bulk removal operations.

use std::collections::{BTreeSet, HashSet};
use std::hash::{BuildHasher, Hash};

use crate::deque::TripletDeque;
use crate::utils::index_type::IndexType;

// ─── AnySet ───────────────────────────────────────────────────────────────────

/// A trait to abstract over any collection that can answer "is this value in here?".
///
/// [`TripletDeque::remove_all`] and [`TripletDeque::retain_all`] take any implementor, so the
/// caller picks the lookup cost: hashed and ordered sets answer in *O*(1) / *O*(log n), while
/// slices, vectors and other deques fall back to a linear scan.
pub trait AnySet<T> {
    /// Returns `true` if the collection contains the value.
    fn contains(&self, value: &T) -> bool;
}

// Support standard HashSet
impl<T, S> AnySet<T> for HashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn contains(&self, value: &T) -> bool {
        HashSet::contains(self, value)
    }
}

// Support hashbrown HashSet
#[cfg(feature = "hashbrown")]
impl<T, S> AnySet<T> for hashbrown::HashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn contains(&self, value: &T) -> bool {
        hashbrown::HashSet::contains(self, value)
    }
}

// Support standard BTreeSet
impl<T> AnySet<T> for BTreeSet<T>
where
    T: Ord,
{
    fn contains(&self, value: &T) -> bool {
        BTreeSet::contains(self, value)
    }
}

impl<T: PartialEq> AnySet<T> for [T] {
    fn contains(&self, value: &T) -> bool {
        <[T]>::contains(self, value)
    }
}

impl<T: PartialEq, const N: usize> AnySet<T> for [T; N] {
    fn contains(&self, value: &T) -> bool {
        <[T]>::contains(self.as_slice(), value)
    }
}

impl<T: PartialEq> AnySet<T> for Vec<T> {
    fn contains(&self, value: &T) -> bool {
        <[T]>::contains(self.as_slice(), value)
    }
}

impl<T: PartialEq, I: IndexType> AnySet<T> for TripletDeque<T, I> {
    fn contains(&self, value: &T) -> bool {
        TripletDeque::contains(self, value)
    }
}
