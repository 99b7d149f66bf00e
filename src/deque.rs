//! Bounded double-ended queue built from a chain of fixed-capacity segments.
//!
//! # Why segments?
//! A plain linked list pays one allocation and two links per element; a ring buffer pays a full
//! copy whenever it grows. [`TripletDeque`] sits in between: elements are stored in segments
//! ("triplets") of `triplet_length` slots, and only whole segments are linked. Most pushes and
//! pops touch a single segment, and a new segment is needed only once the end segment is full.
//!
//! # Layout
//! ```text
//!   first                                   last
//!     │                                      │
//!   [ 7 | 8 | · ] ⇄ [ 1 | 2 | 3 ] ⇄ [ 4 | 5 | · ]
//! ```
//! Live slots are packed from index 0 of each segment; `·` marks a vacant trailing slot. Pushing
//! to the front shifts the whole first segment one slot toward the tail, pushing to the back
//! fills the first vacant slot of the last segment. A segment that empties is retired at once,
//! so the only vacant segment that can ever exist is the sole segment of an empty deque.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::Rev;
use std::collections::VecDeque;

use tracing::debug;

use crate::chain::SegmentChain;
use crate::config::DequeConfig;
use crate::error::{Error, Result};
use crate::iter::{CursorMut, IntoIter, Iter};
use crate::set::AnySet;
use crate::utils::index_type::IndexType;

// ─── AnyDeque ─────────────────────────────────────────────────────────────────

/// An object-safe abstraction over double-ended queue types.
///
/// Implemented by both `VecDeque<T>` (unbounded) and `TripletDeque<T, I>` (bounded) so that
/// code can operate on a deque without knowing which backend is active.
pub trait AnyDeque<T> {
    /// Returns the number of elements in the deque.
    fn len(&self) -> usize;
    /// Returns `true` if the deque contains no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Appends an element to the back. Returns `false`, dropping `item`, if the deque is bounded
    /// and full.
    fn push_back(&mut self, item: T) -> bool;
    /// Prepends an element to the front. Returns `false`, dropping `item`, if the deque is
    /// bounded and full.
    fn push_front(&mut self, item: T) -> bool;
    /// Removes and returns the element from the back, or `None` if empty.
    fn pop_back(&mut self) -> Option<T>;
    /// Removes and returns the element from the front, or `None` if empty.
    fn pop_front(&mut self) -> Option<T>;
    /// Removes all elements.
    fn clear(&mut self);
    /// Returns a shared reference to the front element, or `None` if empty.
    fn front(&self) -> Option<&T>;
    /// Returns a shared reference to the back element, or `None` if empty.
    fn back(&self) -> Option<&T>;
    /// Returns an exclusive reference to the front element, or `None` if empty.
    fn front_mut(&mut self) -> Option<&mut T>;
    /// Returns an exclusive reference to the back element, or `None` if empty.
    fn back_mut(&mut self) -> Option<&mut T>;
}

impl<T> AnyDeque<T> for VecDeque<T> {
    fn len(&self) -> usize {
        VecDeque::len(self)
    }
    fn push_back(&mut self, item: T) -> bool {
        VecDeque::push_back(self, item);
        true
    }
    fn push_front(&mut self, item: T) -> bool {
        VecDeque::push_front(self, item);
        true
    }
    fn pop_back(&mut self) -> Option<T> {
        VecDeque::pop_back(self)
    }
    fn pop_front(&mut self) -> Option<T> {
        VecDeque::pop_front(self)
    }
    fn clear(&mut self) {
        VecDeque::clear(self);
    }
    fn front(&self) -> Option<&T> {
        VecDeque::front(self)
    }
    fn back(&self) -> Option<&T> {
        VecDeque::back(self)
    }
    fn front_mut(&mut self) -> Option<&mut T> {
        VecDeque::front_mut(self)
    }
    fn back_mut(&mut self) -> Option<&mut T> {
        VecDeque::back_mut(self)
    }
}

// ─── TripletDeque ─────────────────────────────────────────────────────────────

/// A bounded double-ended queue stored as a doubly linked chain of fixed-size segments.
///
/// # Generic parameters
/// | Parameter | Meaning |
/// |-----------|--------|
/// | `T` | Element type |
/// | `I` | Segment handle type ([`IndexType`]); `u32` by default, `u16` halves link overhead |
///
/// # Errors at the ends
/// Each end operation comes in a failing form and a quiet form:
///
/// | Failing | Quiet | Fails with |
/// |---------|-------|------------|
/// | [`push_front`](Self::push_front) / [`push_back`](Self::push_back) | [`offer_first`](Self::offer_first) / [`offer_last`](Self::offer_last) | [`Error::CapacityExceeded`] |
/// | [`pop_front`](Self::pop_front) / [`pop_back`](Self::pop_back) | [`poll_first`](Self::poll_first) / [`poll_last`](Self::poll_last) | [`Error::Empty`] |
/// | [`get_first`](Self::get_first) / [`get_last`](Self::get_last) | [`peek_first`](Self::peek_first) / [`peek_last`](Self::peek_last) | [`Error::Empty`] |
///
/// # Thread safety
/// There is no internal locking. Every mutation takes `&mut self`; share a deque across threads
/// by wrapping it in a `Mutex` or similar.
///
/// # Examples
/// ```
/// use triplet_deque::TripletDeque;
///
/// let mut deque: TripletDeque<i32> = TripletDeque::new();
/// deque.push_back(2).unwrap();
/// deque.push_back(3).unwrap();
/// deque.push_front(1).unwrap();
///
/// assert_eq!(deque.peek_first(), Some(&1));
/// assert_eq!(deque.peek_last(), Some(&3));
/// assert_eq!(deque.pop_front(), Ok(1));
/// assert_eq!(deque.to_vec(), vec![2, 3]);
/// ```
pub struct TripletDeque<T, I: IndexType = u32> {
    pub(crate) chain: SegmentChain<T, I>,
    pub(crate) len: usize,
    max_size: usize,
}

impl<T> TripletDeque<T> {
    /// Creates an empty deque with segments of 5 slots and room for 1000 elements.
    pub fn new() -> Self {
        Self::from_config_unchecked(DequeConfig::new())
    }

    /// Creates an empty deque with the given segment capacity and the default size ceiling.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if `triplet_length` is zero.
    pub fn with_triplet_length(triplet_length: usize) -> Result<Self> {
        Self::with_config(DequeConfig::new().with_triplet_length(triplet_length))
    }
}

impl<T, I: IndexType> TripletDeque<T, I> {
    /// Creates an empty deque shaped by `config`.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if the configuration does not [validate](DequeConfig::validate).
    pub fn with_config(config: DequeConfig) -> Result<Self> {
        config.validate::<I>()?;
        Ok(Self::from_config_unchecked(config))
    }

    /// Callers either validated `config` or pass the default one, which every `IndexType` can
    /// address.
    fn from_config_unchecked(config: DequeConfig) -> Self {
        Self {
            chain: SegmentChain::new(config.triplet_length),
            len: 0,
            max_size: config.max_size,
        }
    }

    /// Returns the configuration this deque was built with.
    pub fn config(&self) -> DequeConfig {
        DequeConfig::new()
            .with_triplet_length(self.triplet_length())
            .with_max_size(self.max_size)
    }

    /// Returns the number of live elements.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the deque contains no elements.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if another push would fail with [`Error::CapacityExceeded`].
    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.len >= self.max_size
    }

    /// Ceiling on live elements.
    #[inline(always)]
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Number of pushes that can still succeed.
    #[inline(always)]
    pub fn remaining_capacity(&self) -> usize {
        self.max_size.saturating_sub(self.len)
    }

    /// Slots per segment.
    #[inline(always)]
    pub fn triplet_length(&self) -> usize {
        self.chain.triplet_length()
    }

    /// Number of segments currently linked. Always at least 1.
    #[inline(always)]
    pub fn segment_count(&self) -> usize {
        self.chain.linked()
    }

    fn ensure_capacity(&self) -> Result {
        if self.is_full() {
            debug!(max_size = self.max_size, "rejected insertion into a full deque");
            return Err(Error::CapacityExceeded {
                max_size: self.max_size,
            });
        }
        Ok(())
    }

    // ─── end mutators ─────────────────────────────────────────────────────────

    /// Prepends `value`.
    ///
    /// If the first segment is full a new one is linked in front of it. Either way the first
    /// segment is shifted one slot toward the tail and `value` lands in slot 0.
    ///
    /// # Errors
    /// [`Error::CapacityExceeded`] if the deque holds `max_size` elements.
    pub fn push_front(&mut self, value: T) -> Result {
        self.ensure_capacity()?;
        if self.chain.first_segment().is_full() {
            self.chain.link_front();
        }
        self.chain.first_segment_mut().push_front(value);
        self.len += 1;
        Ok(())
    }

    /// Appends `value` to the first vacant slot of the last segment, linking a new last segment
    /// if it is full.
    ///
    /// # Errors
    /// [`Error::CapacityExceeded`] if the deque holds `max_size` elements.
    pub fn push_back(&mut self, value: T) -> Result {
        self.ensure_capacity()?;
        if self.chain.last_segment().is_full() {
            self.chain.link_back();
        }
        self.chain.last_segment_mut().push_back(value);
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the first element. The first segment is retired if this empties it
    /// and another segment follows.
    ///
    /// # Errors
    /// [`Error::Empty`] if the deque is empty.
    pub fn pop_front(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(Error::Empty);
        }
        let first = self.chain.first();
        let value = self
            .chain
            .segment_mut(first)
            .pop_front()
            .ok_or(Error::Empty)?;
        self.len -= 1;
        if self.chain.segment(first).is_vacant() {
            self.chain.retire(first);
        }
        Ok(value)
    }

    /// Removes and returns the last element. The last segment is retired if this empties it and
    /// another segment precedes it, so no vacant segment is ever left at the tail.
    ///
    /// # Errors
    /// [`Error::Empty`] if the deque is empty.
    pub fn pop_back(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(Error::Empty);
        }
        let last = self.chain.last();
        let value = self
            .chain
            .segment_mut(last)
            .pop_back()
            .ok_or(Error::Empty)?;
        self.len -= 1;
        if self.chain.segment(last).is_vacant() {
            self.chain.retire(last);
        }
        Ok(value)
    }

    /// Like [`push_front`](Self::push_front), but reports a full deque as `false`. The value is
    /// dropped in that case.
    pub fn offer_first(&mut self, value: T) -> bool {
        self.push_front(value).is_ok()
    }

    /// Like [`push_back`](Self::push_back), but reports a full deque as `false`. The value is
    /// dropped in that case.
    pub fn offer_last(&mut self, value: T) -> bool {
        self.push_back(value).is_ok()
    }

    /// Like [`pop_front`](Self::pop_front), but returns `None` when empty.
    pub fn poll_first(&mut self) -> Option<T> {
        self.pop_front().ok()
    }

    /// Like [`pop_back`](Self::pop_back), but returns `None` when empty.
    pub fn poll_last(&mut self) -> Option<T> {
        self.pop_back().ok()
    }

    // ─── end accessors ────────────────────────────────────────────────────────

    /// Returns the first element, or `None` if empty.
    #[inline]
    pub fn peek_first(&self) -> Option<&T> {
        self.chain.first_segment().first()
    }

    /// Returns the last element, or `None` if empty.
    ///
    /// Reads the last live slot of the last segment. Never modifies the chain.
    #[inline]
    pub fn peek_last(&self) -> Option<&T> {
        self.chain.last_segment().last()
    }

    /// Returns the first element.
    ///
    /// # Errors
    /// [`Error::Empty`] if the deque is empty.
    pub fn get_first(&self) -> Result<&T> {
        self.peek_first().ok_or(Error::Empty)
    }

    /// Returns the last element.
    ///
    /// # Errors
    /// [`Error::Empty`] if the deque is empty.
    pub fn get_last(&self) -> Result<&T> {
        self.peek_last().ok_or(Error::Empty)
    }

    /// Returns a shared reference to the front element, or `None` if empty.
    #[inline(always)]
    pub fn front(&self) -> Option<&T> {
        self.peek_first()
    }

    /// Returns a shared reference to the back element, or `None` if empty.
    #[inline(always)]
    pub fn back(&self) -> Option<&T> {
        self.peek_last()
    }

    /// Returns an exclusive reference to the front element, or `None` if empty.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.chain.first_segment_mut().get_mut(0)
    }

    /// Returns an exclusive reference to the back element, or `None` if empty.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.chain.last_segment_mut().last_mut()
    }

    // ─── queue and stack vocabulary ───────────────────────────────────────────

    /// Queue insert: same as [`offer_last`](Self::offer_last).
    pub fn offer(&mut self, value: T) -> bool {
        self.offer_last(value)
    }

    /// Queue removal: same as [`poll_first`](Self::poll_first).
    pub fn poll(&mut self) -> Option<T> {
        self.poll_first()
    }

    /// Queue head: same as [`peek_first`](Self::peek_first).
    pub fn peek(&self) -> Option<&T> {
        self.peek_first()
    }

    /// Queue head: same as [`get_first`](Self::get_first).
    ///
    /// # Errors
    /// [`Error::Empty`] if the deque is empty.
    pub fn element(&self) -> Result<&T> {
        self.get_first()
    }

    /// Stack push: same as [`push_front`](Self::push_front).
    ///
    /// # Errors
    /// [`Error::CapacityExceeded`] if the deque holds `max_size` elements.
    pub fn push(&mut self, value: T) -> Result {
        self.push_front(value)
    }

    /// Stack pop: same as [`pop_front`](Self::pop_front).
    ///
    /// # Errors
    /// [`Error::Empty`] if the deque is empty.
    pub fn pop(&mut self) -> Result<T> {
        self.pop_front()
    }

    // ─── occurrence search ────────────────────────────────────────────────────

    /// Returns `true` if some element equals `value`. Scans every live slot, head to tail.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|item| item == value)
    }

    /// Returns `true` if every item of `values` is contained in the deque.
    pub fn contains_all<'a, V>(&self, values: V) -> bool
    where
        T: PartialEq + 'a,
        V: IntoIterator<Item = &'a T>,
    {
        values.into_iter().all(|value| self.contains(value))
    }

    /// Removes the element at `slot` of segment `handle`, closing the gap and retiring the
    /// segment if it empties. Returns the value and whether the segment was retired.
    pub(crate) fn remove_slot(&mut self, handle: I, slot: usize) -> Option<(T, bool)> {
        let value = self.chain.segment_mut(handle).remove_at(slot)?;
        self.len -= 1;
        let retired = self.chain.segment(handle).is_vacant() && self.chain.retire(handle);
        Some((value, retired))
    }

    /// Removes the first element equal to `value`, scanning head to tail. Returns whether an
    /// element was removed.
    ///
    /// ```
    /// use triplet_deque::TripletDeque;
    ///
    /// let mut deque: TripletDeque<i32> = [3, 1, 4, 1, 5].into_iter().collect();
    /// assert!(deque.remove_first_occurrence(&1));
    /// assert_eq!(deque.to_vec(), vec![3, 4, 1, 5]);
    /// ```
    pub fn remove_first_occurrence(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        let mut handle = self.chain.first();
        while !handle.is_none() {
            let segment = self.chain.segment(handle);
            if let Some(slot) = segment.position(|item| item == value) {
                return self.remove_slot(handle, slot).is_some();
            }
            handle = segment.next;
        }
        false
    }

    /// Removes the last element equal to `value`, scanning tail to head. Returns whether an
    /// element was removed.
    ///
    /// ```
    /// use triplet_deque::TripletDeque;
    ///
    /// let mut deque: TripletDeque<i32> = [3, 1, 4, 1, 5].into_iter().collect();
    /// assert!(deque.remove_last_occurrence(&1));
    /// assert_eq!(deque.to_vec(), vec![3, 1, 4, 5]);
    /// ```
    pub fn remove_last_occurrence(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        let mut handle = self.chain.last();
        while !handle.is_none() {
            let segment = self.chain.segment(handle);
            if let Some(slot) = segment.rposition(|item| item == value) {
                return self.remove_slot(handle, slot).is_some();
            }
            handle = segment.prev;
        }
        false
    }

    /// Removes the first element equal to `value`; same as
    /// [`remove_first_occurrence`](Self::remove_first_occurrence).
    pub fn remove_item(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.remove_first_occurrence(value)
    }

    // ─── bulk operations ──────────────────────────────────────────────────────

    /// Removes every element for which `pred` returns `true`. Returns whether anything was
    /// removed. Relative order of the survivors is kept.
    pub fn remove_if<F>(&mut self, mut pred: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        let mut removed = false;
        let mut cursor = self.cursor_mut();
        while let Some(value) = cursor.current() {
            if pred(value) {
                cursor.remove_current();
                removed = true;
            } else {
                cursor.move_next();
            }
        }
        removed
    }

    /// Keeps only the elements for which `keep` returns `true`.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.remove_if(|value| !keep(value));
    }

    /// Removes every element contained in `set`. Returns whether anything was removed.
    pub fn remove_all<S>(&mut self, set: &S) -> bool
    where
        S: AnySet<T> + ?Sized,
    {
        self.remove_if(|value| set.contains(value))
    }

    /// Removes every element not contained in `set`. Returns whether anything was removed.
    pub fn retain_all<S>(&mut self, set: &S) -> bool
    where
        S: AnySet<T> + ?Sized,
    {
        self.remove_if(|value| !set.contains(value))
    }

    /// Appends every item of `values` to the back.
    ///
    /// The items are buffered before anything is pushed, so the call is all-or-nothing.
    ///
    /// # Errors
    /// [`Error::CapacityExceeded`] if the items do not all fit; the deque is left unchanged.
    pub fn add_all<V>(&mut self, values: V) -> Result
    where
        V: IntoIterator<Item = T>,
    {
        let values: Vec<T> = values.into_iter().collect();
        if values.len() > self.remaining_capacity() {
            debug!(
                incoming = values.len(),
                remaining = self.remaining_capacity(),
                "rejected bulk insertion"
            );
            return Err(Error::CapacityExceeded {
                max_size: self.max_size,
            });
        }
        for value in values {
            self.push_back(value)?;
        }
        Ok(())
    }

    /// Appends every item of `values` to the back, rejecting absent items.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if any item is `None`, or [`Error::CapacityExceeded`] if the
    /// items do not all fit. The deque is left unchanged in both cases.
    pub fn try_extend_options<V>(&mut self, values: V) -> Result
    where
        V: IntoIterator<Item = Option<T>>,
    {
        let values: Option<Vec<T>> = values.into_iter().collect();
        let values = values.ok_or(Error::InvalidArgument("cannot add an absent element"))?;
        self.add_all(values)
    }

    /// Drops every element and shrinks the chain back to one vacant segment.
    pub fn clear(&mut self) {
        self.chain.reset();
        self.len = 0;
    }

    // ─── traversal ────────────────────────────────────────────────────────────

    /// Iterates head to tail. Reverse it (or use [`descending_iter`](Self::descending_iter)) to
    /// walk tail to head.
    pub fn iter(&self) -> Iter<'_, T, I> {
        Iter::new(&self.chain, self.len)
    }

    /// Iterates tail to head.
    pub fn descending_iter(&self) -> Rev<Iter<'_, T, I>> {
        self.iter().rev()
    }

    /// Returns a cursor on the first element that can remove elements as it walks.
    pub fn cursor_mut(&mut self) -> CursorMut<'_, T, I> {
        CursorMut::new(self)
    }

    /// Copies the elements, head to tail, into a `Vec`.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    // ─── diagnostics ──────────────────────────────────────────────────────────

    /// Returns every cell, live and vacant, of the zero-based `index`-th segment counting from
    /// the head, or `None` past the last segment.
    ///
    /// The returned vector is a fresh snapshot of shared references; it cannot be used to modify
    /// the chain.
    ///
    /// ```
    /// use triplet_deque::TripletDeque;
    ///
    /// let mut deque: TripletDeque<i32> = TripletDeque::with_triplet_length(2).unwrap();
    /// deque.add_all([1, 2, 3]).unwrap();
    /// assert_eq!(deque.segment_snapshot(0), Some(vec![Some(&1), Some(&2)]));
    /// assert_eq!(deque.segment_snapshot(1), Some(vec![Some(&3), None]));
    /// assert_eq!(deque.segment_snapshot(2), None);
    /// ```
    pub fn segment_snapshot(&self, index: usize) -> Option<Vec<Option<&T>>> {
        let handle = self.chain.nth(index)?;
        Some(
            self.chain
                .segment(handle)
                .cells()
                .iter()
                .map(Option::as_ref)
                .collect(),
        )
    }

    /// Walks the whole chain and panics if any structural invariant is broken.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        let mut handle = self.chain.first();
        let mut prev = I::NONE;
        let mut segments = 0;
        let mut live = 0;
        while !handle.is_none() {
            let segment = self.chain.segment(handle);
            assert_eq!(segment.prev, prev, "broken back link");
            let cells = segment.cells();
            assert_eq!(cells.len(), self.triplet_length());
            assert!(cells[..segment.len()].iter().all(Option::is_some), "gap in live slots");
            assert!(cells[segment.len()..].iter().all(Option::is_none), "live slot past tail");
            if segment.is_vacant() {
                assert_eq!(self.chain.linked(), 1, "vacant segment in a multi-segment chain");
            }
            live += segment.len();
            segments += 1;
            prev = handle;
            handle = segment.next;
        }
        assert_eq!(prev, self.chain.last(), "last anchor not at chain end");
        assert_eq!(segments, self.chain.linked());
        assert_eq!(live, self.len, "len out of sync with live slots");
        assert!(self.len <= self.max_size);
    }
}

// ─── AnyDeque for TripletDeque ────────────────────────────────────────────────

impl<T, I: IndexType> AnyDeque<T> for TripletDeque<T, I> {
    fn len(&self) -> usize {
        self.len
    }
    fn push_back(&mut self, item: T) -> bool {
        self.offer_last(item)
    }
    fn push_front(&mut self, item: T) -> bool {
        self.offer_first(item)
    }
    fn pop_back(&mut self) -> Option<T> {
        self.poll_last()
    }
    fn pop_front(&mut self) -> Option<T> {
        self.poll_first()
    }
    fn clear(&mut self) {
        TripletDeque::clear(self);
    }
    fn front(&self) -> Option<&T> {
        self.peek_first()
    }
    fn back(&self) -> Option<&T> {
        self.peek_last()
    }
    fn front_mut(&mut self) -> Option<&mut T> {
        TripletDeque::front_mut(self)
    }
    fn back_mut(&mut self) -> Option<&mut T> {
        TripletDeque::back_mut(self)
    }
}

// ─── Traits ───────────────────────────────────────────────────────────────────

impl<T> Default for TripletDeque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, I: IndexType> Clone for TripletDeque<T, I> {
    fn clone(&self) -> Self {
        Self {
            chain: self.chain.clone(),
            len: self.len,
            max_size: self.max_size,
        }
    }
}

impl<T: fmt::Debug, I: IndexType> fmt::Debug for TripletDeque<T, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, I: IndexType> PartialEq for TripletDeque<T, I> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq, I: IndexType> Eq for TripletDeque<T, I> {}

impl<T: PartialOrd, I: IndexType> PartialOrd for TripletDeque<T, I> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord, I: IndexType> Ord for TripletDeque<T, I> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash, I: IndexType> Hash for TripletDeque<T, I> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len);
        self.iter().for_each(|value| value.hash(state));
    }
}

/// Pushes each item to the back.
///
/// # Panics
/// Panics if the deque runs out of capacity, like `Vec` does on capacity overflow. Use
/// [`TripletDeque::add_all`] to handle that case.
impl<T, I: IndexType> Extend<T> for TripletDeque<T, I> {
    fn extend<V: IntoIterator<Item = T>>(&mut self, iter: V) {
        for value in iter {
            if let Err(err) = self.push_back(value) {
                panic!("{err}");
            }
        }
    }
}

impl<'a, T: Copy + 'a, I: IndexType> Extend<&'a T> for TripletDeque<T, I> {
    fn extend<V: IntoIterator<Item = &'a T>>(&mut self, iter: V) {
        self.extend(iter.into_iter().copied());
    }
}

/// Collects into a deque with the default configuration.
///
/// # Panics
/// Panics if the iterator yields more than 1000 items.
impl<T> FromIterator<T> for TripletDeque<T> {
    fn from_iter<V: IntoIterator<Item = T>>(iter: V) -> Self {
        let mut deque = Self::new();
        deque.extend(iter);
        deque
    }
}

impl<T, I: IndexType> IntoIterator for TripletDeque<T, I> {
    type Item = T;
    type IntoIter = IntoIter<T, I>;
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, T, I: IndexType> IntoIterator for &'a TripletDeque<T, I> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, I>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;
    use std::collections::{BTreeSet, HashSet};
    use std::hash::BuildHasher;

    fn deque_with(triplet_length: usize, max_size: usize) -> TripletDeque<i32> {
        let config = DequeConfig::new()
            .with_triplet_length(triplet_length)
            .with_max_size(max_size);
        TripletDeque::with_config(config).unwrap()
    }

    fn deque_of(triplet_length: usize, values: &[i32]) -> TripletDeque<i32> {
        let mut deque = deque_with(triplet_length, 1000);
        deque.add_all(values.iter().copied()).unwrap();
        deque
    }

    // ─── construction ─────────────────────────────────────────────────────────
    #[test]
    fn test_deque_construction_defaults() {
        let d: TripletDeque<i32> = TripletDeque::new();
        assert!(d.is_empty());
        assert_eq!(d.triplet_length(), 5);
        assert_eq!(d.max_size(), 1000);
        assert_eq!(d.segment_count(), 1);
        assert_eq!(d.config(), DequeConfig::default());
        d.assert_invariants();
    }

    #[test]
    fn test_deque_construction_invalid() {
        assert!(matches!(
            TripletDeque::<i32>::with_triplet_length(0),
            Err(Error::InvalidArgument(_))
        ));
        let too_big = DequeConfig::new().with_max_size(1 << 20);
        assert!(TripletDeque::<i32, u16>::with_config(too_big).is_err());
        assert!(TripletDeque::<i32, u32>::with_config(too_big).is_ok());
    }

    // ─── basic end ops ────────────────────────────────────────────────────────
    #[test]
    fn test_deque_end_ops_basic() {
        let mut d = deque_with(3, 10);
        d.push_back(1).unwrap();
        d.push_back(2).unwrap();
        d.push_front(0).unwrap();
        assert_eq!(d.len(), 3);
        assert_eq!(d.front(), Some(&0));
        assert_eq!(d.back(), Some(&2));
        assert_eq!(d.pop_front(), Ok(0));
        assert_eq!(d.pop_back(), Ok(2));
        assert_eq!(d.len(), 1);
        d.assert_invariants();
    }

    #[test]
    fn test_deque_end_ops_lifo_at_each_end() {
        let mut d = deque_with(2, 10);
        d.push_front(1).unwrap();
        assert_eq!(d.pop_front(), Ok(1));
        d.push_back(2).unwrap();
        assert_eq!(d.pop_back(), Ok(2));
        for i in 0..5 {
            d.push_front(i).unwrap();
        }
        for i in (0..5).rev() {
            assert_eq!(d.pop_front(), Ok(i));
        }
        d.assert_invariants();
    }

    #[test]
    fn test_deque_end_ops_fifo_across_ends() {
        let mut d = deque_with(2, 10);
        for i in 0..5 {
            d.push_front(i).unwrap();
        }
        for i in 0..5 {
            assert_eq!(d.pop_back(), Ok(i));
        }
        for i in 0..5 {
            d.push_back(i).unwrap();
        }
        for i in 0..5 {
            assert_eq!(d.pop_front(), Ok(i));
        }
        assert!(d.is_empty());
        assert_eq!(d.segment_count(), 1);
    }

    #[test]
    fn test_deque_end_ops_segment_crossing() {
        let mut d = deque_with(2, 10);
        d.push_back(1).unwrap();
        d.push_back(2).unwrap();
        d.push_back(3).unwrap();
        assert_eq!(d.segment_count(), 2);
        assert_eq!(d.pop_front(), Ok(1));
        assert_eq!(d.pop_front(), Ok(2));
        assert_eq!(d.segment_count(), 1);
        assert_eq!(d.pop_front(), Ok(3));
        assert!(d.is_empty());
        d.assert_invariants();
    }

    #[test]
    fn test_deque_end_ops_push_front_shifts_first_segment() {
        let mut d = deque_of(3, &[1, 2, 3, 4]);
        d.pop_front().unwrap();
        d.push_front(9).unwrap();
        assert_eq!(d.segment_count(), 2);
        assert_eq!(d.segment_snapshot(0), Some(vec![Some(&9), Some(&2), Some(&3)]));
        d.push_front(8).unwrap();
        assert_eq!(d.segment_count(), 3);
        assert_eq!(d.segment_snapshot(0), Some(vec![Some(&8), None, None]));
        assert_eq!(d.to_vec(), vec![8, 9, 2, 3, 4]);
        d.assert_invariants();
    }

    #[test]
    fn test_deque_end_ops_pop_back_retires_tail() {
        let mut d = deque_of(2, &[1, 2, 3]);
        assert_eq!(d.segment_count(), 2);
        assert_eq!(d.pop_back(), Ok(3));
        assert_eq!(d.segment_count(), 1);
        assert_eq!(d.peek_last(), Some(&2));
        assert_eq!(d.get_last(), Ok(&2));
        d.assert_invariants();
    }

    #[test]
    fn test_deque_end_ops_peek_last_sees_partial_tail() {
        let d = deque_of(5, &[1, 2]);
        assert_eq!(d.peek_last(), Some(&2));
        assert_eq!(d.get_last(), Ok(&2));
        assert_eq!(d.segment_count(), 1);
    }

    #[test]
    fn test_deque_end_ops_mut_accessors() {
        let mut d = deque_of(2, &[1, 2, 3]);
        *d.front_mut().unwrap() = 10;
        *d.back_mut().unwrap() = 30;
        assert_eq!(d.to_vec(), vec![10, 2, 30]);
    }

    // ─── boundaries ───────────────────────────────────────────────────────────
    #[test]
    fn test_deque_boundary_capacity() {
        let mut d = deque_with(2, 3);
        for i in 0..3 {
            d.push_back(i).unwrap();
        }
        assert!(d.is_full());
        assert_eq!(d.remaining_capacity(), 0);
        assert_eq!(d.push_back(9), Err(Error::CapacityExceeded { max_size: 3 }));
        assert_eq!(d.push_front(9), Err(Error::CapacityExceeded { max_size: 3 }));
        assert!(!d.offer_first(9));
        assert!(!d.offer_last(9));
        assert!(!d.offer(9));
        assert_eq!(d.len(), 3);
        assert_eq!(d.to_vec(), vec![0, 1, 2]);
        d.assert_invariants();
    }

    #[test]
    fn test_deque_boundary_zero_max_size() {
        let mut d = deque_with(1, 0);
        assert!(d.is_full());
        assert_eq!(d.push_back(1), Err(Error::CapacityExceeded { max_size: 0 }));
        assert!(d.is_empty());
    }

    #[test]
    fn test_deque_boundary_empty() {
        let mut d = deque_with(3, 10);
        assert_eq!(d.pop_front(), Err(Error::Empty));
        assert_eq!(d.pop_back(), Err(Error::Empty));
        assert_eq!(d.get_first(), Err(Error::Empty));
        assert_eq!(d.get_last(), Err(Error::Empty));
        assert_eq!(d.element(), Err(Error::Empty));
        assert_eq!(d.poll_first(), None);
        assert_eq!(d.poll_last(), None);
        assert_eq!(d.peek_first(), None);
        assert_eq!(d.peek_last(), None);

        d.add_all([1, 2, 3, 4]).unwrap();
        d.clear();
        assert_eq!(d.pop_front(), Err(Error::Empty));
        assert_eq!(d.pop_back(), Err(Error::Empty));
        assert_eq!(d.peek_last(), None);
        assert_eq!(d.poll(), None);
        assert_eq!(d.segment_count(), 1);
        d.assert_invariants();
    }

    #[test]
    fn test_deque_boundary_clear_reusable() {
        let mut d = deque_of(2, &[1, 2, 3, 4, 5]);
        d.clear();
        assert!(d.is_empty());
        d.push_back(3).unwrap();
        d.push_front(2).unwrap();
        assert_eq!(d.to_vec(), vec![2, 3]);
        d.assert_invariants();
    }

    // ─── aliases ──────────────────────────────────────────────────────────────
    #[test]
    fn test_deque_aliases_queue_and_stack() {
        let mut d = deque_with(2, 10);
        assert!(d.offer(1));
        assert!(d.offer(2));
        assert_eq!(d.peek(), Some(&1));
        assert_eq!(d.element(), Ok(&1));
        assert_eq!(d.poll(), Some(1));
        d.push(0).unwrap();
        assert_eq!(d.pop(), Ok(0));
        assert_eq!(d.pop(), Ok(2));
    }

    // ─── occurrence search ────────────────────────────────────────────────────
    #[test]
    fn test_deque_occurrence_remove_first() {
        let mut d = deque_of(2, &[3, 1, 4, 1, 5]);
        assert!(d.remove_first_occurrence(&1));
        assert_eq!(d.to_vec(), vec![3, 4, 1, 5]);
        assert_eq!(d.len(), 4);
        d.assert_invariants();
    }

    #[test]
    fn test_deque_occurrence_remove_last() {
        let mut d = deque_of(2, &[3, 1, 4, 1, 5]);
        assert!(d.remove_last_occurrence(&1));
        assert_eq!(d.to_vec(), vec![3, 1, 4, 5]);
        assert_eq!(d.len(), 4);
        d.assert_invariants();
    }

    #[test]
    fn test_deque_occurrence_missing_value() {
        let mut d = deque_of(2, &[3, 1, 4, 1, 5]);
        assert!(!d.remove_first_occurrence(&9));
        assert!(!d.remove_last_occurrence(&9));
        assert!(!d.remove_item(&9));
        assert_eq!(d.len(), 5);
    }

    #[test]
    fn test_deque_occurrence_retires_emptied_segments() {
        let mut d = deque_of(1, &[1, 2, 3]);
        assert!(d.remove_last_occurrence(&2));
        assert_eq!(d.segment_count(), 2);
        assert!(d.remove_last_occurrence(&3));
        assert_eq!(d.segment_count(), 1);
        assert_eq!(d.peek_last(), Some(&1));
        assert!(d.remove_first_occurrence(&1));
        assert_eq!(d.segment_count(), 1);
        assert!(d.is_empty());
        d.assert_invariants();

        d.add_all([4, 5]).unwrap();
        assert!(d.remove_first_occurrence(&4));
        assert_eq!(d.peek_first(), Some(&5));
        assert_eq!(d.segment_count(), 1);
        d.assert_invariants();
    }

    #[test]
    fn test_deque_occurrence_contains() {
        let d = deque_of(2, &[3, 1, 4]);
        assert!(d.contains(&4));
        assert!(!d.contains(&5));
        assert!(d.contains_all(&[1, 3]));
        assert!(!d.contains_all(&[1, 5]));
        assert!(d.contains_all(&[]));
    }

    // ─── bulk ops ─────────────────────────────────────────────────────────────
    #[test]
    fn test_deque_bulk_remove_if_and_retain() {
        let mut d = deque_of(3, &[1, 2, 3, 4, 5, 6, 7]);
        assert!(d.remove_if(|v| v % 2 == 0));
        assert_eq!(d.to_vec(), vec![1, 3, 5, 7]);
        assert!(!d.remove_if(|v| *v > 100));
        d.retain(|v| *v > 2);
        assert_eq!(d.to_vec(), vec![3, 5, 7]);
        d.assert_invariants();
    }

    #[test]
    fn test_deque_bulk_remove_all_and_retain_all() {
        let mut d = deque_of(2, &[1, 2, 3, 2, 1]);
        let twos: HashSet<i32> = [2].into_iter().collect();
        assert!(d.remove_all(&twos));
        assert_eq!(d.to_vec(), vec![1, 3, 1]);
        assert!(!d.remove_all(&twos));

        let keep: BTreeSet<i32> = [1].into_iter().collect();
        assert!(d.retain_all(&keep));
        assert_eq!(d.to_vec(), vec![1, 1]);
        assert!(!d.retain_all(&keep));

        let fnv_set: fnv::FnvHashSet<i32> = [1].into_iter().collect();
        assert!(d.remove_all(&fnv_set));
        assert!(d.is_empty());
        d.assert_invariants();
    }

    #[test]
    fn test_deque_bulk_add_all_is_atomic() {
        let mut d = deque_with(2, 4);
        d.add_all([1, 2]).unwrap();
        assert_eq!(
            d.add_all([3, 4, 5]),
            Err(Error::CapacityExceeded { max_size: 4 })
        );
        assert_eq!(d.to_vec(), vec![1, 2]);
        d.add_all([3, 4]).unwrap();
        assert_eq!(d.to_vec(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_deque_bulk_try_extend_options() {
        let mut d = deque_with(2, 10);
        assert!(matches!(
            d.try_extend_options([Some(1), None, Some(3)]),
            Err(Error::InvalidArgument(_))
        ));
        assert!(d.is_empty());
        d.try_extend_options([Some(1), Some(2)]).unwrap();
        assert_eq!(d.to_vec(), vec![1, 2]);
    }

    #[test]
    #[should_panic(expected = "deque is full")]
    fn test_deque_bulk_extend_panics_past_capacity() {
        let mut d = deque_with(2, 2);
        d.extend([1, 2, 3]);
    }

    // ─── traversal ────────────────────────────────────────────────────────────
    #[test]
    fn test_deque_traversal_after_pushes_and_pops() {
        let mut d = deque_with(3, 100);
        for i in 0..20 {
            d.push_back(i).unwrap();
        }
        for _ in 0..7 {
            d.pop_front().unwrap();
        }
        let values: Vec<_> = d.iter().copied().collect();
        assert_eq!(values, (7..20).collect::<Vec<_>>());
        let reversed: Vec<_> = d.descending_iter().copied().collect();
        assert_eq!(reversed, (7..20).rev().collect::<Vec<_>>());
    }

    #[test]
    fn test_deque_traversal_round_trip() {
        let original = deque_of(2, &[5, 4, 3, 2, 1]);
        let snapshot = original.to_vec();
        let mut rebuilt = deque_with(2, 1000);
        for value in snapshot {
            rebuilt.push_back(value).unwrap();
        }
        assert_eq!(original, rebuilt);
    }

    #[test]
    fn test_deque_traversal_segment_snapshot() {
        let d = deque_of(2, &[1, 2, 3]);
        assert_eq!(d.segment_snapshot(0), Some(vec![Some(&1), Some(&2)]));
        assert_eq!(d.segment_snapshot(1), Some(vec![Some(&3), None]));
        assert_eq!(d.segment_snapshot(2), None);
        let empty: TripletDeque<i32> = TripletDeque::new();
        assert_eq!(empty.segment_snapshot(0), Some(vec![None; 5]));
    }

    // ─── traits ───────────────────────────────────────────────────────────────
    #[test]
    fn test_deque_traits_comparison() {
        let d1: TripletDeque<i32> = vec![1, 2, 3].into_iter().collect();
        let d2: TripletDeque<i32> = vec![1, 2, 3].into_iter().collect();
        let d3: TripletDeque<i32> = vec![1, 2, 4].into_iter().collect();
        let d4: TripletDeque<i32> = vec![1, 2].into_iter().collect();

        assert_eq!(d1, d2);
        assert!(d1 < d3);
        assert!(d1 > d4);
        assert!(d3 > d1);
    }

    #[test]
    fn test_deque_traits_equal_across_layouts() {
        let mut a = deque_with(2, 10);
        a.push_back(2).unwrap();
        a.push_back(3).unwrap();
        a.push_front(1).unwrap();
        let b = deque_of(2, &[1, 2, 3]);
        assert_ne!(a.segment_snapshot(0), b.segment_snapshot(0));
        assert_eq!(a, b);

        let state = fnv::FnvBuildHasher::default();
        assert_eq!(state.hash_one(&a), state.hash_one(&b));
    }

    #[test]
    fn test_deque_traits_clone_is_independent() {
        let mut d = deque_of(2, &[1, 2, 3]);
        d.remove_first_occurrence(&2);
        let mut cloned = d.clone();
        d.push_back(4).unwrap();
        assert_eq!(d.len(), 3);
        assert_eq!(cloned.len(), 2);
        assert_eq!(cloned.pop_front(), Ok(1));
        assert_eq!(cloned.max_size(), d.max_size());
        cloned.assert_invariants();
    }

    #[test]
    fn test_deque_traits_debug() {
        let d = deque_of(2, &[1, 2, 3]);
        assert_eq!(format!("{:?}", d), "[1, 2, 3]");
    }

    #[test]
    fn test_deque_traits_from_iter_and_extend() {
        let d: TripletDeque<i32> = vec![1, 2].into_iter().collect();
        assert_eq!(d.len(), 2);

        let mut d2: TripletDeque<i32> = TripletDeque::new();
        d2.extend(vec![10, 20, 30]);
        d2.extend(&[40]);
        assert_eq!(d2.len(), 4);
        let collected: Vec<i32> = d2.into_iter().collect();
        assert_eq!(collected, vec![10, 20, 30, 40]);
    }

    #[test]
    fn test_deque_traits_small_handle_type() {
        let config = DequeConfig::new().with_triplet_length(2).with_max_size(100);
        let mut d: TripletDeque<i32, u16> = TripletDeque::with_config(config).unwrap();
        for i in 0..100 {
            d.push_back(i).unwrap();
        }
        assert_eq!(d.segment_count(), 50);
        assert_eq!(d.iter().rev().next(), Some(&99));
        d.assert_invariants();
    }

    // ─── AnyDeque trait dispatch ──────────────────────────────────────────────
    #[test]
    fn test_deque_any_deque_trait() {
        let mut d = deque_with(2, 2);
        let any: &mut dyn AnyDeque<i32> = &mut d;
        assert!(any.push_back(10));
        assert!(any.push_front(5));
        assert!(!any.push_back(20));
        assert_eq!(any.len(), 2);
        assert!(!any.is_empty());
        assert_eq!(any.front(), Some(&5));
        assert_eq!(any.back(), Some(&10));
        assert_eq!(any.pop_front(), Some(5));
        any.clear();
        assert!(any.is_empty());
        assert_eq!(any.pop_back(), None);
    }

    // ─── model-based property ─────────────────────────────────────────────────
    fn apply(deque: &mut dyn AnyDeque<i32>, op: u8, value: i32) -> (Option<i32>, bool) {
        match op % 6 {
            0 => (None, deque.push_back(value)),
            1 => (None, deque.push_front(value)),
            2 => (deque.pop_front(), true),
            3 => (deque.pop_back(), true),
            4 => (deque.front().copied(), true),
            _ => (deque.back().copied(), true),
        }
    }

    #[quickcheck]
    fn prop_deque_matches_vec_deque(ops: Vec<(u8, i8)>, triplet: u8, max: u8) -> bool {
        let max_size = usize::from(max % 40);
        let mut actual = deque_with(usize::from(triplet % 6) + 1, max_size);
        let mut expected: VecDeque<i32> = VecDeque::new();

        for (op, value) in ops {
            let value = i32::from(value);
            match op % 9 {
                6 => {
                    let found = expected.iter().position(|v| *v == value);
                    if let Some(index) = found {
                        expected.remove(index);
                    }
                    if actual.remove_first_occurrence(&value) != found.is_some() {
                        return false;
                    }
                }
                7 => {
                    let found = expected.iter().rposition(|v| *v == value);
                    if let Some(index) = found {
                        expected.remove(index);
                    }
                    if actual.remove_last_occurrence(&value) != found.is_some() {
                        return false;
                    }
                }
                8 => {
                    expected.retain(|v| v % 3 != 0);
                    actual.retain(|v| v % 3 != 0);
                }
                code => {
                    let full = expected.len() >= max_size;
                    let (got, accepted) = apply(&mut actual, code, value);
                    let (want, _) = apply(&mut expected, code, value);
                    if code < 2 && full {
                        // VecDeque is unbounded, undo its push
                        if code == 0 {
                            expected.pop_back();
                        } else {
                            expected.pop_front();
                        }
                        if accepted {
                            return false;
                        }
                    } else if got != want {
                        return false;
                    }
                }
            }
            actual.assert_invariants();
            if !actual.iter().eq(expected.iter()) || actual.len() != expected.len() {
                return false;
            }
        }
        true
    }
}
