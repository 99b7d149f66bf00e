//! Iterators over a [`TripletDeque`].
//!
//! All of them walk the segment chain and only ever surface live slots. Vacant cells are never
//! observed: within a segment they are always trailing, and a fully vacant segment only exists
//! when the deque is empty.

use core::fmt;
use core::iter::FusedIterator;

use crate::chain::SegmentChain;
use crate::deque::TripletDeque;
use crate::utils::index_type::IndexType;

// ─── Iter ─────────────────────────────────────────────────────────────────────

/// Borrowing iterator, head to tail. Iterating it in reverse walks tail to head.
///
/// Created by [`TripletDeque::iter`] and [`TripletDeque::descending_iter`].
pub struct Iter<'a, T, I: IndexType = u32> {
    chain: &'a SegmentChain<T, I>,
    head: I,
    head_slot: usize,
    tail: I,
    /// One past the next slot to yield from the back.
    tail_slot: usize,
    remaining: usize,
}

impl<'a, T, I: IndexType> Iter<'a, T, I> {
    pub(crate) fn new(chain: &'a SegmentChain<T, I>, len: usize) -> Self {
        Self {
            chain,
            head: chain.first(),
            head_slot: 0,
            tail: chain.last(),
            tail_slot: chain.last_segment().len(),
            remaining: len,
        }
    }
}

impl<'a, T, I: IndexType> Iterator for Iter<'a, T, I> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let chain = self.chain;
        loop {
            let segment = chain.segment(self.head);
            if self.head_slot < segment.len() {
                let value = segment.get(self.head_slot);
                self.head_slot += 1;
                self.remaining -= 1;
                return value;
            }
            if segment.next.is_none() {
                return None;
            }
            self.head = segment.next;
            self.head_slot = 0;
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, I: IndexType> DoubleEndedIterator for Iter<'a, T, I> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let chain = self.chain;
        loop {
            let segment = chain.segment(self.tail);
            if self.tail_slot > 0 {
                self.tail_slot -= 1;
                self.remaining -= 1;
                return segment.get(self.tail_slot);
            }
            if segment.prev.is_none() {
                return None;
            }
            self.tail = segment.prev;
            self.tail_slot = chain.segment(self.tail).len();
        }
    }
}

impl<T, I: IndexType> ExactSizeIterator for Iter<'_, T, I> {}

impl<T, I: IndexType> FusedIterator for Iter<'_, T, I> {}

impl<T, I: IndexType> Clone for Iter<'_, T, I> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<T: fmt::Debug, I: IndexType> fmt::Debug for Iter<'_, T, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

// ─── IntoIter ─────────────────────────────────────────────────────────────────

/// Owning iterator, draining from the front (or from the back when reversed).
pub struct IntoIter<T, I: IndexType = u32> {
    deque: TripletDeque<T, I>,
}

impl<T, I: IndexType> IntoIter<T, I> {
    pub(crate) fn new(deque: TripletDeque<T, I>) -> Self {
        Self { deque }
    }
}

impl<T, I: IndexType> Iterator for IntoIter<T, I> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.deque.poll_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.deque.len();
        (len, Some(len))
    }
}

impl<T, I: IndexType> DoubleEndedIterator for IntoIter<T, I> {
    fn next_back(&mut self) -> Option<T> {
        self.deque.poll_last()
    }
}

impl<T, I: IndexType> ExactSizeIterator for IntoIter<T, I> {}

impl<T, I: IndexType> FusedIterator for IntoIter<T, I> {}

// ─── CursorMut ────────────────────────────────────────────────────────────────

/// A head-to-tail cursor that can remove the element it points at.
///
/// The position is a (segment, slot) coordinate. Removing the current element closes the gap
/// inside its segment, so the cursor is left on the element that followed it; if the segment
/// empties it is retired and the cursor moves to the head of the next segment. The cursor holds
/// the deque mutably, so the chain cannot change underneath it.
///
/// ```
/// use triplet_deque::TripletDeque;
///
/// let mut deque: TripletDeque<i32> = (1..=6).collect();
/// let mut cursor = deque.cursor_mut();
/// while let Some(value) = cursor.current() {
///     if value % 2 == 0 {
///         cursor.remove_current();
///     } else {
///         cursor.move_next();
///     }
/// }
/// assert_eq!(deque.to_vec(), vec![1, 3, 5]);
/// ```
pub struct CursorMut<'a, T, I: IndexType = u32> {
    deque: &'a mut TripletDeque<T, I>,
    segment: I,
    slot: usize,
}

impl<'a, T, I: IndexType> CursorMut<'a, T, I> {
    pub(crate) fn new(deque: &'a mut TripletDeque<T, I>) -> Self {
        let segment = if deque.is_empty() {
            I::NONE
        } else {
            deque.chain.first()
        };
        Self {
            deque,
            segment,
            slot: 0,
        }
    }

    /// Returns the element under the cursor, or `None` once the cursor has run off the tail.
    pub fn current(&self) -> Option<&T> {
        if self.segment.is_none() {
            return None;
        }
        self.deque.chain.segment(self.segment).get(self.slot)
    }

    /// Mutable counterpart of [`current`](CursorMut::current).
    pub fn current_mut(&mut self) -> Option<&mut T> {
        if self.segment.is_none() {
            return None;
        }
        self.deque.chain.segment_mut(self.segment).get_mut(self.slot)
    }

    /// Advances to the next element. Does nothing once past the tail.
    pub fn move_next(&mut self) {
        if self.segment.is_none() {
            return;
        }
        let segment = self.deque.chain.segment(self.segment);
        self.slot += 1;
        if self.slot >= segment.len() {
            self.segment = segment.next;
            self.slot = 0;
        }
    }

    /// Removes the element under the cursor and returns it, leaving the cursor on its successor.
    pub fn remove_current(&mut self) -> Option<T> {
        if self.segment.is_none() {
            return None;
        }
        let next = self.deque.chain.segment(self.segment).next;
        let (value, retired) = self.deque.remove_slot(self.segment, self.slot)?;
        if retired || self.slot >= self.deque.chain.segment(self.segment).len() {
            self.segment = next;
            self.slot = 0;
        }
        Some(value)
    }
}
