//! The doubly linked sequence of segments backing a [`TripletDeque`](crate::TripletDeque).
//!
//! # Arena layout
//! Segments live in a single `Vec` and link to each other through [`IndexType`] handles instead
//! of pointers. A segment is owned by the arena alone; `prev`/`next` are plain indices, so there
//! are no ownership cycles.
//!
//! ```text
//!   arena index:   0        1        2        3
//!               [ B ]    [ C ]    [ A ]    [ free ]
//!
//!   chain:  first ─► A(2) ⇄ B(0) ⇄ C(1) ◄─ last
//!   free list:  3 ─► NONE
//! ```
//!
//! Retired segments are threaded onto a free list through their `next` field and handed out
//! again by `allocate`, so a deque that oscillates around a segment boundary does
//! not allocate on every crossing.

pub(crate) mod segment;

use tracing::trace;

use crate::utils::index_type::IndexType;
use segment::Segment;

pub(crate) struct SegmentChain<T, I: IndexType> {
    segments: Vec<Segment<T, I>>,
    first: I,
    last: I,
    /// Head of the free list, threaded through `Segment::next`.
    free: I,
    /// Number of segments reachable from `first`.
    linked: usize,
    triplet_length: usize,
}

impl<T, I: IndexType> SegmentChain<T, I> {
    /// Creates a chain holding one vacant segment.
    pub(crate) fn new(triplet_length: usize) -> Self {
        let head = I::from_usize(0);
        Self {
            segments: vec![Segment::new(triplet_length)],
            first: head,
            last: head,
            free: I::NONE,
            linked: 1,
            triplet_length,
        }
    }

    #[inline(always)]
    pub(crate) fn triplet_length(&self) -> usize {
        self.triplet_length
    }

    /// Number of segments currently linked into the chain.
    #[inline(always)]
    pub(crate) fn linked(&self) -> usize {
        self.linked
    }

    #[inline(always)]
    pub(crate) fn first(&self) -> I {
        self.first
    }

    #[inline(always)]
    pub(crate) fn last(&self) -> I {
        self.last
    }

    #[inline(always)]
    pub(crate) fn segment(&self, handle: I) -> &Segment<T, I> {
        &self.segments[handle.as_usize()]
    }

    #[inline(always)]
    pub(crate) fn segment_mut(&mut self, handle: I) -> &mut Segment<T, I> {
        &mut self.segments[handle.as_usize()]
    }

    #[inline(always)]
    pub(crate) fn first_segment(&self) -> &Segment<T, I> {
        self.segment(self.first)
    }

    #[inline(always)]
    pub(crate) fn first_segment_mut(&mut self) -> &mut Segment<T, I> {
        self.segment_mut(self.first)
    }

    #[inline(always)]
    pub(crate) fn last_segment(&self) -> &Segment<T, I> {
        self.segment(self.last)
    }

    #[inline(always)]
    pub(crate) fn last_segment_mut(&mut self) -> &mut Segment<T, I> {
        self.segment_mut(self.last)
    }

    /// Handle of the `index`-th linked segment counting from `first`.
    pub(crate) fn nth(&self, index: usize) -> Option<I> {
        if index >= self.linked {
            return None;
        }
        let mut handle = self.first;
        for _ in 0..index {
            handle = self.segment(handle).next;
        }
        Some(handle)
    }

    /// Hands out an unlinked vacant segment, reusing a retired one when possible.
    fn allocate(&mut self) -> I {
        if !self.free.is_none() {
            let handle = self.free;
            self.free = self.segment(handle).next;
            self.segment_mut(handle).next = I::NONE;
            trace!(segment = handle.as_usize(), "reusing retired segment");
            handle
        } else {
            let handle = I::from_usize(self.segments.len());
            self.segments.push(Segment::new(self.triplet_length));
            trace!(segment = handle.as_usize(), "allocated segment");
            handle
        }
    }

    /// Allocates a segment and links it in front of `first`.
    pub(crate) fn link_front(&mut self) -> I {
        let handle = self.allocate();
        let old_first = self.first;
        self.segment_mut(handle).next = old_first;
        self.segment_mut(old_first).prev = handle;
        self.first = handle;
        self.linked += 1;
        handle
    }

    /// Allocates a segment and links it after `last`.
    pub(crate) fn link_back(&mut self) -> I {
        let handle = self.allocate();
        let old_last = self.last;
        self.segment_mut(handle).prev = old_last;
        self.segment_mut(old_last).next = handle;
        self.last = handle;
        self.linked += 1;
        handle
    }

    /// Unlinks a vacant segment and moves it to the free list.
    ///
    /// The sole segment of the chain is never retired; the call is ignored for it so the chain
    /// keeps at least one segment. Returns whether the segment was retired.
    pub(crate) fn retire(&mut self, handle: I) -> bool {
        if self.linked == 1 {
            return false;
        }
        let (prev, next) = {
            let segment = self.segment(handle);
            debug_assert!(segment.is_vacant(), "retiring a segment with live slots");
            (segment.prev, segment.next)
        };

        if prev.is_none() {
            self.first = next;
        } else {
            self.segment_mut(prev).next = next;
        }
        if next.is_none() {
            self.last = prev;
        } else {
            self.segment_mut(next).prev = prev;
        }

        let free = self.free;
        let segment = self.segment_mut(handle);
        segment.prev = I::NONE;
        segment.next = free;
        self.free = handle;
        self.linked -= 1;
        trace!(
            segment = handle.as_usize(),
            linked = self.linked,
            "retired vacant segment"
        );
        true
    }

    /// Drops every segment and starts over with a single vacant one.
    pub(crate) fn reset(&mut self) {
        self.segments.truncate(1);
        let head = I::from_usize(0);
        self.segment_mut(head).reset();
        self.first = head;
        self.last = head;
        self.free = I::NONE;
        self.linked = 1;
    }
}

impl<T: Clone, I: IndexType> Clone for SegmentChain<T, I> {
    /// Rebuilds the chain compactly: linked segments are copied in chain order, the free list is
    /// not carried over.
    fn clone(&self) -> Self {
        let mut segments = Vec::with_capacity(self.linked);
        let mut handle = self.first;
        while !handle.is_none() {
            let source = self.segment(handle);
            let mut segment = Segment::new(self.triplet_length);
            for value in source.cells().iter().flatten() {
                segment.push_back(value.clone());
            }
            let position = segments.len();
            segment.prev = if position == 0 {
                I::NONE
            } else {
                I::from_usize(position - 1)
            };
            segment.next = if source.next.is_none() {
                I::NONE
            } else {
                I::from_usize(position + 1)
            };
            segments.push(segment);
            handle = source.next;
        }
        Self {
            first: I::from_usize(0),
            last: I::from_usize(segments.len() - 1),
            segments,
            free: I::NONE,
            linked: self.linked,
            triplet_length: self.triplet_length,
        }
    }
}
