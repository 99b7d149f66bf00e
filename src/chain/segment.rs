//! A single fixed-capacity block of element slots.

use crate::utils::index_type::IndexType;

/// Fixed array of `Option<T>` cells plus arena links to its neighbours.
///
/// `None` is the vacant marker. Live cells are always packed at the start of `slots`, so
/// `live` is also the index of the first vacant cell. The segment enforces no business rules of
/// its own; the chain decides when it may be written, linked or retired.
pub(crate) struct Segment<T, I: IndexType> {
    slots: Box<[Option<T>]>,
    live: usize,
    pub(crate) prev: I,
    pub(crate) next: I,
}

impl<T, I: IndexType> Segment<T, I> {
    /// Creates an unlinked segment with every cell vacant.
    pub(crate) fn new(triplet_length: usize) -> Self {
        Self {
            slots: (0..triplet_length).map(|_| None).collect(),
            live: 0,
            prev: I::NONE,
            next: I::NONE,
        }
    }

    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.live
    }

    #[inline(always)]
    pub(crate) fn is_full(&self) -> bool {
        self.live == self.slots.len()
    }

    #[inline(always)]
    pub(crate) fn is_vacant(&self) -> bool {
        self.live == 0
    }

    /// All cells, live and vacant, head to tail.
    #[inline(always)]
    pub(crate) fn cells(&self) -> &[Option<T>] {
        &self.slots
    }

    #[inline(always)]
    pub(crate) fn get(&self, slot: usize) -> Option<&T> {
        self.slots.get(slot)?.as_ref()
    }

    #[inline(always)]
    pub(crate) fn get_mut(&mut self, slot: usize) -> Option<&mut T> {
        self.slots.get_mut(slot)?.as_mut()
    }

    pub(crate) fn first(&self) -> Option<&T> {
        self.get(0)
    }

    pub(crate) fn last(&self) -> Option<&T> {
        self.get(self.live.checked_sub(1)?)
    }

    pub(crate) fn last_mut(&mut self) -> Option<&mut T> {
        let slot = self.live.checked_sub(1)?;
        self.get_mut(slot)
    }

    /// Index of the first live cell matching `pred`.
    pub(crate) fn position(&self, mut pred: impl FnMut(&T) -> bool) -> Option<usize> {
        self.slots[..self.live]
            .iter()
            .position(|cell| cell.as_ref().is_some_and(&mut pred))
    }

    /// Index of the last live cell matching `pred`.
    pub(crate) fn rposition(&self, mut pred: impl FnMut(&T) -> bool) -> Option<usize> {
        self.slots[..self.live]
            .iter()
            .rposition(|cell| cell.as_ref().is_some_and(&mut pred))
    }

    /// Shifts every cell one position toward the tail and writes `value` at index 0.
    ///
    /// The shift covers the whole array regardless of how many cells are live. The cell rotated
    /// out of the tail must be vacant.
    pub(crate) fn push_front(&mut self, value: T) {
        debug_assert!(!self.is_full(), "push_front on a full segment");
        self.slots.rotate_right(1);
        self.slots[0] = Some(value);
        self.live += 1;
    }

    /// Writes `value` into the first vacant cell.
    pub(crate) fn push_back(&mut self, value: T) {
        debug_assert!(!self.is_full(), "push_back on a full segment");
        self.slots[self.live] = Some(value);
        self.live += 1;
    }

    /// Takes the value at index 0 and shifts the rest one position toward the head.
    pub(crate) fn pop_front(&mut self) -> Option<T> {
        self.remove_at(0)
    }

    /// Takes the last live value. Nothing moves.
    pub(crate) fn pop_back(&mut self) -> Option<T> {
        let slot = self.live.checked_sub(1)?;
        let value = self.slots[slot].take();
        self.live = slot;
        value
    }

    /// Takes the value at `slot` and closes the gap by shifting the following cells toward the
    /// head. The vacated cell ends up at the tail.
    pub(crate) fn remove_at(&mut self, slot: usize) -> Option<T> {
        if slot >= self.live {
            return None;
        }
        let value = self.slots[slot].take();
        self.slots[slot..].rotate_left(1);
        self.live -= 1;
        value
    }

    /// Drops every live value and unlinks the segment.
    pub(crate) fn reset(&mut self) {
        for cell in &mut self.slots[..self.live] {
            *cell = None;
        }
        self.live = 0;
        self.prev = I::NONE;
        self.next = I::NONE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells_of<T: Clone>(segment: &Segment<T, u32>) -> Vec<Option<T>> {
        segment.cells().to_vec()
    }

    #[test]
    fn test_segment_new_is_vacant() {
        let segment: Segment<i32, u32> = Segment::new(3);
        assert!(segment.is_vacant());
        assert!(!segment.is_full());
        assert_eq!(cells_of(&segment), vec![None, None, None]);
        assert!(segment.prev.is_none());
        assert!(segment.next.is_none());
    }

    #[test]
    fn test_segment_push_front_shifts_toward_tail() {
        let mut segment: Segment<i32, u32> = Segment::new(3);
        segment.push_front(1);
        segment.push_front(2);
        assert_eq!(cells_of(&segment), vec![Some(2), Some(1), None]);
        segment.push_front(3);
        assert!(segment.is_full());
        assert_eq!(cells_of(&segment), vec![Some(3), Some(2), Some(1)]);
    }

    #[test]
    fn test_segment_push_back_fills_first_vacant() {
        let mut segment: Segment<i32, u32> = Segment::new(3);
        segment.push_back(1);
        segment.push_back(2);
        assert_eq!(cells_of(&segment), vec![Some(1), Some(2), None]);
        assert_eq!(segment.first(), Some(&1));
        assert_eq!(segment.last(), Some(&2));
    }

    #[test]
    fn test_segment_pop_keeps_packing() {
        let mut segment: Segment<i32, u32> = Segment::new(4);
        for i in 1..=4 {
            segment.push_back(i);
        }
        assert_eq!(segment.pop_front(), Some(1));
        assert_eq!(cells_of(&segment), vec![Some(2), Some(3), Some(4), None]);
        assert_eq!(segment.pop_back(), Some(4));
        assert_eq!(cells_of(&segment), vec![Some(2), Some(3), None, None]);
        assert_eq!(segment.len(), 2);
    }

    #[test]
    fn test_segment_remove_at_closes_gap() {
        let mut segment: Segment<i32, u32> = Segment::new(4);
        for i in 1..=4 {
            segment.push_back(i);
        }
        assert_eq!(segment.remove_at(1), Some(2));
        assert_eq!(cells_of(&segment), vec![Some(1), Some(3), Some(4), None]);
        assert_eq!(segment.remove_at(3), None);
        assert_eq!(segment.len(), 3);
    }

    #[test]
    fn test_segment_position_search() {
        let mut segment: Segment<i32, u32> = Segment::new(5);
        for i in [3, 1, 4, 1] {
            segment.push_back(i);
        }
        assert_eq!(segment.position(|v| *v == 1), Some(1));
        assert_eq!(segment.rposition(|v| *v == 1), Some(3));
        assert_eq!(segment.position(|v| *v == 9), None);
    }

    #[test]
    fn test_segment_empty_pops() {
        let mut segment: Segment<i32, u32> = Segment::new(2);
        assert_eq!(segment.pop_front(), None);
        assert_eq!(segment.pop_back(), None);
        assert_eq!(segment.last(), None);
    }

    #[test]
    fn test_segment_reset() {
        let mut segment: Segment<String, u32> = Segment::new(2);
        segment.push_back("a".to_string());
        segment.prev = 4;
        segment.reset();
        assert!(segment.is_vacant());
        assert!(segment.prev.is_none());
        assert_eq!(segment.cells(), &[None, None]);
    }
}
