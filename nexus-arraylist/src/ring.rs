//! Bounded walks over the ring.
//!
//! Every traversal follows `next` links from the sentinel and stops after a
//! fixed number of steps, whatever the links claim. A corrupted, cyclic chain
//! therefore ends the walk instead of looping forever; [`Ring::is_closed`]
//! tells the caller whether the walk came back to the sentinel on time.

use std::iter::FusedIterator;

use crate::slot::{SENTINEL, Slot, Value, link_index};

/// Walk yielding `(logical, physical)` pairs.
#[derive(Clone)]
pub(crate) struct Ring<'a> {
    slots: &'a [Slot],
    cursor: isize,
    taken: usize,
    limit: usize,
    size: usize,
}

impl<'a> Ring<'a> {
    /// Walk expected to visit exactly `size` nodes, bounded by `size` steps.
    #[inline]
    pub(crate) fn new(slots: &'a [Slot], size: usize) -> Self {
        Self::bounded(slots, size, size)
    }

    /// Walk expected to visit `size` nodes, bounded by `limit` steps.
    #[inline]
    pub(crate) fn bounded(slots: &'a [Slot], size: usize, limit: usize) -> Self {
        Self {
            slots,
            cursor: slots.first().map_or(SENTINEL as isize, |sentinel| sentinel.next),
            taken: 0,
            limit,
            size,
        }
    }

    /// Returns `true` if the walk is back at the sentinel after exactly
    /// `size` nodes.
    #[inline]
    pub(crate) fn is_closed(&self) -> bool {
        self.cursor == SENTINEL as isize && self.taken == self.size
    }
}

impl Iterator for Ring<'_> {
    type Item = (usize, usize);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor <= SENTINEL as isize || self.taken >= self.limit {
            return None;
        }

        // Out of range: leave the cursor where it is so the walk reads as open.
        let physical = link_index(self.cursor, self.slots.len())?;
        let item = (self.taken, physical);

        self.taken += 1;
        self.cursor = self.slots[physical].next;
        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.limit - self.taken))
    }
}

impl FusedIterator for Ring<'_> {}

/// Iterator over values in logical order.
///
/// Created by [`ArrayList::iter`](crate::ArrayList::iter).
#[derive(Clone)]
pub struct Iter<'a> {
    ring: Ring<'a>,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(ring: Ring<'a>) -> Self {
        Self { ring }
    }
}

impl Iterator for Iter<'_> {
    type Item = Value;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (_, physical) = self.ring.next()?;
        Some(self.ring.slots[physical].value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ring.size_hint()
    }
}

impl FusedIterator for Iter<'_> {}

/// Iterator over physical indices in logical order.
///
/// Created by [`ArrayList::positions`](crate::ArrayList::positions).
#[derive(Clone)]
pub struct Positions<'a> {
    ring: Ring<'a>,
}

impl<'a> Positions<'a> {
    pub(crate) fn new(ring: Ring<'a>) -> Self {
        Self { ring }
    }
}

impl Iterator for Positions<'_> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.ring.next().map(|(_, physical)| physical)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ring.size_hint()
    }
}

impl FusedIterator for Positions<'_> {}
