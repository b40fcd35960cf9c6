//! Doubly-linked list packed into one slot array.
//!
//! Slot 0 is a sentinel that closes the ring: its `next` is the head and its
//! `prev` is the tail. Free slots are chained through `next` starting at
//! `free_head`; insertion pops from that chain and deletion pushes back onto
//! its front, so no operation allocates per node.
//!
//! Positions are *physical* slot indices. They stay stable until the array
//! is relaid out, which only happens on [`ArrayList::linearize`],
//! [`ArrayList::resize`], or when an insert/delete crosses a capacity tier.
//!
//! # Example
//!
//! ```
//! use nexus_arraylist::ArrayList;
//!
//! let mut list = ArrayList::with_capacity(8).unwrap();
//!
//! let a = list.push_back(0).unwrap();
//! list.push_back(10).unwrap();
//! list.push_back(20).unwrap();
//!
//! // Interior insert: the list stays correct but is no longer linear.
//! list.insert_after(a, 15).unwrap();
//! assert_eq!(list.iter().collect::<Vec<_>>(), vec![0, 15, 10, 20]);
//! assert!(!list.is_linear());
//!
//! // Linearize restores physical == logical order.
//! list.linearize().unwrap();
//! assert!(list.is_linear());
//! assert_eq!(list.find_by_logical_index(1), Ok(2));
//! ```
//!
//! # Resize Policy
//!
//! Before every insert, while `size >= capacity - 2` the payload capacity
//! doubles. Before every delete (unless skipped), while
//! `size < (capacity - 1) / 4` it halves, never below the configured minimum.
//! Capacities here count slots, sentinel included.

use std::mem;
use std::panic::Location;

use crate::builder::{ArrayListBuilder, Verify};
use crate::fault::Faults;
use crate::ring::{Iter, Positions, Ring};
use crate::slot::{
    DEFAULT_CAPACITY, EMPTY, POISON, SENTINEL, Slot, UNINITIALISED, Value, link_index,
};
use crate::snapshot::{CallSite, SlotRecord, Snapshot};

/// A doubly-linked list stored in a single resizable slot array.
///
/// An `ArrayList` starts out uninitialised ([`ArrayList::new`]) and must be
/// constructed before use; [`ArrayList::with_capacity`] and
/// [`ArrayList::builder`] do both in one step. Every operation on an
/// uninitialised list fails with [`Faults::UNINITIALISED`].
///
/// Not thread safe: callers sharing a list must serialize every call,
/// including [`ArrayList::verify`].
#[derive(Debug, Clone)]
pub struct ArrayList {
    pub(crate) slots: Vec<Slot>,
    pub(crate) capacity: isize,
    pub(crate) size: isize,
    pub(crate) free_head: isize,
    pub(crate) is_linear: bool,
    min_slots: isize,
    mode: Verify,
    constructed_at: Option<CallSite>,
}

impl Default for ArrayList {
    fn default() -> Self {
        Self::new()
    }
}

impl ArrayList {
    /// Creates an uninitialised list. Call [`ArrayList::construct`] next.
    #[inline]
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            capacity: UNINITIALISED,
            size: UNINITIALISED,
            free_head: UNINITIALISED,
            is_linear: false,
            min_slots: DEFAULT_CAPACITY as isize + 1,
            mode: Verify::Always,
            constructed_at: None,
        }
    }

    /// Creates and constructs a list with room for `capacity` elements.
    #[track_caller]
    pub fn with_capacity(capacity: usize) -> Result<Self, Faults> {
        let mut list = Self::new();
        list.construct(capacity)?;
        Ok(list)
    }

    /// Returns a builder for configuring the list before construction.
    pub fn builder() -> ArrayListBuilder {
        ArrayListBuilder::default()
    }

    pub(crate) fn configure(&mut self, min_capacity: usize, verify: Verify) {
        self.min_slots = isize::try_from(min_capacity.saturating_add(1)).unwrap_or(isize::MAX);
        self.mode = verify;
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Allocates `capacity + 1` slots and links all but the sentinel into
    /// the free chain in ascending order.
    ///
    /// Fails with [`Faults::ALREADY_INITIALISED`] on a constructed list,
    /// [`Faults::INVALID_CAPACITY`] for zero, and [`Faults::ALLOC_ERR`] if
    /// the array cannot be allocated (the list stays uninitialised).
    #[track_caller]
    pub fn construct(&mut self, capacity: usize) -> Result<(), Faults> {
        let caller = Location::caller();

        if self.is_initialised() {
            return Err(self.report(Faults::ALREADY_INITIALISED));
        }
        if capacity == 0 {
            return Err(self.report(Faults::INVALID_CAPACITY));
        }

        let len = capacity
            .checked_add(1)
            .filter(|&len| isize::try_from(len).is_ok())
            .ok_or_else(|| self.report(Faults::ALLOC_ERR))?;

        let mut slots = Vec::new();
        slots
            .try_reserve_exact(len)
            .map_err(|_| self.report(Faults::ALLOC_ERR))?;

        slots.push(Slot::sentinel());
        for i in 1..len {
            let next = if i + 1 < len { i + 1 } else { SENTINEL };
            slots.push(Slot::free(next as isize));
        }

        self.slots = slots;
        self.capacity = len as isize;
        self.size = 0;
        self.free_head = 1;
        self.is_linear = true;
        self.constructed_at = cfg!(debug_assertions).then(|| CallSite::from(caller));

        tracing::debug!(capacity = len, "array list constructed");
        self.check()
    }

    /// Verifies, wipes every slot with the poison pattern, releases the
    /// array, and returns the list to the uninitialised state.
    ///
    /// Destruction always completes; the returned error carries whatever
    /// verification found beforehand.
    pub fn destroy(&mut self) -> Result<(), Faults> {
        let faults = self.verify();
        if !faults.is_empty() {
            self.report(faults);
        }

        self.slots.fill(Slot::POISONED);
        drop(mem::take(&mut self.slots));

        self.capacity = UNINITIALISED;
        self.size = UNINITIALISED;
        self.free_head = UNINITIALISED;
        self.is_linear = false;
        self.constructed_at = None;

        tracing::debug!("array list destroyed");
        if faults.is_empty() { Ok(()) } else { Err(faults) }
    }

    /// Returns `true` unless every field still holds its uninitialised value.
    #[inline]
    pub fn is_initialised(&self) -> bool {
        !(self.free_head == UNINITIALISED
            && self.capacity == UNINITIALISED
            && self.size == UNINITIALISED
            && !self.is_linear
            && self.slots.is_empty())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        usize::try_from(self.size).unwrap_or(0)
    }

    /// Returns `true` if the list holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Slot count, sentinel included. Zero while uninitialised.
    #[inline]
    pub fn capacity(&self) -> usize {
        usize::try_from(self.capacity).unwrap_or(0)
    }

    /// Returns `true` if physical order equals logical order.
    #[inline]
    pub fn is_linear(&self) -> bool {
        self.is_linear
    }

    /// Active verification mode.
    #[inline]
    pub fn verify_mode(&self) -> Verify {
        self.mode
    }

    /// Physical index of the first element, or `None` if empty.
    #[inline]
    pub fn head(&self) -> Option<usize> {
        self.sentinel_link(|sentinel| sentinel.next)
    }

    /// Physical index of the last element, or `None` if empty.
    #[inline]
    pub fn tail(&self) -> Option<usize> {
        self.sentinel_link(|sentinel| sentinel.prev)
    }

    #[inline]
    fn sentinel_link(&self, link: impl Fn(&Slot) -> isize) -> Option<usize> {
        let first = self.slots.first()?;
        link_index(link(first), self.slots.len()).filter(|&i| i != SENTINEL)
    }

    /// First slot of the free chain, if any.
    #[inline]
    pub fn free_head(&self) -> Option<usize> {
        link_index(self.free_head, self.slots.len()).filter(|&i| i != SENTINEL)
    }

    /// Raw slot at a physical index.
    #[inline]
    pub fn slot(&self, position: usize) -> Option<&Slot> {
        self.slots.get(position)
    }

    /// Value stored at a live physical index.
    #[inline]
    pub fn get(&self, position: usize) -> Option<Value> {
        if position == SENTINEL {
            return None;
        }
        self.slots
            .get(position)
            .filter(|slot| !slot.is_free())
            .map(|slot| slot.value)
    }

    /// First value in logical order.
    #[inline]
    pub fn front(&self) -> Option<Value> {
        self.get(self.head()?)
    }

    /// Last value in logical order.
    #[inline]
    pub fn back(&self) -> Option<Value> {
        self.get(self.tail()?)
    }

    /// Physical index of the element after `position`.
    ///
    /// Returns `None` if `position` is the tail or not live.
    #[inline]
    pub fn next_of(&self, position: usize) -> Option<usize> {
        self.get(position)?;
        link_index(self.slots[position].next, self.slots.len()).filter(|&i| i != SENTINEL)
    }

    /// Physical index of the element before `position`.
    ///
    /// Returns `None` if `position` is the head or not live.
    #[inline]
    pub fn prev_of(&self, position: usize) -> Option<usize> {
        self.get(position)?;
        link_index(self.slots[position].prev, self.slots.len()).filter(|&i| i != SENTINEL)
    }

    /// Iterates values in logical order.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self.ring())
    }

    /// Iterates physical indices in logical order.
    pub fn positions(&self) -> Positions<'_> {
        Positions::new(self.ring())
    }

    /// Bounded walk from the sentinel over `size` nodes.
    #[inline]
    pub(crate) fn ring(&self) -> Ring<'_> {
        Ring::new(&self.slots, self.len())
    }

    // ========================================================================
    // Insertion
    // ========================================================================

    /// Inserts `value` after the live slot (or sentinel) at `position`.
    ///
    /// Returns the physical index of the new element. If the insert grows
    /// the array, `position` is followed through the relayout, so the value
    /// still lands right after the element the caller named.
    ///
    /// # Errors
    ///
    /// - [`Faults::INVALID_POSITION`] if `position` is free or out of range
    /// - [`Faults::POISON_VAL_FOUND`] if `value` is [`POISON`]
    /// - [`Faults::ALLOC_ERR`] if growing fails (the list is left unchanged)
    pub fn insert_after(&mut self, position: usize, value: Value) -> Result<usize, Faults> {
        self.check()?;
        let inserted = self
            .link_after(position, value)
            .map_err(|faults| self.report(faults))?;
        self.check()?;
        Ok(inserted)
    }

    /// Inserts `value` before the live slot (or sentinel) at `position`.
    pub fn insert_before(&mut self, position: usize, value: Value) -> Result<usize, Faults> {
        self.check()?;
        let inserted = self
            .link_before(position, value)
            .map_err(|faults| self.report(faults))?;
        self.check()?;
        Ok(inserted)
    }

    /// Inserts `value` at the front of the list.
    pub fn push_front(&mut self, value: Value) -> Result<usize, Faults> {
        self.check()?;
        let head = self.head().unwrap_or(SENTINEL);
        self.insert_before(head, value)
    }

    /// Inserts `value` at the back of the list.
    pub fn push_back(&mut self, value: Value) -> Result<usize, Faults> {
        self.check()?;
        let tail = self.tail().unwrap_or(SENTINEL);
        self.insert_after(tail, value)
    }

    fn link_before(&mut self, position: usize, value: Value) -> Result<usize, Faults> {
        self.live(position)?;
        let prev = self.slots[position].prev as usize;
        self.link_after(prev, value)
    }

    fn link_after(&mut self, position: usize, value: Value) -> Result<usize, Faults> {
        self.live(position)?;
        if value == POISON {
            return Err(Faults::POISON_VAL_FOUND);
        }

        let position = self.grow(position)?;

        let inserted = self.free_head().ok_or(Faults::INVALID_FREE_HEAD)?;
        self.free_head = self.slots[inserted].next;

        let next = self.slots[position].next;
        self.slots[inserted] = Slot {
            prev: position as isize,
            value,
            next,
        };
        self.slots[next as usize].prev = inserted as isize;
        self.slots[position].next = inserted as isize;

        self.size += 1;

        // Only an append landing at physical index `size` keeps the layout linear.
        let at_end = next == SENTINEL as isize && inserted as isize == self.size;
        if !at_end {
            self.is_linear = false;
        }

        Ok(inserted)
    }

    // ========================================================================
    // Deletion
    // ========================================================================

    /// Removes the element at physical `position` and returns its value.
    ///
    /// May shrink the array first; see the module docs for the policy.
    ///
    /// # Errors
    ///
    /// [`Faults::INVALID_POSITION`] if `position` is the sentinel, a free
    /// slot, or out of range. `size` and `capacity` are left unchanged.
    pub fn delete(&mut self, position: usize) -> Result<Value, Faults> {
        self.check()?;
        let value = self
            .unlink(position, true)
            .map_err(|faults| self.report(faults))?;
        self.check()?;
        Ok(value)
    }

    /// Removes the element at `position` without considering a shrink.
    ///
    /// Physical indices of the remaining elements are guaranteed unchanged.
    pub fn delete_without_shrink(&mut self, position: usize) -> Result<Value, Faults> {
        self.check()?;
        let value = self
            .unlink(position, false)
            .map_err(|faults| self.report(faults))?;
        self.check()?;
        Ok(value)
    }

    /// Removes and returns the front element, `None` if empty.
    pub fn pop_front(&mut self) -> Result<Option<Value>, Faults> {
        self.check()?;
        match self.head() {
            Some(head) => self.delete(head).map(Some),
            None => Ok(None),
        }
    }

    /// Removes and returns the back element, `None` if empty.
    pub fn pop_back(&mut self) -> Result<Option<Value>, Faults> {
        self.check()?;
        match self.tail() {
            Some(tail) => self.delete(tail).map(Some),
            None => Ok(None),
        }
    }

    fn unlink(&mut self, position: usize, shrink: bool) -> Result<Value, Faults> {
        if position == SENTINEL {
            return Err(Faults::INVALID_POSITION);
        }
        self.live(position)?;

        let position = if shrink {
            self.shrink(position)?
        } else {
            position
        };

        let Slot { prev, value, next } = self.slots[position];
        let at_end = next == SENTINEL as isize && position as isize == self.size;

        self.slots[prev as usize].next = next;
        self.slots[next as usize].prev = prev;

        self.slots[position] = Slot::free(self.free_head);
        self.free_head = position as isize;

        self.size -= 1;

        if self.size == 0 {
            self.is_linear = true;
        } else if !at_end {
            self.is_linear = false;
        }

        Ok(value)
    }

    /// Returns `position` if it names the sentinel or a live slot.
    #[inline]
    fn live(&self, position: usize) -> Result<usize, Faults> {
        match self.slots.get(position) {
            Some(slot) if !slot.is_free() => Ok(position),
            _ => Err(Faults::INVALID_POSITION),
        }
    }

    // ========================================================================
    // Resize / linearize
    // ========================================================================

    /// Rewrites the array so physical order equals logical order.
    ///
    /// Elements move to slots `1..=len`, free slots follow in ascending
    /// order. Previously returned positions are invalidated.
    pub fn linearize(&mut self) -> Result<(), Faults> {
        self.check()?;
        self.relayout(self.capacity(), SENTINEL)
            .map_err(|faults| self.report(faults))?;
        self.check()
    }

    /// Moves the list into a fresh array of `new_capacity` slots (sentinel
    /// included), linearizing it on the way.
    ///
    /// # Errors
    ///
    /// - [`Faults::INVALID_CAPACITY`] if `new_capacity < len + 2`
    /// - [`Faults::ALLOC_ERR`] if allocation fails; the old array is kept
    pub fn resize(&mut self, new_capacity: usize) -> Result<(), Faults> {
        self.check()?;
        if new_capacity == self.capacity() {
            return Ok(());
        }
        self.relayout(new_capacity, SENTINEL)
            .map_err(|faults| self.report(faults))?;
        self.check()
    }

    /// Doubles payload capacity until an insert fits with a free slot to spare.
    fn grow(&mut self, position: usize) -> Result<usize, Faults> {
        let mut target = self.capacity;
        while self.size >= target - 2 {
            target = (target - 1)
                .checked_mul(2)
                .and_then(|slots| slots.checked_add(1))
                .ok_or(Faults::ALLOC_ERR)?;
        }

        if target == self.capacity {
            return Ok(position);
        }
        self.relayout(target as usize, position)
    }

    /// Halves payload capacity while the list is under a quarter full.
    fn shrink(&mut self, position: usize) -> Result<usize, Faults> {
        let mut target = self.capacity;
        while self.size < (target - 1) / 4 {
            let halved = (target - 1) / 2 + 1;
            if halved < self.min_slots {
                break;
            }
            target = halved;
        }

        if target == self.capacity {
            return Ok(position);
        }
        self.relayout(target as usize, position)
    }

    /// Copies the ring into a new array of `len` slots in logical order.
    ///
    /// Returns where `track` (a live slot or the sentinel) ended up. All or
    /// nothing: on error the current array and fields are untouched.
    fn relayout(&mut self, len: usize, track: usize) -> Result<usize, Faults> {
        let size = self.len();
        if len < size + 2 {
            return Err(Faults::INVALID_CAPACITY);
        }
        let capacity = isize::try_from(len).map_err(|_| Faults::ALLOC_ERR)?;

        let mut fresh = Vec::new();
        fresh
            .try_reserve_exact(len)
            .map_err(|_| Faults::ALLOC_ERR)?;
        fresh.push(Slot::sentinel());

        let mut tracked = (track == SENTINEL).then_some(SENTINEL);
        let mut ring = self.ring();
        for (logical, physical) in ring.by_ref() {
            let rank = logical + 1;
            fresh.push(Slot {
                prev: logical as isize,
                value: self.slots[physical].value,
                next: (rank + 1) as isize,
            });
            if physical == track {
                tracked = Some(rank);
            }
        }
        if !ring.is_closed() {
            return Err(Faults::DAMAGED_PATH);
        }
        let tracked = tracked.ok_or(Faults::INVALID_POSITION)?;

        if size > 0 {
            fresh[size].next = SENTINEL as isize;
            fresh[SENTINEL].next = 1;
            fresh[SENTINEL].prev = size as isize;
        }
        for i in size + 1..len {
            let next = if i + 1 < len { i + 1 } else { SENTINEL };
            fresh.push(Slot::free(next as isize));
        }

        tracing::trace!(from = self.capacity, to = capacity, size, "array list relayout");

        drop(mem::replace(&mut self.slots, fresh));
        self.capacity = capacity;
        self.free_head = size as isize + 1;
        self.is_linear = true;

        Ok(tracked)
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    /// Copies out the current state for a renderer or logger.
    ///
    /// `origin` is optional provenance for the dump request, typically
    /// [`call_site!()`](crate::call_site). Never mutates and never fails;
    /// on a damaged list the ordered walk simply stops early.
    pub fn dump(&self, origin: Option<CallSite>) -> Snapshot {
        let (head, tail) = self
            .slots
            .first()
            .map_or((EMPTY, EMPTY), |sentinel| (sentinel.next, sentinel.prev));

        let positions: Vec<usize> = self.positions().collect();
        let values = positions.iter().map(|&i| self.slots[i].value).collect();

        Snapshot {
            capacity: self.capacity,
            size: self.size,
            head,
            tail,
            free_head: self.free_head,
            is_linear: self.is_linear,
            slots: self
                .slots
                .iter()
                .enumerate()
                .map(|(i, slot)| SlotRecord::new(i, slot))
                .collect(),
            values,
            positions,
            origin,
            constructed_at: self.constructed_at,
        }
    }

    /// Guard run around every public operation: the initialised check, then
    /// full verification when the mode asks for it.
    pub(crate) fn check(&self) -> Result<(), Faults> {
        let faults = self.guard();
        if faults.is_empty() {
            Ok(())
        } else {
            Err(self.report(faults))
        }
    }

    /// Faults the guard would report, without logging them.
    #[inline]
    pub(crate) fn guard(&self) -> Faults {
        if !self.is_initialised() {
            Faults::UNINITIALISED
        } else if self.mode.enabled() {
            self.verify()
        } else {
            Faults::empty()
        }
    }

    /// Logs a fault set (and the state, at debug level) and hands it back.
    #[cold]
    pub(crate) fn report(&self, faults: Faults) -> Faults {
        tracing::error!(%faults, bits = faults.bits(), "array list fault");
        if tracing::enabled!(tracing::Level::DEBUG) {
            tracing::debug!(snapshot = ?self.dump(None), "array list state");
        }
        faults
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(list: &ArrayList) -> Vec<Value> {
        list.iter().collect()
    }

    #[test]
    fn new_list_is_uninitialised() {
        let list = ArrayList::new();
        assert!(!list.is_initialised());
        assert_eq!(list.len(), 0);
        assert_eq!(list.capacity(), 0);
        assert!(list.head().is_none());
        assert_eq!(list.verify(), Faults::UNINITIALISED);
    }

    #[test]
    fn construct_links_free_chain_in_order() {
        let list = ArrayList::with_capacity(4).unwrap();

        assert_eq!(list.capacity(), 5);
        assert_eq!(list.free_head(), Some(1));
        assert_eq!(*list.slot(0).unwrap(), Slot::sentinel());
        for i in 1..4 {
            assert_eq!(*list.slot(i).unwrap(), Slot::free(i as isize + 1));
        }
        assert_eq!(*list.slot(4).unwrap(), Slot::free(0));
        assert!(list.is_linear());
    }

    #[test]
    fn construct_twice_fails() {
        let mut list = ArrayList::with_capacity(4).unwrap();
        assert_eq!(list.construct(4), Err(Faults::ALREADY_INITIALISED));
        assert_eq!(list.capacity(), 5);
    }

    #[test]
    fn construct_alloc_failure_leaves_list_inert() {
        let mut list = ArrayList::new();
        assert_eq!(list.construct(usize::MAX), Err(Faults::ALLOC_ERR));
        assert_eq!(
            list.construct(isize::MAX as usize / 2),
            Err(Faults::ALLOC_ERR)
        );
        assert!(!list.is_initialised());
        assert_eq!(list.push_back(1), Err(Faults::UNINITIALISED));
    }

    #[test]
    fn operations_on_uninitialised_list() {
        let mut list = ArrayList::new();
        assert_eq!(list.insert_after(0, 1), Err(Faults::UNINITIALISED));
        assert_eq!(list.push_front(1), Err(Faults::UNINITIALISED));
        assert_eq!(list.delete(1), Err(Faults::UNINITIALISED));
        assert_eq!(list.linearize(), Err(Faults::UNINITIALISED));
        assert_eq!(list.find_by_logical_index(0), Err(Faults::UNINITIALISED));
    }

    #[test]
    fn destroy_resets_and_allows_reconstruct() {
        let mut list = ArrayList::with_capacity(4).unwrap();
        list.push_back(1).unwrap();

        assert_eq!(list.destroy(), Ok(()));
        assert!(!list.is_initialised());
        assert!(list.slots.is_empty());
        assert_eq!(list.destroy(), Err(Faults::UNINITIALISED));

        list.construct(2).unwrap();
        assert_eq!(list.capacity(), 3);
    }

    #[test]
    fn destroy_reports_corruption_but_completes() {
        let mut list = ArrayList::with_capacity(4).unwrap();
        list.push_back(1).unwrap();
        list.size = 3;

        let err = list.destroy().unwrap_err();
        assert!(err.contains(Faults::DAMAGED_PATH));
        assert!(!list.is_initialised());
    }

    #[test]
    fn push_back_keeps_linear() {
        let mut list = ArrayList::with_capacity(8).unwrap();
        assert_eq!(list.push_back(0), Ok(1));
        assert_eq!(list.push_back(10), Ok(2));
        assert_eq!(list.push_back(20), Ok(3));

        assert_eq!(values(&list), vec![0, 10, 20]);
        assert_eq!(list.len(), 3);
        assert!(list.is_linear());
        assert_eq!(list.head(), Some(1));
        assert_eq!(list.tail(), Some(3));
    }

    #[test]
    fn interior_insert_clears_linear() {
        let mut list = ArrayList::with_capacity(8).unwrap();
        let first = list.push_back(0).unwrap();
        list.push_back(10).unwrap();
        list.push_back(20).unwrap();

        let inserted = list.insert_after(first, 15).unwrap();
        assert_eq!(inserted, 4);
        assert_eq!(values(&list), vec![0, 15, 10, 20]);
        assert!(!list.is_linear());
        assert!(list.verify().is_empty());
    }

    #[test]
    fn push_front_on_non_empty_clears_linear() {
        let mut list = ArrayList::with_capacity(8).unwrap();
        list.push_back(1).unwrap();
        list.push_front(0).unwrap();

        assert_eq!(values(&list), vec![0, 1]);
        assert!(!list.is_linear());
        assert!(list.verify().is_empty());
    }

    #[test]
    fn push_front_on_empty_stays_linear() {
        let mut list = ArrayList::with_capacity(8).unwrap();
        assert_eq!(list.push_front(7), Ok(1));
        assert!(list.is_linear());
    }

    #[test]
    fn insert_before() {
        let mut list = ArrayList::with_capacity(8).unwrap();
        list.push_back(1).unwrap();
        let c = list.push_back(3).unwrap();

        list.insert_before(c, 2).unwrap();
        assert_eq!(values(&list), vec![1, 2, 3]);
    }

    #[test]
    fn insert_after_free_slot_fails() {
        let mut list = ArrayList::with_capacity(8).unwrap();
        list.push_back(1).unwrap();

        assert_eq!(list.insert_after(5, 2), Err(Faults::INVALID_POSITION));
        assert_eq!(list.insert_after(100, 2), Err(Faults::INVALID_POSITION));
        assert_eq!(list.insert_before(5, 2), Err(Faults::INVALID_POSITION));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn insert_poison_fails() {
        let mut list = ArrayList::with_capacity(8).unwrap();
        assert_eq!(list.push_back(POISON), Err(Faults::POISON_VAL_FOUND));
        assert!(list.is_empty());
    }

    #[test]
    fn delete_pushes_slot_to_free_front() {
        let mut list = ArrayList::with_capacity(8).unwrap();
        list.push_back(1).unwrap();
        let b = list.push_back(2).unwrap();
        list.push_back(3).unwrap();

        assert_eq!(list.delete(b), Ok(2));
        assert_eq!(values(&list), vec![1, 3]);
        assert_eq!(list.free_head(), Some(b));
        assert_eq!(*list.slot(b).unwrap(), Slot::free(4));
        assert!(!list.is_linear());

        // Freed slot is reused first.
        assert_eq!(list.push_back(4), Ok(b));
    }

    #[test]
    fn delete_tail_keeps_linear() {
        let mut list = ArrayList::with_capacity(8).unwrap();
        list.push_back(1).unwrap();
        let b = list.push_back(2).unwrap();

        list.delete(b).unwrap();
        assert!(list.is_linear());
        assert!(list.verify().is_empty());
    }

    #[test]
    fn delete_head_clears_linear() {
        let mut list = ArrayList::with_capacity(8).unwrap();
        let a = list.push_back(1).unwrap();
        list.push_back(2).unwrap();

        list.delete(a).unwrap();
        assert!(!list.is_linear());
        assert_eq!(list.find_by_logical_index(0), Ok(2));
    }

    #[test]
    fn emptying_list_restores_linear() {
        let mut list = ArrayList::with_capacity(8).unwrap();
        let a = list.push_back(1).unwrap();
        list.push_back(2).unwrap();
        list.delete(a).unwrap();
        assert!(!list.is_linear());

        list.pop_front().unwrap();
        assert!(list.is_empty());
        assert!(list.is_linear());
        assert!(list.verify().is_empty());
    }

    #[test]
    fn delete_invalid_positions() {
        let mut list = ArrayList::with_capacity(8).unwrap();
        let a = list.push_back(1).unwrap();
        list.delete(a).unwrap();

        let capacity = list.capacity();
        assert_eq!(list.delete(a), Err(Faults::INVALID_POSITION));
        assert_eq!(list.delete(SENTINEL), Err(Faults::INVALID_POSITION));
        assert_eq!(list.delete(capacity), Err(Faults::INVALID_POSITION));
        assert_eq!(list.len(), 0);
        assert_eq!(list.capacity(), capacity);
    }

    #[test]
    fn pop_front_and_back() {
        let mut list = ArrayList::with_capacity(8).unwrap();
        for v in 1..=3 {
            list.push_back(v).unwrap();
        }

        assert_eq!(list.pop_front(), Ok(Some(1)));
        assert_eq!(list.pop_back(), Ok(Some(3)));
        assert_eq!(list.pop_back(), Ok(Some(2)));
        assert_eq!(list.pop_back(), Ok(None));
        assert_eq!(list.pop_front(), Ok(None));
    }

    #[test]
    fn navigation() {
        let mut list = ArrayList::with_capacity(8).unwrap();
        let a = list.push_back(1).unwrap();
        let b = list.push_back(2).unwrap();
        let c = list.push_back(3).unwrap();

        assert_eq!(list.next_of(a), Some(b));
        assert_eq!(list.next_of(c), None);
        assert_eq!(list.prev_of(a), None);
        assert_eq!(list.prev_of(c), Some(b));
        assert_eq!(list.front(), Some(1));
        assert_eq!(list.back(), Some(3));
        assert_eq!(list.get(SENTINEL), None);
        assert_eq!(list.get(7), None);
    }

    #[test]
    fn grows_when_two_slots_remain() {
        let mut list = ArrayList::with_capacity(8).unwrap();
        for v in 0..7 {
            list.push_back(v).unwrap();
        }
        assert_eq!(list.capacity(), 9);
        assert_eq!(list.len(), 7);

        list.push_back(7).unwrap();
        assert_eq!(list.capacity(), 17);
        assert_eq!(values(&list), (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn growth_follows_tracked_position() {
        let mut list = ArrayList::with_capacity(8).unwrap();
        for v in 0..7 {
            list.push_front(v).unwrap();
        }
        // Logical order 6..=0; value 5 sits at physical 6 but moves to 2.
        let target = list.find_by_value(5).unwrap().unwrap();
        assert_eq!(target, 6);

        list.insert_after(target, 100).unwrap();
        assert_eq!(list.capacity(), 17);
        assert_eq!(values(&list), vec![6, 5, 100, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn shrinks_when_under_quarter_full() {
        let mut list = ArrayList::with_capacity(32).unwrap();
        for v in 0..8 {
            list.push_back(v).unwrap();
        }
        assert_eq!(list.capacity(), 33);

        // size 8 is not < 32 / 4
        list.pop_back().unwrap();
        assert_eq!(list.capacity(), 33);

        // size 7 < 8: 33 -> 17 before deleting
        list.pop_back().unwrap();
        assert_eq!(list.capacity(), 17);
        assert_eq!(list.len(), 6);
    }

    #[test]
    fn shrink_stops_at_minimum() {
        let mut list = ArrayList::with_capacity(64).unwrap();
        list.push_back(1).unwrap();
        list.push_back(2).unwrap();

        list.pop_back().unwrap();
        assert_eq!(list.capacity(), 9);
        list.pop_back().unwrap();
        assert_eq!(list.capacity(), 9);
    }

    #[test]
    fn shrink_follows_tracked_position() {
        let mut list = ArrayList::with_capacity(32).unwrap();
        for v in 0..4 {
            list.push_front(v).unwrap();
        }
        let target = list.find_by_value(2).unwrap().unwrap();
        assert_eq!(target, 3);

        // 33 -> 17 moves value 2 from physical 3 to physical 2.
        assert_eq!(list.delete(target), Ok(2));
        assert_eq!(list.capacity(), 17);
        assert_eq!(values(&list), vec![3, 1, 0]);
    }

    #[test]
    fn delete_without_shrink_keeps_capacity() {
        let mut list = ArrayList::with_capacity(64).unwrap();
        let a = list.push_back(1).unwrap();
        let b = list.push_back(2).unwrap();

        list.delete_without_shrink(a).unwrap();
        assert_eq!(list.capacity(), 65);
        assert_eq!(list.get(b), Some(2));
    }

    #[test]
    fn resize_rejects_too_small() {
        let mut list = ArrayList::with_capacity(8).unwrap();
        for v in 0..4 {
            list.push_back(v).unwrap();
        }
        assert_eq!(list.resize(5), Err(Faults::INVALID_CAPACITY));
        assert_eq!(list.capacity(), 9);

        list.resize(6).unwrap();
        assert_eq!(list.capacity(), 6);
        assert_eq!(list.free_head(), Some(5));
    }

    #[test]
    fn resize_alloc_failure_is_atomic() {
        let mut list = ArrayList::with_capacity(8).unwrap();
        list.push_front(1).unwrap();
        list.push_front(2).unwrap();
        let before = list.dump(None);

        assert_eq!(list.resize(isize::MAX as usize / 2), Err(Faults::ALLOC_ERR));
        assert_eq!(list.dump(None), before);
        assert!(list.verify().is_empty());
    }

    #[test]
    fn linearize_restores_order() {
        let mut list = ArrayList::with_capacity(8).unwrap();
        for v in 0..5 {
            list.push_front(v).unwrap();
        }
        assert!(!list.is_linear());

        list.linearize().unwrap();
        assert!(list.is_linear());
        assert_eq!(list.positions().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
        assert_eq!(values(&list), vec![4, 3, 2, 1, 0]);
        assert_eq!(list.free_head(), Some(6));
    }

    #[test]
    fn verify_never_skips_full_pass() {
        let mut list = ArrayList::builder().verify(Verify::Never).build().unwrap();
        list.push_back(1).unwrap();
        list.slots[1].value = POISON;

        // No verification between operations.
        assert!(list.push_back(2).is_ok());
        assert_eq!(list.verify_mode(), Verify::Never);
        assert!(list.verify().contains(Faults::POISON_VAL_FOUND));
    }

    #[test]
    fn operation_on_corrupt_list_stops() {
        let mut list = ArrayList::with_capacity(8).unwrap();
        list.push_back(1).unwrap();
        list.slots[1].value = POISON;

        let err = list.push_back(2).unwrap_err();
        assert!(err.contains(Faults::POISON_VAL_FOUND));
        assert_eq!(list.size, 1);
    }

    #[test]
    fn dump_reports_table_and_order() {
        let mut list = ArrayList::with_capacity(4).unwrap();
        list.push_back(5).unwrap();
        list.push_front(4).unwrap();

        let snapshot = list.dump(None);
        assert_eq!(snapshot.capacity, 5);
        assert_eq!(snapshot.size, 2);
        assert_eq!(snapshot.head, 2);
        assert_eq!(snapshot.tail, 1);
        assert_eq!(snapshot.free_head, 3);
        assert!(!snapshot.is_linear);
        assert_eq!(snapshot.slots.len(), 5);
        assert_eq!(snapshot.values, vec![4, 5]);
        assert_eq!(snapshot.positions, vec![2, 1]);
        assert_eq!(snapshot.origin, None);
        if cfg!(debug_assertions) {
            assert_eq!(snapshot.constructed_at.unwrap().file, file!());
        }
    }

    #[test]
    fn dump_of_uninitialised_list() {
        let snapshot = ArrayList::new().dump(None);
        assert_eq!(snapshot.capacity, -1);
        assert_eq!(snapshot.head, EMPTY);
        assert!(snapshot.slots.is_empty());
        assert!(snapshot.values.is_empty());
    }
}
