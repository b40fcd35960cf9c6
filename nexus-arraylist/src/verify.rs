//! Structural verification.
//!
//! [`ArrayList::verify`] checks every invariant independently and ORs the
//! fault kinds together. It only reads, and every walk it performs is
//! bounded, so it is safe to run on a list in any state.

use crate::fault::Faults;
use crate::list::ArrayList;
use crate::ring::Ring;
use crate::slot::{POISON, SENTINEL, Slot, link_index};

impl ArrayList {
    /// Checks every structural invariant and returns all faults found.
    ///
    /// An empty set means the list is sound. An uninitialised list reports
    /// only [`Faults::UNINITIALISED`]; a list without storage skips every
    /// check that reads slots.
    ///
    /// ```
    /// use nexus_arraylist::{ArrayList, Faults};
    ///
    /// let mut list = ArrayList::with_capacity(4).unwrap();
    /// list.push_back(1).unwrap();
    /// assert_eq!(list.verify(), Faults::empty());
    /// ```
    pub fn verify(&self) -> Faults {
        if !self.is_initialised() {
            return Faults::UNINITIALISED;
        }

        let mut faults = Faults::empty();

        if self.slots.is_empty() {
            faults |= Faults::DATA_INVALID_PTR;
        }
        if self.capacity < self.size.saturating_add(1) {
            faults |= Faults::LOW_CAPACITY;
        }
        if self.capacity < 0 {
            faults |= Faults::NEGATIVE_CAPACITY;
        }
        if self.size < 0 {
            faults |= Faults::NEGATIVE_SIZE;
        }
        if self.free_head <= 0 {
            faults |= Faults::INVALID_FREE_HEAD;
        }

        if self.slots.is_empty() {
            return faults;
        }
        if usize::try_from(self.capacity) != Ok(self.slots.len()) {
            faults |= Faults::INVALID_CAPACITY;
        }

        let slots = self.slots.as_slice();
        let size = self.len();

        faults |= check_sentinel(slots, size);
        faults |= self.check_ring(slots, size);
        faults |= self.check_free_chain(slots, size);
        faults |= check_payloads(slots);

        faults
    }

    /// Walks the ring once, checking payloads, back links and linearity.
    fn check_ring(&self, slots: &[Slot], size: usize) -> Faults {
        let mut faults = Faults::empty();
        let mut prev = SENTINEL;

        // One extra step so an over-long chain is seen as such.
        let mut ring = Ring::bounded(slots, size, size + 1);
        for (logical, physical) in ring.by_ref() {
            let slot = &slots[physical];
            if slot.value == POISON {
                faults |= Faults::POISON_VAL_FOUND;
            }
            if slot.prev != prev as isize {
                faults |= Faults::DAMAGED_PATH;
            }
            if self.is_linear && physical != logical + 1 {
                faults |= Faults::INVALID_IS_LINEAR;
            }
            prev = physical;
        }

        if !ring.is_closed() {
            faults |= Faults::DAMAGED_PATH;
        } else if slots[SENTINEL].prev != prev as isize {
            faults |= Faults::INVALID_TAIL;
        }

        faults
    }

    /// Walks the free chain, which must hold exactly the non-live slots.
    fn check_free_chain(&self, slots: &[Slot], size: usize) -> Faults {
        let mut faults = Faults::empty();
        let expected = slots.len().saturating_sub(size + 1);

        match link_index(self.free_head, slots.len()) {
            Some(head) if head != SENTINEL && slots[head].is_free() => {}
            _ => faults |= Faults::INVALID_FREE_HEAD,
        }

        let mut cursor = self.free_head;
        let mut taken = 0;
        while cursor > SENTINEL as isize && taken <= expected {
            let Some(i) = link_index(cursor, slots.len()) else {
                break;
            };
            if !slots[i].is_free() {
                faults |= Faults::DAMAGED_PATH;
            }
            taken += 1;
            cursor = slots[i].next;
        }

        if cursor != SENTINEL as isize || taken != expected {
            faults |= Faults::DAMAGED_PATH;
        }

        faults
    }
}

fn check_sentinel(slots: &[Slot], size: usize) -> Faults {
    let mut faults = Faults::empty();
    let sentinel = &slots[SENTINEL];

    if sentinel.value != POISON {
        faults |= Faults::NON_POISON_EMPTY;
    }

    match link_index(sentinel.next, slots.len()) {
        Some(head) if (head == SENTINEL) == (size == 0) => {}
        _ => faults |= Faults::INVALID_HEAD,
    }
    match link_index(sentinel.prev, slots.len()) {
        Some(tail) if (tail == SENTINEL) == (size == 0) => {}
        _ => faults |= Faults::INVALID_TAIL,
    }

    faults
}

/// Live slots carry a value, free slots carry poison.
fn check_payloads(slots: &[Slot]) -> Faults {
    let mut faults = Faults::empty();
    for slot in &slots[1..] {
        match (slot.is_free(), slot.value == POISON) {
            (false, true) => faults |= Faults::POISON_VAL_FOUND,
            (true, false) => faults |= Faults::NON_POISON_EMPTY,
            _ => {}
        }
    }
    faults
}
