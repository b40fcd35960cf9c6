//! Slot layout and the sentinel values that describe it.
//!
//! Links are signed physical indices. `EMPTY` (-1) marks a link that points
//! nowhere, which is how a free slot is told apart from a live one. The
//! payload reserves one value, [`POISON`], to mean "no element here".

/// Payload stored in every slot.
pub type Value = i32;

/// Reserved payload meaning "slot holds no live element".
///
/// It can never be stored: inserting it or searching for it is rejected.
pub const POISON: Value = i32::MAX - 13;

/// Link value for "not linked". Every free slot has `prev == EMPTY`.
pub const EMPTY: isize = -1;

/// Physical index of the sentinel slot.
pub const SENTINEL: usize = 0;

/// Default number of payload slots (the sentinel is extra).
pub const DEFAULT_CAPACITY: usize = 8;

/// Scalar value of every field of an uninitialised list.
pub(crate) const UNINITIALISED: isize = -1;

/// One entry of the slot array.
///
/// Live slots are part of the ring anchored at the sentinel. Free slots are
/// chained through `next` and carry `prev == EMPTY` and `value == POISON`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub(crate) prev: isize,
    pub(crate) value: Value,
    pub(crate) next: isize,
}

impl Slot {
    /// Pattern written over every slot on destruction.
    pub(crate) const POISONED: Self = Self {
        prev: EMPTY,
        value: POISON,
        next: EMPTY,
    };

    /// Empty ring: the sentinel points at itself both ways.
    #[inline]
    pub(crate) const fn sentinel() -> Self {
        Self {
            prev: SENTINEL as isize,
            value: POISON,
            next: SENTINEL as isize,
        }
    }

    /// A free slot whose chain continues at `next` (0 ends the chain).
    #[inline]
    pub(crate) const fn free(next: isize) -> Self {
        Self {
            prev: EMPTY,
            value: POISON,
            next,
        }
    }

    /// Physical index of the previous slot in the ring, or `EMPTY`.
    #[inline]
    pub const fn prev(&self) -> isize {
        self.prev
    }

    /// Physical index of the next slot (ring or free chain).
    #[inline]
    pub const fn next(&self) -> isize {
        self.next
    }

    /// Stored payload, `POISON` for free slots and the sentinel.
    #[inline]
    pub const fn value(&self) -> Value {
        self.value
    }

    /// Returns `true` if this slot sits on the free chain.
    #[inline]
    pub const fn is_free(&self) -> bool {
        self.prev == EMPTY
    }
}

/// Converts a link into an index into `len` slots, if it is in range.
#[inline]
pub(crate) fn link_index(link: isize, len: usize) -> Option<usize> {
    usize::try_from(link).ok().filter(|&i| i < len)
}
