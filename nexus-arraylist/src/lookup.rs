//! Logical/physical index translation and value search.
//!
//! A linear list answers index queries with arithmetic. Otherwise every
//! lookup walks the ring from the sentinel, bounded by `size` steps.

use crate::fault::Faults;
use crate::list::ArrayList;
use crate::slot::{POISON, SENTINEL, Value};

impl ArrayList {
    /// Physical index of the element at logical index `index` (0-based).
    ///
    /// O(1) when the list is linear, O(index) otherwise.
    ///
    /// # Errors
    ///
    /// [`Faults::INVALID_POSITION`] if `index >= len()`.
    pub fn find_by_logical_index(&self, index: usize) -> Result<usize, Faults> {
        self.check()?;
        if index >= self.len() {
            return Err(self.report(Faults::INVALID_POSITION));
        }
        if self.is_linear {
            return Ok(index + 1);
        }

        match self.ring().nth(index) {
            Some((_, physical)) => Ok(physical),
            None => Err(self.report(Faults::DAMAGED_PATH)),
        }
    }

    /// Physical index of the first element equal to `value`, walking in
    /// logical order. `None` if no element matches.
    ///
    /// # Errors
    ///
    /// [`Faults::POISON_VAL_FOUND`] if `value` is [`POISON`], together with
    /// anything the guard found.
    ///
    /// ```
    /// use nexus_arraylist::{ArrayList, Faults, POISON};
    ///
    /// let mut list = ArrayList::with_capacity(4).unwrap();
    /// let at = list.push_back(7).unwrap();
    ///
    /// assert_eq!(list.find_by_value(7), Ok(Some(at)));
    /// assert_eq!(list.find_by_value(8), Ok(None));
    /// assert_eq!(list.find_by_value(POISON), Err(Faults::POISON_VAL_FOUND));
    /// ```
    pub fn find_by_value(&self, value: Value) -> Result<Option<usize>, Faults> {
        if value == POISON {
            return Err(self.report(self.guard() | Faults::POISON_VAL_FOUND));
        }
        self.check()?;

        let mut ring = self.ring();
        let found = ring.find(|&(_, physical)| self.slots[physical].value == value);
        match found {
            Some((_, physical)) => Ok(Some(physical)),
            None if ring.is_closed() => Ok(None),
            None => Err(self.report(Faults::DAMAGED_PATH)),
        }
    }

    /// Logical index of the element at physical `position`, or `None` if
    /// the slot is free.
    ///
    /// O(1) when the list is linear, O(len) otherwise.
    ///
    /// # Errors
    ///
    /// [`Faults::INVALID_POSITION`] for the sentinel or a position outside
    /// the array.
    pub fn logical_index_of(&self, position: usize) -> Result<Option<usize>, Faults> {
        self.check()?;
        if position == SENTINEL || position >= self.slots.len() {
            return Err(self.report(Faults::INVALID_POSITION));
        }
        if self.slots[position].is_free() {
            return Ok(None);
        }
        if self.is_linear {
            return Ok(Some(position - 1));
        }

        // A live slot the walk never reaches is off the ring.
        self.ring()
            .find(|&(_, physical)| physical == position)
            .map(|(logical, _)| Some(logical))
            .ok_or_else(|| self.report(Faults::DAMAGED_PATH))
    }
}
