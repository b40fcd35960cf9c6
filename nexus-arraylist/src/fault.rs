//! Fault kinds reported by list operations.
//!
//! Every fallible operation returns `Result<_, Faults>`. A fault set may hold
//! several kinds at once: verification keeps going after the first problem it
//! finds and reports everything together.

use core::fmt;

bitflags::bitflags! {
    /// Set of independent fault kinds.
    ///
    /// Bit values are stable; an empty set means "no error".
    ///
    /// # Example
    ///
    /// ```
    /// use nexus_arraylist::Faults;
    ///
    /// let faults = Faults::LOW_CAPACITY | Faults::DAMAGED_PATH;
    /// assert_eq!(faults.describe().count(), 2);
    /// assert_eq!(
    ///     Faults::DAMAGED_PATH.description(),
    ///     Some("list is damaged, invalid path"),
    /// );
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Faults: u32 {
        /// Memory for the slot array could not be allocated.
        const ALLOC_ERR           = 0x0000_0002;
        /// `construct` called on a list that is already initialised.
        const ALREADY_INITIALISED = 0x0000_0004;
        /// Operation on a list that was never constructed (or was destroyed).
        const UNINITIALISED       = 0x0000_0008;
        /// Scalar fields claim a live list but there is no slot storage.
        const DATA_INVALID_PTR    = 0x0000_0010;
        /// A poison value sits in a live slot, or was passed in as a value.
        const POISON_VAL_FOUND    = 0x0000_0020;
        /// A free slot (or the sentinel) holds a non-poison value.
        const NON_POISON_EMPTY    = 0x0000_0040;
        /// `capacity < size + 1`.
        const LOW_CAPACITY        = 0x0000_0200;
        /// Negative capacity.
        const NEGATIVE_CAPACITY   = 0x0000_0400;
        /// Requested capacity is unusable, or storage length disagrees with it.
        const INVALID_CAPACITY    = 0x0000_0800;
        /// Negative size.
        const NEGATIVE_SIZE       = 0x0000_1000;
        /// Physical or logical index does not name a usable slot.
        const INVALID_POSITION    = 0x0002_0000;
        /// Ring or free chain is broken, too short, or too long.
        const DAMAGED_PATH        = 0x0004_0000;
        /// `free_head` does not name a free slot.
        const INVALID_FREE_HEAD   = 0x0008_0000;
        /// Sentinel's tail link is invalid.
        const INVALID_TAIL        = 0x0010_0000;
        /// Sentinel's head link is invalid.
        const INVALID_HEAD        = 0x0020_0000;
        /// `is_linear` is set but physical order differs from logical order.
        const INVALID_IS_LINEAR   = 0x0040_0000;
    }
}

const DESCRIPTIONS: [(Faults, &str); 16] = [
    (Faults::ALLOC_ERR, "can't allocate memory"),
    (
        Faults::ALREADY_INITIALISED,
        "constructor called for already initialised or corrupted list",
    ),
    (Faults::UNINITIALISED, "list is not initialised"),
    (Faults::DATA_INVALID_PTR, "slot storage is missing"),
    (Faults::POISON_VAL_FOUND, "there is poison value in list"),
    (Faults::NON_POISON_EMPTY, "empty element is not poison"),
    (Faults::LOW_CAPACITY, "size > capacity - 1"),
    (Faults::NEGATIVE_CAPACITY, "negative capacity"),
    (Faults::INVALID_CAPACITY, "invalid capacity given"),
    (Faults::NEGATIVE_SIZE, "negative size"),
    (Faults::INVALID_POSITION, "invalid physical index given"),
    (Faults::DAMAGED_PATH, "list is damaged, invalid path"),
    (Faults::INVALID_FREE_HEAD, "invalid free_head field"),
    (Faults::INVALID_TAIL, "invalid tail field"),
    (Faults::INVALID_HEAD, "invalid head field"),
    (
        Faults::INVALID_IS_LINEAR,
        "is_linear flag is true, but list isn't linear",
    ),
];

impl Faults {
    /// Fixed description of a single fault kind.
    ///
    /// Returns `None` for the empty set and for sets with more than one kind.
    pub fn description(self) -> Option<&'static str> {
        DESCRIPTIONS
            .iter()
            .find(|(kind, _)| *kind == self)
            .map(|(_, text)| *text)
    }

    /// Yields `(name, description)` for every kind in the set, in bit order.
    pub fn describe(self) -> impl Iterator<Item = (&'static str, &'static str)> {
        self.iter_names()
            .filter_map(|(name, kind)| kind.description().map(|text| (name, text)))
    }
}

impl fmt::Display for Faults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("no error");
        }

        for (i, (name, text)) in self.describe().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{name}: {text}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Faults {}
