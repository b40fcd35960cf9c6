//! Read-only snapshot of a list for diagnostics.
//!
//! [`ArrayList::dump`](crate::ArrayList::dump) copies out everything a
//! renderer needs (scalars, the full slot table and the logical order) so
//! formatting and output live entirely outside this crate.

use std::panic::Location;

use crate::slot::{Slot, Value};

/// Source location attached to a dump or a construction.
///
/// Use [`call_site!`](crate::call_site) to capture the current location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    /// Source file.
    pub file: &'static str,
    /// Line in `file`.
    pub line: u32,
    /// Enclosing function or module path. Empty when unknown.
    pub function: &'static str,
}

impl From<&'static Location<'static>> for CallSite {
    fn from(location: &'static Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
            function: "",
        }
    }
}

/// Captures the current source location as a [`CallSite`].
///
/// ```
/// use nexus_arraylist::{ArrayList, call_site};
///
/// let list = ArrayList::with_capacity(4).unwrap();
/// let snapshot = list.dump(Some(call_site!()));
/// assert_eq!(snapshot.origin.unwrap().file, file!());
/// ```
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::CallSite {
            file: file!(),
            line: line!(),
            function: module_path!(),
        }
    };
}

/// One row of the slot table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRecord {
    /// Physical index.
    pub index: usize,
    /// Previous link, `EMPTY` for free slots.
    pub prev: isize,
    /// Next link.
    pub next: isize,
    /// Payload, `POISON` when unused.
    pub value: Value,
}

impl SlotRecord {
    pub(crate) fn new(index: usize, slot: &Slot) -> Self {
        Self {
            index,
            prev: slot.prev,
            next: slot.next,
            value: slot.value,
        }
    }
}

/// Point-in-time copy of a list's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Slot count, sentinel included.
    pub capacity: isize,
    /// Number of live elements.
    pub size: isize,
    /// Physical index of the first element (sentinel's `next`).
    pub head: isize,
    /// Physical index of the last element (sentinel's `prev`).
    pub tail: isize,
    /// First slot of the free chain.
    pub free_head: isize,
    /// Whether physical order is claimed to equal logical order.
    pub is_linear: bool,
    /// Every slot, in physical order.
    pub slots: Vec<SlotRecord>,
    /// Live values in logical order (walk bounded by `size`).
    pub values: Vec<Value>,
    /// Physical index of each value in `values`.
    pub positions: Vec<usize>,
    /// Where the dump was requested from, if the caller said.
    pub origin: Option<CallSite>,
    /// Where the list was constructed (debug builds only).
    pub constructed_at: Option<CallSite>,
}
