//! Doubly-linked list packed into a single slot array.
//!
//! Nodes live in one contiguous `Vec` of slots instead of separate heap
//! allocations. Links are physical indices into that array, and unused slots
//! are chained into an embedded free list, so inserts and deletes reuse
//! storage and never allocate per node.
//!
//! # Layout
//!
//! ```text
//! slot:   0 (sentinel)   1       2       3       4 (free)
//! next:   3              0       1       2       0
//! prev:   1              2       3       0       -1
//! value:  POISON         10      20      30      POISON
//!
//! logical order: 30, 20, 10   (head = sentinel.next, tail = sentinel.prev)
//! ```
//!
//! - **Sentinel**: slot 0 closes the ring, so head and tail need no special
//!   cases
//! - **Free chain**: free slots are linked through `next` from `free_head`
//!   and carry `prev == EMPTY`
//! - **Linearity**: while elements occupy slots `1..=len` in order, logical
//!   index lookups are O(1); [`ArrayList::linearize`] restores that layout
//!
//! # Quick Start
//!
//! ```
//! use nexus_arraylist::ArrayList;
//!
//! let mut list = ArrayList::with_capacity(16).unwrap();
//!
//! let a = list.push_back(1).unwrap();
//! let c = list.push_back(3).unwrap();
//! list.insert_after(a, 2).unwrap();
//!
//! assert_eq!(list.iter().collect::<Vec<_>>(), vec![1, 2, 3]);
//! assert_eq!(list.delete(c), Ok(3));
//! assert!(list.verify().is_empty());
//! ```
//!
//! # Faults
//!
//! Every fallible operation returns `Result<_, Faults>`. [`Faults`] is a
//! bit set: verification reports every problem it finds at once. Failures
//! are also logged through `tracing` at `error` level, with a full
//! [`Snapshot`] at `debug` level.
//!
//! # Verification
//!
//! By default a full structural check runs before and after every public
//! operation, turning them all into O(n). Use [`ArrayList::builder`] with
//! [`Verify::DebugOnly`] or [`Verify::Never`] to trade that for speed.
//!
//! # Performance
//!
//! With verification off:
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | insert_after / insert_before | O(1) amortized |
//! | delete | O(1) amortized |
//! | find_by_logical_index | O(1) linear, O(n) otherwise |
//! | find_by_value | O(n) |
//! | linearize / resize | O(capacity) |

#![warn(missing_docs)]

pub mod builder;
pub mod fault;
pub mod list;
mod lookup;
pub mod ring;
pub mod slot;
pub mod snapshot;
mod verify;

pub use builder::{ArrayListBuilder, Verify};
pub use fault::Faults;
pub use list::ArrayList;
pub use ring::{Iter, Positions};
pub use slot::{DEFAULT_CAPACITY, EMPTY, POISON, SENTINEL, Slot, Value};
pub use snapshot::{CallSite, SlotRecord, Snapshot};
