//! Construction-time configuration.

use crate::fault::Faults;
use crate::list::ArrayList;
use crate::slot::DEFAULT_CAPACITY;

/// When the full verification pass runs around public operations.
///
/// Verification walks the whole ring, so it makes every operation O(n).
/// The cheap "is this list initialised" guard runs in every mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verify {
    /// Before and after every operation.
    #[default]
    Always,
    /// Only when built with debug assertions.
    DebugOnly,
    /// Never. `verify` can still be called explicitly.
    Never,
}

impl Verify {
    #[inline]
    pub(crate) const fn enabled(self) -> bool {
        match self {
            Verify::Always => true,
            Verify::DebugOnly => cfg!(debug_assertions),
            Verify::Never => false,
        }
    }
}

/// Builder for [`ArrayList`].
///
/// # Example
///
/// ```
/// use nexus_arraylist::{ArrayList, Verify};
///
/// let list = ArrayList::builder()
///     .capacity(64)
///     .min_capacity(16)
///     .verify(Verify::DebugOnly)
///     .build()
///     .unwrap();
///
/// assert_eq!(list.capacity(), 65); // sentinel included
/// ```
#[derive(Clone, Debug)]
pub struct ArrayListBuilder {
    capacity: usize,
    min_capacity: usize,
    verify: Verify,
}

impl Default for ArrayListBuilder {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            min_capacity: DEFAULT_CAPACITY,
            verify: Verify::Always,
        }
    }
}

impl ArrayListBuilder {
    /// Initial number of payload slots. Default: [`DEFAULT_CAPACITY`].
    pub fn capacity(mut self, slots: usize) -> Self {
        self.capacity = slots;
        self
    }

    /// Payload slots below which shrinking stops. Default: [`DEFAULT_CAPACITY`].
    pub fn min_capacity(mut self, slots: usize) -> Self {
        self.min_capacity = slots;
        self
    }

    /// Verification mode. Default: [`Verify::Always`].
    pub fn verify(mut self, verify: Verify) -> Self {
        self.verify = verify;
        self
    }

    /// Allocates and constructs the list.
    #[track_caller]
    pub fn build(self) -> Result<ArrayList, Faults> {
        let mut list = ArrayList::new();
        list.configure(self.min_capacity, self.verify);
        list.construct(self.capacity)?;
        Ok(list)
    }
}
