//! Builder for [`IndexList`] with up-front pool sizing.
//!
//! ## Example
//!
//! ```rust
//! use slotlist::builder::IndexListBuilder;
//!
//! let mut list = IndexListBuilder::new().capacity(16).build::<&str>();
//! list.push_back("hello");
//! assert!(list.capacity() >= 16);
//! assert_eq!(list.pool_len(), 1);
//! ```

use crate::ds::IndexList;
use crate::error::CapacityError;

/// Configures and constructs an [`IndexList`].
///
/// The capacity is a hint for the number of pool slots to allocate before the
/// first insertion. No slots are materialized: `pool_len()` starts at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexListBuilder {
    capacity: usize,
}

impl IndexListBuilder {
    /// Creates a builder for an empty list with no pre-allocated storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of slots to reserve up front.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Builds the list.
    ///
    /// # Panics
    ///
    /// Panics if the allocator cannot provide the requested capacity. Use
    /// [`try_build`](Self::try_build) to handle that case.
    pub fn build<T>(self) -> IndexList<T> {
        IndexList::with_capacity(self.capacity)
    }

    /// Builds the list, reporting allocation failure instead of panicking.
    pub fn try_build<T>(self) -> Result<IndexList<T>, CapacityError> {
        let mut list = IndexList::new();
        list.try_reserve(self.capacity)?;
        Ok(list)
    }
}
