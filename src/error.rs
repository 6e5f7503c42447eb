//! Error types for the slotlist library.
//!
//! ## Key Components
//!
//! - [`InvariantError`]: Returned when the structural invariants of an
//!   [`IndexList`](crate::ds::IndexList) are violated (see
//!   [`IndexList::check_invariants`](crate::ds::IndexList::check_invariants)).
//! - [`CapacityError`]: Returned when a capacity request cannot be honored
//!   (allocator refusal or arithmetic overflow of the requested size).
//!
//! Contract violations such as erasing a stale index are not errors: they
//! surface as `None` from the accessor involved.
//!
//! ## Example Usage
//!
//! ```
//! use slotlist::builder::IndexListBuilder;
//! use slotlist::error::CapacityError;
//! use slotlist::ds::IndexList;
//!
//! let list: Result<IndexList<u32>, CapacityError> =
//!     IndexListBuilder::new().capacity(64).try_build();
//! assert!(list.is_ok());
//!
//! let huge = IndexListBuilder::new().capacity(usize::MAX).try_build::<u64>();
//! assert!(huge.is_err());
//! ```

use std::collections::TryReserveError;
use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal list invariants are violated.
///
/// Carries a human-readable description of which invariant failed, e.g. a
/// broken back-link or a free-chain count mismatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// CapacityError
// ---------------------------------------------------------------------------

/// Error returned when a pool capacity request cannot be satisfied.
///
/// Produced by [`IndexList::try_reserve`](crate::ds::IndexList::try_reserve)
/// and [`IndexListBuilder::try_build`](crate::builder::IndexListBuilder::try_build).
///
/// # Example
///
/// ```
/// use slotlist::ds::IndexList;
///
/// let mut list: IndexList<u64> = IndexList::new();
/// let err = list.try_reserve(usize::MAX).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// assert_eq!(err.requested(), usize::MAX);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityError {
    requested: usize,
    msg: String,
}

impl CapacityError {
    /// Creates a new `CapacityError` for a request of `requested` additional slots.
    #[inline]
    pub fn new(requested: usize, msg: impl Into<String>) -> Self {
        Self {
            requested,
            msg: msg.into(),
        }
    }

    pub(crate) fn from_reserve(requested: usize, err: TryReserveError) -> Self {
        Self::new(
            requested,
            format!("cannot reserve capacity for {requested} slots: {err}"),
        )
    }

    /// Returns the number of additional slots that was requested.
    #[inline]
    pub fn requested(&self) -> usize {
        self.requested
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.msg
    }
}

impl fmt::Display for CapacityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.msg)
    }
}

impl std::error::Error for CapacityError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
