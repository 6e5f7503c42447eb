//! slotlist: a doubly linked list whose nodes live in a reusable slot pool.
//!
//! Elements are addressed by stable [`SlotIndex`](ds::SlotIndex) handles that
//! survive unrelated insertions and removals. Erased slots are recycled for
//! later insertions, and [`reorder`](ds::IndexList::reorder) /
//! [`shrink_to_fit`](ds::IndexList::shrink_to_fit) compact the pool so that
//! traversal order matches storage order.
//!
//! See `DESIGN.md` for internal architecture and invariants.

pub mod builder;
pub mod ds;
pub mod error;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
