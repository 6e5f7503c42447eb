//! # Metrics Trait Hierarchy
//!
//! Recording, snapshotting and exporting are separate traits so the list
//! only ever writes counters, while benches, tests and monitoring read them
//! through their own seams.
//!
//! ```text
//!   ┌──────────────────────────────┐
//!   │  IndexListMetricsRecorder    │  written by IndexList operations
//!   └──────────────┬───────────────┘
//!                  │
//!   ┌──────────────┴───────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │───►│ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```

/// Counters for pool and free-chain activity.
pub trait IndexListMetricsRecorder {
    /// An element was linked in; `recycled` if its slot came off the free chain.
    fn record_insert(&mut self, recycled: bool);
    fn record_erase(&mut self);
    /// `erase` was called with the end sentinel.
    fn record_erase_end_noop(&mut self);
    /// `pop_front`/`pop_back` was called on an empty list.
    fn record_pop_empty(&mut self);
    fn record_clear(&mut self);
    /// A `reorder` pass completed after `moves` slot swaps.
    fn record_reorder(&mut self, moves: usize);
    /// A `shrink_to_fit` pass completed after `moves` slot swaps and dropped
    /// `released` vacant slots.
    fn record_shrink(&mut self, moves: usize, released: usize);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Export/publish metrics to production monitoring backends.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
