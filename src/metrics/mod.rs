//! Optional list metrics (feature `metrics`).
//!
//! Counters are plain fields updated by `&mut self` list operations, so
//! recording costs one add and needs no synchronization. With the feature
//! disabled none of this is compiled.

pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
