pub use crate::builder::IndexListBuilder;
pub use crate::ds::{
    Cursor, CursorMut, Direction, Forward, IndexList, PoolEntry, Reverse, ReverseCursor,
    SlotIndex,
};
pub use crate::error::{CapacityError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::IndexListMetricsSnapshot;
#[cfg(feature = "metrics")]
pub use crate::metrics::traits::{MetricsExporter, MetricsSnapshotProvider};
