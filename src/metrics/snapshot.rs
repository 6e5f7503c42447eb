#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IndexListMetricsSnapshot {
    pub insert_calls: u64,
    pub insert_recycled: u64,
    pub insert_appended: u64,

    pub erase_calls: u64,
    pub erase_end_noops: u64,
    pub pop_empty_calls: u64,
    pub clear_calls: u64,

    pub reorder_calls: u64,
    pub shrink_calls: u64,
    pub compaction_moves: u64, // slot swaps performed by reorder/shrink_to_fit
    pub slots_released: u64,   // vacant slots dropped by shrink_to_fit

    // gauges captured at snapshot time
    pub len: usize,
    pub capacity: usize,
    pub pool_len: usize,
    pub free_len: usize,
}

impl IndexListMetricsSnapshot {
    /// Fraction of insertions served from the free chain.
    pub fn recycle_rate(&self) -> f64 {
        if self.insert_calls == 0 {
            0.0
        } else {
            self.insert_recycled as f64 / self.insert_calls as f64
        }
    }

    /// Fraction of materialized slots that are vacant.
    pub fn fragmentation(&self) -> f64 {
        if self.pool_len == 0 {
            0.0
        } else {
            self.free_len as f64 / self.pool_len as f64
        }
    }
}
