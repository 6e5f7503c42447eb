use crate::metrics::traits::IndexListMetricsRecorder;

#[derive(Debug, Default, Clone)]
pub struct IndexListMetrics {
    pub insert_calls: u64,
    pub insert_recycled: u64,
    pub insert_appended: u64,
    pub erase_calls: u64,
    pub erase_end_noops: u64,
    pub pop_empty_calls: u64,
    pub clear_calls: u64,
    pub reorder_calls: u64,
    pub shrink_calls: u64,
    pub compaction_moves: u64,
    pub slots_released: u64,
}

impl IndexListMetricsRecorder for IndexListMetrics {
    #[inline]
    fn record_insert(&mut self, recycled: bool) {
        self.insert_calls += 1;
        if recycled {
            self.insert_recycled += 1;
        } else {
            self.insert_appended += 1;
        }
    }

    #[inline]
    fn record_erase(&mut self) {
        self.erase_calls += 1;
    }

    #[inline]
    fn record_erase_end_noop(&mut self) {
        self.erase_end_noops += 1;
    }

    #[inline]
    fn record_pop_empty(&mut self) {
        self.pop_empty_calls += 1;
    }

    #[inline]
    fn record_clear(&mut self) {
        self.clear_calls += 1;
    }

    #[inline]
    fn record_reorder(&mut self, moves: usize) {
        self.reorder_calls += 1;
        self.compaction_moves += moves as u64;
    }

    #[inline]
    fn record_shrink(&mut self, moves: usize, released: usize) {
        self.shrink_calls += 1;
        self.compaction_moves += moves as u64;
        self.slots_released += released as u64;
    }
}
