//! DHAT heap profiler for slotlist.
//!
//! Run with: cargo run --bin dhat_profile --release --features dhat-heap
//! View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>

#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use slotlist::ds::{IndexList, SlotIndex};

/// Simple XorShift64 RNG for deterministic workloads.
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

/// Random erase/insert churn over a fixed population. Once warm, every
/// insertion should be served from the free chain with no new allocation.
fn churn_workload(list: &mut IndexList<u64>, handles: &mut [SlotIndex], operations: usize, seed: u64) {
    let mut rng = XorShift64::new(seed);
    for i in 0..operations {
        let slot = (rng.next_u64() as usize) % handles.len();
        list.erase(handles[slot]);
        handles[slot] = if i % 2 == 0 {
            list.push_back(i as u64)
        } else {
            list.push_front(i as u64)
        };
    }
}

fn profile_churn() {
    println!("=== Profiling erase/insert churn ===");
    let population = 4096;
    let operations = 100_000;

    let mut list = IndexList::with_capacity(population);
    let mut handles: Vec<SlotIndex> = (0..population as u64).map(|i| list.push_back(i)).collect();

    churn_workload(&mut list, &mut handles, operations, 42);

    println!("  Final len: {}, capacity: {}", list.len(), list.capacity());
}

fn profile_grow_and_shrink() {
    println!("=== Profiling growth then shrink_to_fit ===");
    let peak = 65_536;

    let mut list = IndexList::new();
    for i in 0..peak as u64 {
        list.push_back(i);
    }
    list.retain_every(4);
    println!("  Before shrink: len {}, capacity {}", list.len(), list.capacity());

    list.shrink_to_fit();
    println!("  After shrink:  len {}, capacity {}", list.len(), list.capacity());
}

fn profile_reorder_reuse() {
    println!("=== Profiling reorder then refill ===");
    let population = 16_384;

    let mut list: IndexList<String> = (0..population).map(|i| i.to_string()).collect();
    for _ in 0..population / 2 {
        list.pop_front();
    }
    list.reorder();
    // refill comes entirely from the rebuilt free chain
    for i in 0..population / 2 {
        list.push_back(i.to_string());
    }

    println!("  Final len: {}, pool_len: {}", list.len(), list.pool_len());
}

trait RetainEvery {
    fn retain_every(&mut self, step: usize);
}

impl<T> RetainEvery for IndexList<T> {
    fn retain_every(&mut self, step: usize) {
        let doomed: Vec<SlotIndex> = self
            .indices()
            .enumerate()
            .filter(|(position, _)| position % step != 0)
            .map(|(_, index)| index)
            .collect();
        for index in doomed {
            self.erase(index);
        }
    }
}

fn main() {
    let _profiler = dhat::Profiler::new_heap();

    println!("slotlist DHAT Heap Profiling");
    println!("============================\n");

    profile_churn();
    profile_grow_and_shrink();
    profile_reorder_reuse();

    println!("\n============================");
    println!("Profiling complete!");
    println!(
        "View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>"
    );
}
