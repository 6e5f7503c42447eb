//! Example demonstrating reorder and shrink_to_fit.
//!
//! Run with: cargo run --example compaction

use slotlist::ds::{IndexList, PoolEntry};

fn print_pool(list: &IndexList<u32>) {
    for (index, entry) in list.debug_pool().iter().enumerate() {
        match entry {
            PoolEntry::Sentinel { prev, next } => {
                println!("   [{index:>2}] sentinel  prev={prev:<2} next={next}")
            },
            PoolEntry::Occupied { prev, next } => println!(
                "   [{index:>2}] {:<8}  prev={prev:<2} next={next}",
                list.pool_slot(index).copied().unwrap_or_default()
            ),
            PoolEntry::Vacant { next_free } => {
                println!("   [{index:>2}] vacant    next_free={next_free}")
            },
        }
    }
}

fn main() {
    println!("=== Compaction ===\n");

    let mut list = IndexList::new();
    let handles: Vec<_> = (0..8u32).map(|i| list.push_front(i * 10)).collect();
    for handle in handles.iter().step_by(3) {
        list.erase(*handle);
    }

    println!("1. Fragmented pool (list order is the reverse of slot order)");
    print_pool(&list);
    println!();

    list.reorder();
    println!("2. After reorder: slot order matches list order, free chain from the top");
    print_pool(&list);
    println!("   capacity kept: {}", list.capacity());
    println!();

    list.shrink_to_fit();
    println!("3. After shrink_to_fit: vacant slots released");
    print_pool(&list);
    println!("   len {} pool_len {} capacity {}", list.len(), list.pool_len(), list.capacity());
}
