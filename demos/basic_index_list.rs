//! Example demonstrating handles, cursors and slot recycling.
//!
//! Run with: cargo run --example basic_index_list

use slotlist::builder::IndexListBuilder;
use slotlist::ds::SlotIndex;

fn main() {
    println!("=== IndexList Basics ===\n");

    // Example 1: stable handles
    println!("1. Stable handles");
    let mut list = IndexListBuilder::new().capacity(8).build::<&str>();
    let b = list.push_back("b");
    let d = list.push_back("d");
    let a = list.push_front("a");
    list.insert_after(b, "c");
    list.insert_before(SlotIndex::END, "e");

    println!("   list: {:?}", list);
    println!("   handle a = slot {}, still {:?}", a.index(), list.get(a));
    println!("   handle d = slot {}, still {:?}", d.index(), list.get(d));
    println!();

    // Example 2: recycling
    println!("2. Erased slots are reused, most recent first");
    list.erase(b);
    list.erase(d);
    println!("   free slots: {}", list.free_len());
    let x = list.push_back("x");
    let y = list.push_back("y");
    println!("   x reused slot {} (d's), y reused slot {} (b's)", x.index(), y.index());
    println!("   list: {:?}", list);
    println!();

    // Example 3: cursors
    println!("3. Cursors");
    let mut cursor = list.begin();
    print!("   forward:");
    while let Some(value) = cursor.get() {
        print!(" {}", value);
        cursor.move_next();
    }
    println!();

    let mut cursor = list.rbegin();
    print!("   reverse:");
    while let Some(value) = cursor.get() {
        print!(" {}", value);
        cursor.move_next();
    }
    println!();

    let mut editor = list.cursor_front_mut();
    editor.move_next();
    let removed = editor.remove_current();
    editor.insert_before("c2");
    println!("   replaced {:?} with c2: {:?}", removed, list);
    println!();

    // Example 4: emplace with the slot's own index
    println!("4. Emplace");
    let mut tagged = IndexListBuilder::new().build::<(usize, char)>();
    for ch in ['p', 'q', 'r'] {
        tagged.emplace_back(|index| (index.index(), ch));
    }
    println!("   {:?}", tagged);
}
