#![no_main]

use libfuzzer_sys::fuzz_target;
use slotlist::ds::{IndexList, SlotIndex};

// Fuzz arbitrary operation sequences on IndexList
//
// Tests random sequences of push, insert_before/after, erase (live and stale
// handles), pop, cursor edits, reorder, shrink_to_fit and clear, validating
// the structural invariants after every step.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let mut list: IndexList<u32> = IndexList::new();
    let mut live: Vec<SlotIndex> = Vec::new();

    let mut idx = 0;
    while idx + 1 < data.len() {
        let op = data[idx] % 12;
        let value = u32::from(data[idx + 1]);
        let pick = value as usize;

        match op {
            0 => {
                // push_back
                let id = list.push_back(value);
                live.push(id);
                assert_eq!(list.back(), Some(&value));
                assert_eq!(list.back_index(), id);
            }
            1 => {
                // push_front
                let id = list.push_front(value);
                live.push(id);
                assert_eq!(list.front(), Some(&value));
                assert_eq!(list.begin_index(), id);
            }
            2 => {
                // insert_before a live element or END
                let anchor = if live.is_empty() {
                    SlotIndex::END
                } else {
                    live[pick % live.len()]
                };
                let id = list.insert_before(anchor, value);
                live.push(id);
                assert_eq!(list.cursor(id).next_index(), anchor);
            }
            3 => {
                // insert_after a live element
                if !live.is_empty() {
                    let anchor = live[pick % live.len()];
                    let id = list.insert_after(anchor, value);
                    live.push(id);
                    assert_eq!(list.cursor(id).prev_index(), anchor);
                }
            }
            4 => {
                // erase a live element
                if !live.is_empty() {
                    let id = live.swap_remove(pick % live.len());
                    let old_len = list.len();
                    assert!(list.erase(id).is_some());
                    assert_eq!(list.len(), old_len - 1);
                    assert!(list.is_vacant(id));
                }
            }
            5 => {
                // erase END is a no-op
                let old_len = list.len();
                assert_eq!(list.erase(SlotIndex::END), None);
                assert_eq!(list.len(), old_len);
            }
            6 => {
                // pop_front
                let front = list.begin_index();
                let popped = list.pop_front();
                if popped.is_some() {
                    live.retain(|id| *id != front);
                } else {
                    assert!(list.is_empty());
                }
            }
            7 => {
                // pop_back
                let back = list.back_index();
                let popped = list.pop_back();
                if popped.is_some() {
                    live.retain(|id| *id != back);
                } else {
                    assert!(list.is_empty());
                }
            }
            8 => {
                // cursor walk with removal
                let mut cursor = list.cursor_front_mut();
                for _ in 0..(pick % 4) {
                    cursor.move_next();
                }
                let current = cursor.index();
                if cursor.remove_current().is_some() {
                    live.retain(|id| *id != current);
                }
            }
            9 => {
                // reorder renumbers every handle
                let before: Vec<u32> = list.iter().copied().collect();
                list.reorder();
                assert_eq!(list.iter().copied().collect::<Vec<_>>(), before);
                live = list.indices().collect();
            }
            10 => {
                // shrink_to_fit renumbers and drops vacant slots
                list.shrink_to_fit();
                assert_eq!(list.pool_len(), list.len());
                assert_eq!(list.free_len(), 0);
                live = list.indices().collect();
            }
            11 => {
                // clear keeps the slots on the free chain
                let pool_len = list.pool_len();
                list.clear();
                live.clear();
                assert!(list.is_empty());
                assert_eq!(list.free_len(), pool_len);
            }
            _ => unreachable!(),
        }

        assert_eq!(list.len(), live.len());
        if let Err(err) = list.check_invariants() {
            panic!("invariant violated after op {}: {}", op, err);
        }

        idx += 2;
    }
});
