//! Contiguous slot pool with an embedded free chain.
//!
//! Every element of an [`IndexList`](crate::ds::IndexList) lives in one slot
//! of a single `Vec`. Slots are addressed by 1-based indices; index 0 is the
//! sentinel, whose links are kept inline in the pool header instead of
//! occupying a payload slot.
//!
//! ## Architecture
//!
//! ```text
//!   sentinel (index 0): { prev: tail, next: head }
//!
//!   slots (Vec<Slot<T>>, index i lives at position i - 1)
//!   ┌───────┬──────────────────────────────────────┐
//!   │ index │ slot                                 │
//!   ├───────┼──────────────────────────────────────┤
//!   │ 1     │ Occupied { prev: 0, next: 3, A }     │
//!   │ 2     │ Vacant   { next_free: 0 }            │
//!   │ 3     │ Occupied { prev: 1, next: 0, B }     │
//!   └───────┴──────────────────────────────────────┘
//!
//!   live chain:  0 ─► 1 ─► 3 ─► 0        free chain: free_head = 2 ─► 0
//! ```
//!
//! A slot is erased iff it is `Vacant`. Vacant slots are chained through
//! `next_free`; 0 terminates the chain.
//!
//! Index arguments are trusted: callers only pass indices produced by the
//! pool itself. Link reads on a vacant or out-of-range slot trip a debug
//! assertion and resolve to the sentinel in release builds.

use std::collections::TryReserveError;

/// Index of the end sentinel.
pub(crate) const SENTINEL: usize = 0;

/// Stable handle to an element of an [`IndexList`](crate::ds::IndexList).
///
/// A `SlotIndex` keeps denoting the same element until that element is
/// erased, regardless of other insertions, erasures or pool growth.
/// [`reorder`](crate::ds::IndexList::reorder) and
/// [`shrink_to_fit`](crate::ds::IndexList::shrink_to_fit) renumber slots and
/// invalidate every outstanding handle.
///
/// [`SlotIndex::END`] denotes the sentinel: inserting before it appends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotIndex(pub(crate) usize);

impl SlotIndex {
    /// The end sentinel.
    pub const END: SlotIndex = SlotIndex(SENTINEL);

    /// Returns the raw pool index.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }

    /// Returns `true` if this is the end sentinel.
    #[inline]
    pub fn is_end(self) -> bool {
        self.0 == SENTINEL
    }
}

#[derive(Debug, Clone)]
pub(crate) enum Slot<T> {
    Occupied { prev: usize, next: usize, value: T },
    Vacant { next_free: usize },
}

/// Raw view of one pool slot, as returned by
/// [`IndexList::debug_pool`](crate::ds::IndexList::debug_pool).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolEntry {
    /// The sentinel at index 0.
    Sentinel { prev: usize, next: usize },
    /// A live element and its neighbours in list order.
    Occupied { prev: usize, next: usize },
    /// A recycled slot and the next slot on the free chain.
    Vacant { next_free: usize },
}

#[derive(Debug, Clone)]
pub(crate) struct SlotPool<T> {
    slots: Vec<Slot<T>>,
    head: usize,
    tail: usize,
    free_head: usize,
    free_len: usize,
}

impl<T> SlotPool<T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            head: SENTINEL,
            tail: SENTINEL,
            free_head: SENTINEL,
            free_len: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    /// Number of materialized slots (live + vacant), sentinel excluded.
    #[inline]
    pub(crate) fn pool_len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    #[inline]
    pub(crate) fn free_len(&self) -> usize {
        self.free_len
    }

    #[inline]
    pub(crate) fn free_head(&self) -> usize {
        self.free_head
    }

    #[inline]
    pub(crate) fn head(&self) -> usize {
        self.head
    }

    #[inline]
    pub(crate) fn tail(&self) -> usize {
        self.tail
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.slots.reserve(additional);
    }

    pub(crate) fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.slots.try_reserve(additional)
    }

    #[inline]
    pub(crate) fn slot(&self, index: usize) -> Option<&Slot<T>> {
        index.checked_sub(1).and_then(|pos| self.slots.get(pos))
    }

    #[inline]
    pub(crate) fn slot_mut(&mut self, index: usize) -> Option<&mut Slot<T>> {
        index.checked_sub(1).and_then(|pos| self.slots.get_mut(pos))
    }

    #[inline]
    pub(crate) fn is_occupied(&self, index: usize) -> bool {
        matches!(self.slot(index), Some(Slot::Occupied { .. }))
    }

    #[inline]
    pub(crate) fn is_vacant(&self, index: usize) -> bool {
        matches!(self.slot(index), Some(Slot::Vacant { .. }))
    }

    #[inline]
    pub(crate) fn value(&self, index: usize) -> Option<&T> {
        match self.slot(index)? {
            Slot::Occupied { value, .. } => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    #[inline]
    pub(crate) fn value_mut(&mut self, index: usize) -> Option<&mut T> {
        match self.slot_mut(index)? {
            Slot::Occupied { value, .. } => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    /// Returns `(prev, next)` for the sentinel or a live slot.
    #[inline]
    pub(crate) fn links(&self, index: usize) -> Option<(usize, usize)> {
        if index == SENTINEL {
            return Some((self.tail, self.head));
        }
        match self.slot(index)? {
            Slot::Occupied { prev, next, .. } => Some((*prev, *next)),
            Slot::Vacant { .. } => None,
        }
    }

    #[inline]
    pub(crate) fn next_of(&self, index: usize) -> usize {
        match self.links(index) {
            Some((_, next)) => next,
            None => {
                debug_assert!(false, "next_of on non-live slot {index}");
                SENTINEL
            },
        }
    }

    #[inline]
    pub(crate) fn prev_of(&self, index: usize) -> usize {
        match self.links(index) {
            Some((prev, _)) => prev,
            None => {
                debug_assert!(false, "prev_of on non-live slot {index}");
                SENTINEL
            },
        }
    }

    #[inline]
    fn set_next(&mut self, index: usize, to: usize) {
        if index == SENTINEL {
            self.head = to;
        } else if let Some(Slot::Occupied { next, .. }) = self.slot_mut(index) {
            *next = to;
        }
    }

    #[inline]
    fn set_prev(&mut self, index: usize, to: usize) {
        if index == SENTINEL {
            self.tail = to;
        } else if let Some(Slot::Occupied { prev, .. }) = self.slot_mut(index) {
            *prev = to;
        }
    }

    /// Index the next allocation will land on.
    #[inline]
    fn next_free_index(&self) -> usize {
        if self.free_head != SENTINEL {
            self.free_head
        } else {
            self.slots.len() + 1
        }
    }

    /// Allocates a slot between `prev` and `next` (which must be adjacent in
    /// the live chain) and fills it with `make(index)`.
    ///
    /// Returns the new index and whether it was recycled from the free chain.
    /// If `make` panics the pool is left untouched.
    pub(crate) fn link_with<F>(&mut self, prev: usize, next: usize, make: F) -> (usize, bool)
    where
        F: FnOnce(SlotIndex) -> T,
    {
        let index = self.next_free_index();
        let value = make(SlotIndex(index));
        let occupied = Slot::Occupied { prev, next, value };

        let recycled = if self.free_head != SENTINEL {
            let pos = index - 1;
            self.free_head = match self.slots[pos] {
                Slot::Vacant { next_free } => next_free,
                Slot::Occupied { .. } => unreachable!("free chain points at live slot {index}"),
            };
            self.free_len -= 1;
            self.slots[pos] = occupied;
            true
        } else {
            self.slots.push(occupied);
            false
        };

        self.set_next(prev, index);
        self.set_prev(next, index);
        (index, recycled)
    }

    /// Unlinks a live slot, pushes it onto the free chain and returns its
    /// payload. Returns `None` for the sentinel or a non-live index.
    pub(crate) fn unlink(&mut self, index: usize) -> Option<T> {
        let (prev, next) = match self.slot(index)? {
            Slot::Occupied { prev, next, .. } => (*prev, *next),
            Slot::Vacant { .. } => return None,
        };
        self.set_next(prev, next);
        self.set_prev(next, prev);

        let vacant = Slot::Vacant {
            next_free: self.free_head,
        };
        let old = std::mem::replace(&mut self.slots[index - 1], vacant);
        self.free_head = index;
        self.free_len += 1;

        match old {
            Slot::Occupied { value, .. } => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    /// Swaps the contents of two slots and repairs every live link that
    /// pointed at either of them. Free-chain links are not repaired.
    fn swap_slots(&mut self, a: usize, b: usize) {
        self.slots.swap(a - 1, b - 1);
        let remap = move |i: usize| {
            if i == a {
                b
            } else if i == b {
                a
            } else {
                i
            }
        };

        for index in [a, b] {
            if let Slot::Occupied { prev, next, .. } = &mut self.slots[index - 1] {
                *prev = remap(*prev);
                *next = remap(*next);
            }
        }
        for index in [a, b] {
            if let Some((prev, next)) = self.links(index) {
                self.set_next(prev, index);
                self.set_prev(next, index);
            }
        }
    }

    /// Moves the `len` live slots to indices `1..=len` in list order.
    ///
    /// Afterwards every slot past `len` is vacant but the free chain is
    /// stale; callers must follow up with [`Self::rebuild_free_chain`] or
    /// [`Self::release_vacant`]. Returns the number of slot swaps performed.
    pub(crate) fn compact(&mut self, len: usize) -> usize {
        let mut moves = 0;
        let mut current = self.head;
        for position in 1..=len {
            debug_assert!(current >= position, "live slot {current} already placed");
            if current != position {
                self.swap_slots(position, current);
                moves += 1;
            }
            current = self.next_of(position);
        }
        debug_assert_eq!(current, SENTINEL);
        moves
    }

    /// Chains slots `len + 1..=pool_len` into a fresh free chain, highest
    /// index first.
    pub(crate) fn rebuild_free_chain(&mut self, len: usize) {
        self.free_head = SENTINEL;
        self.free_len = 0;
        for index in (len + 1)..=self.slots.len() {
            let head = self.free_head;
            match &mut self.slots[index - 1] {
                Slot::Vacant { next_free } => *next_free = head,
                Slot::Occupied { .. } => {
                    debug_assert!(false, "live slot {index} beyond compacted prefix");
                    continue;
                },
            }
            self.free_head = index;
            self.free_len += 1;
        }
    }

    /// Drops every slot past `len` and returns excess capacity to the allocator.
    pub(crate) fn release_vacant(&mut self, len: usize) {
        debug_assert!(
            self.slots[len.min(self.slots.len())..]
                .iter()
                .all(|slot| matches!(slot, Slot::Vacant { .. }))
        );
        self.slots.truncate(len);
        self.slots.shrink_to_fit();
        self.free_head = SENTINEL;
        self.free_len = 0;
    }

    /// Drops every slot, live or vacant. Capacity is kept.
    pub(crate) fn reset(&mut self) {
        self.slots.clear();
        self.head = SENTINEL;
        self.tail = SENTINEL;
        self.free_head = SENTINEL;
        self.free_len = 0;
    }

    /// Returns mutable references to every live payload, keyed by slot position.
    pub(crate) fn values_by_position(&mut self) -> Vec<Option<&mut T>> {
        self.slots
            .iter_mut()
            .map(|slot| match slot {
                Slot::Occupied { value, .. } => Some(value),
                Slot::Vacant { .. } => None,
            })
            .collect()
    }

    pub(crate) fn entry(&self, index: usize) -> Option<PoolEntry> {
        if index == SENTINEL {
            return Some(PoolEntry::Sentinel {
                prev: self.tail,
                next: self.head,
            });
        }
        Some(match self.slot(index)? {
            Slot::Occupied { prev, next, .. } => PoolEntry::Occupied {
                prev: *prev,
                next: *next,
            },
            Slot::Vacant { next_free } => PoolEntry::Vacant {
                next_free: *next_free,
            },
        })
    }
}

impl<T> Default for SlotPool<T> {
    fn default() -> Self {
        Self::new()
    }
}
