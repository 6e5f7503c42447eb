//! Doubly linked list stored in a single contiguous slot pool.
//!
//! Elements are not individually heap-allocated: every node is a slot in one
//! `Vec`, and nodes link to each other by slot index. Erased slots are pushed
//! onto a free chain and handed out again before the pool grows, so insert
//! and erase are O(1) and never move any other element.
//!
//! ## Architecture
//!
//! ```text
//!   IndexList<T>
//!   ┌──────────────────────────────────────────────────────────────┐
//!   │ pool: SlotPool<T>                                            │
//!   │   sentinel 0 { prev: tail, next: head }                      │
//!   │   slots [1] [2] [3] [4] ...   Occupied{prev,next,T}|Vacant   │
//!   │   free_head ─► vacant ─► vacant ─► 0                         │
//!   │ len                                                          │
//!   └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Handles
//!
//! Insertion returns a [`SlotIndex`]. It keeps denoting its element until
//! that element is erased, no matter what happens to other elements or how
//! often the pool reallocates. After an erase the slot may be recycled by a
//! later insert, so a stale handle can alias a newer element: callers must
//! drop handles of erased elements.
//!
//! ## Compaction
//!
//! Erased slots leave gaps. Two operations close them:
//!
//! | Operation         | Live slots          | Vacant slots              | Capacity |
//! |-------------------|---------------------|---------------------------|----------|
//! | [`reorder`]       | `1..=len`, in order | re-chained as free list   | kept     |
//! | [`shrink_to_fit`] | `1..=len`, in order | dropped                   | released |
//!
//! Both renumber slots: every outstanding `SlotIndex` and cursor is
//! invalidated.
//!
//! ## Performance
//! - `push_*` / `insert_*` / `emplace_*`: O(1) amortized
//! - `erase` / `pop_*`: O(1)
//! - `resize`: O(|delta|), `clear`: O(len)
//! - `reorder` / `shrink_to_fit`: O(pool_len)
//! - cursor `advance_by(n)`: O(n)
//!
//! [`reorder`]: IndexList::reorder
//! [`shrink_to_fit`]: IndexList::shrink_to_fit
//!
//! ## Example
//!
//! ```
//! use slotlist::ds::IndexList;
//!
//! let mut list = IndexList::new();
//! list.push_back(5);
//! list.push_back(7);
//! list.push_back(1);
//!
//! list.erase(list.begin_index());
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![7, 1]);
//!
//! list.push_front(9);
//! let capacity = list.capacity();
//! list.reorder();
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![9, 7, 1]);
//! assert_eq!(list.capacity(), capacity);
//! ```

use std::fmt;
use std::iter::FusedIterator;
use std::ops::{Index, IndexMut};

use rustc_hash::FxHashSet;

use crate::ds::cursor::{Cursor, CursorMut, ReverseCursor};
use crate::ds::slot_pool::{PoolEntry, SENTINEL, SlotIndex, SlotPool};
use crate::error::{CapacityError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::IndexListMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::IndexListMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{IndexListMetricsRecorder, MetricsSnapshotProvider};

/// Doubly linked list whose nodes live in a contiguous, index-addressed pool.
///
/// See the [module documentation](self) for the layout and handle rules.
#[derive(Clone)]
pub struct IndexList<T> {
    pool: SlotPool<T>,
    len: usize,
    #[cfg(feature = "metrics")]
    metrics: IndexListMetrics,
}

impl<T> IndexList<T> {
    /// Creates an empty list. Does not allocate.
    pub fn new() -> Self {
        Self {
            pool: SlotPool::new(),
            len: 0,
            #[cfg(feature = "metrics")]
            metrics: IndexListMetrics::default(),
        }
    }

    /// Creates an empty list with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pool: SlotPool::with_capacity(capacity),
            len: 0,
            #[cfg(feature = "metrics")]
            metrics: IndexListMetrics::default(),
        }
    }

    #[inline]
    pub(crate) fn pool(&self) -> &SlotPool<T> {
        &self.pool
    }

    // -----------------------------------------------------------------------
    // Size and capacity
    // -----------------------------------------------------------------------

    /// Returns the number of elements in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns how many elements the pool can hold without reallocating.
    ///
    /// The sentinel does not count towards capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// Returns the number of materialized slots, live and recycled.
    #[inline]
    pub fn pool_len(&self) -> usize {
        self.pool.pool_len()
    }

    /// Returns the number of erased slots waiting on the free chain.
    #[inline]
    pub fn free_len(&self) -> usize {
        self.pool.free_len()
    }

    /// Reserves room for at least `additional` more slots beyond those
    /// already materialized.
    ///
    /// Growth never invalidates a [`SlotIndex`].
    ///
    /// # Panics
    ///
    /// Panics if the new capacity overflows `isize::MAX` bytes.
    pub fn reserve(&mut self, additional: usize) {
        self.pool.reserve(additional);
    }

    /// Fallible [`reserve`](Self::reserve).
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), CapacityError> {
        self.pool
            .try_reserve(additional)
            .map_err(|err| CapacityError::from_reserve(additional, err))
    }

    // -----------------------------------------------------------------------
    // Positions
    // -----------------------------------------------------------------------

    /// Index of the first element, or [`SlotIndex::END`] if empty.
    #[inline]
    pub fn begin_index(&self) -> SlotIndex {
        SlotIndex(self.pool.head())
    }

    /// The end sentinel. Inserting before it appends.
    #[inline]
    pub fn end_index(&self) -> SlotIndex {
        SlotIndex::END
    }

    /// Index of the last element, or [`SlotIndex::END`] if empty.
    #[inline]
    pub fn back_index(&self) -> SlotIndex {
        SlotIndex(self.pool.tail())
    }

    /// Cursor at the first element (the end sentinel if empty).
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.pool.head())
    }

    /// Cursor at the end sentinel.
    pub fn end(&self) -> Cursor<'_, T> {
        Cursor::new(self, SENTINEL)
    }

    /// Reverse cursor at the last element.
    pub fn rbegin(&self) -> ReverseCursor<'_, T> {
        Cursor::new(self, self.pool.tail())
    }

    /// Reverse cursor at the end sentinel.
    pub fn rend(&self) -> ReverseCursor<'_, T> {
        Cursor::new(self, SENTINEL)
    }

    /// Cursor positioned at `index`.
    ///
    /// `index` must be [`SlotIndex::END`] or a live handle of this list.
    pub fn cursor(&self, index: SlotIndex) -> Cursor<'_, T> {
        Cursor::new(self, index.0)
    }

    /// Mutable cursor positioned at `index`.
    pub fn cursor_mut(&mut self, index: SlotIndex) -> CursorMut<'_, T> {
        CursorMut::new(self, index.0)
    }

    /// Mutable cursor at the first element.
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T> {
        let head = self.pool.head();
        CursorMut::new(self, head)
    }

    /// Mutable cursor at the last element.
    pub fn cursor_back_mut(&mut self) -> CursorMut<'_, T> {
        let tail = self.pool.tail();
        CursorMut::new(self, tail)
    }

    // -----------------------------------------------------------------------
    // Element access
    // -----------------------------------------------------------------------

    pub fn front(&self) -> Option<&T> {
        self.pool.value(self.pool.head())
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        let head = self.pool.head();
        self.pool.value_mut(head)
    }

    pub fn back(&self) -> Option<&T> {
        self.pool.value(self.pool.tail())
    }

    pub fn back_mut(&mut self) -> Option<&mut T> {
        let tail = self.pool.tail();
        self.pool.value_mut(tail)
    }

    /// Returns the element behind `index`, or `None` for the sentinel or an
    /// erased slot.
    #[inline]
    pub fn get(&self, index: SlotIndex) -> Option<&T> {
        self.pool.value(index.0)
    }

    #[inline]
    pub fn get_mut(&mut self, index: SlotIndex) -> Option<&mut T> {
        self.pool.value_mut(index.0)
    }

    /// Returns `true` if `index` currently denotes a live element.
    #[inline]
    pub fn contains(&self, index: SlotIndex) -> bool {
        self.pool.is_occupied(index.0)
    }

    /// Returns `true` if `index` denotes an erased slot on the free chain.
    #[inline]
    pub fn is_vacant(&self, index: SlotIndex) -> bool {
        self.pool.is_vacant(index.0)
    }

    /// Raw pool access by slot number.
    ///
    /// This is **not** positional list access: `raw` addresses a pool slot,
    /// whatever its place in list order. Slot 0 is the sentinel and holds no
    /// element, so `raw == 0` is redirected to slot 1. Returns `None` for an
    /// out-of-range or erased slot.
    ///
    /// ```
    /// use slotlist::ds::IndexList;
    ///
    /// let mut list = IndexList::new();
    /// list.push_back('b');
    /// list.push_front('a');
    /// // 'b' was allocated first, so it owns slot 1
    /// assert_eq!(list.pool_slot(0), Some(&'b'));
    /// assert_eq!(list.pool_slot(1), Some(&'b'));
    /// assert_eq!(list.pool_slot(2), Some(&'a'));
    /// assert_eq!(list.front(), Some(&'a'));
    /// ```
    #[inline]
    pub fn pool_slot(&self, raw: usize) -> Option<&T> {
        self.pool.value(raw.max(1))
    }

    /// Mutable [`pool_slot`](Self::pool_slot).
    #[inline]
    pub fn pool_slot_mut(&mut self, raw: usize) -> Option<&mut T> {
        self.pool.value_mut(raw.max(1))
    }

    // -----------------------------------------------------------------------
    // Insertion
    // -----------------------------------------------------------------------

    /// Inserts `value` immediately before `position` and returns its handle.
    ///
    /// `position == SlotIndex::END` appends. The free chain is consumed
    /// before the pool grows.
    ///
    /// # Panics
    ///
    /// Panics if `position` is neither the sentinel nor a live element.
    pub fn insert_before(&mut self, position: SlotIndex, value: T) -> SlotIndex {
        self.emplace_before(position, move |_| value)
    }

    /// Inserts `value` immediately after `position` and returns its handle.
    ///
    /// `position == SlotIndex::END` prepends.
    ///
    /// # Panics
    ///
    /// Panics if `position` is neither the sentinel nor a live element.
    pub fn insert_after(&mut self, position: SlotIndex, value: T) -> SlotIndex {
        self.emplace_after(position, move |_| value)
    }

    /// Builds an element in the slot it will occupy, immediately before
    /// `position`.
    ///
    /// `make` receives the handle the element is about to get, which lets
    /// self-referential payloads record it. If `make` panics the list is
    /// unchanged.
    ///
    /// ```
    /// use slotlist::ds::IndexList;
    ///
    /// let mut list = IndexList::new();
    /// let id = list.emplace_before(list.end_index(), |id| (id, "node"));
    /// assert_eq!(list.get(id), Some(&(id, "node")));
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `position` is neither the sentinel nor a live element.
    pub fn emplace_before<F>(&mut self, position: SlotIndex, make: F) -> SlotIndex
    where
        F: FnOnce(SlotIndex) -> T,
    {
        let Some((prev, _)) = self.pool.links(position.0) else {
            panic!("insert position {} is not a live slot", position.0);
        };
        self.link_between(prev, position.0, make)
    }

    /// Builds an element in place immediately after `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is neither the sentinel nor a live element.
    pub fn emplace_after<F>(&mut self, position: SlotIndex, make: F) -> SlotIndex
    where
        F: FnOnce(SlotIndex) -> T,
    {
        let Some((_, next)) = self.pool.links(position.0) else {
            panic!("insert position {} is not a live slot", position.0);
        };
        self.link_between(position.0, next, make)
    }

    fn link_between<F>(&mut self, prev: usize, next: usize, make: F) -> SlotIndex
    where
        F: FnOnce(SlotIndex) -> T,
    {
        let (index, _recycled) = self.pool.link_with(prev, next, make);
        self.len += 1;
        #[cfg(feature = "metrics")]
        self.metrics.record_insert(_recycled);
        SlotIndex(index)
    }

    pub fn push_back(&mut self, value: T) -> SlotIndex {
        self.insert_before(SlotIndex::END, value)
    }

    pub fn push_front(&mut self, value: T) -> SlotIndex {
        self.insert_after(SlotIndex::END, value)
    }

    /// Builds an element in place at the back.
    pub fn emplace_back<F>(&mut self, make: F) -> SlotIndex
    where
        F: FnOnce(SlotIndex) -> T,
    {
        self.emplace_before(SlotIndex::END, make)
    }

    /// Builds an element in place at the front.
    pub fn emplace_front<F>(&mut self, make: F) -> SlotIndex
    where
        F: FnOnce(SlotIndex) -> T,
    {
        self.emplace_after(SlotIndex::END, make)
    }

    // -----------------------------------------------------------------------
    // Removal
    // -----------------------------------------------------------------------

    /// Erases the element at `index` and returns it.
    ///
    /// Erasing [`SlotIndex::END`] is a no-op. An erased or out-of-range
    /// index also yields `None`. The slot goes onto the free chain; its
    /// handle must not be used again.
    pub fn erase(&mut self, index: SlotIndex) -> Option<T> {
        if index.is_end() {
            #[cfg(feature = "metrics")]
            self.metrics.record_erase_end_noop();
            return None;
        }
        let value = self.pool.unlink(index.0)?;
        self.len -= 1;
        #[cfg(feature = "metrics")]
        self.metrics.record_erase();
        Some(value)
    }

    /// Removes and returns the first element. `None` on an empty list.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            #[cfg(feature = "metrics")]
            self.metrics.record_pop_empty();
            return None;
        }
        self.erase(self.begin_index())
    }

    /// Removes and returns the last element. `None` on an empty list.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            #[cfg(feature = "metrics")]
            self.metrics.record_pop_empty();
            return None;
        }
        self.erase(self.back_index())
    }

    /// Erases every element front to back.
    ///
    /// All slots end up on the free chain; capacity is retained.
    pub fn clear(&mut self) {
        while !self.is_empty() {
            self.erase(self.begin_index());
        }
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
    }

    /// Drops every element and slot and releases the pool's storage.
    pub fn clear_shrink(&mut self) {
        self.pool.reset();
        self.pool.release_vacant(0);
        self.len = 0;
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
    }

    /// Resizes the list to `new_len`, appending `T::default()` or popping
    /// from the back.
    pub fn resize(&mut self, new_len: usize)
    where
        T: Default,
    {
        self.resize_with(new_len, T::default);
    }

    /// Resizes the list to `new_len`, appending values produced by `fill`
    /// or popping from the back. O(|new_len - len|).
    pub fn resize_with<F>(&mut self, new_len: usize, mut fill: F)
    where
        F: FnMut() -> T,
    {
        if self.len < new_len {
            self.reserve_slots(new_len - self.len);
            for _ in self.len..new_len {
                self.emplace_back(|_| fill());
            }
        } else {
            while self.len > new_len {
                self.pop_back();
            }
        }
    }

    /// Reserves only the slots the free chain cannot supply.
    fn reserve_slots(&mut self, needed: usize) {
        let fresh = needed.saturating_sub(self.pool.free_len());
        if fresh > 0 {
            self.pool.reserve(fresh);
        }
    }

    // -----------------------------------------------------------------------
    // Compaction
    // -----------------------------------------------------------------------

    /// Moves the live elements to slots `1..=len` in list order and threads
    /// the remaining slots into a fresh free chain (highest slot first).
    ///
    /// Capacity is unchanged, so the next `free_len()` insertions reuse
    /// slots without growing the pool. Traversal afterwards walks memory
    /// sequentially.
    ///
    /// **Every [`SlotIndex`] obtained before the call is invalidated.**
    pub fn reorder(&mut self) {
        let _moves = self.pool.compact(self.len);
        self.pool.rebuild_free_chain(self.len);
        #[cfg(feature = "metrics")]
        self.metrics.record_reorder(_moves);
        debug_assert!(self.check_invariants().is_ok());
    }

    /// Compacts like [`reorder`](Self::reorder), then drops every vacant
    /// slot and releases the excess storage, leaving `pool_len() == len()`.
    ///
    /// **Every [`SlotIndex`] obtained before the call is invalidated.**
    pub fn shrink_to_fit(&mut self) {
        let _moves = self.pool.compact(self.len);
        let _released = self.pool.pool_len() - self.len;
        self.pool.release_vacant(self.len);
        #[cfg(feature = "metrics")]
        self.metrics.record_shrink(_moves, _released);
        debug_assert!(self.check_invariants().is_ok());
    }

    // -----------------------------------------------------------------------
    // Iteration
    // -----------------------------------------------------------------------

    /// Iterates elements front to back. Double-ended.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            walk: Walk::new(&self.pool, self.len),
        }
    }

    /// Iterates mutable references front to back.
    ///
    /// Collects the references up front, so creating the iterator is O(len).
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let order: Vec<usize> = Walk::new(&self.pool, self.len).collect();
        let mut by_position = self.pool.values_by_position();
        let items: Vec<&mut T> = order
            .into_iter()
            .filter_map(|index| by_position[index - 1].take())
            .collect();
        IterMut {
            inner: items.into_iter(),
        }
    }

    /// Iterates element handles front to back.
    pub fn indices(&self) -> Indices<'_, T> {
        Indices {
            walk: Walk::new(&self.pool, self.len),
        }
    }

    /// Iterates `(handle, &element)` pairs front to back.
    pub fn entries(&self) -> Entries<'_, T> {
        Entries {
            walk: Walk::new(&self.pool, self.len),
        }
    }

    // -----------------------------------------------------------------------
    // Diagnostics
    // -----------------------------------------------------------------------

    /// Returns the raw state of every pool slot, sentinel first.
    pub fn debug_pool(&self) -> Vec<PoolEntry> {
        (0..=self.pool.pool_len())
            .filter_map(|index| self.pool.entry(index))
            .collect()
    }

    /// Validates the structural invariants of the list.
    ///
    /// Checks that the live chain is circular through the sentinel in both
    /// directions with symmetric links, that it holds exactly `len`
    /// elements, and that live slots, free-chain slots and the sentinel
    /// partition the pool.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let pool_len = self.pool.pool_len();
        let mut live = FxHashSet::default();

        let mut current = self.pool.head();
        while current != SENTINEL {
            let (_, next) = self.pool.links(current).ok_or_else(|| {
                InvariantError::new(format!("live chain reaches non-live slot {}", current))
            })?;
            if !live.insert(current) {
                return Err(InvariantError::new(format!(
                    "live chain revisits slot {}",
                    current
                )));
            }
            if live.len() > self.len {
                return Err(InvariantError::new(format!(
                    "live chain longer than len {}",
                    self.len
                )));
            }
            let back = self.pool.links(next).map(|(prev, _)| prev);
            if back != Some(current) {
                return Err(InvariantError::new(format!(
                    "slot {} -> {} has back-link {:?}",
                    current, next, back
                )));
            }
            current = next;
        }
        if live.len() != self.len {
            return Err(InvariantError::new(format!(
                "live chain has {} slots but len = {}",
                live.len(),
                self.len
            )));
        }
        if self.pool.links(self.pool.head()).map(|(prev, _)| prev) != Some(SENTINEL) {
            return Err(InvariantError::new("head does not link back to sentinel"));
        }

        let mut backward = 0usize;
        let mut current = self.pool.tail();
        while current != SENTINEL {
            backward += 1;
            if backward > self.len {
                return Err(InvariantError::new("backward chain longer than len"));
            }
            current = self
                .pool
                .links(current)
                .map(|(prev, _)| prev)
                .ok_or_else(|| {
                    InvariantError::new(format!("backward chain reaches non-live slot {}", current))
                })?;
        }
        if backward != self.len {
            return Err(InvariantError::new(format!(
                "backward chain has {} slots but len = {}",
                backward, self.len
            )));
        }

        let mut free = FxHashSet::default();
        let mut current = self.pool.free_head();
        while current != SENTINEL {
            let next_free = match self.pool.entry(current) {
                Some(PoolEntry::Vacant { next_free }) => next_free,
                other => {
                    return Err(InvariantError::new(format!(
                        "free chain reaches slot {} in state {:?}",
                        current, other
                    )));
                },
            };
            if !free.insert(current) {
                return Err(InvariantError::new(format!(
                    "free chain revisits slot {}",
                    current
                )));
            }
            current = next_free;
        }
        if free.len() != self.pool.free_len() {
            return Err(InvariantError::new(format!(
                "free chain has {} slots but free_len = {}",
                free.len(),
                self.pool.free_len()
            )));
        }

        if live.len() + free.len() != pool_len {
            return Err(InvariantError::new(format!(
                "live {} + free {} != pool_len {}",
                live.len(),
                free.len(),
                pool_len
            )));
        }

        Ok(())
    }
}

#[cfg(feature = "metrics")]
impl<T> IndexList<T> {
    /// Returns a snapshot of list metrics.
    pub fn metrics_snapshot(&self) -> IndexListMetricsSnapshot {
        IndexListMetricsSnapshot {
            insert_calls: self.metrics.insert_calls,
            insert_recycled: self.metrics.insert_recycled,
            insert_appended: self.metrics.insert_appended,
            erase_calls: self.metrics.erase_calls,
            erase_end_noops: self.metrics.erase_end_noops,
            pop_empty_calls: self.metrics.pop_empty_calls,
            clear_calls: self.metrics.clear_calls,
            reorder_calls: self.metrics.reorder_calls,
            shrink_calls: self.metrics.shrink_calls,
            compaction_moves: self.metrics.compaction_moves,
            slots_released: self.metrics.slots_released,
            len: self.len,
            capacity: self.capacity(),
            pool_len: self.pool_len(),
            free_len: self.free_len(),
        }
    }

    /// Zeroes every counter.
    pub fn reset_metrics(&mut self) {
        self.metrics = IndexListMetrics::default();
    }
}

#[cfg(feature = "metrics")]
impl<T> MetricsSnapshotProvider<IndexListMetricsSnapshot> for IndexList<T> {
    fn snapshot(&self) -> IndexListMetricsSnapshot {
        self.metrics_snapshot()
    }
}

// ---------------------------------------------------------------------------
// Std trait implementations
// ---------------------------------------------------------------------------

impl<T> Default for IndexList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for IndexList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for IndexList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for IndexList<T> {}

impl<T> FromIterator<T> for IndexList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for IndexList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.reserve_slots(lower);
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for IndexList<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T> Index<SlotIndex> for IndexList<T> {
    type Output = T;

    fn index(&self, index: SlotIndex) -> &T {
        match self.get(index) {
            Some(value) => value,
            None => panic!("slot {} is not a live element", index.0),
        }
    }
}

impl<T> IndexMut<SlotIndex> for IndexList<T> {
    fn index_mut(&mut self, index: SlotIndex) -> &mut T {
        match self.pool.value_mut(index.0) {
            Some(value) => value,
            None => panic!("slot {} is not a live element", index.0),
        }
    }
}

/// Raw pool access; see [`IndexList::pool_slot`]. Panics on an erased or
/// out-of-range slot.
impl<T> Index<usize> for IndexList<T> {
    type Output = T;

    fn index(&self, raw: usize) -> &T {
        match self.pool_slot(raw) {
            Some(value) => value,
            None => panic!("pool slot {} is not a live element", raw.max(1)),
        }
    }
}

impl<T> IndexMut<usize> for IndexList<T> {
    fn index_mut(&mut self, raw: usize) -> &mut T {
        match self.pool.value_mut(raw.max(1)) {
            Some(value) => value,
            None => panic!("pool slot {} is not a live element", raw.max(1)),
        }
    }
}

impl<T> IntoIterator for IndexList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a IndexList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut IndexList<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

// ---------------------------------------------------------------------------
// Iterators
// ---------------------------------------------------------------------------

/// Slot-index walk shared by the borrowing iterators.
struct Walk<'a, T> {
    pool: &'a SlotPool<T>,
    front: usize,
    back: usize,
    remaining: usize,
}

impl<'a, T> Walk<'a, T> {
    fn new(pool: &'a SlotPool<T>, len: usize) -> Self {
        Self {
            pool,
            front: pool.head(),
            back: pool.tail(),
            remaining: len,
        }
    }
}

impl<T> Clone for Walk<'_, T> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<T> Iterator for Walk<'_, T> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.front;
        self.front = self.pool.next_of(index);
        self.remaining -= 1;
        Some(index)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Walk<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.back;
        self.back = self.pool.prev_of(index);
        self.remaining -= 1;
        Some(index)
    }
}

/// Iterator over `&T` from front to back.
pub struct Iter<'a, T> {
    walk: Walk<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        let pool = self.walk.pool;
        self.walk.next().and_then(|index| pool.value(index))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.walk.size_hint()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        let pool = self.walk.pool;
        self.walk.next_back().and_then(|index| pool.value(index))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            walk: self.walk.clone(),
        }
    }
}

/// Iterator over `&mut T` from front to back.
pub struct IterMut<'a, T> {
    inner: std::vec::IntoIter<&'a mut T>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a mut T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

/// Iterator over element handles from front to back.
pub struct Indices<'a, T> {
    walk: Walk<'a, T>,
}

impl<T> Iterator for Indices<'_, T> {
    type Item = SlotIndex;

    #[inline]
    fn next(&mut self) -> Option<SlotIndex> {
        self.walk.next().map(SlotIndex)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.walk.size_hint()
    }
}

impl<T> DoubleEndedIterator for Indices<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<SlotIndex> {
        self.walk.next_back().map(SlotIndex)
    }
}

impl<T> ExactSizeIterator for Indices<'_, T> {}

/// Iterator over `(SlotIndex, &T)` pairs from front to back.
pub struct Entries<'a, T> {
    walk: Walk<'a, T>,
}

impl<'a, T> Iterator for Entries<'a, T> {
    type Item = (SlotIndex, &'a T);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let pool = self.walk.pool;
        let index = self.walk.next()?;
        pool.value(index).map(|value| (SlotIndex(index), value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.walk.size_hint()
    }
}

impl<'a, T> DoubleEndedIterator for Entries<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let pool = self.walk.pool;
        let index = self.walk.next_back()?;
        pool.value(index).map(|value| (SlotIndex(index), value))
    }
}

impl<T> ExactSizeIterator for Entries<'_, T> {}

/// Owning iterator, front to back.
pub struct IntoIter<T> {
    list: IndexList<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn values<T: Copy>(list: &IndexList<T>) -> Vec<T> {
        list.iter().copied().collect()
    }

    #[test]
    fn index_list_basic_ops() {
        let mut list = IndexList::new();
        let a = list.push_front("a");
        let b = list.push_back("b");
        let c = list.push_back("c");

        assert_eq!(list.front(), Some(&"a"));
        assert_eq!(list.back(), Some(&"c"));
        assert_eq!(list.len(), 3);

        assert_eq!(list.erase(b), Some("b"));
        assert_eq!(list.len(), 2);
        assert!(list.is_vacant(b));

        assert_eq!(list.pop_front(), Some("a"));
        assert_eq!(list.pop_back(), Some("c"));
        assert!(list.is_empty());

        assert!(!list.contains(a));
        assert!(!list.contains(c));
        list.check_invariants().unwrap();
    }

    #[test]
    fn index_list_end_to_end_scenario() {
        let mut list = IndexList::new();
        list.push_back(5);
        list.push_back(7);
        list.push_back(1);

        list.erase(list.begin_index());
        assert_eq!(values(&list), vec![7, 1]);
        assert_eq!(list.len(), 2);

        list.push_front(9);
        assert_eq!(values(&list), vec![9, 7, 1]);

        let capacity = list.capacity();
        list.reorder();
        assert_eq!(values(&list), vec![9, 7, 1]);
        assert_eq!(list.capacity(), capacity);
        list.check_invariants().unwrap();
    }

    #[test]
    fn index_list_reorder_leaves_spare_slots_on_free_chain() {
        let mut list = IndexList::new();
        list.push_back(5);
        list.push_back(7);
        list.push_back(1);
        list.erase(list.begin_index());
        list.reorder();

        assert_eq!(values(&list), vec![7, 1]);
        assert_eq!(list.free_len(), 1);
        assert_eq!(list.pool_len(), 3);
        assert_eq!(
            list.debug_pool(),
            vec![
                PoolEntry::Sentinel { prev: 2, next: 1 },
                PoolEntry::Occupied { prev: 0, next: 2 },
                PoolEntry::Occupied { prev: 1, next: 0 },
                PoolEntry::Vacant { next_free: 0 },
            ]
        );
    }

    #[test]
    fn index_list_handles_survive_unrelated_edits() {
        let mut list = IndexList::new();
        let ids: Vec<_> = (0..8).map(|v| list.push_back(v)).collect();
        list.erase(ids[1]);
        list.erase(ids[5]);
        let x = list.push_front(100);
        list.insert_before(ids[3], 200);
        list.reserve(1024);

        for (value, id) in ids.iter().enumerate() {
            if value == 1 || value == 5 {
                continue;
            }
            assert_eq!(list.get(*id), Some(&(value as i32)));
        }
        assert_eq!(list[x], 100);
        list.check_invariants().unwrap();
    }

    #[test]
    fn index_list_erase_recycles_before_growing() {
        let mut list = IndexList::with_capacity(4);
        let ids: Vec<_> = (0..4).map(|v| list.push_back(v)).collect();
        let pool_len = list.pool_len();
        let capacity = list.capacity();

        for id in &ids[..3] {
            list.erase(*id);
        }
        assert_eq!(list.free_len(), 3);
        for v in 10..13 {
            list.push_back(v);
        }

        assert_eq!(list.pool_len(), pool_len);
        assert_eq!(list.capacity(), capacity);
        assert_eq!(list.free_len(), 0);
        assert_eq!(values(&list), vec![3, 10, 11, 12]);
    }

    #[test]
    fn index_list_recycles_most_recently_erased_first() {
        let mut list = IndexList::new();
        let a = list.push_back(1);
        let b = list.push_back(2);
        list.erase(a);
        list.erase(b);
        assert_eq!(list.push_back(3), b);
        assert_eq!(list.push_back(4), a);
    }

    #[test]
    fn index_list_erase_end_and_stale_are_noops() {
        let mut list = IndexList::new();
        let a = list.push_back(1);
        assert_eq!(list.erase(SlotIndex::END), None);
        assert_eq!(list.erase(a), Some(1));
        assert_eq!(list.erase(a), None);
        assert_eq!(list.erase(SlotIndex(42)), None);
        assert_eq!(list.len(), 0);
        list.check_invariants().unwrap();
    }

    #[test]
    fn index_list_pop_on_empty_returns_none() {
        let mut list: IndexList<u8> = IndexList::new();
        assert_eq!(list.pop_front(), None);
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
    }

    #[test]
    fn index_list_insert_before_and_after() {
        let mut list = IndexList::new();
        let b = list.push_back('b');
        list.insert_before(b, 'a');
        let d = list.insert_after(b, 'd');
        list.insert_before(d, 'c');
        list.insert_before(SlotIndex::END, 'e');
        list.insert_after(SlotIndex::END, '_');
        assert_eq!(values(&list), vec!['_', 'a', 'b', 'c', 'd', 'e']);
    }

    #[test]
    #[should_panic(expected = "not a live slot")]
    fn index_list_insert_before_erased_panics() {
        let mut list = IndexList::new();
        let a = list.push_back(1);
        list.erase(a);
        list.insert_before(a, 2);
    }

    #[test]
    fn index_list_emplace_sees_handle() {
        let mut list = IndexList::new();
        let back = list.emplace_back(|id| id.index());
        let front = list.emplace_front(|id| id.index());
        assert_eq!(list.get(back), Some(&back.index()));
        assert_eq!(list.get(front), Some(&front.index()));
        assert_eq!(list.begin_index(), front);
    }

    #[test]
    fn index_list_emplace_panic_leaves_list_unchanged() {
        let mut list = IndexList::new();
        list.push_back(1);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            list.emplace_back(|_| -> i32 { panic!("boom") });
        }));
        assert!(result.is_err());
        assert_eq!(values(&list), vec![1]);
        list.check_invariants().unwrap();
    }

    #[test]
    fn index_list_resize_grows_and_shrinks() {
        let mut list: IndexList<u32> = (1..=3).collect();
        list.resize(6);
        assert_eq!(values(&list), vec![1, 2, 3, 0, 0, 0]);
        list.resize(2);
        assert_eq!(values(&list), vec![1, 2]);
        assert_eq!(list.free_len(), 4);
        list.resize(2);
        assert_eq!(list.len(), 2);

        let mut n = 10;
        list.resize_with(4, || {
            n += 1;
            n
        });
        assert_eq!(values(&list), vec![1, 2, 11, 12]);
        list.check_invariants().unwrap();
    }

    #[test]
    fn index_list_clear_keeps_capacity() {
        let mut list: IndexList<u32> = (0..10).collect();
        let capacity = list.capacity();
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.capacity(), capacity);
        assert_eq!(list.free_len(), 10);
        assert_eq!(list.begin(), list.end());
        list.check_invariants().unwrap();

        list.clear_shrink();
        assert_eq!(list.pool_len(), 0);
        assert_eq!(list.capacity(), 0);
        list.check_invariants().unwrap();
    }

    #[test]
    fn index_list_shrink_to_fit_releases_capacity() {
        let mut list: IndexList<u32> = IndexList::with_capacity(64);
        for v in 0..20 {
            list.push_back(v);
        }
        let evens: Vec<_> = list.indices().step_by(2).collect();
        for id in evens {
            list.erase(id);
        }
        list.push_front(100);
        let before = values(&list);

        list.shrink_to_fit();
        assert_eq!(values(&list), before);
        assert_eq!(list.capacity(), list.len());
        assert_eq!(list.free_len(), 0);
        assert_eq!(list.pool_len(), list.len());
        let ids: Vec<_> = list.indices().map(SlotIndex::index).collect();
        assert_eq!(ids, (1..=list.len()).collect::<Vec<_>>());
        list.check_invariants().unwrap();
    }

    #[test]
    fn index_list_compaction_on_empty_list() {
        let mut list: IndexList<u32> = (0..5).collect();
        list.clear();
        list.reorder();
        assert_eq!(list.free_len(), 5);
        assert_eq!(list.begin(), list.end());
        list.check_invariants().unwrap();

        list.shrink_to_fit();
        assert_eq!(list.pool_len(), 0);
        assert_eq!(list.capacity(), 0);
        list.push_back(1);
        assert_eq!(values(&list), vec![1]);
    }

    #[test]
    fn index_list_reorder_makes_order_positional() {
        let mut list = IndexList::new();
        for v in 0..6 {
            list.push_front(v);
        }
        list.erase(list.begin_index());
        list.reorder();
        assert_eq!(values(&list), vec![4, 3, 2, 1, 0]);
        let ids: Vec<_> = list.indices().map(SlotIndex::index).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(list.free_len(), 1);

        // recycled slot is reused before the pool grows
        let pool_len = list.pool_len();
        let id = list.push_back(9);
        assert_eq!(id.index(), 6);
        assert_eq!(list.pool_len(), pool_len);
    }

    #[test]
    fn index_list_iterators_agree() {
        let mut list: IndexList<i32> = [3, 1, 4, 1, 5].into_iter().collect();
        assert_eq!(list.iter().len(), 5);
        assert_eq!(
            list.iter().rev().copied().collect::<Vec<_>>(),
            vec![5, 1, 4, 1, 3]
        );

        for value in list.iter_mut() {
            *value *= 10;
        }
        assert_eq!(values(&list), vec![30, 10, 40, 10, 50]);

        let entries: Vec<_> = list.entries().map(|(id, v)| (id, *v)).collect();
        let indices: Vec<_> = list.indices().collect();
        assert_eq!(entries.iter().map(|(id, _)| *id).collect::<Vec<_>>(), indices);

        let mut iter = list.iter();
        assert_eq!(iter.next(), Some(&30));
        assert_eq!(iter.next_back(), Some(&50));
        assert_eq!(iter.len(), 3);

        let owned: Vec<_> = list.into_iter().rev().collect();
        assert_eq!(owned, vec![50, 10, 40, 10, 30]);
    }

    #[test]
    fn index_list_pool_slot_is_raw_access() {
        let mut list = IndexList::new();
        let a = list.push_back(1);
        list.push_front(2);
        assert_eq!(list.pool_slot(0), Some(&1));
        assert_eq!(list[0usize], 1);
        assert_eq!(list[2usize], 2);
        list.erase(a);
        assert_eq!(list.pool_slot(1), None);
        assert_eq!(list.pool_slot(7), None);
        list[2usize] = 3;
        assert_eq!(list.front(), Some(&3));
    }

    #[test]
    #[should_panic(expected = "not a live element")]
    fn index_list_index_erased_panics() {
        let mut list = IndexList::new();
        let a = list.push_back(1);
        list.erase(a);
        let _value = list[a];
    }

    #[test]
    fn index_list_front_back_mut() {
        let mut list: IndexList<i32> = (1..=3).collect();
        *list.front_mut().unwrap() = 10;
        *list.back_mut().unwrap() = 30;
        assert_eq!(values(&list), vec![10, 2, 30]);
    }

    #[test]
    fn index_list_eq_ignores_layout() {
        let a: IndexList<i32> = (1..=3).collect();
        let mut b = IndexList::new();
        b.push_back(3);
        b.push_front(2);
        b.push_front(1);
        b.push_back(99);
        b.pop_back();
        assert_eq!(a, b);
        assert_eq!(format!("{:?}", b), "[1, 2, 3]");

        let c = b.clone();
        assert_eq!(b, c);
        c.check_invariants().unwrap();
    }

    #[test]
    fn index_list_try_reserve_reports_overflow() {
        let mut list: IndexList<u64> = IndexList::new();
        assert!(list.try_reserve(16).is_ok());
        assert!(list.capacity() >= 16);
        let err = list.try_reserve(usize::MAX).unwrap_err();
        assert_eq!(err.requested(), usize::MAX);
    }

    #[test]
    fn index_list_extend_from_refs() {
        let mut list: IndexList<i32> = IndexList::new();
        list.extend(&[1, 2, 3]);
        list.extend(vec![4]);
        assert_eq!(values(&list), vec![1, 2, 3, 4]);
    }

    #[test]
    fn index_list_check_invariants_on_fresh_list() {
        let list: IndexList<u8> = IndexList::default();
        list.check_invariants().unwrap();
        assert_eq!(list.debug_pool(), vec![PoolEntry::Sentinel { prev: 0, next: 0 }]);
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn index_list_metrics_track_recycling_and_compaction() {
        let mut list = IndexList::new();
        let a = list.push_back(1);
        list.push_back(2);
        list.push_back(3);
        list.erase(a);
        list.erase(SlotIndex::END);
        list.push_front(0);

        let snapshot = list.metrics_snapshot();
        assert_eq!(snapshot.insert_calls, 4);
        assert_eq!(snapshot.insert_recycled, 1);
        assert_eq!(snapshot.insert_appended, 3);
        assert_eq!(snapshot.erase_calls, 1);
        assert_eq!(snapshot.erase_end_noops, 1);
        assert_eq!(snapshot.len, 3);
        assert_eq!(snapshot.pool_len, 3);

        // slot 1 now holds the head, so the list is already in order
        list.reorder();
        list.pop_back();
        list.shrink_to_fit();
        list.clear();
        assert_eq!(list.pop_front(), None);

        let snapshot = list.metrics_snapshot();
        assert_eq!(snapshot.reorder_calls, 1);
        assert_eq!(snapshot.shrink_calls, 1);
        assert_eq!(snapshot.slots_released, 1);
        assert_eq!(snapshot.clear_calls, 1);
        assert_eq!(snapshot.pop_empty_calls, 1);
        assert_eq!(snapshot.erase_calls, 4);

        list.reset_metrics();
        assert_eq!(list.metrics_snapshot().insert_calls, 0);
    }
}
