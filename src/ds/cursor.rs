//! Bidirectional cursors over an [`IndexList`].
//!
//! A cursor is a `(list, slot index)` pair. Stepping follows the slot's
//! links, so every step is O(1) and `advance_by(n)` is O(n): these are
//! bidirectional positions, not random-access ones.
//!
//! [`Cursor`] is parameterized by a [`Direction`]. A [`Reverse`] cursor walks
//! the same links as a [`Forward`] one with `next`/`prev` swapped; the
//! underlying chain is never reversed.
//!
//! ```text
//!   rend/end ─► [0] ◄──► [a] ◄──► [b] ◄──► [c] ◄──► [0]
//!                         ▲                 ▲
//!                      begin             rbegin
//! ```
//!
//! [`CursorMut`] holds the list mutably and can edit around its position.

use std::fmt;
use std::marker::PhantomData;

use crate::ds::index_list::IndexList;
use crate::ds::slot_pool::{SENTINEL, SlotIndex};

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Forward {}
    impl Sealed for super::Reverse {}
}

/// Traversal direction of a [`Cursor`].
pub trait Direction: sealed::Sealed {
    /// Slot reached by one step forward, given the current slot's links.
    #[doc(hidden)]
    fn ahead(prev: usize, next: usize) -> usize;

    /// Slot reached by one step backward, given the current slot's links.
    #[doc(hidden)]
    fn behind(prev: usize, next: usize) -> usize;
}

/// Head-to-tail traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Forward;

/// Tail-to-head traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reverse;

impl Direction for Forward {
    #[inline]
    fn ahead(_prev: usize, next: usize) -> usize {
        next
    }

    #[inline]
    fn behind(prev: usize, _next: usize) -> usize {
        prev
    }
}

impl Direction for Reverse {
    #[inline]
    fn ahead(prev: usize, _next: usize) -> usize {
        prev
    }

    #[inline]
    fn behind(_prev: usize, next: usize) -> usize {
        next
    }
}

/// Read-only cursor into an [`IndexList`].
///
/// Two cursors are equal iff they point into the same list (by identity) at
/// the same slot index.
///
/// A cursor borrows its list, so the list cannot be mutated while the cursor
/// is alive. To keep a position across mutations, keep its
/// [`index`](Self::index) and re-acquire a cursor with
/// [`IndexList::cursor`].
pub struct Cursor<'a, T, D: Direction = Forward> {
    list: &'a IndexList<T>,
    current: usize,
    _direction: PhantomData<D>,
}

/// Reverse cursor, as returned by [`IndexList::rbegin`].
pub type ReverseCursor<'a, T> = Cursor<'a, T, Reverse>;

impl<'a, T, D: Direction> Cursor<'a, T, D> {
    #[inline]
    pub(crate) fn new(list: &'a IndexList<T>, current: usize) -> Self {
        Self {
            list,
            current,
            _direction: PhantomData,
        }
    }

    /// Returns the slot index the cursor points at.
    #[inline]
    pub fn index(&self) -> SlotIndex {
        SlotIndex(self.current)
    }

    /// Returns `true` if the cursor is at the end sentinel.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.current == SENTINEL
    }

    /// Returns the list this cursor walks.
    #[inline]
    pub fn list(&self) -> &'a IndexList<T> {
        self.list
    }

    /// Returns the element under the cursor, or `None` at the end sentinel
    /// (or if the slot was erased after the index was taken).
    #[inline]
    pub fn get(&self) -> Option<&'a T> {
        self.list.get(self.index())
    }

    /// Index of the list-order predecessor of the current slot.
    ///
    /// This reads the raw `prev` link regardless of direction.
    #[inline]
    pub fn prev_index(&self) -> SlotIndex {
        SlotIndex(self.list.pool().prev_of(self.current))
    }

    /// Index of the list-order successor of the current slot.
    #[inline]
    pub fn next_index(&self) -> SlotIndex {
        SlotIndex(self.list.pool().next_of(self.current))
    }

    /// Steps one slot in the cursor's direction. Stepping off either end
    /// lands on the sentinel; stepping from the sentinel wraps around.
    #[inline]
    pub fn move_next(&mut self) {
        self.current = match self.list.pool().links(self.current) {
            Some((prev, next)) => D::ahead(prev, next),
            None => {
                debug_assert!(false, "cursor at erased slot {}", self.current);
                SENTINEL
            },
        };
    }

    /// Steps one slot against the cursor's direction.
    #[inline]
    pub fn move_prev(&mut self) {
        self.current = match self.list.pool().links(self.current) {
            Some((prev, next)) => D::behind(prev, next),
            None => {
                debug_assert!(false, "cursor at erased slot {}", self.current);
                SENTINEL
            },
        };
    }

    /// Applies [`move_next`](Self::move_next) `steps` times. O(steps).
    pub fn advance_by(&mut self, steps: usize) {
        for _ in 0..steps {
            self.move_next();
        }
    }

    /// Applies [`move_prev`](Self::move_prev) `steps` times. O(steps).
    pub fn retreat_by(&mut self, steps: usize) {
        for _ in 0..steps {
            self.move_prev();
        }
    }

    /// Returns a copy of this cursor advanced by `steps`.
    #[must_use]
    pub fn advanced(mut self, steps: usize) -> Self {
        self.advance_by(steps);
        self
    }

    /// Returns a copy of this cursor moved back by `steps`.
    #[must_use]
    pub fn retreated(mut self, steps: usize) -> Self {
        self.retreat_by(steps);
        self
    }
}

impl<T, D: Direction> Clone for Cursor<'_, T, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, D: Direction> Copy for Cursor<'_, T, D> {}

impl<T, D: Direction> PartialEq for Cursor<'_, T, D> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.list, other.list) && self.current == other.current
    }
}

impl<T, D: Direction> Eq for Cursor<'_, T, D> {}

impl<T, D: Direction> fmt::Debug for Cursor<'_, T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("index", &self.current)
            .field("direction", &std::any::type_name::<D>())
            .finish()
    }
}

/// Mutable cursor into an [`IndexList`].
///
/// Edits made through the cursor keep every other handle valid.
pub struct CursorMut<'a, T> {
    list: &'a mut IndexList<T>,
    current: usize,
}

impl<'a, T> CursorMut<'a, T> {
    #[inline]
    pub(crate) fn new(list: &'a mut IndexList<T>, current: usize) -> Self {
        Self { list, current }
    }

    #[inline]
    pub fn index(&self) -> SlotIndex {
        SlotIndex(self.current)
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.current == SENTINEL
    }

    #[inline]
    pub fn get(&self) -> Option<&T> {
        self.list.get(SlotIndex(self.current))
    }

    #[inline]
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.list.get_mut(SlotIndex(self.current))
    }

    /// Steps toward the tail; wraps through the sentinel.
    #[inline]
    pub fn move_next(&mut self) {
        self.current = self.list.pool().next_of(self.current);
    }

    /// Steps toward the head; wraps through the sentinel.
    #[inline]
    pub fn move_prev(&mut self) {
        self.current = self.list.pool().prev_of(self.current);
    }

    /// Inserts `value` before the cursor. The cursor does not move.
    ///
    /// At the end sentinel this appends.
    pub fn insert_before(&mut self, value: T) -> SlotIndex {
        self.list.insert_before(SlotIndex(self.current), value)
    }

    /// Inserts `value` after the cursor. The cursor does not move.
    ///
    /// At the end sentinel this prepends.
    pub fn insert_after(&mut self, value: T) -> SlotIndex {
        self.list.insert_after(SlotIndex(self.current), value)
    }

    /// Erases the element under the cursor and moves to its successor.
    ///
    /// Returns `None` (and stays put) at the end sentinel.
    pub fn remove_current(&mut self) -> Option<T> {
        if self.current == SENTINEL {
            return None;
        }
        let next = self.list.pool().next_of(self.current);
        let value = self.list.erase(SlotIndex(self.current))?;
        self.current = next;
        Some(value)
    }

    /// Returns a read-only cursor at the same position.
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(&*self.list, self.current)
    }
}

impl<T> fmt::Debug for CursorMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("index", &self.current)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(values: &[i32]) -> IndexList<i32> {
        values.iter().copied().collect()
    }

    #[test]
    fn cursor_walks_forward_to_end() {
        let list = list_of(&[1, 2, 3]);
        let mut cursor = list.begin();
        let mut seen = Vec::new();
        while cursor != list.end() {
            seen.push(*cursor.get().unwrap());
            cursor.move_next();
        }
        assert_eq!(seen, vec![1, 2, 3]);
        assert!(cursor.is_end());
        assert_eq!(cursor.get(), None);
    }

    #[test]
    fn reverse_cursor_walks_backward() {
        let list = list_of(&[1, 2, 3]);
        let mut cursor = list.rbegin();
        let mut seen = Vec::new();
        while cursor != list.rend() {
            seen.push(*cursor.get().unwrap());
            cursor.move_next();
        }
        assert_eq!(seen, vec![3, 2, 1]);
    }

    #[test]
    fn move_prev_inverts_move_next() {
        let list = list_of(&[10, 20, 30]);
        let mut cursor = list.begin();
        cursor.move_next();
        cursor.move_prev();
        assert_eq!(cursor, list.begin());

        let mut rev = list.rbegin();
        rev.move_next();
        assert_eq!(rev.get(), Some(&20));
        rev.move_prev();
        assert_eq!(rev.get(), Some(&30));
    }

    #[test]
    fn end_cursor_wraps_around() {
        let list = list_of(&[1, 2]);
        let mut cursor = list.end();
        cursor.move_next();
        assert_eq!(cursor, list.begin());

        let mut cursor = list.end();
        cursor.move_prev();
        assert_eq!(cursor.get(), Some(&2));
    }

    #[test]
    fn advance_and_retreat_are_repeated_steps() {
        let list = list_of(&[0, 1, 2, 3, 4]);
        let cursor = list.begin().advanced(3);
        assert_eq!(cursor.get(), Some(&3));
        assert_eq!(cursor.retreated(2).get(), Some(&1));
        assert_eq!(list.begin().advanced(5), list.end());

        let mut rev = list.rbegin();
        rev.advance_by(4);
        assert_eq!(rev.get(), Some(&0));
    }

    #[test]
    fn cursor_equality_requires_same_list() {
        let a = list_of(&[1]);
        let b = list_of(&[1]);
        assert_eq!(a.begin().index(), b.begin().index());
        assert_ne!(a.begin(), b.begin());
        assert_eq!(a.begin(), a.begin());
    }

    #[test]
    fn cursor_neighbour_indices() {
        let mut list = IndexList::new();
        let a = list.push_back('a');
        let b = list.push_back('b');
        let c = list.push_back('c');
        let cursor = list.cursor(b);
        assert_eq!(cursor.prev_index(), a);
        assert_eq!(cursor.next_index(), c);
        assert_eq!(list.cursor(c).next_index(), SlotIndex::END);
    }

    #[test]
    fn cursor_mut_edits_in_place() {
        let mut list = list_of(&[1, 2, 3]);
        {
            let mut cursor = list.cursor_front_mut();
            cursor.move_next();
            *cursor.get_mut().unwrap() = 20;
            cursor.insert_before(15);
            cursor.insert_after(25);
            assert_eq!(cursor.get(), Some(&20));
        }
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 15, 20, 25, 3]);
    }

    #[test]
    fn cursor_mut_remove_current_advances() {
        let mut list = list_of(&[1, 2, 3]);
        let mut cursor = list.cursor_front_mut();
        assert_eq!(cursor.remove_current(), Some(1));
        assert_eq!(cursor.get(), Some(&2));
        cursor.move_next();
        assert_eq!(cursor.remove_current(), Some(3));
        assert!(cursor.is_end());
        assert_eq!(cursor.remove_current(), None);
        assert_eq!(cursor.as_cursor().index(), SlotIndex::END);
        drop(cursor);
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn cursor_mut_at_end_inserts_at_both_ends() {
        let mut list = list_of(&[2]);
        let mut cursor = list.cursor_mut(SlotIndex::END);
        cursor.insert_before(3);
        cursor.insert_after(1);
        drop(cursor);
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    }
}
