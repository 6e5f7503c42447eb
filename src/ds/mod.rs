pub mod cursor;
pub mod index_list;
pub mod slot_pool;

pub use cursor::{Cursor, CursorMut, Direction, Forward, Reverse, ReverseCursor};
pub use index_list::{Entries, IndexList, Indices, IntoIter, Iter, IterMut};
pub use slot_pool::{PoolEntry, SlotIndex};
