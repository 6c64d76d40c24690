//! Generation-stamped node handles.
//!
//! A [`Handle`] names one *occupancy* of one slot: the slot index, the
//! generation the slot had when the node was inserted, and the identity of
//! the list that issued it. Releasing a slot bumps its generation, so a
//! handle to a removed node stops validating even after the slot has been
//! handed to a new value.
//!
//! ```text
//! slot 3, gen 7  ◀── Handle { index: 3, generation: 7 }   valid
//!   remove        slot 3, gen 8
//!   push_back     slot 3, gen 8  ◀── Handle { index: 3, generation: 8 }
//!                 Handle { index: 3, generation: 7 }       stale
//! ```

use core::sync::atomic::{AtomicU64, Ordering};

use crate::Index;

static NEXT_LIST_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a [`PooledList`](crate::PooledList).
///
/// Drawn once at construction and kept across `clear`, so handles from one
/// list are rejected by every other list even when index and generation
/// happen to line up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListId(u64);

impl ListId {
    #[inline]
    pub(crate) fn next() -> Self {
        Self(NEXT_LIST_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw id value.
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

/// Checked weak reference to a node in a [`PooledList`](crate::PooledList).
///
/// Handles are plain values: copying or dropping one never touches the
/// list. Every list operation that takes a handle validates it first and
/// fails with [`ListError::InvalidHandle`](crate::ListError::InvalidHandle)
/// without side effects if the node is gone.
///
/// Two handles are equal iff index, generation and owner all match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle<Idx: Index = u32> {
    pub(crate) index: Idx,
    pub(crate) generation: u64,
    pub(crate) owner: ListId,
}

impl<Idx: Index> Handle<Idx> {
    #[inline]
    pub(crate) const fn new(owner: ListId, index: Idx, generation: u64) -> Self {
        Self {
            index,
            generation,
            owner,
        }
    }

    /// Slot index this handle points at.
    #[inline]
    pub fn index(&self) -> Idx {
        self.index
    }

    /// Slot generation observed when the handle was issued.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Identity of the list that issued this handle.
    #[inline]
    pub fn owner(&self) -> ListId {
        self.owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_ids_are_unique() {
        let a = ListId::next();
        let b = ListId::next();
        assert_ne!(a, b);
        assert!(b.as_u64() > a.as_u64());
    }

    #[test]
    fn equality_covers_all_fields() {
        let owner = ListId::next();
        let other = ListId::next();
        let h = Handle::<u32>::new(owner, 3, 7);

        assert_eq!(h, Handle::new(owner, 3, 7));
        assert_ne!(h, Handle::new(owner, 4, 7));
        assert_ne!(h, Handle::new(owner, 3, 8));
        assert_ne!(h, Handle::new(other, 3, 7));
    }

    #[test]
    fn hashes_by_value() {
        use std::collections::HashSet;

        let owner = ListId::next();
        let mut set = HashSet::new();
        set.insert(Handle::<u32>::new(owner, 1, 0));
        set.insert(Handle::<u32>::new(owner, 1, 0));
        set.insert(Handle::<u32>::new(owner, 1, 1));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn accessors() {
        let owner = ListId::next();
        let h = Handle::<u16>::new(owner, 9, 2);
        assert_eq!(h.index(), 9);
        assert_eq!(h.generation(), 2);
        assert_eq!(h.owner(), owner);
    }
}
