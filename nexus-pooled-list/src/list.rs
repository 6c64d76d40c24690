//! Doubly-linked list over a recycled slot arena.
//!
//! Nodes live in one flat slot vector owned by the list. Links are slot
//! indices, not pointers, and callers hold [`Handle`]s instead of
//! references. A handle is re-validated against the slot's generation on
//! every use, so a handle to a removed node fails cleanly even after its
//! slot has been recycled for a new value.
//!
//! # Example
//!
//! ```
//! use nexus_pooled_list::{ListError, PooledList};
//!
//! let mut list: PooledList<&str> = PooledList::new();
//!
//! let b = list.push_back("b");
//! let a = list.push_front("a");
//! let c = list.insert_after(b, "c")?;
//!
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), ["a", "b", "c"]);
//! assert_eq!(list.next(a)?, Some(b));
//!
//! // O(1) removal from anywhere
//! assert_eq!(list.remove(b)?, "b");
//! assert_eq!(list.next(a)?, Some(c));
//!
//! // The old handle is dead, even once its slot is reused
//! list.push_back("d");
//! assert_eq!(list.get(b), Err(ListError::InvalidHandle));
//! # Ok::<(), ListError>(())
//! ```
//!
//! # Linkage
//!
//! Every structural change goes through `connect(prev, next)`, which points
//! `prev` forward at `next` and `next` back at `prev`, substituting the list
//! head or tail when either side is the sentinel:
//!
//! ```text
//! insert between p and n:   connect(p, new); connect(new, n)
//! remove x:                 connect(x.prev, x.next)
//!
//! push_front  = between(NONE, head)      insert_before(h) = between(h.prev, h)
//! push_back   = between(tail, NONE)      insert_after(h)  = between(h, h.next)
//! ```

use core::fmt;
use core::ops;

use crate::arena::{Arena, Slot};
use crate::{
    Cursor, DEFAULT_CAPACITY, Handle, Handles, Index, Iter, IterMut, ListBuilder, ListError, ListId,
};

/// A doubly-linked list whose nodes live in a reusable slot arena.
///
/// # Type Parameters
///
/// - `T`: Element type
/// - `Idx`: Slot index type (default `u32`); bounds the number of slots
///
/// # Capacity
///
/// The arena starts with the requested number of slots and doubles when
/// it runs out. It never shrinks: removed slots are queued (FIFO) for reuse.
///
/// # Threading
///
/// No internal synchronization. Share across threads only behind your own
/// lock; generation checks catch stale handles, not data races.
pub struct PooledList<T, Idx: Index = u32> {
    arena: Arena<T, Idx>,
    head: Idx,
    tail: Idx,
    len: usize,
    id: ListId,
}

impl<T, Idx: Index> Default for PooledList<T, Idx> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Construction & queries
// =============================================================================

impl<T, Idx: Index> PooledList<T, Idx> {
    /// Creates an empty list with [`DEFAULT_CAPACITY`] slots.
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty list with `capacity` pre-reserved slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds `Idx::max_slots()`. Use
    /// [`ListBuilder`] for a fallible alternative.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(
            capacity <= Idx::max_slots(),
            "capacity exceeds index type maximum"
        );
        Self::from_validated_capacity(capacity)
    }

    /// Returns a builder for configuring a new list.
    #[inline]
    pub fn builder() -> ListBuilder {
        ListBuilder::default()
    }

    pub(crate) fn from_validated_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            head: Idx::NONE,
            tail: Idx::NONE,
            len: 0,
            id: ListId::next(),
        }
    }

    /// Returns the number of elements in the list.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots in the arena, free or in use.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// Returns this list's identity. Every handle it issues carries it.
    #[inline]
    pub const fn id(&self) -> ListId {
        self.id
    }

    /// Returns a handle to the first node, or `None` if empty.
    #[inline]
    pub fn first(&self) -> Option<Handle<Idx>> {
        self.handle_at(self.head)
    }

    /// Returns a handle to the last node, or `None` if empty.
    #[inline]
    pub fn last(&self) -> Option<Handle<Idx>> {
        self.handle_at(self.tail)
    }

    /// Returns `true` if `handle` still refers to a node of this list.
    #[inline]
    pub fn contains_handle(&self, handle: Handle<Idx>) -> bool {
        self.validate(handle).is_ok()
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Returns a reference to the value at `handle`.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidHandle`] if the node was removed or the handle
    /// belongs to another list.
    #[inline]
    pub fn get(&self, handle: Handle<Idx>) -> Result<&T, ListError> {
        self.validate(handle)?.value.as_ref().ok_or(ListError::InvalidHandle)
    }

    /// Returns a mutable reference to the value at `handle`.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidHandle`] if the node was removed or the handle
    /// belongs to another list.
    #[inline]
    pub fn get_mut(&mut self, handle: Handle<Idx>) -> Result<&mut T, ListError> {
        self.validate(handle)?;
        self.arena.slot_mut(handle.index).value.as_mut().ok_or(ListError::InvalidHandle)
    }

    /// Overwrites the value at `handle`, returning the previous value.
    ///
    /// The handle stays valid: writing a value does not recycle the slot.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidHandle`] if the node was removed or the handle
    /// belongs to another list. `value` is dropped in that case.
    #[inline]
    pub fn set(&mut self, handle: Handle<Idx>, value: T) -> Result<T, ListError> {
        self.get_mut(handle).map(|slot| core::mem::replace(slot, value))
    }

    /// Returns a reference to the first value.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.value_at(self.head)
    }

    /// Returns a reference to the last value.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.value_at(self.tail)
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Returns a handle to the node after `handle`, or `None` at the tail.
    ///
    /// The returned handle carries the neighbour's current generation.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidHandle`] if `handle` is stale or foreign.
    #[inline]
    pub fn next(&self, handle: Handle<Idx>) -> Result<Option<Handle<Idx>>, ListError> {
        let next = self.validate(handle)?.next;
        Ok(self.handle_at(next))
    }

    /// Returns a handle to the node before `handle`, or `None` at the head.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidHandle`] if `handle` is stale or foreign.
    #[inline]
    pub fn prev(&self, handle: Handle<Idx>) -> Result<Option<Handle<Idx>>, ListError> {
        let prev = self.validate(handle)?.prev;
        Ok(self.handle_at(prev))
    }

    // ========================================================================
    // Insertion
    // ========================================================================

    /// Inserts a value at the front of the list.
    ///
    /// # Panics
    ///
    /// Panics if the arena must grow past `Idx::max_slots()`.
    #[inline]
    pub fn push_front(&mut self, value: T) -> Handle<Idx> {
        self.insert_between(Idx::NONE, self.head, value)
    }

    /// Inserts a value at the back of the list.
    ///
    /// # Panics
    ///
    /// Panics if the arena must grow past `Idx::max_slots()`.
    #[inline]
    pub fn push_back(&mut self, value: T) -> Handle<Idx> {
        self.insert_between(self.tail, Idx::NONE, value)
    }

    /// Inserts a value immediately before the node at `handle`.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidHandle`] if `handle` is stale or foreign. The
    /// list is unchanged and `value` is dropped.
    #[inline]
    pub fn insert_before(
        &mut self,
        handle: Handle<Idx>,
        value: T,
    ) -> Result<Handle<Idx>, ListError> {
        let prev = self.validate(handle)?.prev;
        Ok(self.insert_between(prev, handle.index, value))
    }

    /// Inserts a value immediately after the node at `handle`.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidHandle`] if `handle` is stale or foreign. The
    /// list is unchanged and `value` is dropped.
    #[inline]
    pub fn insert_after(
        &mut self,
        handle: Handle<Idx>,
        value: T,
    ) -> Result<Handle<Idx>, ListError> {
        let next = self.validate(handle)?.next;
        Ok(self.insert_between(handle.index, next, value))
    }

    // ========================================================================
    // Removal
    // ========================================================================

    /// Removes the node at `handle` and returns its value.
    ///
    /// The slot is recycled: `handle`, and every copy of it, is invalid
    /// afterwards.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidHandle`] if `handle` is stale or foreign.
    #[inline]
    pub fn remove(&mut self, handle: Handle<Idx>) -> Result<T, ListError> {
        let slot = self.validate(handle)?;
        let (prev, next) = (slot.prev, slot.next);

        self.connect(prev, next);
        self.len -= 1;
        let value = self.arena.release(handle.index);
        debug_assert_eq!(self.arena.occupied_len(), self.len);
        value.ok_or(ListError::InvalidHandle)
    }

    /// Removes and returns the first value.
    #[inline]
    pub fn pop_front(&mut self) -> Option<T> {
        let handle = self.first()?;
        self.remove(handle).ok()
    }

    /// Removes and returns the last value.
    #[inline]
    pub fn pop_back(&mut self) -> Option<T> {
        let handle = self.last()?;
        self.remove(handle).ok()
    }

    /// Removes every node, invalidating all outstanding handles.
    ///
    /// Capacity is kept and every slot returns to the free queue in
    /// ascending index order.
    pub fn clear(&mut self) {
        let released = self.arena.reset();
        self.head = Idx::NONE;
        self.tail = Idx::NONE;
        self.len = 0;

        log::trace!(
            "cleared pooled list {}: released {released} slots",
            self.id.as_u64()
        );
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// Returns a fresh cursor positioned before the first node.
    ///
    /// The cursor does not borrow the list; it detects, on advance, when
    /// the node it sits on has been removed in the meantime. See [`Cursor`].
    #[inline]
    pub fn cursor(&self) -> Cursor<Idx> {
        Cursor::new(self.id)
    }

    /// Returns an iterator over references to values, front to back.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T, Idx> {
        Iter::new(&self.arena, self.head, self.tail, self.len)
    }

    /// Returns an iterator over mutable references to values, front to back.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T, Idx> {
        IterMut::new(&mut self.arena, self.head, self.tail, self.len)
    }

    /// Returns an iterator over handles, front to back.
    ///
    /// Collect the handles first when you plan to remove while walking.
    #[inline]
    pub fn handles(&self) -> Handles<'_, T, Idx> {
        Handles::new(self)
    }

    // ========================================================================
    // Collection conventions
    // ========================================================================

    /// Returns `true` if any value equals `value`. O(n).
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|v| v == value)
    }

    /// Removes the first value equal to `value`, front to back. O(n).
    pub fn remove_value(&mut self, value: &T) -> Option<T>
    where
        T: PartialEq,
    {
        let mut idx = self.head;
        while idx.is_some() {
            let slot = self.arena.slot(idx);
            if slot.value.as_ref() == Some(value) {
                let handle = self.handle_for(idx);
                return self.remove(handle).ok();
            }
            idx = slot.next;
        }
        None
    }

    /// Clones the values, in list order, into `dest[offset..offset + len]`.
    ///
    /// # Errors
    ///
    /// [`ListError::OutOfRange`] if `dest` is shorter than
    /// `offset + self.len()`. Nothing is written in that case.
    pub fn copy_to(&self, dest: &mut [T], offset: usize) -> Result<(), ListError>
    where
        T: Clone,
    {
        let out_of_range = ListError::OutOfRange {
            offset,
            required: self.len,
            len: dest.len(),
        };
        let end = offset
            .checked_add(self.len)
            .filter(|&end| end <= dest.len())
            .ok_or(out_of_range)?;

        for (dst, value) in dest[offset..end].iter_mut().zip(self.iter()) {
            dst.clone_from(value);
        }
        Ok(())
    }

    /// Clones the values, in list order, into a new `Vec`.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    // ========================================================================
    // Internals
    // ========================================================================

    #[inline]
    pub(crate) fn arena(&self) -> &Arena<T, Idx> {
        &self.arena
    }

    #[inline]
    pub(crate) fn head_index(&self) -> Idx {
        self.head
    }

    #[inline]
    pub(crate) fn tail_index(&self) -> Idx {
        self.tail
    }

    /// Checks owner, bounds, and generation. Performs no mutation.
    #[inline]
    fn validate(&self, handle: Handle<Idx>) -> Result<&Slot<T, Idx>, ListError> {
        if handle.owner != self.id {
            return Err(ListError::InvalidHandle);
        }
        match self.arena.get(handle.index) {
            Some(slot) if slot.generation == handle.generation && slot.is_occupied() => Ok(slot),
            _ => Err(ListError::InvalidHandle),
        }
    }

    /// Handle for an in-use slot at its current generation.
    #[inline]
    pub(crate) fn handle_for(&self, idx: Idx) -> Handle<Idx> {
        Handle::new(self.id, idx, self.arena.slot(idx).generation)
    }

    #[inline]
    fn handle_at(&self, idx: Idx) -> Option<Handle<Idx>> {
        if idx.is_none() { None } else { Some(self.handle_for(idx)) }
    }

    #[inline]
    fn value_at(&self, idx: Idx) -> Option<&T> {
        if idx.is_none() {
            None
        } else {
            self.arena.slot(idx).value.as_ref()
        }
    }

    /// Points `prev` forward at `next` and `next` back at `prev`.
    ///
    /// A `NONE` on either side stands for the list boundary, so this is the
    /// only place head and tail change.
    #[inline]
    fn connect(&mut self, prev: Idx, next: Idx) {
        if prev.is_some() {
            self.arena.slot_mut(prev).next = next;
        } else {
            self.head = next;
        }

        if next.is_some() {
            self.arena.slot_mut(next).prev = prev;
        } else {
            self.tail = prev;
        }
    }

    /// Claims a slot for `value` and links it between two adjacent nodes.
    #[inline]
    fn insert_between(&mut self, prev: Idx, next: Idx, value: T) -> Handle<Idx> {
        let idx = self.arena.allocate(value);
        self.connect(prev, idx);
        self.connect(idx, next);
        self.len += 1;
        debug_assert_eq!(self.arena.occupied_len(), self.len);
        self.handle_for(idx)
    }
}

// =============================================================================
// Trait impls
// =============================================================================

impl<T, Idx: Index> ops::Index<Handle<Idx>> for PooledList<T, Idx> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `handle` is stale or foreign.
    #[inline]
    fn index(&self, handle: Handle<Idx>) -> &T {
        match self.get(handle) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T, Idx: Index> ops::IndexMut<Handle<Idx>> for PooledList<T, Idx> {
    /// # Panics
    ///
    /// Panics if `handle` is stale or foreign.
    #[inline]
    fn index_mut(&mut self, handle: Handle<Idx>) -> &mut T {
        match self.get_mut(handle) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T: fmt::Debug, Idx: Index> fmt::Debug for PooledList<T, Idx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, Idx: Index> Extend<T> for PooledList<T, Idx> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T, Idx: Index> FromIterator<T> for PooledList<T, Idx> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<'a, T, Idx: Index> IntoIterator for &'a PooledList<T, Idx> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, Idx>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, Idx: Index> IntoIterator for &'a mut PooledList<T, Idx> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T, Idx>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
