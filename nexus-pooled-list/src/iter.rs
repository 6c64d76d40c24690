//! Traversal over a [`PooledList`].
//!
//! Two flavours:
//!
//! - [`Iter`], [`IterMut`], [`Handles`] borrow the list. The borrow checker
//!   already rules out mutation while they live, so they cannot be
//!   invalidated.
//! - [`Cursor`] is a detached, copyable position. It does not borrow the
//!   list between steps, so the list may be mutated mid-traversal; the
//!   cursor then checks, on each advance, that the node it sits on has not
//!   been removed.
//!
//! # Cursor invalidation is best effort
//!
//! A cursor records the generation of the slot it currently occupies and
//! compares it before following that slot's `next` link. This protects the
//! cursor's own position only:
//!
//! - removing the node under the cursor, then advancing, fails with
//!   [`ListError::ConcurrentModification`], even if the slot has already been
//!   reused for a new value;
//! - removing nodes the cursor has already passed, or has not reached yet,
//!   goes unnoticed and the traversal continues over the current links;
//! - nodes inserted ahead of the cursor are visited, nodes inserted behind
//!   it are not.
//!
//! It is not a guarantee against every mutation-during-iteration hazard.

use core::iter::FusedIterator;
use core::marker::PhantomData;

use crate::arena::{Arena, Slot};
use crate::{Handle, Index, ListError, ListId, PooledList};

// =============================================================================
// Cursor
// =============================================================================

/// Restartable, detached traversal over a list, front to back.
///
/// Obtained from [`PooledList::cursor`]. Several cursors may walk the same
/// list at once; each detects invalidation of its own position
/// independently.
///
/// # Example
///
/// ```
/// use nexus_pooled_list::{ListError, PooledList};
///
/// let mut list: PooledList<u64> = PooledList::new();
/// let _a = list.push_back(1);
/// let b = list.push_back(2);
/// let c = list.push_back(3);
///
/// let mut cursor = list.cursor();
/// assert_eq!(cursor.move_next(&list), Ok(true));
/// assert_eq!(cursor.current(&list), Some(&1));
///
/// // Removing a node the cursor is not on is tolerated.
/// list.remove(c)?;
/// assert_eq!(cursor.move_next(&list), Ok(true));
/// assert_eq!(cursor.current(&list), Some(&2));
///
/// // Removing the node under the cursor is detected on the next step.
/// list.remove(b)?;
/// assert_eq!(cursor.move_next(&list), Err(ListError::ConcurrentModification));
/// # Ok::<(), ListError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor<Idx: Index = u32> {
    owner: ListId,
    index: Idx,
    generation: u64,
    started: bool,
}

impl<Idx: Index> Cursor<Idx> {
    #[inline]
    pub(crate) const fn new(owner: ListId) -> Self {
        Self {
            owner,
            index: Idx::NONE,
            generation: 0,
            started: false,
        }
    }

    /// Advances to the next node.
    ///
    /// The first call moves to the head. Returns `Ok(false)` once the end
    /// is reached; further calls keep returning `Ok(false)` until
    /// [`reset`](Cursor::reset).
    ///
    /// # Errors
    ///
    /// - [`ListError::ConcurrentModification`] if the node the cursor was on
    ///   has been removed since the cursor reached it. The cursor is dead.
    /// - [`ListError::InvalidHandle`] if `list` is not the list that created
    ///   this cursor.
    pub fn move_next<T>(&mut self, list: &PooledList<T, Idx>) -> Result<bool, ListError> {
        if self.owner != list.id() {
            return Err(ListError::InvalidHandle);
        }

        if !self.started {
            self.started = true;
            return Ok(self.settle(list.arena(), list.head_index()));
        }

        if self.index.is_none() {
            return Ok(false);
        }

        let slot = list.arena().slot(self.index);
        if slot.generation != self.generation {
            log::debug!(
                "cursor on pooled list {}: slot {:?} recycled (generation {} -> {})",
                self.owner.as_u64(),
                self.index,
                self.generation,
                slot.generation
            );
            return Err(ListError::ConcurrentModification);
        }

        let next = slot.next;
        Ok(self.settle(list.arena(), next))
    }

    /// Returns the value under the cursor.
    ///
    /// `None` before the first advance, past the end, or if the node under
    /// the cursor has since been removed.
    #[inline]
    pub fn current<'a, T>(&self, list: &'a PooledList<T, Idx>) -> Option<&'a T> {
        list.get(self.handle()?).ok()
    }

    /// Returns a handle to the node under the cursor, stamped with the
    /// generation the cursor observed when it arrived.
    #[inline]
    pub fn handle(&self) -> Option<Handle<Idx>> {
        if self.index.is_none() {
            None
        } else {
            Some(Handle::new(self.owner, self.index, self.generation))
        }
    }

    /// Returns `true` once the cursor has run past the last node.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.started && self.index.is_none()
    }

    /// Rewinds to the position before the first node.
    #[inline]
    pub fn reset(&mut self) {
        self.started = false;
        self.index = Idx::NONE;
        self.generation = 0;
    }

    #[inline]
    fn settle<T>(&mut self, arena: &Arena<T, Idx>, idx: Idx) -> bool {
        self.index = idx;
        if idx.is_none() {
            return false;
        }
        self.generation = arena.slot(idx).generation;
        true
    }
}

// =============================================================================
// Iter
// =============================================================================

/// Iterator over references to list values. See [`PooledList::iter`].
pub struct Iter<'a, T, Idx: Index> {
    arena: &'a Arena<T, Idx>,
    front: Idx,
    back: Idx,
    remaining: usize,
}

impl<'a, T, Idx: Index> Iter<'a, T, Idx> {
    #[inline]
    pub(crate) fn new(arena: &'a Arena<T, Idx>, front: Idx, back: Idx, len: usize) -> Self {
        Self {
            arena,
            front,
            back,
            remaining: len,
        }
    }
}

impl<T, Idx: Index> Clone for Iter<'_, T, Idx> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, T, Idx: Index> Iterator for Iter<'a, T, Idx> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let slot = self.arena.slot(self.front);
        self.front = slot.next;
        self.remaining -= 1;
        slot.value.as_ref()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, Idx: Index> DoubleEndedIterator for Iter<'_, T, Idx> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let slot = self.arena.slot(self.back);
        self.back = slot.prev;
        self.remaining -= 1;
        slot.value.as_ref()
    }
}

impl<T, Idx: Index> ExactSizeIterator for Iter<'_, T, Idx> {}

impl<T, Idx: Index> FusedIterator for Iter<'_, T, Idx> {}

// =============================================================================
// IterMut
// =============================================================================

/// Iterator over mutable references to list values. See
/// [`PooledList::iter_mut`].
pub struct IterMut<'a, T, Idx: Index> {
    slots: *mut Slot<T, Idx>,
    front: Idx,
    back: Idx,
    remaining: usize,
    _marker: PhantomData<&'a mut Arena<T, Idx>>,
}

impl<'a, T, Idx: Index> IterMut<'a, T, Idx> {
    #[inline]
    pub(crate) fn new(arena: &'a mut Arena<T, Idx>, front: Idx, back: Idx, len: usize) -> Self {
        Self {
            slots: arena.slots_mut_ptr(),
            front,
            back,
            remaining: len,
            _marker: PhantomData,
        }
    }
}

impl<'a, T, Idx: Index> Iterator for IterMut<'a, T, Idx> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        // Safety: `front` is an in-use slot (list invariant). The links form
        // a simple path and `remaining` stops us before front and back cross,
        // so no slot is yielded twice while the arena stays mutably borrowed.
        let slot = unsafe { &mut *self.slots.add(self.front.as_usize()) };
        self.front = slot.next;
        self.remaining -= 1;
        slot.value.as_mut()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, Idx: Index> DoubleEndedIterator for IterMut<'_, T, Idx> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        // Safety: see `next`.
        let slot = unsafe { &mut *self.slots.add(self.back.as_usize()) };
        self.back = slot.prev;
        self.remaining -= 1;
        slot.value.as_mut()
    }
}

impl<T, Idx: Index> ExactSizeIterator for IterMut<'_, T, Idx> {}

impl<T, Idx: Index> FusedIterator for IterMut<'_, T, Idx> {}

// =============================================================================
// Handles
// =============================================================================

/// Iterator over node handles, front to back. See [`PooledList::handles`].
pub struct Handles<'a, T, Idx: Index> {
    list: &'a PooledList<T, Idx>,
    front: Idx,
    back: Idx,
    remaining: usize,
}

impl<'a, T, Idx: Index> Handles<'a, T, Idx> {
    #[inline]
    pub(crate) fn new(list: &'a PooledList<T, Idx>) -> Self {
        Self {
            list,
            front: list.head_index(),
            back: list.tail_index(),
            remaining: list.len(),
        }
    }
}

impl<T, Idx: Index> Iterator for Handles<'_, T, Idx> {
    type Item = Handle<Idx>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let idx = self.front;
        self.front = self.list.arena().slot(idx).next;
        self.remaining -= 1;
        Some(self.list.handle_for(idx))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, Idx: Index> DoubleEndedIterator for Handles<'_, T, Idx> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let idx = self.back;
        self.back = self.list.arena().slot(idx).prev;
        self.remaining -= 1;
        Some(self.list.handle_for(idx))
    }
}

impl<T, Idx: Index> ExactSizeIterator for Handles<'_, T, Idx> {}

impl<T, Idx: Index> FusedIterator for Handles<'_, T, Idx> {}
