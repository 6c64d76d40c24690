//! Slot arena backing a [`PooledList`](crate::PooledList).
//!
//! The arena owns a flat, growable vector of slots and a FIFO queue of the
//! slot indices that are currently free. It knows nothing about list order:
//! link fields are stored here but only the linkage code in `list.rs`
//! reads or writes them.
//!
//! # Slot lifecycle
//!
//! ```text
//! free ──allocate──▶ in use ──release──▶ free (generation + 1, value dropped)
//! ```
//!
//! Slots are never deallocated while the arena lives. Growth doubles the slot
//! vector and queues every new index behind the ones already free.

use std::collections::VecDeque;

use crate::Index;

/// Capacity used by [`PooledList::new`](crate::PooledList::new), and the
/// first growth step of an arena created with zero capacity.
pub const DEFAULT_CAPACITY: usize = 4;

/// One arena element: a value plus its list links and generation.
///
/// `value` is `Some` exactly while the slot is part of a list. `prev` and
/// `next` are meaningless for free slots and are overwritten on the next
/// claim.
#[derive(Debug)]
pub(crate) struct Slot<T, Idx> {
    pub(crate) value: Option<T>,
    pub(crate) prev: Idx,
    pub(crate) next: Idx,
    pub(crate) generation: u64,
}

impl<T, Idx: Index> Slot<T, Idx> {
    #[inline]
    const fn vacant() -> Self {
        Self {
            value: None,
            prev: Idx::NONE,
            next: Idx::NONE,
            generation: 0,
        }
    }

    #[inline]
    pub(crate) fn is_occupied(&self) -> bool {
        self.value.is_some()
    }
}

/// Growable slot store with FIFO slot reuse.
#[derive(Debug)]
pub(crate) struct Arena<T, Idx> {
    slots: Vec<Slot<T, Idx>>,
    free: VecDeque<Idx>,
}

impl<T, Idx: Index> Arena<T, Idx> {
    /// Creates an arena with `capacity` pre-reserved free slots.
    ///
    /// The caller guarantees `capacity <= Idx::max_slots()`.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        debug_assert!(capacity <= Idx::max_slots());

        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, Slot::vacant);

        Self {
            slots,
            free: (0..capacity).map(Idx::from_usize).collect(),
        }
    }

    /// Total number of slots, free or in use.
    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots waiting in the free queue.
    #[inline]
    pub(crate) fn free_len(&self) -> usize {
        self.free.len()
    }

    /// Number of slots currently holding a value.
    #[inline]
    pub(crate) fn occupied_len(&self) -> usize {
        self.slots.len() - self.free_len()
    }

    #[inline]
    pub(crate) fn get(&self, idx: Idx) -> Option<&Slot<T, Idx>> {
        self.slots.get(idx.as_usize())
    }

    /// Returns the slot at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of bounds. Only call with indices taken from
    /// list links or from a validated handle.
    #[inline]
    pub(crate) fn slot(&self, idx: Idx) -> &Slot<T, Idx> {
        &self.slots[idx.as_usize()]
    }

    /// Mutable counterpart of [`Arena::slot`].
    #[inline]
    pub(crate) fn slot_mut(&mut self, idx: Idx) -> &mut Slot<T, Idx> {
        &mut self.slots[idx.as_usize()]
    }

    /// Base pointer of the slot vector, for iterators that hand out
    /// disjoint `&mut` into it.
    #[inline]
    pub(crate) fn slots_mut_ptr(&mut self) -> *mut Slot<T, Idx> {
        self.slots.as_mut_ptr()
    }

    // ========================================================================
    // Allocation
    // ========================================================================

    /// Claims the oldest free slot, growing first if none is free, and
    /// stores `value` in it.
    ///
    /// Links of the returned slot are stale; the caller wires them.
    ///
    /// # Panics
    ///
    /// Panics with "capacity overflow" if the arena is already at the
    /// index type's maximum.
    #[inline]
    pub(crate) fn allocate(&mut self, value: T) -> Idx {
        if self.free.is_empty() {
            self.grow();
        }

        let Some(idx) = self.free.pop_front() else {
            unreachable!("grow always queues at least one slot");
        };
        self.slot_mut(idx).value = Some(value);
        idx
    }

    /// Returns `idx` to the free queue.
    ///
    /// Bumps the generation first, so every handle issued for the current
    /// occupant stops validating, then drops the stored value out of the
    /// slot and hands it back.
    #[inline]
    pub(crate) fn release(&mut self, idx: Idx) -> Option<T> {
        let slot = self.slot_mut(idx);
        slot.generation = slot.generation.wrapping_add(1);
        let value = slot.value.take();
        self.free.push_back(idx);
        value
    }

    /// Releases every occupied slot and rebuilds the free queue in
    /// ascending index order.
    ///
    /// Capacity is kept. Returns the number of slots released.
    pub(crate) fn reset(&mut self) -> usize {
        let mut released = 0;
        for slot in self.slots.iter_mut().filter(|slot| slot.is_occupied()) {
            slot.generation = slot.generation.wrapping_add(1);
            slot.value = None;
            released += 1;
        }

        self.free.clear();
        self.free.extend((0..self.slots.len()).map(Idx::from_usize));
        released
    }

    /// Doubles the slot vector, queueing the new indices as free.
    fn grow(&mut self) {
        let old = self.slots.len();
        let max = Idx::max_slots();
        let new = if old == 0 {
            DEFAULT_CAPACITY.min(max)
        } else {
            old.saturating_mul(2).min(max)
        };
        assert!(new > old, "capacity overflow");

        self.slots.resize_with(new, Slot::vacant);
        self.free.extend((old..new).map(Idx::from_usize));

        log::trace!("pooled list arena grew from {old} to {new} slots");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena(capacity: usize) -> Arena<u64, u32> {
        Arena::with_capacity(capacity)
    }

    // =========================================================================
    // Construction
    // =========================================================================

    #[test]
    fn with_capacity_queues_every_slot() {
        let arena = arena(8);
        assert_eq!(arena.capacity(), 8);
        assert_eq!(arena.free_len(), 8);
        assert_eq!(arena.occupied_len(), 0);
        assert!(arena.slots.iter().all(|slot| !slot.is_occupied()));
    }

    #[test]
    fn zero_capacity_grows_to_default() {
        let mut arena = arena(0);
        assert_eq!(arena.capacity(), 0);

        let idx = arena.allocate(7);
        assert_eq!(idx, 0);
        assert_eq!(arena.capacity(), DEFAULT_CAPACITY);
        assert_eq!(arena.occupied_len(), 1);
    }

    // =========================================================================
    // Allocate / release
    // =========================================================================

    #[test]
    fn allocate_in_ascending_order() {
        let mut arena = arena(4);
        let got: Vec<u32> = (0..4).map(|v| arena.allocate(v)).collect();
        assert_eq!(got, vec![0, 1, 2, 3]);
        assert_eq!(arena.free_len(), 0);
        assert_eq!(arena.slot(2).value, Some(2));
    }

    #[test]
    fn release_bumps_generation_and_drops_value() {
        let mut arena = arena(4);
        let idx = arena.allocate(42);
        assert_eq!(arena.slot(idx).generation, 0);

        assert_eq!(arena.release(idx), Some(42));
        assert_eq!(arena.slot(idx).generation, 1);
        assert!(arena.slot(idx).value.is_none());
        assert_eq!(arena.free_len(), 4);
    }

    #[test]
    fn released_slot_is_reused_last() {
        let mut arena = arena(4);
        let first = arena.allocate(1);
        arena.release(first);

        // FIFO: the three never-used slots come out before the recycled one.
        let order: Vec<u32> = (0..4).map(|v| arena.allocate(v)).collect();
        assert_eq!(order, vec![1, 2, 3, 0]);
        assert_eq!(arena.slot(0).generation, 1);
    }

    #[test]
    fn release_drops_value() {
        use std::rc::Rc;

        let shared = Rc::new(());
        let mut arena: Arena<Rc<()>, u32> = Arena::with_capacity(2);
        let idx = arena.allocate(shared.clone());
        assert_eq!(Rc::strong_count(&shared), 2);

        drop(arena.release(idx));
        assert_eq!(Rc::strong_count(&shared), 1);
    }

    // =========================================================================
    // Growth
    // =========================================================================

    #[test]
    fn grow_doubles_and_keeps_values() {
        let mut arena = arena(2);
        let a = arena.allocate(10);
        let b = arena.allocate(20);
        let c = arena.allocate(30);

        assert_eq!(arena.capacity(), 4);
        assert_eq!(c, 2);
        assert_eq!(arena.slot(a).value, Some(10));
        assert_eq!(arena.slot(b).value, Some(20));
        assert_eq!(arena.free_len(), 1);
    }

    #[test]
    fn grow_clamps_to_index_maximum() {
        let mut arena: Arena<u8, u16> = Arena::with_capacity(40_000);
        for _ in 0..40_001 {
            arena.allocate(0);
        }
        assert_eq!(arena.capacity(), u16::max_slots());
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn grow_past_index_maximum_panics() {
        let mut arena: Arena<(), u16> = Arena::with_capacity(u16::max_slots());
        for _ in 0..=u16::max_slots() {
            arena.allocate(());
        }
    }

    // =========================================================================
    // Reset
    // =========================================================================

    #[test]
    fn reset_releases_occupied_only() {
        let mut arena = arena(4);
        let a = arena.allocate(1);
        let b = arena.allocate(2);
        arena.release(a);

        assert_eq!(arena.reset(), 1);
        assert_eq!(arena.slot(a).generation, 1);
        assert_eq!(arena.slot(b).generation, 1);
        assert_eq!(arena.free_len(), 4);
        assert_eq!(arena.free.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    }
}
