//! Error types for pooled list operations.

/// Errors surfaced by [`PooledList`](crate::PooledList) and
/// [`Cursor`](crate::Cursor).
///
/// Every failing operation leaves the list untouched. The handle or cursor
/// that produced `InvalidHandle` / `ConcurrentModification` is dead and
/// should be discarded rather than retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    /// The handle's node has been removed (its slot was released and its
    /// generation moved on), or the handle was issued by another list.
    #[error("handle refers to a removed node or to another list")]
    InvalidHandle,

    /// The node a cursor was positioned on was removed before the cursor
    /// advanced past it.
    #[error("node under the cursor was removed during iteration")]
    ConcurrentModification,

    /// A bulk copy destination cannot hold the list past `offset`.
    #[error("destination of length {len} cannot hold {required} values at offset {offset}")]
    OutOfRange {
        /// Requested start position in the destination.
        offset: usize,
        /// Number of values that had to be written.
        required: usize,
        /// Destination length.
        len: usize,
    },

    /// Requested capacity cannot be addressed by the list's index type.
    #[error("capacity {requested} exceeds index type maximum {max}")]
    CapacityOverflow {
        /// Capacity that was asked for.
        requested: usize,
        /// Largest capacity the index type supports.
        max: usize,
    },
}
