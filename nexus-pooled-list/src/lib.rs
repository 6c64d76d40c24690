//! Doubly-linked list backed by a recycled slot arena.
//!
//! Nodes are not heap-allocated one by one. They live in a single growable
//! slot vector owned by the list, links are slot indices, and removed slots
//! are queued for reuse. Callers refer to nodes through copyable
//! [`Handle`]s that are checked on every use.
//!
//! ```text
//! PooledList
//!   arena:  [ slot0 | slot1 | slot2 | slot3 ]   value, prev, next, generation
//!   free:   FIFO of unused slot indices
//!   head ──▶ slot2 ⇄ slot0 ⇄ slot3 ◀── tail
//! ```
//!
//! # Handles and generations
//!
//! Each slot carries a generation counter that is bumped whenever the slot
//! is released. A handle records the generation it was issued with, so a
//! handle to a removed node is rejected with [`ListError::InvalidHandle`]
//! even after the slot has been given to a new value. Handles also carry
//! the issuing list's [`ListId`]; using one with another list fails the
//! same way.
//!
//! # Quick Start
//!
//! ```
//! use nexus_pooled_list::{ListError, PooledList};
//!
//! let mut orders: PooledList<u64> = PooledList::with_capacity(1024);
//!
//! // Insert returns a handle for O(1) access later
//! let first = orders.push_back(100);
//! let second = orders.push_back(200);
//! orders.insert_after(first, 150)?;
//!
//! assert_eq!(orders.to_vec(), vec![100, 150, 200]);
//!
//! // O(1) removal from anywhere
//! assert_eq!(orders.remove(second)?, 200);
//! assert_eq!(orders.get(second), Err(ListError::InvalidHandle));
//! # Ok::<(), ListError>(())
//! ```
//!
//! # Traversal during mutation
//!
//! [`PooledList::iter`] borrows the list, so nothing can change underneath
//! it. A [`Cursor`] does not borrow the list between steps; it lets you
//! mutate mid-traversal and fails with [`ListError::ConcurrentModification`]
//! when the node it sits on was removed. The check is local to the cursor's
//! position, see [`iter`](crate::iter) for the exact limits.
//!
//! # Threading
//!
//! Single-threaded by design: no operation locks, blocks, or yields. Wrap
//! the list in your own lock if it is shared.

#![warn(missing_docs)]

mod arena;
mod builder;
mod error;
mod handle;
mod index;
pub mod iter;
mod list;

pub use arena::DEFAULT_CAPACITY;
pub use builder::ListBuilder;
pub use error::ListError;
pub use handle::{Handle, ListId};
pub use index::Index;
pub use iter::{Cursor, Handles, Iter, IterMut};
pub use list::PooledList;
