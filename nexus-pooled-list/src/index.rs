//! Sentinel-based slot index trait.
//!
//! Links between slots are stored as plain integers. A reserved sentinel
//! value (`MAX`) stands in for "no slot" instead of `Option<Idx>`, which
//! keeps arena slots compact.

/// A copyable slot index with a sentinel "none" value.
///
/// The sentinel is never handed out as a real slot, so an arena indexed by
/// `Idx` holds at most `Idx::NONE.as_usize()` slots.
///
/// # Example
///
/// ```
/// use nexus_pooled_list::Index;
///
/// let idx: u32 = 5;
/// let none: u32 = u32::NONE;
///
/// assert!(idx.is_some());
/// assert!(none.is_none());
/// assert_eq!(u16::max_slots(), u16::MAX as usize);
/// ```
pub trait Index: Copy + Eq + core::hash::Hash + core::fmt::Debug {
    /// Sentinel value representing "no slot".
    const NONE: Self;

    /// Returns `true` if this is the sentinel value.
    #[inline]
    fn is_none(self) -> bool {
        self == Self::NONE
    }

    /// Returns `true` if this is not the sentinel value.
    #[inline]
    fn is_some(self) -> bool {
        !self.is_none()
    }

    /// Returns the index as a `usize` for slot addressing.
    fn as_usize(self) -> usize;

    /// Creates an index from a `usize` slot position.
    ///
    /// Callers must keep `val` below [`Index::max_slots`].
    fn from_usize(val: usize) -> Self;

    /// Largest number of slots addressable with this index type.
    #[inline]
    fn max_slots() -> usize {
        Self::NONE.as_usize()
    }
}

macro_rules! impl_index_for_unsigned {
    ($($ty:ty),*) => {
        $(
            impl Index for $ty {
                const NONE: Self = <$ty>::MAX;

                #[inline]
                fn as_usize(self) -> usize {
                    self as usize
                }

                #[inline]
                fn from_usize(val: usize) -> Self {
                    debug_assert!(val < <$ty>::MAX as usize, "slot index collides with sentinel");
                    val as Self
                }
            }
        )*
    };
}

impl_index_for_unsigned!(u16, u32, u64, usize);
