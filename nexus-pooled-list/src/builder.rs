//! Construction options for [`PooledList`].

use crate::{DEFAULT_CAPACITY, Index, ListError, PooledList};

/// Builder for [`PooledList`].
///
/// The only knob today is the number of slots reserved up front. Unlike
/// [`PooledList::with_capacity`], building never panics: a capacity the
/// index type cannot address is reported as
/// [`ListError::CapacityOverflow`].
///
/// # Example
///
/// ```
/// use nexus_pooled_list::{ListBuilder, ListError, PooledList};
///
/// let list: PooledList<String> = ListBuilder::default().capacity(1024).build()?;
/// assert_eq!(list.capacity(), 1024);
///
/// let too_big = ListBuilder::default().capacity(100_000).build::<u8, u16>();
/// assert!(matches!(too_big, Err(ListError::CapacityOverflow { .. })));
/// # Ok::<(), ListError>(())
/// ```
#[derive(Clone, Debug)]
pub struct ListBuilder {
    capacity: usize,
}

impl Default for ListBuilder {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl ListBuilder {
    /// Number of slots to reserve before the first insertion.
    /// Default: [`DEFAULT_CAPACITY`]. Zero is allowed; the arena then grows
    /// on first insert.
    pub fn capacity(mut self, slots: usize) -> Self {
        self.capacity = slots;
        self
    }

    /// Builds an empty list.
    pub fn build<T, Idx: Index>(self) -> Result<PooledList<T, Idx>, ListError> {
        let max = Idx::max_slots();
        if self.capacity > max {
            return Err(ListError::CapacityOverflow {
                requested: self.capacity,
                max,
            });
        }

        Ok(PooledList::from_validated_capacity(self.capacity))
    }
}
