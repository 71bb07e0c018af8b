use crate::error::{KdTreeError, Result};

/// Number of indices a fresh [`SearchIterator`](crate::SearchIterator) has room for.
pub const ITERATOR_INITIAL_CAPACITY: usize = 50;

/// Factor by which a full [`SearchIterator`](crate::SearchIterator) grows its buffer.
pub const ITERATOR_GROWTH_RATIO: f64 = 2.0;

/// Allocation policy of the result buffer used by searches.
///
/// The defaults start small and double on overflow, which keeps pushes amortized
/// O(1). Since a reused iterator never shrinks, the buffer quickly settles at the
/// size of the largest result set seen so far.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IteratorConfig {
    /// Capacity reserved when the iterator is created.
    pub initial_capacity: usize,
    /// Multiplier applied to the capacity each time the buffer is full.
    pub growth_ratio: f64,
}

impl Default for IteratorConfig {
    fn default() -> Self {
        Self {
            initial_capacity: ITERATOR_INITIAL_CAPACITY,
            growth_ratio: ITERATOR_GROWTH_RATIO,
        }
    }
}

impl IteratorConfig {
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    pub fn with_growth_ratio(mut self, growth_ratio: f64) -> Self {
        self.growth_ratio = growth_ratio;
        self
    }

    /// Checks that the policy can actually make progress when the buffer is full.
    pub fn validate(&self) -> Result<()> {
        if self.initial_capacity == 0 {
            return Err(KdTreeError::InvalidCapacity);
        }
        if !self.growth_ratio.is_finite() || self.growth_ratio <= 1.0 {
            return Err(KdTreeError::InvalidGrowthRatio(self.growth_ratio));
        }
        Ok(())
    }

    /// Capacity after one growth step, always at least one slot more than `current`.
    pub(crate) fn grow(&self, current: usize) -> usize {
        let grown = (current as f64 * self.growth_ratio).ceil() as usize;
        grown.max(current + 1)
    }
}
