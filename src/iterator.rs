use crate::config::IteratorConfig;
use crate::error::Result;
use tracing::debug;

/// Returned by [`SearchIterator::get_next`] once all results have been read.
///
/// No tree can hold `usize::MAX` points, so this never collides with a point index.
pub const END: usize = usize::MAX;

/// Reusable buffer of point indices filled by a search.
///
/// A search clears the iterator before collecting, but keeps its allocation, so
/// passing the same iterator to every search of a simulation step avoids
/// reallocating once the buffer has grown to the typical result size.
///
/// Results can be read with the sentinel-style [`get_next`](Self::get_next), through
/// the [`Iterator`] implementation, or all at once with [`as_slice`](Self::as_slice).
/// The first two share a read cursor that [`rewind`](Self::rewind) resets.
#[derive(Debug)]
pub struct SearchIterator {
    data: Vec<usize>,
    current: usize,
    config: IteratorConfig,
}

impl Default for SearchIterator {
    fn default() -> Self {
        Self::new()
    }
}

// A derived clone would trim the buffer to its length.
impl Clone for SearchIterator {
    fn clone(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.capacity().max(self.config.initial_capacity));
        data.extend_from_slice(&self.data);
        Self {
            data,
            current: self.current,
            config: self.config,
        }
    }
}

impl SearchIterator {
    pub fn new() -> Self {
        let config = IteratorConfig::default();
        Self {
            data: Vec::with_capacity(config.initial_capacity),
            current: 0,
            config,
        }
    }

    pub fn with_config(config: IteratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            data: Vec::with_capacity(config.initial_capacity),
            current: 0,
            config,
        })
    }

    pub fn config(&self) -> &IteratorConfig {
        &self.config
    }

    /// Returns the next index, or [`END`] when exhausted. Calling it again after the
    /// end keeps returning [`END`].
    pub fn get_next(&mut self) -> usize {
        self.next().unwrap_or(END)
    }

    /// Moves the read cursor back to the first result.
    pub fn rewind(&mut self) {
        self.current = 0;
    }

    /// Sorts the results in ascending order. Subsequent reads follow the new order.
    pub fn sort(&mut self) {
        self.data.sort_unstable();
    }

    /// Number of collected indices.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of indices the buffer can hold before growing.
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Number of results not yet read through the cursor.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.current
    }

    /// All collected indices, regardless of the read cursor.
    pub fn as_slice(&self) -> &[usize] {
        &self.data
    }

    /// Iterates over all collected indices without touching the read cursor.
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, usize>> {
        self.data.iter().copied()
    }

    /// Empties the iterator for reuse; the capacity is retained.
    pub(crate) fn reset(&mut self) {
        self.data.clear();
        self.current = 0;
    }

    pub(crate) fn push(&mut self, value: usize) {
        let capacity = self.data.capacity();
        if self.data.len() == capacity {
            let grown = self.config.grow(capacity);
            debug!(from = capacity, to = grown, "growing search iterator");
            self.data.reserve_exact(grown - self.data.len());
        }
        self.data.push(value);
    }
}

impl Iterator for SearchIterator {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.data.get(self.current).copied()?;
        self.current += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}

impl<'a> IntoIterator for &'a SearchIterator {
    type Item = usize;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, usize>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ITERATOR_INITIAL_CAPACITY;

    fn filled(values: &[usize]) -> SearchIterator {
        let mut iter = SearchIterator::new();
        for &v in values {
            iter.push(v);
        }
        iter
    }

    #[test]
    fn test_clone_keeps_capacity() {
        let mut iter = filled(&[7, 3, 5]);
        assert_eq!(iter.get_next(), 7);
        let mut copy = iter.clone();
        assert_eq!(copy.capacity(), iter.capacity());
        assert_eq!(copy.as_slice(), &[7, 3, 5]);
        assert_eq!(copy.get_next(), 3);

        let mut grown = SearchIterator::new();
        for i in 0..120 {
            grown.push(i);
        }
        assert!(grown.clone().capacity() >= 120);

        copy.reset();
        for i in 0..3 {
            copy.push(i);
        }
        assert_eq!(copy.capacity(), ITERATOR_INITIAL_CAPACITY);
    }

    #[test]
    fn test_end_is_idempotent() {
        let mut iter = filled(&[4, 2]);
        assert_eq!(iter.get_next(), 4);
        assert_eq!(iter.get_next(), 2);
        for _ in 0..5 {
            assert_eq!(iter.get_next(), END);
        }
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_empty_iterator() {
        let mut iter = SearchIterator::new();
        assert!(iter.is_empty());
        assert_eq!(iter.get_next(), END);
        assert_eq!(iter.capacity(), 50);
    }

    #[test]
    fn test_rewind_repeats_sequence() {
        let mut iter = filled(&[9, 1, 5, 3]);
        let first: Vec<usize> = iter.by_ref().collect();
        iter.rewind();
        let second: Vec<usize> = iter.by_ref().collect();
        assert_eq!(first, vec![9, 1, 5, 3]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_sort_then_rewind() {
        let mut iter = filled(&[9, 1, 5, 3, 1]);
        assert_eq!(iter.get_next(), 9);
        iter.sort();
        iter.rewind();
        let sorted: Vec<usize> = iter.by_ref().collect();
        assert_eq!(sorted, vec![1, 1, 3, 5, 9]);
    }

    #[test]
    fn test_growth_doubles_and_keeps_contents() {
        let mut iter = SearchIterator::new();
        for i in 0..50 {
            iter.push(i);
        }
        assert_eq!(iter.capacity(), 50);
        assert_eq!(iter.get_next(), 0);
        iter.push(50);
        assert!(iter.capacity() >= 100);
        assert_eq!(iter.len(), 51);
        assert_eq!(iter.get_next(), 1);
        assert_eq!(iter.as_slice(), (0..51).collect::<Vec<_>>().as_slice());
    }

    #[test]
    fn test_reset_keeps_capacity() {
        let mut iter = filled(&(0..500).collect::<Vec<_>>());
        let capacity = iter.capacity();
        iter.get_next();
        iter.reset();
        assert!(iter.is_empty());
        assert_eq!(iter.remaining(), 0);
        assert_eq!(iter.capacity(), capacity);
    }

    #[test]
    fn test_custom_config() {
        let config = IteratorConfig::default()
            .with_initial_capacity(1)
            .with_growth_ratio(3.0);
        let mut iter = SearchIterator::with_config(config).unwrap();
        assert_eq!(iter.capacity(), 1);
        iter.push(0);
        iter.push(1);
        assert!(iter.capacity() >= 3);
        assert!(SearchIterator::with_config(config.with_growth_ratio(0.5)).is_err());
    }

    #[test]
    fn test_borrowing_iteration_ignores_cursor() {
        let mut iter = filled(&[3, 4]);
        iter.get_next();
        let all: Vec<usize> = (&iter).into_iter().collect();
        assert_eq!(all, vec![3, 4]);
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.remaining(), 1);
    }
}
