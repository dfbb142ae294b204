//! The multiset counting contract shared by every counter in this crate.

use std::num::NonZeroUsize;

use crate::CounterError;

/// A multiset of `T` with per-item occurrence counts.
///
/// Implementors decide what "the same item" means: [`crate::ObjectCounter`]
/// uses equality, [`crate::IsomorphicGraphCounter`] uses graph isomorphism.
/// Iteration order is the order in which items were first stored.
pub trait Counter<T> {
    /// Add `n` occurrences of `item`.
    ///
    /// Returns the item's count after the update, or 0 if the counter refused
    /// the item. A refused item does not change [`Counter::sum`].
    fn count_nonzero(&mut self, item: T, n: NonZeroUsize) -> usize;

    /// Current count of `item`, 0 if it is not counted.
    fn get_count(&self, item: &T) -> usize;

    /// Every stored item with its count.
    fn iter<'a>(&'a self) -> impl Iterator<Item = (&'a T, usize)> + 'a
    where
        T: 'a;

    /// Forget every item and reset [`Counter::sum`] to 0.
    fn reset(&mut self);

    /// Number of distinct items stored.
    fn len(&self) -> usize;

    /// Total number of occurrences accepted since the last reset.
    fn sum(&self) -> usize;

    /// Add one occurrence of `item`.
    fn count(&mut self, item: T) -> usize {
        self.count_nonzero(item, NonZeroUsize::MIN)
    }

    /// Add `n` occurrences of `item`.
    ///
    /// # Errors
    ///
    /// Returns [`CounterError::InvalidCount`] if `n` is 0.
    fn count_n(&mut self, item: T, n: usize) -> Result<usize, CounterError> {
        let n = NonZeroUsize::new(n).ok_or(CounterError::InvalidCount(n))?;
        Ok(self.count_nonzero(item, n))
    }

    /// Add one occurrence of every item.
    fn count_all<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
        Self: Sized,
    {
        for item in items {
            self.count(item);
        }
    }

    /// Merge the counts of `other` into this counter.
    ///
    /// Items with a zero count in `other` are skipped.
    fn add_all<C>(&mut self, other: &C)
    where
        C: Counter<T> + ?Sized,
        T: Clone,
        Self: Sized,
    {
        for (item, n) in other.iter() {
            if let Some(n) = NonZeroUsize::new(n) {
                self.count_nonzero(item.clone(), n);
            }
        }
    }

    /// Share of [`Counter::sum`] held by `item`, 0 when nothing is counted.
    #[allow(clippy::cast_precision_loss)]
    fn get_frequency(&self, item: &T) -> f64 {
        match self.sum() {
            0 => 0.0,
            sum => self.get_count(item) as f64 / sum as f64,
        }
    }

    /// The stored items.
    fn items<'a>(&'a self) -> impl Iterator<Item = &'a T> + 'a
    where
        T: 'a,
    {
        self.iter().map(|(item, _)| item)
    }

    /// The item with the largest count. Ties go to the first stored.
    fn max(&self) -> Option<&T> {
        let mut best: Option<(&T, usize)> = None;
        for (item, n) in self.iter() {
            if best.is_none_or(|(_, m)| n > m) {
                best = Some((item, n));
            }
        }
        best.map(|(item, _)| item)
    }

    /// The item with the smallest count. Ties go to the first stored.
    fn min(&self) -> Option<&T> {
        let mut best: Option<(&T, usize)> = None;
        for (item, n) in self.iter() {
            if best.is_none_or(|(_, m)| n < m) {
                best = Some((item, n));
            }
        }
        best.map(|(item, _)| item)
    }

    /// Whether no item is stored. Seeded items with a count of 0 still count
    /// as stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
