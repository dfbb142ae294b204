use std::hash::Hash;
use std::num::NonZeroUsize;

use indexmap::IndexMap;

use crate::Counter;

/// Counts items by equality.
///
/// Useful as a cheap per-worker tally that is later merged into an
/// [`crate::IsomorphicGraphCounter`] with [`Counter::add_all`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectCounter<T: Hash + Eq> {
    counts: IndexMap<T, usize>,
    sum: usize,
}

impl<T: Hash + Eq> ObjectCounter<T> {
    /// An empty counter.
    pub fn new() -> Self {
        Self {
            counts: IndexMap::new(),
            sum: 0,
        }
    }
}

impl<T: Hash + Eq> Default for ObjectCounter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Hash + Eq> FromIterator<T> for ObjectCounter<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut counter = Self::new();
        counter.count_all(iter);
        counter
    }
}

impl<T: Hash + Eq> Counter<T> for ObjectCounter<T> {
    fn count_nonzero(&mut self, item: T, n: NonZeroUsize) -> usize {
        self.sum += n.get();
        let slot = self.counts.entry(item).or_default();
        *slot += n.get();
        *slot
    }

    fn get_count(&self, item: &T) -> usize {
        self.counts.get(item).copied().unwrap_or(0)
    }

    fn iter<'a>(&'a self) -> impl Iterator<Item = (&'a T, usize)> + 'a
    where
        T: 'a,
    {
        self.counts.iter().map(|(item, &n)| (item, n))
    }

    fn reset(&mut self) {
        self.counts.clear();
        self.sum = 0;
    }

    fn len(&self) -> usize {
        self.counts.len()
    }

    fn sum(&self) -> usize {
        self.sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CounterError;

    #[test]
    fn counts_accumulate() {
        let mut c = ObjectCounter::new();
        assert_eq!(c.count("a"), 1);
        assert_eq!(c.count_n("a", 4), Ok(5));
        assert_eq!(c.count("b"), 1);
        assert_eq!(c.sum(), 6);
        assert_eq!(c.len(), 2);
        assert_eq!(c.get_count(&"c"), 0);
        assert!((c.get_frequency(&"b") - 1.0 / 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_count_is_rejected() {
        let mut c: ObjectCounter<u8> = ObjectCounter::new();
        assert_eq!(c.count_n(1, 0), Err(CounterError::InvalidCount(0)));
        assert!(c.is_empty());
        assert_eq!(c.sum(), 0);
    }

    #[test]
    fn extremes_prefer_first_seen() {
        let c: ObjectCounter<char> = "abbcca".chars().collect();
        assert_eq!(c.max(), Some(&'a'));
        assert_eq!(c.min(), Some(&'a'));
        let c: ObjectCounter<char> = "abbc".chars().collect();
        assert_eq!(c.max(), Some(&'b'));
        assert_eq!(c.min(), Some(&'a'));
        assert_eq!(c.items().collect::<String>(), "abc");
    }

    #[test]
    fn reset_clears_everything() {
        let mut c: ObjectCounter<u8> = [1, 2, 2].into_iter().collect();
        c.reset();
        assert!(c.is_empty());
        assert_eq!(c.sum(), 0);
        assert_eq!(c.max(), None);
        assert_eq!(c.get_frequency(&2), 0.0);
    }

    #[test]
    fn merging_adds_counts() {
        let mut a: ObjectCounter<&str> = ["x", "y"].into_iter().collect();
        let b: ObjectCounter<&str> = ["y", "z", "z"].into_iter().collect();
        a.add_all(&b);
        assert_eq!(a.get_count(&"y"), 2);
        assert_eq!(a.get_count(&"z"), 2);
        assert_eq!(a.sum(), 5);
    }
}
