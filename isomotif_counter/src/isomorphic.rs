use std::num::NonZeroUsize;

use indexmap::IndexMap;
use tracing::{debug, warn};

use isomotif_common::Graph;
use isomotif_vf2::{IsomorphismTester, SearchError, Vf2Tester};

use crate::Counter;

/// Bucket key: `(order, size)`.
type Shape = (usize, usize);

/// Counts graphs by isomorphism class.
///
/// Graphs are first bucketed by order and size, so the isomorphism tester
/// only runs against representatives that could possibly match. Within a
/// bucket the first graph seen of each class becomes its representative.
///
/// In the closed mode created by [`IsomorphicGraphCounter::with_motifs`] only
/// the seeded classes are counted; any other graph is refused.
///
/// A graph is also refused when the tester cannot decide a comparison within
/// its budget, so a class is never split across two representatives.
#[derive(Clone, Debug)]
pub struct IsomorphicGraphCounter<G, T = Vf2Tester> {
    tester: T,
    buckets: IndexMap<Shape, Vec<(G, usize)>>,
    sum: usize,
    allow_new_motifs: bool,
}

impl<G: Graph> IsomorphicGraphCounter<G> {
    /// An open counter using the default VF2 tester.
    pub fn new() -> Self {
        Self::with_tester(Vf2Tester::new())
    }

    /// A closed counter over `motifs`, using the default VF2 tester.
    pub fn with_motifs(motifs: impl IntoIterator<Item = G>) -> Self {
        Self::with_motifs_and_tester(motifs, Vf2Tester::new())
    }
}

impl<G: Graph> Default for IsomorphicGraphCounter<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G, T> IsomorphicGraphCounter<G, T>
where
    G: Graph,
    T: IsomorphismTester<G>,
{
    /// An open counter using `tester`.
    pub fn with_tester(tester: T) -> Self {
        Self {
            tester,
            buckets: IndexMap::new(),
            sum: 0,
            allow_new_motifs: true,
        }
    }

    /// A closed counter over `motifs`, using `tester`.
    ///
    /// Each motif is registered with a count of 0; isomorphic duplicates
    /// collapse into one class.
    pub fn with_motifs_and_tester(motifs: impl IntoIterator<Item = G>, tester: T) -> Self {
        let mut counter = Self {
            tester,
            buckets: IndexMap::new(),
            sum: 0,
            allow_new_motifs: false,
        };
        for motif in motifs {
            counter.add_initial(motif);
        }
        counter
    }

    /// Register `graph` as a class with a count of 0.
    ///
    /// Does nothing if an isomorphic class already exists, or if the tester
    /// gives up before telling. Never changes [`Counter::sum`].
    pub fn add_initial(&mut self, graph: G) {
        let shape = shape(&graph);
        match self.locate(shape, &graph) {
            Ok(None) => self.insert(shape, graph, 0),
            Ok(Some(_)) => {}
            Err(e) => warn!("Motif of order {} not registered: {}", shape.0, e),
        }
    }

    /// Whether graphs outside the registered classes are accepted.
    pub const fn allows_new_motifs(&self) -> bool {
        self.allow_new_motifs
    }

    /// The isomorphism tester in use.
    pub const fn tester(&self) -> &T {
        &self.tester
    }

    /// The stored representative of `graph`'s class, if any.
    ///
    /// `None` also when the tester gives up before finding the class.
    pub fn representative(&self, graph: &G) -> Option<&G> {
        let shape = shape(graph);
        let idx = self.locate(shape, graph).ok().flatten()?;
        self.buckets.get(&shape).map(|bucket| &bucket[idx].0)
    }

    /// Add `n` occurrences of `graph`, surfacing an inconclusive comparison.
    ///
    /// Returns the class count after the update, or 0 if the closed motif set
    /// refused the graph.
    ///
    /// # Errors
    ///
    /// Returns the tester's [`SearchError`] if a comparison against a stored
    /// representative ended without a verdict. Nothing is counted then.
    pub fn try_count(&mut self, graph: G, n: NonZeroUsize) -> Result<usize, SearchError> {
        let n = n.get();
        let shape = shape(&graph);
        if let Some(idx) = self.locate(shape, &graph)? {
            let Some(slot) = self.buckets.get_mut(&shape).and_then(|b| b.get_mut(idx)) else {
                return Ok(0);
            };
            slot.1 += n;
            self.sum += n;
            tracing::event!(
                tracing::Level::TRACE,
                "Counted graph of order {} into existing class, now {}",
                shape.0,
                slot.1
            );
            return Ok(slot.1);
        }
        if !self.allow_new_motifs {
            tracing::event!(
                tracing::Level::TRACE,
                "Refused graph of order {} and size {} outside the motif set",
                shape.0,
                shape.1
            );
            return Ok(0);
        }
        self.sum += n;
        self.insert(shape, graph, n);
        Ok(n)
    }

    /// Index of `graph`'s class within its bucket.
    fn locate(&self, shape: Shape, graph: &G) -> Result<Option<usize>, SearchError> {
        let Some(bucket) = self.buckets.get(&shape) else {
            return Ok(None);
        };
        for (idx, (rep, _)) in bucket.iter().enumerate() {
            if self.tester.try_are_isomorphic(graph, rep)? {
                return Ok(Some(idx));
            }
        }
        Ok(None)
    }

    fn insert(&mut self, shape: Shape, graph: G, n: usize) {
        let bucket = self.buckets.entry(shape).or_default();
        bucket.push((graph, n));
        debug!(
            "New isomorphism class in bucket (order={}, size={}); {} class(es) there now",
            shape.0,
            shape.1,
            bucket.len()
        );
    }
}

fn shape<G: Graph>(graph: &G) -> Shape {
    (graph.order(), graph.size())
}

impl<G, T> Counter<G> for IsomorphicGraphCounter<G, T>
where
    G: Graph,
    T: IsomorphismTester<G>,
{
    fn count_nonzero(&mut self, graph: G, n: NonZeroUsize) -> usize {
        let order = graph.order();
        self.try_count(graph, n).unwrap_or_else(|e| {
            warn!("Refused graph of order {}: {}", order, e);
            0
        })
    }

    fn get_count(&self, graph: &G) -> usize {
        let shape = shape(graph);
        self.locate(shape, graph)
            .ok()
            .flatten()
            .and_then(|idx| self.buckets.get(&shape).map(|b| b[idx].1))
            .unwrap_or(0)
    }

    fn iter<'a>(&'a self) -> impl Iterator<Item = (&'a G, usize)> + 'a
    where
        G: 'a,
    {
        self.buckets
            .values()
            .flatten()
            .map(|(graph, n)| (graph, *n))
    }

    fn reset(&mut self) {
        self.buckets.clear();
        self.sum = 0;
    }

    fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    fn sum(&self) -> usize {
        self.sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isomotif_common::SimpleGraph;

    fn triangle(labels: [usize; 3]) -> SimpleGraph {
        let [a, b, c] = labels;
        SimpleGraph::from_edges(false, 3, [(a, b), (b, c), (c, a)]).unwrap()
    }

    fn path3() -> SimpleGraph {
        SimpleGraph::from_edges(false, 3, [(0, 1), (1, 2)]).unwrap()
    }

    #[test]
    fn isomorphic_copies_share_a_class() {
        let mut c = IsomorphicGraphCounter::new();
        assert_eq!(c.count(triangle([0, 1, 2])), 1);
        assert_eq!(c.count(triangle([2, 0, 1])), 2);
        assert_eq!(c.count(path3()), 1);
        assert_eq!(c.len(), 2);
        assert_eq!(c.sum(), 3);
        assert_eq!(c.buckets.len(), 2);
    }

    #[test]
    fn same_shape_classes_share_a_bucket() {
        let star = SimpleGraph::from_edges(false, 4, [(0, 1), (0, 2), (0, 3)]).unwrap();
        let path = SimpleGraph::from_edges(false, 4, [(0, 1), (1, 2), (2, 3)]).unwrap();
        let mut c = IsomorphicGraphCounter::new();
        c.count(star.clone());
        c.count(path);
        c.count(star.relabel(&[3, 2, 1, 0]).unwrap());
        assert_eq!(c.buckets.len(), 1);
        assert_eq!(c.len(), 2);
        assert_eq!(c.get_count(&star), 2);
        assert_eq!(c.max(), Some(&star));
    }

    #[test]
    fn representative_is_first_seen() {
        let first = triangle([0, 1, 2]);
        let mut c = IsomorphicGraphCounter::new();
        c.count(first.clone());
        c.count(triangle([1, 2, 0]));
        assert_eq!(c.representative(&triangle([2, 1, 0])), Some(&first));
        assert_eq!(c.representative(&path3()), None);
    }

    #[test]
    fn seeding_twice_keeps_one_class() {
        let mut c = IsomorphicGraphCounter::with_motifs([triangle([0, 1, 2])]);
        c.add_initial(triangle([1, 0, 2]));
        assert_eq!(c.len(), 1);
        assert_eq!(c.sum(), 0);
        assert!(!c.allows_new_motifs());
    }
}
