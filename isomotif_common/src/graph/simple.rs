use std::hash::Hash;

use indexmap::IndexMap;

use super::adjacency::Adjacency;
use super::{Graph, Vertex, check_permutation};
use crate::GraphError;

const UNTYPED: &() = &();

/// A directed or undirected graph with at most one edge per vertex pair.
///
/// Edges are untyped; [`Graph::edge_types`] yields `()` once per edge.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SimpleGraph {
    adj: Adjacency,
    size: usize,
}

impl SimpleGraph {
    /// An undirected graph with `order` isolated vertices.
    pub fn undirected(order: usize) -> Self {
        Self {
            adj: Adjacency::new(false, order),
            size: 0,
        }
    }

    /// A directed graph with `order` isolated vertices.
    pub fn directed(order: usize) -> Self {
        Self {
            adj: Adjacency::new(true, order),
            size: 0,
        }
    }

    /// Build a graph of the given order from an edge list.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexOutOfRange`] if any endpoint is not in
    /// `0..order`.
    pub fn from_edges(
        directed: bool,
        order: usize,
        edges: impl IntoIterator<Item = (Vertex, Vertex)>,
    ) -> Result<Self, GraphError> {
        let mut g = if directed {
            Self::directed(order)
        } else {
            Self::undirected(order)
        };
        for (u, v) in edges {
            g.add_edge(u, v)?;
        }
        Ok(g)
    }

    /// Build a graph from edges over arbitrary labels.
    ///
    /// Labels receive contiguous indices in first-seen order. The returned
    /// table maps each index back to its label.
    pub fn from_labeled_edges<L>(
        directed: bool,
        edges: impl IntoIterator<Item = (L, L)>,
    ) -> (Self, Vec<L>)
    where
        L: Hash + Eq + Clone,
    {
        let mut ids: IndexMap<L, Vertex> = IndexMap::new();
        let mut g = if directed {
            Self::directed(0)
        } else {
            Self::undirected(0)
        };
        for (a, b) in edges {
            let u = g.intern(&mut ids, a);
            let v = g.intern(&mut ids, b);
            g.link(u, v);
        }
        (g, ids.into_keys().collect())
    }

    fn intern<L: Hash + Eq>(&mut self, ids: &mut IndexMap<L, Vertex>, label: L) -> Vertex {
        if let Some(&v) = ids.get(&label) {
            return v;
        }
        let v = self.adj.add_vertex();
        ids.insert(label, v);
        v
    }

    /// Append an isolated vertex and return its index.
    pub fn add_vertex(&mut self) -> Vertex {
        self.adj.add_vertex()
    }

    /// Add the edge `u -> v` (`u - v` if undirected).
    ///
    /// Returns `Ok(false)` if the edge was already present.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexOutOfRange`] if either endpoint is not a
    /// vertex of this graph.
    pub fn add_edge(&mut self, u: Vertex, v: Vertex) -> Result<bool, GraphError> {
        self.adj.check(u)?;
        self.adj.check(v)?;
        Ok(self.link(u, v))
    }

    fn link(&mut self, u: Vertex, v: Vertex) -> bool {
        let fresh = self.adj.link(u, v);
        if fresh {
            self.size += 1;
        }
        fresh
    }

    /// Iterate every edge once (`u <= v` when undirected).
    pub fn edges(&self) -> impl Iterator<Item = (Vertex, Vertex)> + '_ {
        self.adj.pairs()
    }

    /// An isomorphic copy in which vertex `v` becomes `perm[v]`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidPermutation`] if `perm` is not a
    /// permutation of `0..order()`.
    pub fn relabel(&self, perm: &[Vertex]) -> Result<Self, GraphError> {
        check_permutation(perm, self.order())?;
        let mut g = Self {
            adj: Adjacency::new(self.adj.is_directed(), self.order()),
            size: 0,
        };
        for (u, v) in self.edges() {
            g.link(perm[u], perm[v]);
        }
        Ok(g)
    }
}

impl Graph for SimpleGraph {
    type EdgeType = ();

    fn order(&self) -> usize {
        self.adj.order()
    }

    fn size(&self) -> usize {
        self.size
    }

    fn is_directed(&self) -> bool {
        self.adj.is_directed()
    }

    fn contains(&self, u: Vertex, v: Vertex) -> bool {
        self.adj.contains(u, v)
    }

    fn neighbors(&self, v: Vertex) -> impl Iterator<Item = Vertex> + '_ {
        self.adj.neighbors(v)
    }

    fn successors(&self, v: Vertex) -> impl Iterator<Item = Vertex> + '_ {
        self.adj.successors(v)
    }

    fn predecessors(&self, v: Vertex) -> impl Iterator<Item = Vertex> + '_ {
        self.adj.predecessors(v)
    }

    fn edge_count_between(&self, u: Vertex, v: Vertex) -> usize {
        usize::from(self.adj.contains(u, v))
    }

    fn edge_types(&self, u: Vertex, v: Vertex) -> impl Iterator<Item = &()> + '_ {
        self.adj.contains(u, v).then_some(UNTYPED).into_iter()
    }
}
