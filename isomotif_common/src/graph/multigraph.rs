use std::fmt::Debug;
use std::hash::Hash;

use indexmap::IndexMap;

use super::adjacency::Adjacency;
use super::{Graph, Vertex, check_permutation};
use crate::GraphError;

/// A directed or undirected multigraph whose edges carry a type label.
///
/// Any number of parallel edges may join the same pair of vertices, including
/// several edges of the same type. [`Graph::size`] counts each of them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Multigraph<T> {
    adj: Adjacency,
    /// Parallel edge types keyed by [`Adjacency::key`].
    edges: IndexMap<(Vertex, Vertex), Vec<T>>,
    size: usize,
}

impl<T> Multigraph<T>
where
    T: Eq + Hash + Clone + Debug,
{
    /// An undirected multigraph with `order` isolated vertices.
    pub fn undirected(order: usize) -> Self {
        Self {
            adj: Adjacency::new(false, order),
            edges: IndexMap::new(),
            size: 0,
        }
    }

    /// A directed multigraph with `order` isolated vertices.
    pub fn directed(order: usize) -> Self {
        Self {
            adj: Adjacency::new(true, order),
            edges: IndexMap::new(),
            size: 0,
        }
    }

    /// Build a multigraph of the given order from typed edges `(u, v, type)`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexOutOfRange`] if any endpoint is not in
    /// `0..order`.
    pub fn from_edges(
        directed: bool,
        order: usize,
        edges: impl IntoIterator<Item = (Vertex, Vertex, T)>,
    ) -> Result<Self, GraphError> {
        let mut g = if directed {
            Self::directed(order)
        } else {
            Self::undirected(order)
        };
        for (u, v, ty) in edges {
            g.add_edge(u, v, ty)?;
        }
        Ok(g)
    }

    /// Build a multigraph from typed edges over arbitrary labels.
    ///
    /// Labels receive contiguous indices in first-seen order. The returned
    /// table maps each index back to its label.
    pub fn from_labeled_edges<L>(
        directed: bool,
        edges: impl IntoIterator<Item = (L, L, T)>,
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
        for (a, b, ty) in edges {
            let u = g.intern(&mut ids, a);
            let v = g.intern(&mut ids, b);
            g.link(u, v, ty);
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

    /// Add a parallel edge `u -> v` (`u - v` if undirected) of type `ty`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexOutOfRange`] if either endpoint is not a
    /// vertex of this graph.
    pub fn add_edge(&mut self, u: Vertex, v: Vertex, ty: T) -> Result<(), GraphError> {
        self.adj.check(u)?;
        self.adj.check(v)?;
        self.link(u, v, ty);
        Ok(())
    }

    fn link(&mut self, u: Vertex, v: Vertex, ty: T) {
        self.adj.link(u, v);
        self.edges.entry(self.adj.key(u, v)).or_default().push(ty);
        self.size += 1;
    }

    /// Iterate every typed edge once, in insertion order of vertex pairs.
    pub fn edges(&self) -> impl Iterator<Item = (Vertex, Vertex, &T)> + '_ {
        self.edges
            .iter()
            .flat_map(|(&(u, v), types)| types.iter().map(move |ty| (u, v, ty)))
    }

    /// The distinct edge types present anywhere in the graph.
    pub fn edge_type_set(&self) -> indexmap::IndexSet<&T> {
        self.edges.values().flatten().collect()
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
            edges: IndexMap::new(),
            size: 0,
        };
        for (u, v, ty) in self.edges() {
            g.link(perm[u], perm[v], ty.clone());
        }
        Ok(g)
    }
}

impl<T> Graph for Multigraph<T>
where
    T: Eq + Hash + Clone + Debug,
{
    type EdgeType = T;

    fn order(&self) -> usize {
        self.adj.order()
    }

    fn size(&self) -> usize {
        self.size
    }

    fn is_directed(&self) -> bool {
        self.adj.is_directed()
    }

    fn is_multigraph(&self) -> bool {
        true
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
        self.edges.get(&self.adj.key(u, v)).map_or(0, Vec::len)
    }

    fn edge_types(&self, u: Vertex, v: Vertex) -> impl Iterator<Item = &T> + '_ {
        self.edges
            .get(&self.adj.key(u, v))
            .into_iter()
            .flatten()
    }
}
