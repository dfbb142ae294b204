//! The graph capability consumed by the matcher, and its concrete stores.

use std::fmt::Debug;
use std::hash::Hash;

use crate::GraphError;

mod adjacency;
mod multigraph;
mod simple;

pub use multigraph::Multigraph;
pub use simple::SimpleGraph;

/// Vertex identifier. Always in `0..order()`.
pub type Vertex = usize;

/// Read-only view of a graph as required by the isomorphism search.
///
/// Implementors guarantee that vertices are exactly `0..order()` and that for
/// undirected graphs `successors`, `predecessors` and `neighbors` all yield the
/// same adjacency. Query methods are total: out-of-range vertices behave as
/// isolated vertices with no edges.
pub trait Graph {
    /// Label carried by each edge. `()` for untyped graphs.
    type EdgeType: Eq + Hash + Clone + Debug;

    /// Number of vertices.
    fn order(&self) -> usize;

    /// Number of edges, counting every parallel edge of a multigraph.
    fn size(&self) -> usize;

    /// Whether edges have a direction.
    fn is_directed(&self) -> bool;

    /// Whether the graph may carry parallel typed edges.
    ///
    /// When either graph in a comparison reports `true`, the matcher also
    /// compares edge types between mapped endpoint pairs.
    fn is_multigraph(&self) -> bool {
        false
    }

    /// Whether at least one edge `u -> v` exists (`u - v` if undirected).
    fn contains(&self, u: Vertex, v: Vertex) -> bool;

    /// All vertices adjacent to `v`, regardless of direction, each once.
    fn neighbors(&self, v: Vertex) -> impl Iterator<Item = Vertex> + '_;

    /// Targets of edges leaving `v`.
    fn successors(&self, v: Vertex) -> impl Iterator<Item = Vertex> + '_;

    /// Sources of edges entering `v`.
    fn predecessors(&self, v: Vertex) -> impl Iterator<Item = Vertex> + '_;

    /// Number of parallel edges `u -> v`.
    fn edge_count_between(&self, u: Vertex, v: Vertex) -> usize;

    /// The type of each parallel edge `u -> v`, one item per edge.
    fn edge_types(&self, u: Vertex, v: Vertex) -> impl Iterator<Item = &Self::EdgeType> + '_;

    /// Number of distinct neighbors of `v`.
    fn degree(&self, v: Vertex) -> usize {
        self.neighbors(v).count()
    }
}

/// Check that `perm` is a permutation of `0..order`.
pub(crate) fn check_permutation(perm: &[Vertex], order: usize) -> Result<(), GraphError> {
    if perm.len() != order {
        return Err(GraphError::invalid_permutation(perm.len(), order));
    }
    let mut seen = vec![false; order];
    for &v in perm {
        match seen.get_mut(v) {
            Some(slot) if !*slot => *slot = true,
            _ => return Err(GraphError::invalid_permutation(perm.len(), order)),
        }
    }
    Ok(())
}
