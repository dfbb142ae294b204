//! Error types for graph construction.

use thiserror::Error;

/// Errors raised while building or transforming a graph.
///
/// The matcher assumes vertices form the contiguous range `0..order()`; every
/// way of breaking that assumption is reported here instead of surfacing as a
/// wrong answer during search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A vertex argument was not in `0..order`.
    #[error("Vertex {vertex} is out of range for a graph of order {order}")]
    VertexOutOfRange {
        /// The offending vertex.
        vertex: usize,
        /// The order of the graph it was used with.
        order: usize,
    },

    /// A relabeling table was not a permutation of `0..order`.
    #[error("Relabeling of length {len} is not a permutation of 0..{order}")]
    InvalidPermutation {
        /// Length of the supplied table.
        len: usize,
        /// The order of the graph being relabeled.
        order: usize,
    },
}

impl GraphError {
    /// Create a vertex out of range error.
    pub const fn out_of_range(vertex: usize, order: usize) -> Self {
        Self::VertexOutOfRange { vertex, order }
    }

    /// Create an invalid permutation error.
    pub const fn invalid_permutation(len: usize, order: usize) -> Self {
        Self::InvalidPermutation { len, order }
    }
}
