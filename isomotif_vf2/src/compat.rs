//! Pluggable vertex compatibility.
//!
//! The matcher is purely structural by default. A [`VertexCompat`] hook lets a
//! caller veto individual vertex pairings (for example, by comparing vertex
//! labels kept alongside the graphs) before any edge is examined.

use isomotif_common::{Graph, Vertex};

/// Decide whether `v1` in `g1` may be mapped to `v2` in `g2`.
pub trait VertexCompat<G1: Graph, G2: Graph> {
    /// Return `false` to reject the pairing.
    fn compatible(&self, g1: &G1, v1: Vertex, g2: &G2, v2: Vertex) -> bool;
}

/// Accept every vertex pairing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnyVertex;

impl<G1: Graph, G2: Graph> VertexCompat<G1, G2> for AnyVertex {
    #[inline]
    fn compatible(&self, _: &G1, _: Vertex, _: &G2, _: Vertex) -> bool {
        true
    }
}

impl<G1, G2, F> VertexCompat<G1, G2> for F
where
    G1: Graph,
    G2: Graph,
    F: Fn(&G1, Vertex, &G2, Vertex) -> bool,
{
    #[inline]
    fn compatible(&self, g1: &G1, v1: Vertex, g2: &G2, v2: Vertex) -> bool {
        self(g1, v1, g2, v2)
    }
}
