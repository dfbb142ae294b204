//! VF2 graph isomorphism.
//!
//! The search extends a partial vertex bijection one pair at a time, always
//! preferring vertices adjacent to the already matched core, and prunes each
//! candidate with a one-step look-ahead over the unmatched neighborhood. See
//! [`MatchState`] for the incremental bookkeeping and [`Vf2Tester`] for the
//! entry point.
//!
//! ```ignore
//! use isomotif_common::SimpleGraph;
//!
//! let triangle = SimpleGraph::from_edges(false, 3, [(0, 1), (1, 2), (2, 0)])?;
//! let path = SimpleGraph::from_edges(false, 3, [(0, 1), (1, 2)])?;
//! assert!(isomotif_vf2::are_isomorphic(&triangle, &triangle));
//! assert!(!isomotif_vf2::are_isomorphic(&triangle, &path));
//! ```

mod compat;
mod error;
mod order;
mod search;
mod state;
mod tester;

use indexmap::IndexMap;

use isomotif_common::{Graph, Vertex};

pub use compat::{AnyVertex, VertexCompat};
pub use error::SearchError;
pub use state::{MatchArrays, MatchState};
pub use tester::{IsomorphismTester, Vf2Tester};

/// A vertex bijection, `G1` vertex to `G2` vertex, in ascending `G1` order.
pub type VertexMapping = IndexMap<Vertex, Vertex>;

/// Whether `g1` and `g2` are isomorphic, using the default [`Vf2Tester`].
pub fn are_isomorphic<G1, G2>(g1: &G1, g2: &G2) -> bool
where
    G1: Graph,
    G2: Graph<EdgeType = G1::EdgeType>,
{
    Vf2Tester::new().are_isomorphic(g1, g2)
}

/// An isomorphism from `g1` to `g2`, or an empty mapping if there is none.
pub fn find_isomorphism<G1, G2>(g1: &G1, g2: &G2) -> VertexMapping
where
    G1: Graph,
    G2: Graph<EdgeType = G1::EdgeType>,
{
    Vf2Tester::new().find_isomorphism(g1, g2)
}
