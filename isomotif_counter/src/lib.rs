//! Occurrence counting for graphs, up to isomorphism.
//!
//! [`IsomorphicGraphCounter`] is a motif frequency table: every counted graph
//! lands in the class of the first isomorphic graph seen before it. The
//! isomorphism decision is delegated to an
//! [`isomotif_vf2::IsomorphismTester`], VF2 by default.
//!
//! ```ignore
//! use isomotif_common::SimpleGraph;
//! use isomotif_counter::{Counter, IsomorphicGraphCounter};
//!
//! let mut motifs = IsomorphicGraphCounter::new();
//! motifs.count(SimpleGraph::from_edges(false, 3, [(0, 1), (1, 2)])?);
//! motifs.count(SimpleGraph::from_edges(false, 3, [(2, 0), (0, 1)])?);
//! assert_eq!(motifs.len(), 1);
//! assert_eq!(motifs.sum(), 2);
//! ```

mod counter;
mod error;
mod isomorphic;
mod object;

pub use counter::Counter;
pub use error::CounterError;
pub use isomorphic::IsomorphicGraphCounter;
pub use object::ObjectCounter;
