//! Configuration for the isomorphism search.
//!
//! This module exposes a small, stable surface for consumers (for example,
//! the `isomotif_counter` crate) to parameterize how matching should behave.
//!
//! The two main concepts are:
//! - vertex_order: how the matcher picks a starting vertex when no unmatched
//!   vertex is adjacent to the current partial mapping.
//! - call_limit: an optional budget on the number of search states entered.
//!
//! Quick examples
//!
//! Index order, unbounded (default behavior):
//! ```ignore
//! use isomotif_common::MatchConfig;
//! let cfg = MatchConfig::default();
//! ```
//!
//! Degree order with a budget of ten thousand states:
//! ```ignore
//! use isomotif_common::MatchConfig;
//! let cfg = MatchConfig::degree_order().with_call_limit(10_000);
//! ```

use serde::{Deserialize, Serialize};

/// Global search configuration.
///
/// - vertex_order:
///     - Index  => when the frontier is empty, take the lowest unmatched index.
///     - Degree => when the frontier is empty, follow a static order computed
///       once per search (breadth first from the highest degree vertex of each
///       component).
/// - call_limit:
///     - None     => search until a mapping is found or the tree is exhausted.
///     - Some(n)  => give up after entering `n` search states.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// How the matcher seeds a new component of the mapping.
    pub vertex_order: VertexOrder,
    /// Maximum number of search states to visit before giving up.
    pub call_limit: Option<usize>,
}

impl MatchConfig {
    /// Create a new configuration.
    pub const fn new(vertex_order: VertexOrder, call_limit: Option<usize>) -> Self {
        Self {
            vertex_order,
            call_limit,
        }
    }

    /// Convenience: plain index order, no budget.
    pub const fn index_order() -> Self {
        Self::new(VertexOrder::Index, None)
    }

    /// Convenience: static degree order, no budget.
    pub const fn degree_order() -> Self {
        Self::new(VertexOrder::Degree, None)
    }

    /// Bound the search to at most `limit` visited states.
    #[must_use]
    pub const fn with_call_limit(mut self, limit: usize) -> Self {
        self.call_limit = Some(limit);
        self
    }
}

/// Control how the matcher picks a vertex when the frontier is empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VertexOrder {
    /// Lowest unmatched vertex index first.
    #[default]
    Index,
    /// Precomputed breadth-first order, highest degree first.
    Degree,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unbounded_index_order() {
        let cfg = MatchConfig::default();
        assert_eq!(cfg.vertex_order, VertexOrder::Index);
        assert_eq!(cfg.call_limit, None);
        assert_eq!(cfg, MatchConfig::index_order());
    }

    #[test]
    fn builder_sets_limit() {
        let cfg = MatchConfig::degree_order().with_call_limit(42);
        assert_eq!(cfg.vertex_order, VertexOrder::Degree);
        assert_eq!(cfg.call_limit, Some(42));
    }

    #[test]
    fn config_round_trips_through_json() {
        let cfg = MatchConfig::degree_order().with_call_limit(7);
        let text = serde_json::to_string(&cfg).unwrap();
        let back: MatchConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(cfg, back);
    }
}
