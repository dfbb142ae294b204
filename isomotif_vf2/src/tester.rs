use tracing::warn;

use isomotif_common::{Graph, MatchConfig};

use crate::VertexMapping;
use crate::compat::{AnyVertex, VertexCompat};
use crate::error::SearchError;
use crate::search::Vf2Search;

/// Decides whether two graphs are isomorphic.
///
/// Implementations are interchangeable strategies; the motif counter takes
/// one as a type parameter.
pub trait IsomorphismTester<G1: Graph, G2: Graph = G1> {
    /// Whether a structure preserving bijection between `g1` and `g2` exists.
    fn are_isomorphic(&self, g1: &G1, g2: &G2) -> bool;

    /// One such bijection, keyed by `G1` vertex, or an empty mapping if there
    /// is none.
    fn find_isomorphism(&self, g1: &G1, g2: &G2) -> VertexMapping;

    /// Like [`IsomorphismTester::are_isomorphic`], but reports a search that
    /// ended without a verdict instead of reading it as "not isomorphic".
    ///
    /// # Errors
    ///
    /// Returns the [`SearchError`] that cut the search short. Testers without
    /// a budget never fail.
    fn try_are_isomorphic(&self, g1: &G1, g2: &G2) -> Result<bool, SearchError> {
        Ok(self.are_isomorphic(g1, g2))
    }
}

/// The VF2 isomorphism tester.
///
/// ```ignore
/// use isomotif_common::{MatchConfig, SimpleGraph};
/// use isomotif_vf2::{IsomorphismTester, Vf2Tester};
///
/// let tester = Vf2Tester::with_config(MatchConfig::degree_order());
/// let a = SimpleGraph::from_edges(false, 3, [(0, 1), (1, 2), (2, 0)])?;
/// let b = a.relabel(&[2, 0, 1])?;
/// assert!(tester.are_isomorphic(&a, &b));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Vf2Tester<C = AnyVertex> {
    config: MatchConfig,
    compat: C,
}

impl Vf2Tester {
    /// A purely structural tester with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// A purely structural tester with the given configuration.
    pub const fn with_config(config: MatchConfig) -> Self {
        Self {
            config,
            compat: AnyVertex,
        }
    }
}

impl<C> Vf2Tester<C> {
    /// Replace the vertex compatibility hook.
    pub fn with_vertex_compat<D>(self, compat: D) -> Vf2Tester<D> {
        Vf2Tester {
            config: self.config,
            compat,
        }
    }

    /// The search configuration.
    pub const fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Search for an isomorphism, reporting whether the search completed.
    ///
    /// Returns `Ok(None)` when the graphs are not isomorphic. Two empty graphs
    /// are isomorphic under the empty mapping.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::CallLimitExceeded`] if the configured budget runs
    /// out before a verdict is reached.
    pub fn try_find_isomorphism<G1, G2>(
        &self,
        g1: &G1,
        g2: &G2,
    ) -> Result<Option<VertexMapping>, SearchError>
    where
        G1: Graph,
        G2: Graph<EdgeType = G1::EdgeType>,
        C: VertexCompat<G1, G2>,
    {
        Vf2Search::new(g1, g2, &self.compat, &self.config).run()
    }
}

impl<G1, G2, C> IsomorphismTester<G1, G2> for Vf2Tester<C>
where
    G1: Graph,
    G2: Graph<EdgeType = G1::EdgeType>,
    C: VertexCompat<G1, G2>,
{
    /// A search that runs out of budget counts as "not isomorphic".
    fn are_isomorphic(&self, g1: &G1, g2: &G2) -> bool {
        match self.try_find_isomorphism(g1, g2) {
            Ok(found) => found.is_some(),
            Err(e) => {
                warn!("Treating inconclusive search as non-isomorphic: {}", e);
                false
            }
        }
    }

    fn try_are_isomorphic(&self, g1: &G1, g2: &G2) -> Result<bool, SearchError> {
        self.try_find_isomorphism(g1, g2).map(|found| found.is_some())
    }

    fn find_isomorphism(&self, g1: &G1, g2: &G2) -> VertexMapping {
        match self.try_find_isomorphism(g1, g2) {
            Ok(found) => found.unwrap_or_default(),
            Err(e) => {
                warn!("Returning empty mapping for inconclusive search: {}", e);
                VertexMapping::default()
            }
        }
    }
}
