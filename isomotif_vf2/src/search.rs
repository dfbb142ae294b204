//! Depth-first VF2 search over a [`MatchState`].

use tracing::debug;

use isomotif_common::{Graph, MatchConfig, VertexOrder};

use crate::compat::VertexCompat;
use crate::error::SearchError;
use crate::order::degree_order;
use crate::state::{MatchArrays, MatchState};
use crate::VertexMapping;

/// One isomorphism decision between `g1` and `g2`.
pub(crate) struct Vf2Search<'g, 'cfg, G1, G2, C> {
    g1: &'g G1,
    g2: &'g G2,
    compat: &'cfg C,
    config: &'cfg MatchConfig,
    visited: usize,
}

impl<'g, 'cfg, G1, G2, C> Vf2Search<'g, 'cfg, G1, G2, C>
where
    G1: Graph,
    G2: Graph<EdgeType = G1::EdgeType>,
    C: VertexCompat<G1, G2>,
{
    pub(crate) const fn new(
        g1: &'g G1,
        g2: &'g G2,
        compat: &'cfg C,
        config: &'cfg MatchConfig,
    ) -> Self {
        Self {
            g1,
            g2,
            compat,
            config,
            visited: 0,
        }
    }

    /// Search for a full mapping.
    ///
    /// Graphs that differ in order, size or directedness are rejected
    /// without building any state.
    pub(crate) fn run(mut self) -> Result<Option<VertexMapping>, SearchError> {
        let (g1, g2) = (self.g1, self.g2);
        if g1.order() != g2.order() || g1.size() != g2.size() || g1.is_directed() != g2.is_directed()
        {
            debug!(
                "Fast reject: order {} vs {}, size {} vs {}",
                g1.order(),
                g2.order(),
                g1.size(),
                g2.size()
            );
            return Ok(None);
        }

        let mut arrays = MatchArrays::new(g1.order(), g2.order());
        if self.config.vertex_order == VertexOrder::Degree {
            arrays = arrays.with_order(degree_order(g1));
        }

        let found = {
            let mut root = MatchState::new(g1, g2, &mut arrays);
            self.descend(&mut root, 0)?
        };
        debug!(
            "VF2 search finished: found={} visited={} order={}",
            found,
            self.visited,
            g1.order()
        );
        Ok(found.then(|| arrays.mapping()))
    }

    fn visit(&mut self) -> Result<(), SearchError> {
        self.visited += 1;
        match self.config.call_limit {
            Some(limit) if self.visited > limit => Err(SearchError::call_limit(limit)),
            _ => Ok(()),
        }
    }

    /// Extend `state` until it reaches a goal. On success the mapping is left
    /// in the shared arrays; on failure they are as they were on entry.
    fn descend(
        &mut self,
        state: &mut MatchState<'g, '_, G1, G2>,
        depth: usize,
    ) -> Result<bool, SearchError> {
        self.visit()?;
        if state.is_goal() {
            return Ok(true);
        }
        if state.is_dead() {
            return Ok(false);
        }

        let mut prev = None;
        while let Some((node1, node2)) = state.next_pair(prev) {
            prev = Some((node1, node2));
            if !self.compat.compatible(self.g1, node1, self.g2, node2)
                || !state.is_feasible_pair(node1, node2)
            {
                continue;
            }

            let mut child = state.fork();
            child.add_pair(node1, node2);
            if self.descend(&mut child, depth + 1)? {
                return Ok(true);
            }
            child.back_track();
        }

        tracing::event!(
            tracing::Level::TRACE,
            "Depth {} exhausted at core_len {}",
            depth,
            state.core_len()
        );
        Ok(false)
    }
}
