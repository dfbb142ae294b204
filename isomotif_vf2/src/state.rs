//! Incremental VF2 match state.
//!
//! A [`MatchState`] holds a partial bijection between the vertices of two
//! graphs plus the frontier bookkeeping used to pick and prune candidate
//! pairs. The mapping and frontier arrays live in a [`MatchArrays`] that is
//! shared by every level of one depth-first search; each level only owns its
//! scalar counters.
//!
//! Sharing is sound because a level obtained through [`MatchState::fork`]
//! mutably borrows the arrays from its parent. The parent cannot propose its
//! next candidate until the child is dropped, and the child must call
//! [`MatchState::back_track`] before that if its extension failed. Every
//! frontier stamp written by `add_pair` carries the new `core_len`, so
//! `back_track` can find and clear exactly what it wrote.

use std::collections::HashMap;

use itertools::Either;

use isomotif_common::{Graph, Vertex};

use crate::VertexMapping;

/// Mapping and frontier arrays shared by all levels of one search.
///
/// A frontier stamp is 0 while the vertex is outside the frontier, otherwise
/// the `core_len` at which it entered. Stamps are only ever written over 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchArrays {
    core1: Vec<Option<Vertex>>,
    core2: Vec<Option<Vertex>>,
    in1: Vec<usize>,
    out1: Vec<usize>,
    in2: Vec<usize>,
    out2: Vec<usize>,
    /// Static order over `G1` used when the frontier is empty.
    order: Option<Vec<Vertex>>,
}

impl MatchArrays {
    /// Empty arrays for graphs of order `n1` and `n2`.
    pub fn new(n1: usize, n2: usize) -> Self {
        Self {
            core1: vec![None; n1],
            core2: vec![None; n2],
            in1: vec![0; n1],
            out1: vec![0; n1],
            in2: vec![0; n2],
            out2: vec![0; n2],
            order: None,
        }
    }

    /// Use `order` instead of plain index order when seeding a new component.
    #[must_use]
    #[contracts::debug_requires(order.len() == self.core1.len())]
    pub fn with_order(mut self, order: Vec<Vertex>) -> Self {
        self.order = Some(order);
        self
    }

    /// The pairs mapped so far, keyed by `G1` vertex in ascending order.
    pub fn mapping(&self) -> VertexMapping {
        self.core1
            .iter()
            .enumerate()
            .filter_map(|(v1, v2)| v2.map(|v2| (v1, v2)))
            .collect()
    }
}

/// Frontier sizes for one graph. Core vertices are counted too.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct FrontierLens {
    both: usize,
    ins: usize,
    out: usize,
}

/// Which frontier candidates are drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Frontier {
    Both,
    Out,
    In,
    Unmatched,
}

/// Unmatched neighbors of a candidate, by frontier membership.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Lookahead {
    term_in: usize,
    term_out: usize,
    new: usize,
}

impl Lookahead {
    fn tally(&mut self, in_stamp: usize, out_stamp: usize) {
        if in_stamp != 0 {
            self.term_in += 1;
        }
        if out_stamp != 0 {
            self.term_out += 1;
        }
        if in_stamp == 0 && out_stamp == 0 {
            self.new += 1;
        }
    }
}

/// Targets of `v`'s outgoing edges; nothing for undirected graphs.
fn successors<G: Graph>(g: &G, v: Vertex) -> impl Iterator<Item = Vertex> + '_ {
    if g.is_directed() {
        Either::Left(g.successors(v))
    } else {
        Either::Right(std::iter::empty())
    }
}

/// Sources of `v`'s incoming edges; every neighbor for undirected graphs.
fn predecessors<G: Graph>(g: &G, v: Vertex) -> impl Iterator<Item = Vertex> + '_ {
    if g.is_directed() {
        Either::Left(g.predecessors(v))
    } else {
        Either::Right(g.neighbors(v))
    }
}

/// Stamp `v` into `stamps` if it is not there yet.
fn enter(stamps: &mut [usize], other: &[usize], v: Vertex, stamp: usize, len: &mut usize, both: &mut usize) {
    if stamps[v] == 0 {
        stamps[v] = stamp;
        *len += 1;
        if other[v] != 0 {
            *both += 1;
        }
    }
}

/// Clear `v` from `stamps` if it entered at `stamp`.
fn leave(stamps: &mut [usize], other: &[usize], v: Vertex, stamp: usize, len: &mut usize, both: &mut usize) {
    if stamps[v] == stamp {
        stamps[v] = 0;
        *len -= 1;
        if other[v] != 0 {
            *both -= 1;
        }
    }
}

/// One level of the VF2 search over `G1` and `G2`.
pub struct MatchState<'g, 'a, G1, G2> {
    g1: &'g G1,
    g2: &'g G2,
    arrays: &'a mut MatchArrays,
    n1: usize,
    n2: usize,
    core_len: usize,
    orig_core_len: usize,
    added_node1: Option<Vertex>,
    t1: FrontierLens,
    t2: FrontierLens,
    check_multiplex_edges: bool,
}

impl<'g, 'a, G1, G2> MatchState<'g, 'a, G1, G2>
where
    G1: Graph,
    G2: Graph<EdgeType = G1::EdgeType>,
{
    /// An empty mapping between `g1` and `g2` over fresh `arrays`.
    #[contracts::debug_requires(arrays.core1.len() == g1.order() && arrays.core2.len() == g2.order())]
    pub fn new(g1: &'g G1, g2: &'g G2, arrays: &'a mut MatchArrays) -> Self {
        tracing::event!(
            tracing::Level::TRACE,
            "MatchState::new n1={} n2={} multiplex={}",
            g1.order(),
            g2.order(),
            g1.is_multigraph() || g2.is_multigraph()
        );
        Self {
            g1,
            g2,
            arrays,
            n1: g1.order(),
            n2: g2.order(),
            core_len: 0,
            orig_core_len: 0,
            added_node1: None,
            t1: FrontierLens::default(),
            t2: FrontierLens::default(),
            check_multiplex_edges: g1.is_multigraph() || g2.is_multigraph(),
        }
    }

    /// The first graph.
    pub const fn graph1(&self) -> &'g G1 {
        self.g1
    }

    /// The second graph.
    pub const fn graph2(&self) -> &'g G2 {
        self.g2
    }

    /// Number of pairs mapped so far.
    pub const fn core_len(&self) -> usize {
        self.core_len
    }

    /// The `G2` vertex `v1` is mapped to, if any.
    pub fn mapped(&self, v1: Vertex) -> Option<Vertex> {
        self.arrays.core1.get(v1).copied().flatten()
    }

    /// The pairs mapped so far.
    pub fn vertex_mapping(&self) -> VertexMapping {
        self.arrays.mapping()
    }

    /// A child level with its own counters over the same arrays.
    ///
    /// The child borrows the arrays, so this level is frozen until the child
    /// is dropped. A child whose `add_pair` did not lead to a full mapping
    /// must be backtracked before it goes.
    pub fn fork(&mut self) -> MatchState<'g, '_, G1, G2> {
        MatchState {
            g1: self.g1,
            g2: self.g2,
            arrays: &mut *self.arrays,
            n1: self.n1,
            n2: self.n2,
            core_len: self.core_len,
            orig_core_len: self.core_len,
            added_node1: None,
            t1: self.t1,
            t2: self.t2,
            check_multiplex_edges: self.check_multiplex_edges,
        }
    }

    fn frontier(&self) -> Frontier {
        let c = self.core_len;
        if self.t1.both > c && self.t2.both > c {
            Frontier::Both
        } else if self.t1.out > c && self.t2.out > c {
            Frontier::Out
        } else if self.t1.ins > c && self.t2.ins > c {
            Frontier::In
        } else {
            Frontier::Unmatched
        }
    }

    fn eligible1(&self, v: Vertex, frontier: Frontier) -> bool {
        let a = &*self.arrays;
        a.core1[v].is_none()
            && match frontier {
                Frontier::Both => a.out1[v] != 0 && a.in1[v] != 0,
                Frontier::Out => a.out1[v] != 0,
                Frontier::In => a.in1[v] != 0,
                Frontier::Unmatched => true,
            }
    }

    fn eligible2(&self, v: Vertex, frontier: Frontier) -> bool {
        let a = &*self.arrays;
        a.core2[v].is_none()
            && match frontier {
                Frontier::Both => a.out2[v] != 0 && a.in2[v] != 0,
                Frontier::Out => a.out2[v] != 0,
                Frontier::In => a.in2[v] != 0,
                Frontier::Unmatched => true,
            }
    }

    /// The next candidate pair after `prev` (or the first, if `None`).
    ///
    /// Candidates come from the first non-empty class, in priority order:
    /// vertices in both the in- and out-frontier of both graphs, then the
    /// out-frontier, then the in-frontier, then any unmatched vertex. The
    /// `G1` vertex is fixed for a given level; successive calls walk the
    /// `G2` vertices of the same class.
    pub fn next_pair(&self, prev: Option<(Vertex, Vertex)>) -> Option<(Vertex, Vertex)> {
        let frontier = self.frontier();
        let node1 = match prev {
            Some((node1, _)) => {
                debug_assert!(self.eligible1(node1, frontier));
                node1
            }
            None => match (&self.arrays.order, frontier) {
                (Some(order), Frontier::Unmatched) => order
                    .iter()
                    .copied()
                    .find(|&v| self.arrays.core1[v].is_none())?,
                _ => (0..self.n1).find(|&v| self.eligible1(v, frontier))?,
            },
        };
        let start = prev.map_or(0, |(_, node2)| node2 + 1);
        let node2 = (start..self.n2).find(|&v| self.eligible2(v, frontier))?;
        Some((node1, node2))
    }

    /// Whether the parallel edges `e1` in `G1` and `e2` in `G2` carry the same
    /// types. Always true unless either graph is a multigraph.
    fn compatible_edges(&self, e1: (Vertex, Vertex), e2: (Vertex, Vertex)) -> bool {
        if !self.check_multiplex_edges {
            return true;
        }
        if self.g1.edge_count_between(e1.0, e1.1) != self.g2.edge_count_between(e2.0, e2.1) {
            return false;
        }
        let mut balance: HashMap<&G1::EdgeType, isize> = HashMap::new();
        for ty in self.g1.edge_types(e1.0, e1.1) {
            *balance.entry(ty).or_default() += 1;
        }
        for ty in self.g2.edge_types(e2.0, e2.1) {
            *balance.entry(ty).or_default() -= 1;
        }
        balance.values().all(|&n| n == 0)
    }

    /// Can `(node1, node2)` extend the current mapping?
    ///
    /// Every edge between `node1` and an already mapped vertex must have a
    /// compatible counterpart at `node2`, and vice versa. In addition the
    /// unmatched neighbors of both vertices must fall into the in-frontier,
    /// out-frontier and brand-new categories in equal numbers. That
    /// look-ahead only prunes; a full mapping still has to be searched for.
    #[contracts::debug_requires(node1 < self.n1 && node2 < self.n2)]
    #[contracts::debug_requires(self.mapped(node1).is_none(), "node1 is already mapped")]
    #[contracts::debug_requires(self.arrays.core2[node2].is_none(), "node2 is already mapped")]
    pub fn is_feasible_pair(&self, node1: Vertex, node2: Vertex) -> bool {
        let (g1, g2) = (self.g1, self.g2);
        let a = &*self.arrays;

        let looped = g1.contains(node1, node1);
        if looped != g2.contains(node2, node2)
            || (looped && !self.compatible_edges((node1, node1), (node2, node2)))
        {
            return false;
        }

        let mut look1 = Lookahead::default();
        let mut look2 = Lookahead::default();

        for other1 in successors(g1, node1).filter(|&v| v != node1) {
            match a.core1[other1] {
                Some(other2) => {
                    if !g2.contains(node2, other2)
                        || !self.compatible_edges((node1, other1), (node2, other2))
                    {
                        return false;
                    }
                }
                None => look1.tally(a.in1[other1], a.out1[other1]),
            }
        }

        for other1 in predecessors(g1, node1).filter(|&v| v != node1) {
            match a.core1[other1] {
                Some(other2) => {
                    if !g2.contains(other2, node2)
                        || !self.compatible_edges((other1, node1), (other2, node2))
                    {
                        return false;
                    }
                }
                None => look1.tally(a.in1[other1], a.out1[other1]),
            }
        }

        for other2 in successors(g2, node2).filter(|&v| v != node2) {
            match a.core2[other2] {
                Some(other1) => {
                    if !g1.contains(node1, other1) {
                        return false;
                    }
                }
                None => look2.tally(a.in2[other2], a.out2[other2]),
            }
        }

        for other2 in predecessors(g2, node2).filter(|&v| v != node2) {
            match a.core2[other2] {
                Some(other1) => {
                    if !g1.contains(other1, node1) {
                        return false;
                    }
                }
                None => look2.tally(a.in2[other2], a.out2[other2]),
            }
        }

        look1 == look2
    }

    /// Commit `(node1, node2)` and grow both frontiers.
    #[contracts::debug_requires(node1 < self.n1 && node2 < self.n2)]
    #[contracts::debug_requires(self.core_len < self.n1 && self.core_len < self.n2)]
    #[contracts::debug_requires(self.mapped(node1).is_none(), "node1 is already mapped")]
    #[contracts::debug_requires(self.added_node1.is_none(), "one add_pair per level")]
    #[contracts::debug_ensures(self.core_len == old(self.core_len) + 1)]
    pub fn add_pair(&mut self, node1: Vertex, node2: Vertex) {
        tracing::event!(
            tracing::Level::TRACE,
            "MatchState::add_pair {} -> {} (core_len={})",
            node1,
            node2,
            self.core_len
        );
        self.core_len += 1;
        self.added_node1 = Some(node1);
        let stamp = self.core_len;
        let (g1, g2) = (self.g1, self.g2);
        let a = &mut *self.arrays;
        let (t1, t2) = (&mut self.t1, &mut self.t2);

        enter(&mut a.in1, &a.out1, node1, stamp, &mut t1.ins, &mut t1.both);
        enter(&mut a.out1, &a.in1, node1, stamp, &mut t1.out, &mut t1.both);
        enter(&mut a.in2, &a.out2, node2, stamp, &mut t2.ins, &mut t2.both);
        enter(&mut a.out2, &a.in2, node2, stamp, &mut t2.out, &mut t2.both);

        a.core1[node1] = Some(node2);
        a.core2[node2] = Some(node1);

        for other in predecessors(g1, node1) {
            enter(&mut a.in1, &a.out1, other, stamp, &mut t1.ins, &mut t1.both);
        }
        for other in successors(g1, node1) {
            enter(&mut a.out1, &a.in1, other, stamp, &mut t1.out, &mut t1.both);
        }
        for other in predecessors(g2, node2) {
            enter(&mut a.in2, &a.out2, other, stamp, &mut t2.ins, &mut t2.both);
        }
        for other in successors(g2, node2) {
            enter(&mut a.out2, &a.in2, other, stamp, &mut t2.out, &mut t2.both);
        }
    }

    /// Is every vertex of both graphs mapped?
    pub const fn is_goal(&self) -> bool {
        self.core_len == self.n1 && self.core_len == self.n2
    }

    /// Can this state no longer be completed?
    pub fn is_dead(&self) -> bool {
        self.n1 != self.n2 || self.t1 != self.t2
    }

    /// Undo the last `add_pair` on this level.
    ///
    /// Every stamp equal to the current `core_len` was written by that
    /// `add_pair`, so clearing those restores the arrays and counters to what
    /// they were before it.
    #[contracts::debug_requires(self.added_node1.is_some(), "back_track without a matching add_pair")]
    #[contracts::debug_ensures(self.core_len == self.orig_core_len)]
    pub fn back_track(&mut self) {
        let Some(node1) = self.added_node1.take() else {
            return;
        };
        let stamp = self.core_len;
        let (g1, g2) = (self.g1, self.g2);
        let a = &mut *self.arrays;
        let (t1, t2) = (&mut self.t1, &mut self.t2);

        let Some(node2) = a.core1[node1] else {
            debug_assert!(false, "added node {node1} has no partner");
            return;
        };
        tracing::event!(
            tracing::Level::TRACE,
            "MatchState::back_track {} -> {} (core_len={})",
            node1,
            node2,
            stamp
        );

        leave(&mut a.in1, &a.out1, node1, stamp, &mut t1.ins, &mut t1.both);
        for other in predecessors(g1, node1) {
            leave(&mut a.in1, &a.out1, other, stamp, &mut t1.ins, &mut t1.both);
        }
        leave(&mut a.out1, &a.in1, node1, stamp, &mut t1.out, &mut t1.both);
        for other in successors(g1, node1) {
            leave(&mut a.out1, &a.in1, other, stamp, &mut t1.out, &mut t1.both);
        }

        leave(&mut a.in2, &a.out2, node2, stamp, &mut t2.ins, &mut t2.both);
        for other in predecessors(g2, node2) {
            leave(&mut a.in2, &a.out2, other, stamp, &mut t2.ins, &mut t2.both);
        }
        leave(&mut a.out2, &a.in2, node2, stamp, &mut t2.out, &mut t2.both);
        for other in successors(g2, node2) {
            leave(&mut a.out2, &a.in2, other, stamp, &mut t2.out, &mut t2.both);
        }

        a.core1[node1] = None;
        a.core2[node2] = None;
        self.core_len = self.orig_core_len;
    }
}
