use std::collections::BTreeSet;

use itertools::Either;

use super::Vertex;
use crate::GraphError;

/// Vertex adjacency shared by the concrete graph stores.
///
/// Undirected graphs keep a single symmetric adjacency in `out` and leave
/// `ins` empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct Adjacency {
    directed: bool,
    out: Vec<BTreeSet<Vertex>>,
    ins: Vec<BTreeSet<Vertex>>,
}

impl Adjacency {
    pub(crate) fn new(directed: bool, order: usize) -> Self {
        Self {
            directed,
            out: vec![BTreeSet::new(); order],
            ins: if directed {
                vec![BTreeSet::new(); order]
            } else {
                Vec::new()
            },
        }
    }

    pub(crate) const fn is_directed(&self) -> bool {
        self.directed
    }

    pub(crate) fn order(&self) -> usize {
        self.out.len()
    }

    #[contracts::debug_ensures(ret + 1 == self.order())]
    pub(crate) fn add_vertex(&mut self) -> Vertex {
        self.out.push(BTreeSet::new());
        if self.directed {
            self.ins.push(BTreeSet::new());
        }
        self.out.len() - 1
    }

    pub(crate) fn check(&self, v: Vertex) -> Result<(), GraphError> {
        if v < self.order() {
            Ok(())
        } else {
            Err(GraphError::out_of_range(v, self.order()))
        }
    }

    /// Record that `u` and `v` are adjacent. Returns `true` if they were not
    /// adjacent before.
    #[contracts::debug_requires(u < self.order() && v < self.order())]
    #[contracts::debug_ensures(self.contains(u, v))]
    pub(crate) fn link(&mut self, u: Vertex, v: Vertex) -> bool {
        let fresh = self.out[u].insert(v);
        if self.directed {
            self.ins[v].insert(u);
        } else {
            self.out[v].insert(u);
        }
        fresh
    }

    pub(crate) fn contains(&self, u: Vertex, v: Vertex) -> bool {
        self.out.get(u).is_some_and(|s| s.contains(&v))
    }

    /// Canonical key for the vertex pair: ordered for directed graphs,
    /// sorted for undirected ones.
    pub(crate) fn key(&self, u: Vertex, v: Vertex) -> (Vertex, Vertex) {
        if self.directed || u <= v { (u, v) } else { (v, u) }
    }

    pub(crate) fn successors(&self, v: Vertex) -> impl Iterator<Item = Vertex> + '_ {
        self.out.get(v).into_iter().flatten().copied()
    }

    pub(crate) fn predecessors(&self, v: Vertex) -> impl Iterator<Item = Vertex> + '_ {
        let side = if self.directed { &self.ins } else { &self.out };
        side.get(v).into_iter().flatten().copied()
    }

    pub(crate) fn neighbors(&self, v: Vertex) -> impl Iterator<Item = Vertex> + '_ {
        if !self.directed {
            return Either::Left(self.successors(v));
        }
        match (self.out.get(v), self.ins.get(v)) {
            (Some(out), Some(ins)) => Either::Right(out.union(ins).copied()),
            _ => Either::Left(self.successors(v)),
        }
    }

    /// Iterate every adjacent pair once (`u <= v` when undirected).
    pub(crate) fn pairs(&self) -> impl Iterator<Item = (Vertex, Vertex)> + '_ {
        self.out.iter().enumerate().flat_map(move |(u, targets)| {
            targets
                .iter()
                .copied()
                .filter(move |&v| self.directed || u <= v)
                .map(move |v| (u, v))
        })
    }
}
