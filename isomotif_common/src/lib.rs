//! Shared graph model for the isomotif workspace.
//!
//! This crate defines the [`Graph`] capability consumed by the VF2 matcher
//! (`isomotif_vf2`) and the isomorphism-aware counter (`isomotif_counter`),
//! together with two concrete stores:
//!
//! - [`SimpleGraph`]: directed or undirected, at most one edge per vertex pair.
//! - [`Multigraph`]: directed or undirected, typed parallel edges.
//!
//! Vertices are always the contiguous range `0..order()`. Out-of-range vertex
//! arguments are rejected at construction time with [`GraphError`].

pub mod config;
pub mod error;
pub mod graph;

pub use config::{MatchConfig, VertexOrder};
pub use error::GraphError;
pub use graph::{Graph, Multigraph, SimpleGraph, Vertex};
