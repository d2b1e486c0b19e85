// Copyright (c) The cargo-guppy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Centrality and connectivity metrics on (hyper)graphs.
//!
//! This crate computes, over a caller-supplied read-only hypergraph view
//! ([`graph::Graph`]):
//!
//! * vertex- and edge-betweenness centrality, weighted and unweighted, via
//!   Brandes' algorithm ([`algo::betweenness`]);
//! * strongly connected components (Gabow, directed only) and weakly
//!   connected components (BFS, direction-agnostic) ([`algo::connectivity`]);
//! * degree and closeness centrality ([`algo::centrality`]);
//! * eccentricity, diameter, radius, center, periphery and pseudo-periphery
//!   ([`algo::distance`]).
//!
//! Vertex and edge identifiers are opaque, caller-supplied, and compared
//! only by equality and hash — never mutated, never required to be `Ord`.
//! The crate ships [`graph::SparseHypergraph`] as a concrete, validating
//! reference implementation of [`graph::Graph`] for callers who don't
//! already have their own graph container.
//!
//! # Optional features
//!
//! * `proptest1`: enables `proptest`-based property test helpers used by
//!   this crate's own test suite.
//!
//! # Examples
//!
//! ```
//! use hypergraph_metrics::algo::betweenness;
//! use hypergraph_metrics::graph::SparseHypergraphBuilder;
//!
//! let graph = SparseHypergraphBuilder::<u32, u32>::new(false)
//!     .add_vertex(1)
//!     .add_vertex(2)
//!     .add_vertex(3)
//!     .add_edge(1, 1, 2)
//!     .unwrap()
//!     .add_edge(2, 2, 3)
//!     .unwrap()
//!     .build();
//!
//! let scores = betweenness(&graph, false);
//! assert_eq!(scores.vertex_score(2), 1.0);
//! ```

#![warn(missing_docs)]

pub mod algo;
pub(crate) mod debug_ignore;
pub mod errors;
pub mod graph;

pub use errors::Error;
