// Copyright (c) The cargo-guppy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Contains types that describe errors this crate's algorithms and graph
//! constructors can return.

use std::error;
use std::fmt;

use Error::*;

/// Error type describing the sorts of errors this crate's algorithms can
/// return.
///
/// Unknown-vertex lookups are deliberately *not* a variant here: per the
/// algorithm contract, a score or distance queried for a vertex outside the
/// graph is propagated as `None`, not as an `Error`.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// A negative edge weight was encountered while pre-scanning edges for a
    /// weighted traversal (Dijkstra, weighted Brandes).
    NegativeWeight(String),
    /// Strong connectivity (Gabow SCC) was requested on an undirected graph.
    DirectednessMismatch,
    /// A tolerance `<= 0` was supplied to a distance comparator.
    InvalidTolerance(f64),
    /// The edge or vertex set supplied to a graph builder was invalid.
    InvalidEdge(String),
    /// A feature is declared but not implemented by this builder/algorithm.
    Unimplemented(&'static str),
    /// The computation was cancelled via a caller-supplied cancellation flag.
    Cancelled,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NegativeWeight(edge) => {
                write!(f, "negative edge weight encountered on edge {}", edge)
            }
            DirectednessMismatch => {
                write!(f, "strong connectivity requires a directed graph")
            }
            InvalidTolerance(eps) => {
                write!(f, "tolerance must be > 0, got {}", eps)
            }
            InvalidEdge(msg) => write!(f, "invalid edge: {}", msg),
            Unimplemented(what) => write!(f, "not implemented: {}", what),
            Cancelled => write!(f, "computation was cancelled"),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        None
    }
}
