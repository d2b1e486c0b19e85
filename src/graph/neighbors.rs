// Copyright (c) The cargo-guppy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The neighbor resolver (C2): expands `(v, edge collection)` into
//! deduplicated `(opposite vertex, edge)` pairs, with hyperedge fan-out and
//! self-loop/duplicate suppression.

use crate::graph::{EndpointSet, Graph};
use indexmap::IndexSet;
use smallvec::SmallVec;

/// `opposite(v, e)`: the endpoints of `e` other than `v`.
///
/// * Ordinary edge: the single non-`v` endpoint.
/// * Undirected hyperedge: all endpoints except `v`.
/// * Directed hyperedge: if `v` is in the source set, yields the
///   destination set; if `v` is in the destination set, yields the source
///   set; if `v` is in both (a self-loop on a hyperedge), yields both sets
///   minus `v`.
pub fn opposite<G: Graph>(graph: &G, v: G::Vertex, e: G::Edge) -> EndpointSet<G::Vertex> {
    if graph.is_directed() {
        let source = graph.source_set(e);
        let dest = graph.dest_set(e);
        let in_source = source.iter().any(|&s| s == v);
        let in_dest = dest.iter().any(|&d| d == v);
        let mut out = EndpointSet::new();
        if in_source {
            out.extend(dest.iter().copied().filter(|&w| w != v));
        }
        if in_dest {
            out.extend(source.iter().copied().filter(|&w| w != v));
        }
        out
    } else {
        graph
            .endpoints(e)
            .into_iter()
            .filter(|&w| w != v)
            .collect()
    }
}

/// Expands `edges` (typically `incidentEdges(v)`, `outEdges(v)`, …) into
/// deduplicated `(opposite vertex, edge)` pairs.
///
/// Self-loops are suppressed (`opposite` never contains `v` itself). For
/// hyperedges, the same `(w, e)` pair is emitted at most once even if `w`
/// appears multiple times in the edge's endpoint set. Iteration order is
/// unspecified.
pub fn resolve_neighbors<G: Graph>(
    graph: &G,
    v: G::Vertex,
    edges: impl Iterator<Item = G::Edge>,
) -> SmallVec<[(G::Vertex, G::Edge); 8]> {
    let mut seen: IndexSet<(G::Vertex, G::Edge)> = IndexSet::new();
    for e in edges {
        for w in opposite(graph, v, e) {
            seen.insert((w, e));
        }
    }
    seen.into_iter().collect()
}
