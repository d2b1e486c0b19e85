// Copyright (c) The cargo-guppy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Brandes' algorithm for vertex- and edge-betweenness centrality (C5),
//! weighted and unweighted.

use crate::algo::shortest_paths::{bfs, check_no_negative_weights, dijkstra};
use crate::graph::{EdgeWeight, Graph, UnitWeight};
use crate::Error;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicBool, Ordering};

/// Per-vertex and per-edge betweenness scores, as produced by
/// [`betweenness`]/[`betweenness_weighted`].
#[derive(Debug, Clone)]
pub struct BetweennessScores<V, E> {
    vertex: HashMap<V, f64>,
    edge: HashMap<E, f64>,
}

impl<V: Copy + Eq + Hash, E: Copy + Eq + Hash> BetweennessScores<V, E> {
    /// The betweenness score of `v`, or 0.0 if `v` never appeared as an
    /// internal vertex on any shortest path (including if `v` is unknown to
    /// the graph: an absent score here is indistinguishable from a genuine
    /// zero).
    pub fn vertex_score(&self, v: V) -> f64 {
        self.vertex.get(&v).copied().unwrap_or(0.0)
    }

    /// The betweenness score of edge `e`, or 0.0 if it carried no shortest
    /// paths.
    pub fn edge_score(&self, e: E) -> f64 {
        self.edge.get(&e).copied().unwrap_or(0.0)
    }

    /// All vertices with a nonzero score, alongside that score.
    pub fn vertex_scores(&self) -> &HashMap<V, f64> {
        &self.vertex
    }

    /// All edges with a nonzero score, alongside that score.
    pub fn edge_scores(&self) -> &HashMap<E, f64> {
        &self.edge
    }
}

/// Runs Brandes' algorithm over every vertex as a source, accumulating
/// vertex and edge betweenness.
///
/// `normalize`, when true, divides vertex scores by `(n-1)(n-2)` and edge
/// scores by `n(n-1)`; when false, raw accumulated scores are returned.
/// Undirected graphs always get the mandatory halving (every pair counted
/// twice) regardless of `normalize`.
#[tracing::instrument(level = "debug", skip(graph))]
pub fn betweenness<G>(graph: &G, normalize: bool) -> BetweennessScores<G::Vertex, G::Edge>
where
    G: Graph,
{
    brandes_unweighted(graph, normalize)
}

/// Runs weighted Brandes' algorithm over non-negative edge weights.
#[tracing::instrument(level = "debug", skip(graph, weight))]
pub fn betweenness_weighted<G, W>(
    graph: &G,
    weight: &W,
    normalize: bool,
) -> Result<BetweennessScores<G::Vertex, G::Edge>, Error>
where
    G: Graph,
    W: EdgeWeight<G::Edge>,
{
    check_no_negative_weights(graph, weight)?;
    let mut vertex_score: HashMap<G::Vertex, f64> = HashMap::new();
    let mut edge_score: HashMap<G::Edge, f64> = HashMap::new();
    for s in graph.vertices() {
        let state = dijkstra(graph, s, weight)?;
        accumulate(&state, s, &mut vertex_score, &mut edge_score);
    }
    Ok(finish(graph, vertex_score, edge_score, normalize))
}

fn brandes_unweighted<G>(graph: &G, normalize: bool) -> BetweennessScores<G::Vertex, G::Edge>
where
    G: Graph,
{
    let mut vertex_score: HashMap<G::Vertex, f64> = HashMap::new();
    let mut edge_score: HashMap<G::Edge, f64> = HashMap::new();
    for s in graph.vertices() {
        // Forward phase: shortest-path state machine, recording the settle
        // order required for back-propagation.
        let state = bfs(graph, s);
        accumulate(&state, s, &mut vertex_score, &mut edge_score);
    }
    finish(graph, vertex_score, edge_score, normalize)
}

/// As [`betweenness`], but polls `cancelled` before starting each source's
/// forward phase, returning [`Error::Cancelled`] as soon as it is set. No
/// internal synchronization beyond the load itself: the caller owns setting
/// the flag from wherever is convenient (a signal handler, another thread,
/// a timeout).
#[tracing::instrument(level = "debug", skip(graph, cancelled))]
pub fn betweenness_cancellable<G>(
    graph: &G,
    normalize: bool,
    cancelled: &AtomicBool,
) -> Result<BetweennessScores<G::Vertex, G::Edge>, Error>
where
    G: Graph,
{
    let mut vertex_score: HashMap<G::Vertex, f64> = HashMap::new();
    let mut edge_score: HashMap<G::Edge, f64> = HashMap::new();
    for s in graph.vertices() {
        if cancelled.load(Ordering::Relaxed) {
            return Err(Error::Cancelled);
        }
        let state = bfs(graph, s);
        accumulate(&state, s, &mut vertex_score, &mut edge_score);
    }
    Ok(finish(graph, vertex_score, edge_score, normalize))
}

/// As [`betweenness_weighted`], but polls `cancelled` before starting each
/// source's forward phase, returning [`Error::Cancelled`] as soon as it is
/// set.
#[tracing::instrument(level = "debug", skip(graph, weight, cancelled))]
pub fn betweenness_weighted_cancellable<G, W>(
    graph: &G,
    weight: &W,
    normalize: bool,
    cancelled: &AtomicBool,
) -> Result<BetweennessScores<G::Vertex, G::Edge>, Error>
where
    G: Graph,
    W: EdgeWeight<G::Edge>,
{
    check_no_negative_weights(graph, weight)?;
    let mut vertex_score: HashMap<G::Vertex, f64> = HashMap::new();
    let mut edge_score: HashMap<G::Edge, f64> = HashMap::new();
    for s in graph.vertices() {
        if cancelled.load(Ordering::Relaxed) {
            return Err(Error::Cancelled);
        }
        let state = dijkstra(graph, s, weight)?;
        accumulate(&state, s, &mut vertex_score, &mut edge_score);
    }
    Ok(finish(graph, vertex_score, edge_score, normalize))
}

/// The accumulation phase shared by the weighted and unweighted forward
/// passes: pop the settle stack in reverse (non-increasing distance from
/// `s`), distributing each vertex's dependency back along its predecessor
/// DAG.
fn accumulate<G: Graph>(
    state: &crate::algo::shortest_paths::PathState<G::Vertex, G::Edge>,
    s: G::Vertex,
    vertex_score: &mut HashMap<G::Vertex, f64>,
    edge_score: &mut HashMap<G::Edge, f64>,
) {
    let mut delta: HashMap<G::Vertex, f64> = HashMap::new();

    for &w in state.settled_order().iter().rev() {
        let sigma_w = state.path_count(w);
        let delta_w = delta.get(&w).copied().unwrap_or(0.0);
        for &(e, v) in state.predecessors(w) {
            let sigma_v = state.path_count(v);
            if sigma_w == 0.0 {
                // Never reached; no new contribution. Elided to avoid a 0/0
                // NaN.
                continue;
            }
            let contribution = (sigma_v / sigma_w) * (1.0 + delta_w);
            if contribution == 0.0 {
                continue;
            }
            *delta.entry(v).or_insert(0.0) += contribution;
            *edge_score.entry(e).or_insert(0.0) += contribution;
        }
        if w != s {
            *vertex_score.entry(w).or_insert(0.0) += delta_w;
        }
    }
}

fn finish<G: Graph>(
    graph: &G,
    mut vertex_score: HashMap<G::Vertex, f64>,
    mut edge_score: HashMap<G::Edge, f64>,
    normalize: bool,
) -> BetweennessScores<G::Vertex, G::Edge> {
    if !graph.is_directed() {
        for score in vertex_score.values_mut() {
            *score /= 2.0;
        }
        for score in edge_score.values_mut() {
            *score /= 2.0;
        }
    }

    if normalize {
        let n = graph.vertex_count() as f64;
        if n > 2.0 {
            let vertex_denom = (n - 1.0) * (n - 2.0);
            for score in vertex_score.values_mut() {
                *score /= vertex_denom;
            }
        }
        if n > 1.0 {
            let edge_denom = n * (n - 1.0);
            for score in edge_score.values_mut() {
                *score /= edge_denom;
            }
        }
    }

    BetweennessScores {
        vertex: vertex_score,
        edge: edge_score,
    }
}


#[cfg(all(test, feature = "proptest1"))]
mod proptests {
    use super::*;
    use crate::graph::SparseHypergraphBuilder;
    use proptest::prelude::*;

    /// Builds a directed path graph `0 -> 1 -> ... -> (n-1)`, every edge
    /// numbered the same as its tail vertex.
    fn path_graph(n: u32) -> crate::graph::SparseHypergraph<u32, u32> {
        let mut b = SparseHypergraphBuilder::<u32, u32>::new(true);
        for v in 0..n {
            b = b.add_vertex(v);
        }
        for v in 0..n - 1 {
            b = b.add_edge(v, v, v + 1).unwrap();
        }
        b.build()
    }

    proptest! {
        /// Running Brandes twice over the same graph must agree exactly:
        /// nothing about the algorithm depends on iteration order across
        /// hash-based collections leaking into the result.
        #[test]
        fn betweenness_is_idempotent(n in 3u32..12, normalize in any::<bool>()) {
            let g = path_graph(n);
            let first = betweenness(&g, normalize);
            let second = betweenness(&g, normalize);
            for v in 0..n {
                prop_assert_eq!(first.vertex_score(v), second.vertex_score(v));
            }
            for e in 0..n - 1 {
                prop_assert_eq!(first.edge_score(e), second.edge_score(e));
            }
        }

        /// Scaling every edge weight by a positive constant changes every
        /// distance by the same factor but leaves every shortest path (and
        /// thus every betweenness score) exactly as it was.
        #[test]
        fn scaling_weights_preserves_betweenness(n in 3u32..10, k in 0.01f64..100.0) {
            let g = path_graph(n);
            let unit = betweenness_weighted(&g, &UnitWeight, false).unwrap();
            let scaled = betweenness_weighted(&g, &(move |_e: u32| k), false).unwrap();
            for v in 0..n {
                prop_assert!((unit.vertex_score(v) - scaled.vertex_score(v)).abs() < 1e-6);
            }
            for e in 0..n - 1 {
                prop_assert!((unit.edge_score(e) - scaled.edge_score(e)).abs() < 1e-6);
            }
        }
    }
}
