// Copyright (c) The cargo-guppy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Degree and closeness centrality (C7): direct consumers of the graph
//! read-view and the shortest-path distance oracle.

use crate::algo::shortest_paths::{AllPairsDistance, Distance};
use crate::debug_ignore::DebugIgnore;
use crate::graph::{EdgeWeight, Graph};
use crate::Error;
use std::cell::RefCell;
use std::collections::HashMap;
use std::hash::Hash;

/// Which edge collection degree centrality counts or sums weights over.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum CentralityMode {
    /// `inEdges(v)`.
    In,
    /// `outEdges(v)`.
    Out,
    /// `incidentEdges(v)`.
    Total,
}

/// Per-vertex degree centrality, with a lazy, per-instance memoization
/// cache (not thread-safe: the cache is written only by the owning
/// instance).
pub struct DegreeCentrality<'g, G: Graph, W = crate::graph::UnitWeight> {
    graph: &'g G,
    mode: CentralityMode,
    normalize: bool,
    weight: Option<W>,
    cache: DebugIgnore<RefCell<HashMap<G::Vertex, f64>>>,
}

impl<'g, G: Graph> DegreeCentrality<'g, G, crate::graph::UnitWeight> {
    /// Builds an unweighted degree centrality instance: each edge in the
    /// chosen collection counts as 1.
    #[tracing::instrument(level = "debug", skip(graph))]
    pub fn new(graph: &'g G, mode: CentralityMode, normalize: bool) -> Self {
        Self {
            graph,
            mode,
            normalize,
            weight: None,
            cache: DebugIgnore(RefCell::new(HashMap::new())),
        }
    }
}

impl<'g, G: Graph, W: EdgeWeight<G::Edge>> DegreeCentrality<'g, G, W> {
    /// Builds a weighted degree centrality instance: sums `weight(e)` over
    /// the chosen edge collection instead of counting edges.
    #[tracing::instrument(level = "debug", skip(graph, weight))]
    pub fn weighted(graph: &'g G, mode: CentralityMode, normalize: bool, weight: W) -> Self {
        Self {
            graph,
            mode,
            normalize,
            weight: Some(weight),
            cache: DebugIgnore(RefCell::new(HashMap::new())),
        }
    }

    /// The degree centrality score of `v`, memoized after first computation.
    /// Unknown vertices score 0 (an empty edge collection), matching every
    /// other empty-collection convention in this crate.
    pub fn score(&self, v: G::Vertex) -> f64
    where
        G::Vertex: Eq + Hash,
    {
        if let Some(&cached) = self.cache.borrow().get(&v) {
            return cached;
        }
        let edges: Box<dyn Iterator<Item = G::Edge>> = match self.mode {
            CentralityMode::In => self.graph.in_edges(v),
            CentralityMode::Out => self.graph.out_edges(v),
            CentralityMode::Total => self.graph.incident_edges(v),
        };
        let mut score = match &self.weight {
            Some(w) => edges.map(|e| w.weight(e)).sum(),
            None => edges.count() as f64,
        };
        if self.normalize {
            let denom = (self.graph.vertex_count() as f64 - 1.0).max(1.0);
            score /= denom;
        }
        self.cache.borrow_mut().insert(v, score);
        score
    }
}

/// How an unreachable or empty closeness sum should be reported.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NullHandling {
    /// Report 0.0 when the reachable-distance sum is empty or 0.
    Zero,
    /// Report `f64::INFINITY` when the reachable-distance sum is empty or 0.
    Infinite,
}

/// Either a borrowed [`Distance`] oracle supplied by the caller, or one this
/// instance built (and owns) from a graph and an edge-weight function — the
/// `distance | edgeWeight` alternative in the factory signature.
enum DistanceSource<'g, V> {
    Borrowed(&'g dyn Distance<V>),
    Owned(Box<dyn Distance<V> + 'g>),
}

impl<'g, V> DistanceSource<'g, V> {
    fn get_distance_map(&self, v: V) -> HashMap<V, f64>
    where
        V: Copy + Eq + Hash,
    {
        match self {
            DistanceSource::Borrowed(d) => d.get_distance_map(v),
            DistanceSource::Owned(d) => d.get_distance_map(v),
        }
    }
}

/// Per-vertex closeness centrality over either an injected [`Distance`]
/// oracle or a graph plus edge-weight function, with the same lazy
/// memoization discipline as [`DegreeCentrality`].
pub struct ClosenessCentrality<'g, V> {
    distance: DistanceSource<'g, V>,
    averaging: bool,
    null_handling: NullHandling,
    ignore_self_distances: bool,
    cache: DebugIgnore<RefCell<HashMap<V, f64>>>,
}

impl<'g, V: Copy + Eq + Hash> ClosenessCentrality<'g, V> {
    /// Builds a closeness centrality instance over a pre-built `distance`
    /// oracle (typically an [`AllPairsDistance`]).
    ///
    /// * `averaging`: divide the reachable-distance sum by the count of
    ///   included entries before inverting.
    /// * `null_handling`: whether an empty/zero reachable sum reports as 0
    ///   or as `+∞`.
    /// * `ignore_self_distances`: drop `v` itself from its own distance map
    ///   before summing (the distance from `v` to `v` is always 0 and would
    ///   otherwise be a no-op addition, but an oracle that includes it must
    ///   still be handled explicitly per this flag).
    #[tracing::instrument(level = "debug", skip(distance))]
    pub fn new(
        distance: &'g dyn Distance<V>,
        averaging: bool,
        null_handling: NullHandling,
        ignore_self_distances: bool,
    ) -> Self {
        Self {
            distance: DistanceSource::Borrowed(distance),
            averaging,
            null_handling,
            ignore_self_distances,
            cache: DebugIgnore(RefCell::new(HashMap::new())),
        }
    }

    /// Builds a closeness centrality instance directly from a graph, via an
    /// unweighted (BFS-backed) all-pairs oracle it builds and owns. The
    /// `edgeWeight`-free half of the factory's `distance | edgeWeight`
    /// alternative.
    #[tracing::instrument(level = "debug", skip(graph))]
    pub fn from_graph_unweighted<G>(
        graph: &'g G,
        averaging: bool,
        null_handling: NullHandling,
        ignore_self_distances: bool,
    ) -> Self
    where
        G: Graph<Vertex = V>,
    {
        let oracle = AllPairsDistance::unweighted(graph);
        Self {
            distance: DistanceSource::Owned(Box::new(oracle)),
            averaging,
            null_handling,
            ignore_self_distances,
            cache: DebugIgnore(RefCell::new(HashMap::new())),
        }
    }

    /// Builds a closeness centrality instance directly from a graph and a
    /// non-negative `edge_weight` function, via a weighted (Dijkstra-backed)
    /// all-pairs oracle it builds and owns. Returns
    /// [`Error::NegativeWeight`] immediately if any edge weight is negative.
    #[tracing::instrument(level = "debug", skip(graph, edge_weight))]
    pub fn from_graph_weighted<G, W>(
        graph: &'g G,
        edge_weight: W,
        averaging: bool,
        null_handling: NullHandling,
        ignore_self_distances: bool,
    ) -> Result<Self, Error>
    where
        G: Graph<Vertex = V>,
        W: EdgeWeight<G::Edge> + 'g,
    {
        let oracle = AllPairsDistance::weighted(graph, edge_weight)?;
        Ok(Self {
            distance: DistanceSource::Owned(Box::new(oracle)),
            averaging,
            null_handling,
            ignore_self_distances,
            cache: DebugIgnore(RefCell::new(HashMap::new())),
        })
    }

    /// The closeness centrality score of `v`, memoized after first
    /// computation.
    pub fn score(&self, v: V) -> f64 {
        if let Some(&cached) = self.cache.borrow().get(&v) {
            return cached;
        }
        let mut map = self.distance.get_distance_map(v);
        if self.ignore_self_distances {
            map.remove(&v);
        }
        let count = map.len();
        let sum: f64 = map.values().sum();

        let score = if count == 0 || sum == 0.0 {
            match self.null_handling {
                NullHandling::Zero => 0.0,
                NullHandling::Infinite => f64::INFINITY,
            }
        } else {
            let denom = if self.averaging { sum / count as f64 } else { sum };
            1.0 / denom
        };

        self.cache.borrow_mut().insert(v, score);
        score
    }
}
