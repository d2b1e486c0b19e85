// Copyright (c) The cargo-guppy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Graph distance metrics (C8): eccentricity, diameter, radius, center,
//! periphery and pseudo-periphery, derived once from an injected
//! [`Distance`] oracle.

use crate::algo::shortest_paths::{AllPairsDistance, Distance};
use crate::graph::{EdgeWeight, Graph};
use crate::Error;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicBool, Ordering};

const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Computes eccentricity-derived metrics over a fixed vertex set and a
/// [`Distance`] oracle, comparing floating-point distances within a
/// tolerance (default `1e-9`).
pub struct GraphDistance<V> {
    eccentricity: HashMap<V, f64>,
    tolerance: f64,
}

impl<V: Copy + Eq + Hash> GraphDistance<V> {
    /// Computes the eccentricity of every vertex in `vertices` against
    /// `distance`, using the default tolerance (`1e-9`).
    #[tracing::instrument(level = "debug", skip(distance, vertices))]
    pub fn new<D: Distance<V> + ?Sized>(
        distance: &D,
        vertices: impl IntoIterator<Item = V>,
    ) -> Self {
        Self {
            eccentricity: eccentricity_map(distance, vertices),
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// As [`new`](GraphDistance::new), but with a caller-chosen tolerance.
    /// Returns [`Error::InvalidTolerance`] if `tolerance <= 0`.
    #[tracing::instrument(level = "debug", skip(distance, vertices))]
    pub fn with_tolerance<D: Distance<V> + ?Sized>(
        distance: &D,
        vertices: impl IntoIterator<Item = V>,
        tolerance: f64,
    ) -> Result<Self, Error> {
        if !(tolerance > 0.0) {
            return Err(Error::InvalidTolerance(tolerance));
        }
        Ok(Self {
            eccentricity: eccentricity_map(distance, vertices),
            tolerance,
        })
    }

    /// As [`new`](GraphDistance::new), but polls `cancelled` before computing
    /// each vertex's eccentricity, returning [`Error::Cancelled`] as soon as
    /// it is set. Useful when `vertices` is large enough that the all-pairs
    /// sweep this performs is worth aborting early.
    #[tracing::instrument(level = "debug", skip(distance, vertices, cancelled))]
    pub fn with_cancellation<D: Distance<V> + ?Sized>(
        distance: &D,
        vertices: impl IntoIterator<Item = V>,
        cancelled: &AtomicBool,
    ) -> Result<Self, Error> {
        Ok(Self {
            eccentricity: eccentricity_map_cancellable(distance, vertices, cancelled)?,
            tolerance: DEFAULT_TOLERANCE,
        })
    }

    /// Builds directly from a graph via an unweighted (BFS-backed) all-pairs
    /// oracle built for the occasion. The `edgeWeight`-free half of the
    /// factory's `distance | edgeWeight` alternative; the oracle itself is
    /// not retained, so [`pseudo_periphery`](GraphDistance::pseudo_periphery)
    /// still needs one passed back in by the caller.
    #[tracing::instrument(level = "debug", skip(graph))]
    pub fn from_graph_unweighted<G: Graph<Vertex = V>>(graph: &G) -> Self {
        let oracle = AllPairsDistance::unweighted(graph);
        Self::new(&oracle, graph.vertices())
    }

    /// Builds directly from a graph and a non-negative `edge_weight`
    /// function via a weighted (Dijkstra-backed) all-pairs oracle built for
    /// the occasion. Returns [`Error::NegativeWeight`] immediately if any
    /// edge weight is negative.
    #[tracing::instrument(level = "debug", skip(graph, edge_weight))]
    pub fn from_graph_weighted<'g, G: Graph<Vertex = V>, W: EdgeWeight<G::Edge> + 'g>(
        graph: &'g G,
        edge_weight: W,
    ) -> Result<Self, Error> {
        let oracle = AllPairsDistance::weighted(graph, edge_weight)?;
        Ok(Self::new(&oracle, graph.vertices()))
    }

    /// The eccentricity of `v`: the maximum shortest-path distance from `v`
    /// to any other vertex in the set this was computed over. `+∞` if any
    /// other vertex is unreachable.
    pub fn eccentricity(&self, v: V) -> Option<f64> {
        self.eccentricity.get(&v).copied()
    }

    /// The full eccentricity map.
    pub fn eccentricity_map(&self) -> &HashMap<V, f64> {
        &self.eccentricity
    }

    /// `max_v eccentricity(v)`, or 0 for an empty vertex set.
    pub fn diameter(&self) -> f64 {
        self.eccentricity
            .values()
            .copied()
            .fold(0.0, f64::max)
    }

    /// `min_v eccentricity(v)`, or 0 for an empty vertex set.
    pub fn radius(&self) -> f64 {
        if self.eccentricity.is_empty() {
            0.0
        } else {
            self.eccentricity.values().copied().fold(f64::INFINITY, f64::min)
        }
    }

    /// `{v : eccentricity(v) == radius}`, within this instance's tolerance.
    pub fn center(&self) -> Vec<V> {
        let radius = self.radius();
        self.eccentricity
            .iter()
            .filter(|&(_, &ecc)| approx_eq(ecc, radius, self.tolerance))
            .map(|(&v, _)| v)
            .collect()
    }

    /// `{v : eccentricity(v) == diameter}`, within this instance's
    /// tolerance.
    pub fn periphery(&self) -> Vec<V> {
        let diameter = self.diameter();
        self.eccentricity
            .iter()
            .filter(|&(_, &ecc)| approx_eq(ecc, diameter, self.tolerance))
            .map(|(&v, _)| v)
            .collect()
    }

    /// `{u : for every v with d(u,v) == eccentricity(u), eccentricity(v) ==
    /// eccentricity(u)}`, within this instance's tolerance. Requires the
    /// oracle used to build this instance; callers pass the same one back
    /// in so the per-vertex farthest-vertex check can be re-run.
    pub fn pseudo_periphery<D: Distance<V> + ?Sized>(&self, distance: &D) -> Vec<V> {
        self.eccentricity
            .keys()
            .copied()
            .filter(|&u| {
                let ecc_u = self.eccentricity[&u];
                let map = distance.get_distance_map(u);
                map.iter().all(|(&v, &d)| {
                    if !approx_eq(d, ecc_u, self.tolerance) {
                        return true;
                    }
                    self.eccentricity
                        .get(&v)
                        .map(|&ecc_v| approx_eq(ecc_v, ecc_u, self.tolerance))
                        .unwrap_or(false)
                })
            })
            .collect()
    }
}

fn eccentricity_map<V: Copy + Eq + Hash, D: Distance<V> + ?Sized>(
    distance: &D,
    vertices: impl IntoIterator<Item = V>,
) -> HashMap<V, f64> {
    let vertices: Vec<V> = vertices.into_iter().collect();
    let mut eccentricity = HashMap::new();
    for &v in &vertices {
        let map = distance.get_distance_map(v);
        let mut max = 0.0_f64;
        let mut unreachable = false;
        for &u in &vertices {
            if u == v {
                continue;
            }
            match map.get(&u) {
                Some(&d) => {
                    if d > max {
                        max = d;
                    }
                }
                None => unreachable = true,
            }
        }
        eccentricity.insert(v, if unreachable { f64::INFINITY } else { max });
    }
    eccentricity
}

fn eccentricity_map_cancellable<V: Copy + Eq + Hash, D: Distance<V> + ?Sized>(
    distance: &D,
    vertices: impl IntoIterator<Item = V>,
    cancelled: &AtomicBool,
) -> Result<HashMap<V, f64>, Error> {
    let vertices: Vec<V> = vertices.into_iter().collect();
    let mut eccentricity = HashMap::new();
    for &v in &vertices {
        if cancelled.load(Ordering::Relaxed) {
            return Err(Error::Cancelled);
        }
        let map = distance.get_distance_map(v);
        let mut max = 0.0_f64;
        let mut unreachable = false;
        for &u in &vertices {
            if u == v {
                continue;
            }
            match map.get(&u) {
                Some(&d) => {
                    if d > max {
                        max = d;
                    }
                }
                None => unreachable = true,
            }
        }
        eccentricity.insert(v, if unreachable { f64::INFINITY } else { max });
    }
    Ok(eccentricity)
}

fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    if a.is_infinite() || b.is_infinite() {
        a == b
    } else {
        (a - b).abs() <= eps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::shortest_paths::AllPairsDistance;
    use crate::graph::SparseHypergraphBuilder;

    fn path_graph() -> crate::graph::SparseHypergraph<u32, u32> {
        SparseHypergraphBuilder::<u32, u32>::new(false)
            .add_vertex(1)
            .add_vertex(2)
            .add_vertex(3)
            .add_vertex(4)
            .add_vertex(5)
            .add_edge(1, 1, 2)
            .unwrap()
            .add_edge(2, 2, 3)
            .unwrap()
            .add_edge(3, 3, 4)
            .unwrap()
            .add_edge(4, 4, 5)
            .unwrap()
            .build()
    }

    #[test]
    fn path_graph_diameter_radius_and_center() {
        let g = path_graph();
        let oracle = AllPairsDistance::unweighted(&g);
        let gd = GraphDistance::new(&oracle, g.vertices());
        assert_eq!(gd.diameter(), 4.0);
        assert_eq!(gd.radius(), 2.0);
        assert_eq!(gd.center(), vec![3]);
        let mut periphery = gd.periphery();
        periphery.sort_unstable();
        assert_eq!(periphery, vec![1, 5]);
    }

    #[test]
    fn cancellation_flag_aborts_eccentricity_sweep() {
        use std::sync::atomic::AtomicBool;
        let g = path_graph();
        let oracle = AllPairsDistance::unweighted(&g);
        let cancelled = AtomicBool::new(true);
        let err = GraphDistance::with_cancellation(&oracle, g.vertices(), &cancelled).unwrap_err();
        assert!(matches!(err, Error::Cancelled));

        let not_cancelled = AtomicBool::new(false);
        let gd = GraphDistance::with_cancellation(&oracle, g.vertices(), &not_cancelled).unwrap();
        assert_eq!(gd.diameter(), 4.0);
    }

    #[test]
    fn rejects_non_positive_tolerance() {
        let g = path_graph();
        let oracle = AllPairsDistance::unweighted(&g);
        let err = GraphDistance::with_tolerance(&oracle, g.vertices(), 0.0).unwrap_err();
        assert!(matches!(err, Error::InvalidTolerance(_)));
    }

    #[test]
    fn from_graph_unweighted_matches_oracle_based_construction() {
        let g = path_graph();
        let direct = GraphDistance::from_graph_unweighted(&g);
        assert_eq!(direct.diameter(), 4.0);
        assert_eq!(direct.radius(), 2.0);
        assert_eq!(direct.center(), vec![3]);
    }

    #[test]
    fn from_graph_weighted_rejects_negative_weights() {
        let g = path_graph();
        let err = GraphDistance::from_graph_weighted(&g, |_e: u32| -1.0).unwrap_err();
        assert!(matches!(err, Error::NegativeWeight(_)));
    }

    #[test]
    fn from_graph_weighted_with_unit_weights_matches_unweighted() {
        let g = path_graph();
        let weighted = GraphDistance::from_graph_weighted(&g, |_e: u32| 1.0).unwrap();
        assert_eq!(weighted.diameter(), 4.0);
        assert_eq!(weighted.radius(), 2.0);
    }

    #[test]
    fn empty_graph_has_zero_diameter_and_radius() {
        let g = SparseHypergraphBuilder::<u32, u32>::new(false).build();
        let oracle = AllPairsDistance::unweighted(&g);
        let gd = GraphDistance::new(&oracle, g.vertices());
        assert_eq!(gd.diameter(), 0.0);
        assert_eq!(gd.radius(), 0.0);
    }
}
