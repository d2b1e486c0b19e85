// Copyright (c) The cargo-guppy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shortest-path engines (C4): weighted Dijkstra and unweighted BFS, unified
//! behind one state machine and a `Distance` oracle for external callers.

use crate::algo::pqueue::{FifoQueue, PriorityQueue, WeightedQueue};
use crate::graph::{opposite, EdgeWeight, Graph, UnitWeight};
use crate::Error;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::hash::Hash;

/// Per-source traversal state: distance, shortest-path count (σ, as a wide
/// float to tolerate exponential blowup), and a vector-of-pairs predecessor
/// DAG (append-only during the forward phase, discarded after Brandes'
/// accumulation phase).
pub struct PathState<V, E> {
    source: V,
    distance: HashMap<V, f64>,
    path_count: HashMap<V, f64>,
    predecessors: HashMap<V, SmallVec<[(E, V); 4]>>,
    /// Settled vertices in the order they were removed from the heap/queue;
    /// non-decreasing distance from `source`. Required by Brandes'
    /// accumulation phase (popped in reverse = non-increasing distance).
    settled_order: Vec<V>,
}

impl<V: Copy + Eq + Hash, E: Copy + Eq + Hash> PathState<V, E> {
    /// The source vertex this state was computed for.
    pub fn source(&self) -> V {
        self.source
    }

    /// The shortest-path distance to `v`, or `None` if `v` is unreachable
    /// from the source (or unknown to the graph).
    pub fn distance(&self, v: V) -> Option<f64> {
        self.distance.get(&v).copied()
    }

    /// σ(source, v): the number of shortest paths from the source to `v`.
    /// σ(source, source) = 1; unreached vertices have σ = 0.
    pub fn path_count(&self, v: V) -> f64 {
        self.path_count.get(&v).copied().unwrap_or(0.0)
    }

    /// The predecessor DAG entries for `v`: `(edge, vertex)` pairs on some
    /// shortest path from the source to `v`.
    pub fn predecessors(&self, v: V) -> &[(E, V)] {
        self.predecessors
            .get(&v)
            .map(|p| p.as_slice())
            .unwrap_or(&[])
    }

    /// Vertices in the order they were settled (non-decreasing distance).
    pub fn settled_order(&self) -> &[V] {
        &self.settled_order
    }

    /// A read-only projection of `distance[]` for every reached vertex.
    pub fn distance_map(&self) -> &HashMap<V, f64> {
        &self.distance
    }
}

/// Pre-scans every edge in the graph for a negative weight, rejecting up
/// front before the algorithm enters its main loop rather than lazily as
/// edges are first visited during traversal.
pub fn check_no_negative_weights<G, W>(graph: &G, weight: &W) -> Result<(), Error>
where
    G: Graph,
    W: EdgeWeight<G::Edge>,
{
    for e in graph.edges() {
        if weight.weight(e) < 0.0 {
            return Err(Error::NegativeWeight(format!("{:?}", e)));
        }
    }
    Ok(())
}

/// Runs the shared relax-and-accumulate state machine: a decrease-key
/// priority queue for the weighted case, a FIFO for the unweighted case,
/// both driven by the same relaxation rule.
///
/// `weight` is ignored when `unweighted` is true (the caller should pass
/// [`UnitWeight`] in that case, which is what [`bfs`] does). Callers MUST
/// run [`check_no_negative_weights`] before calling this, which both
/// [`dijkstra`] and [`AllPairsDistance::weighted`] do; the state machine
/// itself never fails once weights are known non-negative.
fn run<G, W>(
    graph: &G,
    source: G::Vertex,
    weight: &W,
    unweighted: bool,
) -> PathState<G::Vertex, G::Edge>
where
    G: Graph,
    W: EdgeWeight<G::Edge>,
{
    let mut distance = HashMap::new();
    let mut path_count = HashMap::new();
    let mut predecessors: HashMap<G::Vertex, SmallVec<[(G::Edge, G::Vertex); 4]>> = HashMap::new();
    let mut settled_order = Vec::new();

    distance.insert(source, 0.0);
    path_count.insert(source, 1.0);

    if unweighted {
        let mut queue: FifoQueue<G::Vertex> = FifoQueue::new();
        queue.insert(source, 0.0);
        relax_loop(
            graph,
            weight,
            &mut queue,
            &mut distance,
            &mut path_count,
            &mut predecessors,
            &mut settled_order,
        );
    } else {
        let mut queue: WeightedQueue<G::Vertex> = WeightedQueue::new();
        queue.insert(source, 0.0);
        relax_loop(
            graph,
            weight,
            &mut queue,
            &mut distance,
            &mut path_count,
            &mut predecessors,
            &mut settled_order,
        );
    }

    PathState {
        source,
        distance,
        path_count,
        predecessors,
        settled_order,
    }
}

#[allow(clippy::too_many_arguments)]
fn relax_loop<G, W, Q>(
    graph: &G,
    weight: &W,
    queue: &mut Q,
    distance: &mut HashMap<G::Vertex, f64>,
    path_count: &mut HashMap<G::Vertex, f64>,
    predecessors: &mut HashMap<G::Vertex, SmallVec<[(G::Edge, G::Vertex); 4]>>,
    settled_order: &mut Vec<G::Vertex>,
) where
    G: Graph,
    W: EdgeWeight<G::Edge>,
    Q: PriorityQueue<G::Vertex>,
{
    const EPS: f64 = 1e-9;

    while let Some(v) = queue.remove() {
        settled_order.push(v);
        let dist_v = distance[&v];

        for e in graph.out_edges(v) {
            let w_edge = weight.weight(e);
            for w in opposite(graph, v, e) {
                let alt = dist_v + w_edge;
                let current = distance.get(&w).copied();
                match current {
                    None => {
                        distance.insert(w, alt);
                        path_count.insert(w, path_count.get(&v).copied().unwrap_or(0.0));
                        predecessors.entry(w).or_default().push((e, v));
                        queue.insert(w, alt);
                    }
                    Some(cur) if alt < cur - EPS => {
                        distance.insert(w, alt);
                        path_count.insert(w, path_count.get(&v).copied().unwrap_or(0.0));
                        let preds = predecessors.entry(w).or_default();
                        preds.clear();
                        preds.push((e, v));
                        if queue.contains(&w) {
                            queue.update(w, alt);
                        } else {
                            queue.insert(w, alt);
                        }
                    }
                    Some(cur) if (alt - cur).abs() <= EPS => {
                        predecessors.entry(w).or_default().push((e, v));
                        *path_count.entry(w).or_insert(0.0) +=
                            path_count.get(&v).copied().unwrap_or(0.0);
                    }
                    _ => {}
                }
            }
        }
    }
}

/// Runs Dijkstra's algorithm from `source` over non-negative edge weights
/// given by `weight`.
#[tracing::instrument(level = "debug", skip(graph, weight))]
pub fn dijkstra<G, W>(
    graph: &G,
    source: G::Vertex,
    weight: &W,
) -> Result<PathState<G::Vertex, G::Edge>, Error>
where
    G: Graph,
    W: EdgeWeight<G::Edge>,
{
    check_no_negative_weights(graph, weight)?;
    Ok(run(graph, source, weight, false))
}

/// Runs unweighted BFS from `source` (unit edge weights, FIFO, no
/// decrease-key). Unit weights are never negative, so this never fails.
#[tracing::instrument(level = "debug", skip(graph))]
pub fn bfs<G>(graph: &G, source: G::Vertex) -> PathState<G::Vertex, G::Edge>
where
    G: Graph,
{
    run(graph, source, &UnitWeight, true)
}

/// A read-only distance oracle from a source to any vertex. [`PathState`]
/// and [`AllPairsDistance`] both implement it.
pub trait Distance<V> {
    /// Returns the shortest-path distance from `source` to `target`, or
    /// `None` if unreachable.
    fn get_distance(&self, source: V, target: V) -> Option<f64>;

    /// Returns the full (vertex → distance) map for `source`.
    fn get_distance_map(&self, source: V) -> HashMap<V, f64>;
}

impl<V: Copy + Eq + Hash, E: Copy + Eq + Hash> Distance<V> for PathState<V, E> {
    fn get_distance(&self, source: V, target: V) -> Option<f64> {
        debug_assert_eq!(source, self.source);
        self.distance(target)
    }

    fn get_distance_map(&self, source: V) -> HashMap<V, f64> {
        debug_assert_eq!(source, self.source);
        self.distance.clone()
    }
}

/// An all-pairs shortest-path oracle: one [`PathState`] per source,
/// computed lazily and memoized, used by C7 (closeness) and C8 (distance
/// metrics).
pub struct AllPairsDistance<'g, G: Graph> {
    graph: &'g G,
    unweighted: bool,
    weight: Option<Box<dyn EdgeWeight<G::Edge> + 'g>>,
    cache: std::cell::RefCell<HashMap<G::Vertex, std::rc::Rc<PathState<G::Vertex, G::Edge>>>>,
}

impl<'g, G: Graph> AllPairsDistance<'g, G> {
    /// Builds an oracle backed by unweighted BFS.
    #[tracing::instrument(level = "debug", skip(graph))]
    pub fn unweighted(graph: &'g G) -> Self {
        Self {
            graph,
            unweighted: true,
            weight: None,
            cache: std::cell::RefCell::new(HashMap::new()),
        }
    }

    /// Builds an oracle backed by weighted Dijkstra over `weight`. Pre-scans
    /// every edge for a negative weight immediately, at construction time.
    #[tracing::instrument(level = "debug", skip(graph, weight))]
    pub fn weighted(graph: &'g G, weight: impl EdgeWeight<G::Edge> + 'g) -> Result<Self, Error> {
        check_no_negative_weights(graph, &weight)?;
        Ok(Self {
            graph,
            unweighted: false,
            weight: Some(Box::new(weight)),
            cache: std::cell::RefCell::new(HashMap::new()),
        })
    }

    fn path_state(&self, source: G::Vertex) -> std::rc::Rc<PathState<G::Vertex, G::Edge>> {
        if let Some(cached) = self.cache.borrow().get(&source) {
            return cached.clone();
        }
        let state = if self.unweighted {
            bfs(self.graph, source)
        } else {
            run(
                self.graph,
                source,
                self.weight
                    .as_deref()
                    .expect("weight is always Some when unweighted is false"),
                false,
            )
        };
        let state = std::rc::Rc::new(state);
        self.cache.borrow_mut().insert(source, state.clone());
        state
    }
}

impl<'g, G: Graph> Distance<G::Vertex> for AllPairsDistance<'g, G> {
    fn get_distance(&self, source: G::Vertex, target: G::Vertex) -> Option<f64> {
        self.path_state(source).distance(target)
    }

    fn get_distance_map(&self, source: G::Vertex) -> HashMap<G::Vertex, f64> {
        self.path_state(source).distance.clone()
    }
}
