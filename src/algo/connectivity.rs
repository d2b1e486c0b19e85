// Copyright (c) The cargo-guppy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Weakly and strongly connected components (C6): BFS-based WCC
//! (direction-agnostic) and Gabow's path-based SCC (directed only).

use crate::graph::Graph;
use crate::Error;
use indexmap::IndexSet;
use std::collections::VecDeque;
use std::hash::Hash;

/// One partition of the vertex set: pairwise disjoint sets whose union is
/// every vertex in the graph.
#[derive(Debug, Clone)]
pub struct Components<V> {
    components: Vec<IndexSet<V>>,
}

impl<V: Copy + Eq + Hash> Components<V> {
    /// The vertex sets, in the order they were discovered.
    pub fn components(&self) -> &[IndexSet<V>] {
        &self.components
    }

    /// The number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether there are no components (only true for an empty graph).
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// The component containing `v`, or `None` if `v` is unknown to the
    /// graph.
    pub fn component_of(&self, v: V) -> Option<&IndexSet<V>> {
        self.components.iter().find(|c| c.contains(&v))
    }

    /// Derives the induced subgraph on each component: for every component,
    /// the subset of edges both of whose endpoints lie in that component.
    ///
    /// This is a pure derivation over the read-view and the existing
    /// partition, computed eagerly rather than deferred.
    pub fn connected_subgraphs<G>(&self, graph: &G) -> Vec<Vec<G::Edge>>
    where
        G: Graph<Vertex = V>,
    {
        self.components
            .iter()
            .map(|component| {
                graph
                    .edges()
                    .filter(|&e| graph.endpoints(e).iter().all(|v| component.contains(v)))
                    .collect()
            })
            .collect()
    }
}

/// Weakly connected components: BFS over the undirected closure of
/// adjacency (`Graph::neighbor_edges`). Works on directed or undirected
/// input; for directed input, edge direction is ignored.
#[tracing::instrument(level = "debug", skip(graph))]
pub fn weakly_connected_components<G: Graph>(graph: &G) -> Components<G::Vertex> {
    let mut unvisited: IndexSet<G::Vertex> = graph.vertices().collect();
    let mut components = Vec::new();

    while let Some(&root) = unvisited.iter().next() {
        unvisited.shift_remove(&root);
        let mut cluster = IndexSet::new();
        cluster.insert(root);
        let mut queue = VecDeque::new();
        queue.push_back(root);

        while let Some(v) = queue.pop_front() {
            for e in graph.neighbor_edges(v) {
                for w in crate::graph::opposite(graph, v, e) {
                    if unvisited.shift_remove(&w) {
                        cluster.insert(w);
                        queue.push_back(w);
                    }
                }
            }
        }
        components.push(cluster);
    }

    Components { components }
}

/// Strongly connected components via Gabow's path-based algorithm. Requires
/// a directed graph; returns [`Error::DirectednessMismatch`] otherwise.
#[tracing::instrument(level = "debug", skip(graph))]
pub fn strongly_connected_components<G: Graph>(
    graph: &G,
) -> Result<Components<G::Vertex>, Error> {
    if !graph.is_directed() {
        return Err(Error::DirectednessMismatch);
    }

    let mut gabow = Gabow::<G::Vertex>::new();
    for v in graph.vertices() {
        if !gabow.visited(v) {
            gabow.visit(graph, v);
        }
    }
    Ok(Components {
        components: gabow.components,
    })
}

struct Gabow<V> {
    number: std::collections::HashMap<V, usize>,
    path: Vec<V>,
    boundaries: Vec<usize>,
    next_id: usize,
    components: Vec<IndexSet<V>>,
}

impl<V: Copy + Eq + Hash> Gabow<V> {
    fn new() -> Self {
        Self {
            number: std::collections::HashMap::new(),
            path: Vec::new(),
            boundaries: Vec::new(),
            next_id: 0,
            components: Vec::new(),
        }
    }

    fn visited(&self, v: V) -> bool {
        self.number.contains_key(&v)
    }

    fn visit<G: Graph<Vertex = V>>(&mut self, graph: &G, v: V) {
        self.path.push(v);
        let v_number = self.path.len() - 1;
        self.number.insert(v, v_number);
        self.boundaries.push(v_number);

        for e in graph.out_edges(v) {
            for w in crate::graph::opposite(graph, v, e) {
                match self.number.get(&w).copied() {
                    None => self.visit(graph, w),
                    Some(w_number) => {
                        while *self.boundaries.last().expect("v's own boundary is still on the stack") > w_number {
                            self.boundaries.pop();
                        }
                    }
                }
            }
        }

        if *self.boundaries.last().expect("v's own boundary is still on the stack") == v_number {
            self.boundaries.pop();
            let mut component = IndexSet::new();
            while self.path.len() > v_number {
                let w = self
                    .path
                    .pop()
                    .expect("path holds at least v_number + 1 entries here");
                self.number.insert(w, usize::MAX - self.next_id);
                component.insert(w);
            }
            self.next_id += 1;
            self.components.push(component);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::SparseHypergraphBuilder;

    fn directed_triangle() -> crate::graph::SparseHypergraph<u32, u32> {
        SparseHypergraphBuilder::<u32, u32>::new(true)
            .add_vertex(1)
            .add_vertex(2)
            .add_vertex(3)
            .add_edge(1, 1, 2)
            .unwrap()
            .add_edge(2, 3, 1)
            .unwrap()
            .add_edge(3, 2, 3)
            .unwrap()
            .build()
    }

    #[test]
    fn directed_triangle_is_one_scc_and_one_wcc() {
        let g = directed_triangle();
        let scc = strongly_connected_components(&g).unwrap();
        assert_eq!(scc.len(), 1);
        assert_eq!(scc.components()[0].len(), 3);

        let wcc = weakly_connected_components(&g);
        assert_eq!(wcc.len(), 1);
        assert_eq!(wcc.components()[0].len(), 3);
    }

    #[test]
    fn disconnected_directed_graph_matches_known_partition() {
        let g = SparseHypergraphBuilder::<u32, u32>::new(true)
            .add_vertex(1)
            .add_vertex(2)
            .add_vertex(3)
            .add_vertex(4)
            .add_vertex(5)
            .add_edge(1, 1, 2)
            .unwrap()
            .add_edge(2, 3, 1)
            .unwrap()
            .add_edge(3, 2, 3)
            .unwrap()
            .add_edge(4, 4, 5)
            .unwrap()
            .build();

        let scc = strongly_connected_components(&g).unwrap();
        let mut sizes: Vec<usize> = scc.components().iter().map(|c| c.len()).collect();
        sizes.sort_unstable();
        assert_eq!(sizes, vec![1, 1, 3]);

        let wcc = weakly_connected_components(&g);
        let mut wcc_sizes: Vec<usize> = wcc.components().iter().map(|c| c.len()).collect();
        wcc_sizes.sort_unstable();
        assert_eq!(wcc_sizes, vec![2, 3]);
    }

    #[test]
    fn scc_rejects_undirected_graph() {
        let g = SparseHypergraphBuilder::<u32, u32>::new(false)
            .add_vertex(1)
            .add_vertex(2)
            .add_edge(1, 1, 2)
            .unwrap()
            .build();
        let err = strongly_connected_components(&g).unwrap_err();
        assert!(matches!(err, Error::DirectednessMismatch));
    }

    #[test]
    fn connected_subgraphs_partition_edges_by_component() {
        let g = SparseHypergraphBuilder::<u32, u32>::new(true)
            .add_vertex(1)
            .add_vertex(2)
            .add_vertex(3)
            .add_vertex(4)
            .add_vertex(5)
            .add_edge(1, 1, 2)
            .unwrap()
            .add_edge(2, 3, 1)
            .unwrap()
            .add_edge(3, 2, 3)
            .unwrap()
            .add_edge(4, 4, 5)
            .unwrap()
            .build();
        let wcc = weakly_connected_components(&g);
        let subgraphs = wcc.connected_subgraphs(&g);
        let total_edges: usize = subgraphs.iter().map(|es| es.len()).sum();
        assert_eq!(total_edges, 4);
    }
}
