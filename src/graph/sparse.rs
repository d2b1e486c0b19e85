// Copyright (c) The cargo-guppy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `SparseHypergraph`: a validating, sparse-adjacency-map reference
//! implementation of the [`Graph`] contract.
//!
//! The graph container's internal storage is deliberately out of scope for
//! the algorithmic core; this module exists so that callers who don't
//! already have their own `Graph` implementation can build one, and so this
//! crate's own tests have something concrete to run the algorithms against.

use crate::graph::{EndpointSet, Graph};
use crate::Error;
use indexmap::{IndexMap, IndexSet};
use smallvec::SmallVec;
use std::hash::Hash;

/// One edge's endpoint description, independent of the graph's overall
/// directedness (an undirected graph's edges still get a `source`/`dest`
/// split for internal bookkeeping; `source_set`/`dest_set`/`endpoints` are
/// wired to all agree for those graphs).
#[derive(Clone, Debug)]
struct EdgeData<V> {
    source: EndpointSet<V>,
    dest: EndpointSet<V>,
    endpoints: EndpointSet<V>,
}

/// A sparse-adjacency-map hypergraph: vertices and edges are stored in
/// insertion-ordered, hash-indexed maps, with per-vertex incident/in/out
/// edge lists built once at construction time.
#[derive(Clone, Debug)]
pub struct SparseHypergraph<V, E> {
    directed: bool,
    vertices: IndexSet<V>,
    edges: IndexMap<E, EdgeData<V>>,
    incident: IndexMap<V, SmallVec<[E; 4]>>,
    out: IndexMap<V, SmallVec<[E; 4]>>,
    in_: IndexMap<V, SmallVec<[E; 4]>>,
}

impl<V, E> Graph for SparseHypergraph<V, E>
where
    V: Copy + Eq + Hash + std::fmt::Debug,
    E: Copy + Eq + Hash + std::fmt::Debug,
{
    type Vertex = V;
    type Edge = E;

    fn vertices(&self) -> Box<dyn Iterator<Item = V> + '_> {
        Box::new(self.vertices.iter().copied())
    }

    fn edges(&self) -> Box<dyn Iterator<Item = E> + '_> {
        Box::new(self.edges.keys().copied())
    }

    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn is_directed(&self) -> bool {
        self.directed
    }

    fn endpoints(&self, e: E) -> EndpointSet<V> {
        self.edges
            .get(&e)
            .map(|d| d.endpoints.clone())
            .unwrap_or_default()
    }

    fn source_set(&self, e: E) -> EndpointSet<V> {
        self.edges
            .get(&e)
            .map(|d| d.source.clone())
            .unwrap_or_default()
    }

    fn dest_set(&self, e: E) -> EndpointSet<V> {
        self.edges
            .get(&e)
            .map(|d| d.dest.clone())
            .unwrap_or_default()
    }

    fn out_edges(&self, v: V) -> Box<dyn Iterator<Item = E> + '_> {
        Box::new(
            self.out
                .get(&v)
                .map(|es| es.iter().copied())
                .into_iter()
                .flatten(),
        )
    }

    fn in_edges(&self, v: V) -> Box<dyn Iterator<Item = E> + '_> {
        Box::new(
            self.in_
                .get(&v)
                .map(|es| es.iter().copied())
                .into_iter()
                .flatten(),
        )
    }

    fn incident_edges(&self, v: V) -> Box<dyn Iterator<Item = E> + '_> {
        Box::new(
            self.incident
                .get(&v)
                .map(|es| es.iter().copied())
                .into_iter()
                .flatten(),
        )
    }
}

/// Builds a [`SparseHypergraph`], validating edges as they're added.
///
/// Rejects bad input at construction time with a descriptive [`Error`],
/// rather than producing a graph that silently misbehaves at query time.
pub struct SparseHypergraphBuilder<V, E> {
    directed: bool,
    vertices: IndexSet<V>,
    edges: IndexMap<E, EdgeData<V>>,
}

impl<V, E> SparseHypergraphBuilder<V, E>
where
    V: Copy + Eq + Hash + std::fmt::Debug,
    E: Copy + Eq + Hash + std::fmt::Debug,
{
    /// Creates a new, empty builder for a directed or undirected hypergraph.
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            vertices: IndexSet::new(),
            edges: IndexMap::new(),
        }
    }

    /// Registers a vertex, returning `self` for chaining. Adding a vertex
    /// that's already present is a no-op.
    pub fn add_vertex(mut self, v: V) -> Self {
        self.vertices.insert(v);
        self
    }

    /// Adds an ordinary (two-endpoint) or self-loop (one-endpoint) edge
    /// between `a` and `b`. For a directed graph, `a` is the source and `b`
    /// the destination.
    pub fn add_edge(self, e: E, a: V, b: V) -> Result<Self, Error> {
        let mut endpoints = EndpointSet::new();
        endpoints.push(a);
        if a != b {
            endpoints.push(b);
        }
        let mut source = EndpointSet::new();
        source.push(a);
        let mut dest = EndpointSet::new();
        dest.push(b);
        self.add_hyperedge(e, source, dest, endpoints)
    }

    /// Adds an undirected hyperedge spanning `endpoints` (≥ 1 vertices).
    pub fn add_undirected_hyperedge(
        self,
        e: E,
        endpoints: impl IntoIterator<Item = V>,
    ) -> Result<Self, Error> {
        let endpoints: EndpointSet<V> = endpoints.into_iter().collect();
        if endpoints.is_empty() {
            return Err(Error::InvalidEdge(format!(
                "edge {:?} has no endpoints",
                e
            )));
        }
        let source = endpoints.clone();
        let dest = endpoints.clone();
        self.add_hyperedge(e, source, dest, endpoints)
    }

    /// Adds a directed hyperedge from `source` to `dest` (each non-empty).
    /// The edge's overall `endpoints` is the union of the two sets, per the
    /// invariant `source ∪ dest = endpoints`.
    pub fn add_directed_hyperedge(
        self,
        e: E,
        source: impl IntoIterator<Item = V>,
        dest: impl IntoIterator<Item = V>,
    ) -> Result<Self, Error> {
        let source: EndpointSet<V> = source.into_iter().collect();
        let dest: EndpointSet<V> = dest.into_iter().collect();
        if source.is_empty() || dest.is_empty() {
            return Err(Error::InvalidEdge(format!(
                "directed edge {:?} needs a non-empty source and destination",
                e
            )));
        }
        let mut endpoints: IndexSet<V> = IndexSet::new();
        endpoints.extend(source.iter().copied());
        endpoints.extend(dest.iter().copied());
        let endpoints: EndpointSet<V> = endpoints.into_iter().collect();
        self.add_hyperedge(e, source, dest, endpoints)
    }

    fn add_hyperedge(
        mut self,
        e: E,
        source: EndpointSet<V>,
        dest: EndpointSet<V>,
        endpoints: EndpointSet<V>,
    ) -> Result<Self, Error> {
        for v in endpoints.iter() {
            if !self.vertices.contains(v) {
                return Err(Error::InvalidEdge(format!(
                    "edge {:?} references unknown vertex {:?}",
                    e, v
                )));
            }
        }
        if self.edges.contains_key(&e) {
            return Err(Error::InvalidEdge(format!(
                "edge {:?} was added more than once",
                e
            )));
        }
        self.edges.insert(
            e,
            EdgeData {
                source,
                dest,
                endpoints,
            },
        );
        Ok(self)
    }

    /// Finalizes the graph, building the per-vertex incident/in/out edge
    /// indexes.
    pub fn build(self) -> SparseHypergraph<V, E> {
        let mut incident: IndexMap<V, SmallVec<[E; 4]>> = IndexMap::new();
        let mut out: IndexMap<V, SmallVec<[E; 4]>> = IndexMap::new();
        let mut in_: IndexMap<V, SmallVec<[E; 4]>> = IndexMap::new();
        for &v in &self.vertices {
            incident.insert(v, SmallVec::new());
            out.insert(v, SmallVec::new());
            in_.insert(v, SmallVec::new());
        }
        for (&e, data) in &self.edges {
            for &v in &data.endpoints {
                incident.entry(v).or_default().push(e);
            }
            if self.directed {
                for &v in &data.source {
                    out.entry(v).or_default().push(e);
                }
                for &v in &data.dest {
                    in_.entry(v).or_default().push(e);
                }
            } else {
                for &v in &data.endpoints {
                    out.entry(v).or_default().push(e);
                    in_.entry(v).or_default().push(e);
                }
            }
        }
        SparseHypergraph {
            directed: self.directed,
            vertices: self.vertices,
            edges: self.edges,
            incident,
            out,
            in_,
        }
    }
}
