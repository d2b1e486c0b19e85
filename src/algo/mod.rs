// Copyright (c) The cargo-guppy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The algorithmic core: shortest paths, betweenness, connectivity,
//! centrality and distance metrics, all generic over [`crate::graph::Graph`].

pub mod betweenness;
pub mod centrality;
pub mod connectivity;
pub mod distance;
pub mod pqueue;
pub mod shortest_paths;

pub use betweenness::{
    betweenness, betweenness_cancellable, betweenness_weighted, betweenness_weighted_cancellable,
    BetweennessScores,
};
pub use centrality::{CentralityMode, ClosenessCentrality, DegreeCentrality};
pub use connectivity::{
    strongly_connected_components, weakly_connected_components, Components,
};
pub use distance::GraphDistance;
pub use shortest_paths::{bfs, dijkstra, AllPairsDistance, Distance, PathState};
