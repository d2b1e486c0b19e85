// Copyright (c) The cargo-guppy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end scenarios exercising the public algorithm surface together
//! against small, hand-checked graphs.

use hypergraph_metrics::algo::{
    betweenness, strongly_connected_components, weakly_connected_components, AllPairsDistance,
    CentralityMode, ClosenessCentrality, DegreeCentrality, GraphDistance,
};
use hypergraph_metrics::algo::centrality::NullHandling;
use hypergraph_metrics::graph::{Graph, SparseHypergraphBuilder};

#[test]
fn directed_triangle() {
    let g = SparseHypergraphBuilder::<u32, u32>::new(true)
        .add_vertex(1)
        .add_vertex(2)
        .add_vertex(3)
        .add_edge(1, 1, 2)
        .unwrap()
        .add_edge(2, 3, 1)
        .unwrap()
        .add_edge(3, 2, 3)
        .unwrap()
        .build();

    let scc = strongly_connected_components(&g).unwrap();
    assert_eq!(scc.len(), 1);
    assert_eq!(scc.components()[0].len(), 3);

    let wcc = weakly_connected_components(&g);
    assert_eq!(wcc.len(), 1);

    for v in [1u32, 2, 3] {
        let deg_in = DegreeCentrality::new(&g, CentralityMode::In, false);
        let deg_out = DegreeCentrality::new(&g, CentralityMode::Out, false);
        assert_eq!(deg_in.score(v), 1.0);
        assert_eq!(deg_out.score(v), 1.0);
    }

    let scores = betweenness(&g, false);
    for v in [1u32, 2, 3] {
        assert_eq!(scores.vertex_score(v), 0.0);
    }
}

#[test]
fn disconnected_directed_graph() {
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
fn star_k15() {
    let mut b = SparseHypergraphBuilder::<u32, u32>::new(false).add_vertex(1);
    for i in 2..=6u32 {
        b = b.add_vertex(i);
    }
    for (edge_id, i) in (2..=6u32).enumerate() {
        b = b.add_edge(edge_id as u32, 1, i).unwrap();
    }
    let g = b.build();

    let deg = DegreeCentrality::new(&g, CentralityMode::Total, false);
    assert_eq!(deg.score(1), 5.0);
    for i in 2..=6u32 {
        assert_eq!(deg.score(i), 1.0);
    }

    let oracle = AllPairsDistance::unweighted(&g);
    let closeness = ClosenessCentrality::new(&oracle, false, NullHandling::Infinite, true);
    assert!((closeness.score(1) - 0.2).abs() < 1e-9);
    for i in 2..=6u32 {
        assert!((closeness.score(i) - 1.0 / 9.0).abs() < 1e-9);
    }

    let scores = betweenness(&g, false);
    assert_eq!(scores.vertex_score(1), 10.0);
    for i in 2..=6u32 {
        assert_eq!(scores.vertex_score(i), 0.0);
    }
}

#[test]
fn path_graph() {
    let g = SparseHypergraphBuilder::<u32, u32>::new(false)
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
        .build();

    let oracle = AllPairsDistance::unweighted(&g);
    let gd = GraphDistance::new(&oracle, g.vertices());
    assert_eq!(gd.diameter(), 4.0);
    assert_eq!(gd.radius(), 2.0);
    assert_eq!(gd.center(), vec![3]);
    let mut periphery = gd.periphery();
    periphery.sort_unstable();
    assert_eq!(periphery, vec![1, 5]);

    let scores = betweenness(&g, false);
    let expected = [(1, 0.0), (2, 3.0), (3, 4.0), (4, 3.0), (5, 0.0)];
    for (v, want) in expected {
        assert_eq!(scores.vertex_score(v), want);
    }

    let closeness = ClosenessCentrality::new(&oracle, false, NullHandling::Infinite, true);
    let expected_closeness = [
        (1, 1.0 / 10.0),
        (2, 1.0 / 7.0),
        (3, 1.0 / 6.0),
        (4, 1.0 / 7.0),
        (5, 1.0 / 10.0),
    ];
    for (v, want) in expected_closeness {
        assert!((closeness.score(v) - want).abs() < 1e-9);
    }
}

#[test]
fn diamond_graph() {
    let g = SparseHypergraphBuilder::<u32, u32>::new(false)
        .add_vertex(1)
        .add_vertex(2)
        .add_vertex(3)
        .add_vertex(4)
        .add_vertex(5)
        .add_edge(1, 1, 2)
        .unwrap()
        .add_edge(2, 2, 3)
        .unwrap()
        .add_edge(3, 2, 4)
        .unwrap()
        .add_edge(4, 3, 5)
        .unwrap()
        .add_edge(5, 4, 5)
        .unwrap()
        .build();

    let scores = betweenness(&g, false);
    let expected = [(1, 0.0), (2, 3.5), (3, 1.0), (4, 1.0), (5, 0.5)];
    for (v, want) in expected {
        assert!((scores.vertex_score(v) - want).abs() < 1e-9);
    }
}

#[test]
fn undirected_hypergraph() {
    let g = SparseHypergraphBuilder::<u32, u32>::new(false)
        .add_vertex(1)
        .add_vertex(2)
        .add_vertex(3)
        .add_vertex(4)
        .add_vertex(5)
        .add_vertex(6)
        .add_undirected_hyperedge(1, vec![1, 2, 3, 4])
        .unwrap()
        .add_undirected_hyperedge(2, vec![4, 5, 6])
        .unwrap()
        .build();

    let deg = DegreeCentrality::new(&g, CentralityMode::Total, false);
    assert_eq!(deg.score(4), 2.0);
    for v in [1u32, 2, 3, 5, 6] {
        assert_eq!(deg.score(v), 1.0);
    }

    let oracle = AllPairsDistance::unweighted(&g);
    let closeness = ClosenessCentrality::new(&oracle, false, NullHandling::Infinite, true);
    assert!((closeness.score(4) - 0.2).abs() < 1e-9);
    for v in [1u32, 2, 3] {
        assert!((closeness.score(v) - 1.0 / 7.0).abs() < 1e-9);
    }
    for v in [5u32, 6] {
        assert!((closeness.score(v) - 1.0 / 8.0).abs() < 1e-9);
    }

    let scores = betweenness(&g, false);
    assert_eq!(scores.vertex_score(4), 6.0);
    for v in [1u32, 2, 3, 5, 6] {
        assert_eq!(scores.vertex_score(v), 0.0);
    }
}
