use rand::rngs::StdRng;
use rand::SeedableRng;

use proptest::prelude::*;
use rstest::rstest;

use cellforge::topology::generators::{
    barabasi_albert, erdos_renyi, grid, layered_dag, multiple_in_and_out, watts_strogatz
};
use cellforge::topology::graph::GraphMap;

fn neighbors_in_range(graph: &GraphMap) -> bool {
    return graph.out_of_range_neighbor().is_none();
}

#[rstest]
#[case(0, vec![1, 8, 3, 6])]
#[case(4, vec![5, 3, 7, 1])]
#[case(8, vec![0, 7, 2, 5])]
fn test_grid_neighbors(#[case] node: usize, #[case] expected: Vec<usize>) {
    let graph = grid(9);

    assert_eq!(9, graph.size(), "Wrong graph size! Expected {}, found {}", 9, graph.size());
    assert_eq!(expected, graph.neighbors(node),
        "Wrong neighbors of node {}! Expected {:?}, found {:?}",
        node, expected, graph.neighbors(node)
    );
}

#[test]
fn test_grid_single_node_is_own_neighbor() {
    let graph = grid(1);

    assert_eq!(vec![0, 0, 0, 0], graph.neighbors(0),
        "A 1-node grid must wrap onto itself! Found {:?}", graph.neighbors(0)
    );
}

#[test]
fn test_erdos_renyi_extremes() {
    let mut rng = StdRng::seed_from_u64(42);

    let empty = erdos_renyi(&mut rng, 10, 0.0);
    for node in 0..empty.size() {
        assert!(empty.neighbors(node).is_empty(),
            "p = 0 must create no edges! Node {} has {:?}", node, empty.neighbors(node)
        );
    }

    let complete = erdos_renyi(&mut rng, 10, 1.0);
    for node in 0..complete.size() {
        assert_eq!(9, complete.neighbors(node).len(),
            "p = 1 must connect node {} to everyone else! Found {}",
            node, complete.neighbors(node).len()
        );
        assert!(!complete.neighbors(node).contains(&node),
            "No self loops in an Erdős–Rényi graph!"
        );
    }
}

#[test]
fn test_watts_strogatz_ring_lattice() {
    let mut rng = StdRng::seed_from_u64(42);

    let graph = watts_strogatz(&mut rng, 10, 4, 0.0);
    assert_eq!(vec![1, 2], graph.neighbors(0),
        "Wrong ring lattice! Expected {:?}, found {:?}", vec![1, 2], graph.neighbors(0)
    );
    for node in 0..graph.size() {
        let expected: Vec<usize> = vec![(node + 1) % 10, (node + 2) % 10];
        assert_eq!(expected, graph.neighbors(node),
            "beta = 0 must keep the exact ring lattice at node {}!", node
        );
    }
}

#[test]
fn test_watts_strogatz_rewired_degree() {
    let mut rng = StdRng::seed_from_u64(42);

    let graph = watts_strogatz(&mut rng, 20, 4, 0.5);
    assert!(neighbors_in_range(&graph));
    for node in 0..graph.size() {
        assert_eq!(2, graph.neighbors(node).len(),
            "Rewiring must keep the out-degree! Node {} has {}",
            node, graph.neighbors(node).len()
        );
        assert!(!graph.neighbors(node).contains(&node),
            "Rewiring must not create self loops! Node {}", node
        );
    }
}

#[test]
fn test_barabasi_albert_connects_every_node() {
    let mut rng = StdRng::seed_from_u64(42);

    let graph = barabasi_albert(&mut rng, 30, 2);
    assert_eq!(30, graph.size(), "Wrong graph size! Expected {}, found {}", 30, graph.size());
    assert!(neighbors_in_range(&graph));
    for node in 0..graph.size() {
        assert!(!graph.neighbors(node).is_empty(),
            "Preferential attachment must leave no node isolated! Node {}", node
        );
    }
}

#[test]
fn test_barabasi_albert_deterministic() {
    let mut rng1 = StdRng::seed_from_u64(42);
    let mut rng2 = StdRng::seed_from_u64(42);

    let graph1 = barabasi_albert(&mut rng1, 25, 3);
    let graph2 = barabasi_albert(&mut rng2, 25, 3);
    assert_eq!(graph1, graph2, "Same seed must generate the same graph!");
}

#[test]
fn test_layered_dag_edges_point_forward() {
    let mut rng = StdRng::seed_from_u64(42);
    let (layers, layer_size) = (4, 5);

    let graph = layered_dag(&mut rng, layers, layer_size, 0.8);
    assert_eq!(layers * layer_size, graph.size(),
        "Wrong graph size! Expected {}, found {}", layers * layer_size, graph.size()
    );
    for node in 0..graph.size() {
        let layer = node / layer_size;
        for &neighbor in graph.neighbors(node) {
            assert_eq!(layer + 1, neighbor / layer_size,
                "Edge {} -> {} must cross into the next layer!", node, neighbor
            );
        }
    }
    for node in (layers - 1) * layer_size..graph.size() {
        assert!(graph.neighbors(node).is_empty(),
            "The last layer has no outgoing edges! Node {} has {:?}", node, graph.neighbors(node)
        );
    }
}

#[test]
fn test_layered_dag_full_bipartite() {
    let mut rng = StdRng::seed_from_u64(42);

    let graph = layered_dag(&mut rng, 2, 3, 1.0);
    for node in 0..3 {
        assert_eq!(vec![3, 4, 5], graph.neighbors(node),
            "p = 1 must connect every adjacent pair! Node {} has {:?}", node, graph.neighbors(node)
        );
    }
}

#[test]
fn test_multiple_in_and_out_plain_degree() {
    let mut rng = StdRng::seed_from_u64(42);

    // No hubs: every node draws exactly `degree` out-targets.
    let graph = multiple_in_and_out(&mut rng, 20, 0.0, 0.0, 3);
    assert!(neighbors_in_range(&graph));
    for node in 0..graph.size() {
        assert_eq!(3, graph.neighbors(node).len(),
            "Wrong out-degree! Expected {}, found {}", 3, graph.neighbors(node).len()
        );
        assert!(!graph.neighbors(node).contains(&node), "Self edges are skipped!");
    }
}

#[test]
fn test_multiple_in_and_out_hub_edge_count() {
    let mut rng = StdRng::seed_from_u64(42);
    let (n, degree) = (20, 2);
    let (f_in, f_out) = (0.1, 0.1);

    let graph = multiple_in_and_out(&mut rng, n, f_in, f_out, degree);
    assert!(neighbors_in_range(&graph));

    // n*d base edges, plus d²-d extra per out-hub, plus d² incoming per
    // in-hub. Duplicates count: they are legitimate weight boosts.
    let hubs_in = (n as f64 * f_in).floor() as usize;
    let hubs_out = (n as f64 * f_out).floor() as usize;
    let expected = n * degree
        + hubs_out * (degree * degree - degree)
        + hubs_in * (degree * degree);
    let total: usize = (0..graph.size()).map(|node| graph.neighbors(node).len()).sum();
    assert_eq!(expected, total,
        "Wrong total edge count! Expected {}, found {}", expected, total
    );
}

proptest! {
    #[test]
    fn prop_grid_roundtrip(n in 1usize..200) {
        let graph = grid(n);
        prop_assert_eq!(n, graph.size());
        prop_assert!(neighbors_in_range(&graph));
    }

    #[test]
    fn prop_erdos_renyi_roundtrip(seed in 0u64..1000, n in 1usize..60, p in 0.0f64..1.0) {
        let mut rng = StdRng::seed_from_u64(seed);
        let graph = erdos_renyi(&mut rng, n, p);
        prop_assert_eq!(n, graph.size());
        prop_assert!(neighbors_in_range(&graph));
    }

    #[test]
    fn prop_watts_strogatz_roundtrip(seed in 0u64..1000, n in 8usize..60, half_k in 1usize..3, beta in 0.0f64..1.0) {
        let mut rng = StdRng::seed_from_u64(seed);
        let graph = watts_strogatz(&mut rng, n, 2 * half_k, beta);
        prop_assert_eq!(n, graph.size());
        prop_assert!(neighbors_in_range(&graph));
    }

    #[test]
    fn prop_barabasi_albert_roundtrip(seed in 0u64..1000, n in 1usize..60, m in 1usize..4) {
        let mut rng = StdRng::seed_from_u64(seed);
        let graph = barabasi_albert(&mut rng, n, m);
        prop_assert_eq!(n, graph.size());
        prop_assert!(neighbors_in_range(&graph));
    }

    #[test]
    fn prop_layered_dag_roundtrip(seed in 0u64..1000, layers in 1usize..6, layer_size in 1usize..10, p in 0.0f64..1.0) {
        let mut rng = StdRng::seed_from_u64(seed);
        let graph = layered_dag(&mut rng, layers, layer_size, p);
        prop_assert_eq!(layers * layer_size, graph.size());
        prop_assert!(neighbors_in_range(&graph));
    }

    #[test]
    fn prop_multiple_in_and_out_roundtrip(seed in 0u64..1000, n in 2usize..60, f in 0.0f64..0.5, d in 1usize..4) {
        let mut rng = StdRng::seed_from_u64(seed);
        let graph = multiple_in_and_out(&mut rng, n, f, f, d);
        prop_assert_eq!(n, graph.size());
        prop_assert!(neighbors_in_range(&graph));
    }
}
