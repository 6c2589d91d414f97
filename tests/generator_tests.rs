use graphstats::{
    generators::{clustered, erdos_renyi, scale_free, small_world},
    stats::{
        clustering::avg_clustering, components::num_components, modularity::label_modularity,
    },
};
use rand::{SeedableRng, rngs::StdRng};

fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

fn edge_list(graph: &graphstats::Graph) -> Vec<(u32, u32)> {
    graph.edges().map(|(u, v, _)| (u, v)).collect()
}

#[test]
fn test_erdos_renyi_extremes_and_validation() {
    let complete = erdos_renyi(6, 1.0, &mut rng(1)).expect("complete");
    assert_eq!(complete.num_edges(), 15);
    let empty = erdos_renyi(6, 0.0, &mut rng(1)).expect("empty");
    assert_eq!(empty.num_edges(), 0);
    assert!(erdos_renyi(6, 1.5, &mut rng(1)).is_err());
    assert!(erdos_renyi(6, -0.1, &mut rng(1)).is_err());
    assert_eq!(erdos_renyi(1, 1.0, &mut rng(1)).expect("single").num_edges(), 0);
}

#[test]
fn test_erdos_renyi_is_reproducible() {
    let a = erdos_renyi(40, 0.2, &mut rng(42)).expect("a");
    let b = erdos_renyi(40, 0.2, &mut rng(42)).expect("b");
    assert_eq!(edge_list(&a), edge_list(&b));
    assert_eq!(a.num_edges(), 156);
}

#[test]
fn test_erdos_renyi_hits_exact_edge_count() {
    for seed in 0..200 {
        let graph = erdos_renyi(50, 0.3, &mut rng(seed)).expect("er");
        assert_eq!(graph.num_edges(), 368, "seed {seed}");
    }
    for (n, density, expected) in [(2, 0.5, 1), (7, 0.5, 11), (20, 0.1, 19)] {
        let graph = erdos_renyi(n, density, &mut rng(5)).expect("er");
        assert_eq!(graph.num_edges(), expected, "n {n} density {density}");
    }
}

#[test]
fn test_scale_free_edge_count_and_connectivity() {
    let graph = scale_free(50, 2, &mut rng(3)).expect("sf");
    assert_eq!(graph.num_edges(), 3 + 47 * 2);
    assert_eq!(num_components(&graph, 0).expect("components"), 1);
    assert!((0..50).all(|u| graph.degree(u) >= 2));
    assert!(scale_free(50, 0, &mut rng(3)).is_err());
    assert!(scale_free(3, 2, &mut rng(3)).is_err());
}

#[test]
fn test_small_world_lattice_and_rewiring() {
    let lattice = small_world(10, 4, 0.0, &mut rng(5)).expect("lattice");
    assert_eq!(lattice.num_edges(), 20);
    assert!((0..10).all(|u| lattice.degree(u) == 4));
    assert!((avg_clustering(&lattice).expect("clustering") - 0.5).abs() < 1e-9);

    let rewired = small_world(10, 4, 1.0, &mut rng(5)).expect("rewired");
    assert_eq!(rewired.num_edges(), 20);
    assert!(small_world(10, 3, 0.1, &mut rng(5)).is_err());
    assert!(small_world(4, 4, 0.1, &mut rng(5)).is_err());
}

#[test]
fn test_clustered_blocks() {
    let graph = clustered(12, 3, 1.0, 0.0, &mut rng(9)).expect("clustered");
    assert_eq!(graph.num_edges(), 18);
    assert_eq!(num_components(&graph, 0).expect("components"), 3);
    assert_eq!(graph.label_values(), &[0, 1, 2]);
    assert!((label_modularity(&graph).expect("modularity") - 2.0 / 3.0).abs() < 1e-9);
    assert!(clustered(12, 0, 0.5, 0.1, &mut rng(9)).is_err());
    assert!(clustered(12, 3, 0.5, 2.0, &mut rng(9)).is_err());
}
