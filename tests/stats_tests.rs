use graphstats::{
    CacheConfig, Graph, GraphError, GraphLabel, Target, cache,
    generators::erdos_renyi,
    stats::{
        assortativity::assortativity,
        basic::{avg_degree, degree, density},
        centrality::{betweenness, closeness},
        clustering::{avg_clustering, clustering},
        components::{component_nodes, component_sizes, components, num_components},
        edge_betweenness::{accumulate_edge_betweenness, edge_betweenness, edge_betweenness_all},
        efficiency::{avg_local_efficiency, global_efficiency, local_efficiency},
        modularity::{component_modularity, label_modularity, modularity},
        mutual_info::{label_mutual_information, normalized_mutual_information},
        path::{avg_pathlength, connected, numpaths, pathlength, shortest_path_length},
        pathsharing::{pathsharing, pathsharing_all, pathsharing_edge},
        summary::summarize,
    },
};
use rand::{SeedableRng, rngs::StdRng};

const EPS: f64 = 1e-9;

fn graph_from(n: u32, edges: &[(u32, u32)]) -> Graph {
    let mut graph = Graph::undirected(n);
    for &(u, v) in edges {
        graph.add_edge(u, v, 1.0).expect("edge");
    }
    graph
}

fn path_graph(n: u32) -> Graph {
    let edges: Vec<_> = (1..n).map(|u| (u - 1, u)).collect();
    graph_from(n, &edges)
}

fn diamond() -> Graph {
    graph_from(4, &[(0, 1), (0, 2), (1, 3), (2, 3)])
}

fn two_triangles() -> Graph {
    graph_from(6, &[(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5)])
}

fn star(leaves: u32) -> Graph {
    let edges: Vec<_> = (1..=leaves).map(|leaf| (0, leaf)).collect();
    graph_from(leaves + 1, &edges)
}

fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < EPS, "expected {expected}, got {actual}");
}

#[test]
fn test_pathlength_on_path_and_disconnected_graphs() {
    assert_eq!(pathlength(&path_graph(5), 0).expect("pathlength"), vec![0, 1, 2, 3, 4]);
    let triangles = two_triangles();
    assert_eq!(pathlength(&triangles, 1).expect("pathlength"), vec![1, 0, 1, 0, 0, 0]);
    assert!(!connected(&triangles, 0, 4).expect("connected"));
    assert!(connected(&triangles, 3, 5).expect("connected"));
    assert!(pathlength(&triangles, 6).is_err());
}

#[test]
fn test_numpaths_counts_all_shortest_paths() {
    let graph = diamond();
    let paths = numpaths(&graph, 0).expect("numpaths");
    assert_eq!(paths, vec![1.0, 1.0, 1.0, 2.0]);
}

#[test]
fn test_shortest_path_length_stops_early() {
    let graph = path_graph(5);
    assert_eq!(shortest_path_length(&graph, 0, 4).expect("sp"), Some(4));
    assert_eq!(shortest_path_length(&graph, 3, 3).expect("sp"), Some(0));
    assert_eq!(shortest_path_length(&two_triangles(), 0, 5).expect("sp"), None);
}

#[test]
fn test_complete_erdos_renyi_scenario() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut graph = erdos_renyi(6, 1.0, &mut rng).expect("er");
    cache::init(&mut graph);
    assert_eq!(graph.num_edges(), 15);
    assert_close(density(&graph).expect("density"), 1.0);
    assert_close(avg_degree(&graph).expect("avg degree"), 5.0);
    assert_eq!(num_components(&graph, 0).expect("components"), 1);
    assert_close(avg_clustering(&graph).expect("clustering"), 1.0);
    assert_close(avg_pathlength(&graph).expect("pathlength"), 1.0);
}

#[test]
fn test_degree_targets() {
    let graph = star(3);
    assert_eq!(degree(&graph, Target::All).expect("degree"), vec![3.0, 1.0, 1.0, 1.0]);
    assert_eq!(degree(&graph, Target::Single(0)).expect("degree"), vec![3.0]);
    assert!(matches!(
        degree(&graph, Target::Single(4)),
        Err(GraphError::InvalidInput(_))
    ));
}

#[test]
fn test_components_and_sizes() {
    let mut graph = graph_from(7, &[(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5)]);
    cache::init(&mut graph);
    assert_eq!(components(&graph).expect("components"), vec![0, 0, 0, 1, 1, 1, 2]);
    assert_eq!(component_sizes(&graph).expect("sizes"), vec![3, 3, 1]);
    assert_eq!(num_components(&graph, 0).expect("count"), 3);
    assert_eq!(num_components(&graph, 1).expect("count"), 2);
    assert_eq!(component_nodes(&graph, 4).expect("nodes"), vec![3, 4, 5]);

    graph.add_edge(2, 6, 1.0).expect("add");
    assert_eq!(component_sizes(&graph).expect("sizes"), vec![4, 3]);
}

#[test]
fn test_clustering_values() {
    let mut graph = graph_from(5, &[(0, 1), (1, 2), (0, 2), (2, 3)]);
    let values = clustering(&graph, Target::All).expect("clustering");
    assert_close(values[0], 1.0);
    assert_close(values[2], 1.0 / 3.0);
    assert_close(values[3], 0.0);
    assert_close(values[4], 0.0);
    cache::init(&mut graph);
    assert_close(
        avg_clustering(&graph).expect("avg"),
        (1.0 + 1.0 + 1.0 / 3.0) / 5.0,
    );
}

#[test]
fn test_avg_pathlength_and_efficiency_on_path() {
    let graph = path_graph(3);
    assert_close(avg_pathlength(&graph).expect("avg"), 8.0 / 6.0);
    assert_close(global_efficiency(&graph).expect("global"), 5.0 / 6.0);
    assert_close(avg_pathlength(&Graph::undirected(3)).expect("empty"), 0.0);
}

#[test]
fn test_local_efficiency() {
    let complete = graph_from(4, &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
    for value in local_efficiency(&complete, Target::All).expect("local") {
        assert_close(value, 1.0);
    }
    assert_close(local_efficiency(&star(4), Target::Single(0)).expect("local")[0], 0.0);

    // Neighbours 1 and 3 of node 0 are linked only through 2, which is
    // outside the neighbourhood.
    let square = graph_from(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]);
    assert_close(local_efficiency(&square, Target::Single(0)).expect("local")[0], 0.0);
    let mut kite = graph_from(4, &[(0, 1), (0, 2), (0, 3), (1, 2), (2, 3)]);
    cache::init(&mut kite);
    let values = local_efficiency(&kite, Target::All).expect("local");
    // N(0) = {1, 2, 3} forms the path 1-2-3: (1 + 1 + 0.5) * 2 / 6.
    assert_close(values[0], 5.0 / 6.0);
    assert_close(avg_local_efficiency(&kite).expect("avg"), values.iter().sum::<f64>() / 4.0);
}

#[test]
fn test_betweenness_and_closeness() {
    let path = path_graph(3);
    assert_eq!(betweenness(&path, Target::All).expect("betweenness"), vec![0.0, 1.0, 0.0]);
    let closeness_values = closeness(&path, Target::All).expect("closeness");
    assert_close(closeness_values[0], 2.0 / 3.0);
    assert_close(closeness_values[1], 1.0);

    let mut hub = star(4);
    cache::init_with(&mut hub, CacheConfig::temp_file());
    assert_close(betweenness(&hub, Target::Single(0)).expect("hub")[0], 1.0);
    assert_close(betweenness(&hub, Target::Single(1)).expect("leaf")[0], 0.0);
    assert_close(betweenness(&graph_from(2, &[(0, 1)]), Target::Single(0)).expect("tiny")[0], 0.0);

    // Two shortest 0-3 paths: each middle node carries half of that pair.
    let values = betweenness(&diamond(), Target::All).expect("diamond");
    assert_close(values[1], 0.5 * 2.0 / 6.0);
    assert_close(values[2], values[1]);
    assert_close(values[0], 0.5 * 2.0 / 6.0);
}

#[test]
fn test_cached_and_uncached_betweenness_agree() {
    let mut rng = StdRng::seed_from_u64(11);
    let plain = erdos_renyi(20, 0.2, &mut rng).expect("er");
    let mut cached = plain.clone();
    cache::init_with(&mut cached, CacheConfig::temp_file());
    let expected = betweenness(&plain, Target::All).expect("plain");
    let first = betweenness(&cached, Target::All).expect("cached");
    let second = betweenness(&cached, Target::All).expect("cached again");
    for ((a, b), c) in expected.iter().zip(&first).zip(&second) {
        assert_close(*a, *b);
        assert_close(*b, *c);
    }
}

#[test]
fn test_edge_betweenness_counts_pairs_once() {
    let path = path_graph(3);
    assert_eq!(edge_betweenness_all(&path).expect("eb"), vec![vec![2.0], vec![2.0, 2.0], vec![2.0]]);

    let mut graph = diamond();
    cache::init(&mut graph);
    for row in edge_betweenness_all(&graph).expect("eb") {
        for value in row {
            assert_close(value, 2.0);
        }
    }
    assert_eq!(edge_betweenness(&graph, 0, Some(1)).expect("single"), vec![2.0]);
    assert_eq!(edge_betweenness(&graph, 3, None).expect("row").len(), 2);
    assert!(matches!(
        edge_betweenness(&graph, 0, Some(3)),
        Err(GraphError::NotFound(_))
    ));
}

#[test]
fn test_edge_betweenness_of_bridge() {
    let barbell = graph_from(6, &[(0, 1), (1, 2), (0, 2), (2, 3), (3, 4), (4, 5), (3, 5)]);
    assert_close(edge_betweenness(&barbell, 2, Some(3)).expect("bridge")[0], 9.0);
    let total: f64 = barbell
        .edges()
        .map(|(u, v, _)| edge_betweenness(&barbell, u, Some(v)).expect("edge")[0])
        .sum();
    let distances: u32 = (0..6)
        .map(|s| pathlength(&barbell, s).expect("pathlength").iter().sum::<u32>())
        .sum();
    assert_close(total, f64::from(distances) / 2.0);
}

#[test]
fn test_accumulate_edge_betweenness_scoped_to_sources() {
    let graph = two_triangles();
    let mut rows: Vec<Vec<f64>> = (0..graph.num_nodes())
        .map(|u| vec![0.0; graph.degree(u) as usize])
        .collect();
    accumulate_edge_betweenness(&graph, &[0, 1, 2], &mut rows).expect("accumulate");
    for row in &rows[..3] {
        assert_eq!(row.len(), 2);
        for &value in row {
            assert_close(value, 1.0);
        }
    }
    assert!(rows[3..].iter().flatten().all(|&value| value == 0.0));

    let mut short = vec![Vec::new(); 2];
    assert!(accumulate_edge_betweenness(&graph, &[0], &mut short).is_err());
}

#[test]
fn test_pathsharing() {
    let triangle = graph_from(3, &[(0, 1), (1, 2), (0, 2)]);
    assert_close(pathsharing_edge(&triangle, 0, 1).expect("ps"), 1.0);

    let path = path_graph(4);
    assert_close(pathsharing_edge(&path, 1, 2).expect("ps"), 0.0);
    assert_close(pathsharing_edge(&path, 0, 1).expect("ps"), 0.0);
    assert!(matches!(pathsharing_edge(&path, 0, 2), Err(GraphError::NotFound(_))));

    let mut square = graph_from(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]);
    cache::init(&mut square);
    assert_eq!(pathsharing(&square, 0, None).expect("row"), vec![1.0, 1.0]);
    assert_eq!(pathsharing(&square, 0, Some(3)).expect("single"), vec![1.0]);
    assert_eq!(pathsharing_all(&square).expect("all").len(), 4);
}

#[test]
fn test_modularity() {
    let graph = two_triangles();
    assert_close(modularity(&graph, &[0; 6], 1).expect("single"), 0.0);
    assert_close(modularity(&path_graph(5), &[0; 5], 1).expect("single"), 0.0);
    assert_close(modularity(&graph, &[0, 0, 0, 1, 1, 1], 2).expect("split"), 0.5);
    assert_close(component_modularity(&graph).expect("components"), 0.5);
    assert_close(modularity(&Graph::undirected(3), &[0, 1, 2], 3).expect("no edges"), 0.0);
    assert!(modularity(&graph, &[0; 5], 1).is_err());
    assert!(modularity(&graph, &[0, 0, 0, 1, 1, 2], 2).is_err());
}

#[test]
fn test_label_modularity_uses_label_values() {
    let mut graph = two_triangles();
    for node in 0..6 {
        let value = if node < 3 { 10 } else { 20 };
        graph
            .set_node_label(node, GraphLabel::new(value, 0.0, 0.0, 0.0))
            .expect("label");
    }
    cache::init(&mut graph);
    assert_close(label_modularity(&graph).expect("modularity"), 0.5);
}

#[test]
fn test_assortativity() {
    assert_close(assortativity(&star(4)).expect("star"), -1.0);
    let complete = graph_from(4, &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
    assert_close(assortativity(&complete).expect("regular"), 0.0);
    assert_close(assortativity(&Graph::undirected(2)).expect("empty"), 0.0);
}

#[test]
fn test_normalized_mutual_information() {
    assert_close(
        normalized_mutual_information(&[0, 0, 1, 1], &[5, 5, 3, 3]).expect("nmi"),
        1.0,
    );
    assert_close(
        normalized_mutual_information(&[0, 0, 1, 1], &[0, 1, 0, 1]).expect("nmi"),
        0.0,
    );
    assert_close(normalized_mutual_information(&[2, 2, 2], &[1, 1, 1]).expect("nmi"), 1.0);
    assert!(normalized_mutual_information(&[0], &[0, 1]).is_err());

    let mut g1 = Graph::undirected(2);
    let mut g2 = Graph::undirected(2);
    g1.set_node_label(1, GraphLabel::new(1, 0.0, 0.0, 0.0)).expect("label");
    g2.set_node_label(0, GraphLabel::new(1, 0.0, 0.0, 0.0)).expect("label");
    assert_close(label_mutual_information(&g1, &g2).expect("nmi"), 1.0);
    assert!(label_mutual_information(&g1, &Graph::undirected(3)).is_err());
}

#[test]
fn test_summary_serialises() {
    let mut graph = two_triangles();
    cache::init(&mut graph);
    let summary = summarize(&graph).expect("summary");
    assert_eq!(summary.num_components, 2);
    assert_eq!(summary.largest_component, 3);
    assert_close(summary.avg_clustering, 1.0);
    let json = serde_json::to_value(&summary).expect("json");
    assert_eq!(json["num_edges"], 6);
    assert_eq!(json["directed"], false);
}
