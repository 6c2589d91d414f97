use graphstats::{
    Graph, GraphLabel,
    communities::{communities, nodes_by_label},
    connect::connect_components,
    mask::mask,
    prune::prune,
    stats::components::num_components,
};

fn graph_from(n: u32, edges: &[(u32, u32)]) -> Graph {
    let mut graph = Graph::undirected(n);
    for &(u, v) in edges {
        graph.add_edge(u, v, 1.0).expect("edge");
    }
    graph
}

/// Triangle {0, 1, 2}, pair {3, 4}, isolated node 5.
fn three_parts() -> Graph {
    let mut graph = graph_from(6, &[(0, 1), (1, 2), (0, 2), (3, 4)]);
    let labels = [(7, 0.0), (7, 1.0), (8, 2.0), (8, 10.0), (8, 11.0), (9, 5.0)];
    for (node, (value, x)) in labels.into_iter().enumerate() {
        graph
            .set_node_label(node as u32, GraphLabel::new(value, x, 0.0, 0.0))
            .expect("label");
    }
    graph
}

#[test]
fn test_communities_group_components() {
    let found = communities(&three_parts()).expect("communities");
    let keys: Vec<_> = found
        .iter()
        .map(|c| (c.component, c.label_value, c.size))
        .collect();
    assert_eq!(keys, vec![(0, 7, 2), (0, 8, 1), (1, 8, 2), (2, 9, 1)]);
    assert_eq!(found[0].nodes, vec![0, 1]);
    assert_eq!(found[1].nodes, vec![2]);
    assert_eq!(found[2].nodes, vec![3, 4]);
    let json = serde_json::to_value(&found).expect("json");
    assert_eq!(json[3]["size"], 1);
}

#[test]
fn test_communities_split_component_by_label() {
    let mut graph = graph_from(4, &[(0, 1), (1, 2), (2, 3)]);
    for (node, value) in [1, 1, 2, 2].into_iter().enumerate() {
        graph
            .set_node_label(node as u32, GraphLabel::new(value, 0.0, 0.0, 0.0))
            .expect("label");
    }
    let found = communities(&graph).expect("communities");
    assert_eq!(found.len(), 2);
    assert_eq!((found[0].component, found[0].label_value, found[0].size), (0, 1, 2));
    assert_eq!((found[1].component, found[1].label_value, found[1].size), (0, 2, 2));
    assert_eq!(found[1].nodes, vec![2, 3]);
}

#[test]
fn test_nodes_by_label() {
    let groups = nodes_by_label(&three_parts());
    assert_eq!(
        groups,
        vec![(7, vec![0, 1]), (8, vec![2, 3, 4]), (9, vec![5])]
    );
}

#[test]
fn test_mask_renumbers_kept_nodes() {
    let mut graph = three_parts();
    graph.log_add("loaded");
    let keep = [false, true, true, true, true, false];
    let (masked, old_ids) = mask(&graph, &keep).expect("mask");
    assert_eq!(old_ids, vec![1, 2, 3, 4]);
    assert_eq!(masked.num_nodes(), 4);
    assert_eq!(masked.num_edges(), 2);
    assert!(masked.are_neighbours(0, 1));
    assert!(masked.are_neighbours(2, 3));
    assert_eq!(masked.label(2).x, 10.0);
    assert_eq!(masked.log().len(), 2);
    assert_eq!(masked.log().messages()[0], "loaded");
    assert!(mask(&graph, &[true; 3]).is_err());
}

#[test]
fn test_prune_drops_small_components() {
    let graph = three_parts();
    let (pruned, old_ids) = prune(&graph, 1).expect("prune");
    assert_eq!(old_ids, vec![0, 1, 2, 3, 4]);
    assert_eq!(pruned.num_edges(), 4);

    let (pruned, old_ids) = prune(&graph, 2).expect("prune");
    assert_eq!(old_ids, vec![0, 1, 2]);
    assert_eq!(pruned.num_edges(), 3);
    assert!(pruned.log().messages().iter().any(|m| m.starts_with("prune")));
}

#[test]
fn test_connect_components_uses_closest_nodes() {
    let graph = three_parts();
    let joined = connect_components(&graph).expect("connect");
    assert_eq!(num_components(&joined, 0).expect("components"), 1);
    assert_eq!(joined.num_edges(), 6);
    assert!(joined.are_neighbours(2, 3));
    assert!(joined.are_neighbours(2, 5));
    assert_eq!(joined.weight(2, 3), Some(1.0));
    assert_eq!(graph.num_edges(), 4);

    let connected = graph_from(3, &[(0, 1), (1, 2)]);
    assert_eq!(connect_components(&connected).expect("noop").num_edges(), 2);
}
