use crate::{
    errors::GraphError,
    graph::{Graph, NodeId},
};

use super::{Target, cached_graph_value, cached_node_values, fields};

/// Local clustering coefficient: the fraction of neighbour pairs that are
/// themselves connected. Nodes with fewer than two neighbours score 0.
pub fn clustering(graph: &Graph, target: Target) -> Result<Vec<f64>, GraphError> {
    cached_node_values(graph, fields::CLUSTERING, target, node_clustering)
}

pub fn avg_clustering(graph: &Graph) -> Result<f64, GraphError> {
    cached_graph_value(graph, fields::AVG_CLUSTERING, |graph| {
        let values = clustering(graph, Target::All)?;
        Ok(super::mean(&values))
    })
}

fn node_clustering(graph: &Graph, node: NodeId) -> Result<f64, GraphError> {
    let nbrs = graph.neighbours(node);
    let k = nbrs.len();
    if k < 2 {
        return Ok(0.0);
    }
    let mut links = 0usize;
    for (i, &a) in nbrs.iter().enumerate() {
        for &b in &nbrs[i + 1..] {
            if graph.are_neighbours(a, b) {
                links += 1;
            }
        }
    }
    Ok(2.0 * links as f64 / (k * (k - 1)) as f64)
}
