//! Global and local efficiency (Latora & Marchiori).
//!
//! Efficiency averages inverse shortest-path lengths, so disconnected pairs
//! contribute 0 instead of an infinite distance.

use crate::{
    errors::GraphError,
    graph::{Graph, NodeId},
};

use super::{Target, cached_graph_value, cached_node_values, fields, path};

pub fn global_efficiency(graph: &Graph) -> Result<f64, GraphError> {
    cached_graph_value(graph, fields::GLOBAL_EFFICIENCY, |graph| {
        let n = graph.num_nodes() as f64;
        if n < 2.0 {
            return Ok(0.0);
        }
        let mut total = 0.0;
        for source in 0..graph.num_nodes() {
            total += inverse_length_sum(&path::pathlength(graph, source)?);
        }
        Ok(total / (n * (n - 1.0)))
    })
}

/// Efficiency of the subgraph induced by each node's neighbours, with the
/// node itself removed.
pub fn local_efficiency(graph: &Graph, target: Target) -> Result<Vec<f64>, GraphError> {
    cached_node_values(graph, fields::LOCAL_EFFICIENCY, target, node_local_efficiency)
}

pub fn avg_local_efficiency(graph: &Graph) -> Result<f64, GraphError> {
    cached_graph_value(graph, fields::AVG_LOCAL_EFFICIENCY, |graph| {
        let values = local_efficiency(graph, Target::All)?;
        Ok(super::mean(&values))
    })
}

fn node_local_efficiency(graph: &Graph, node: NodeId) -> Result<f64, GraphError> {
    let nbrs = graph.neighbours(node);
    let k = nbrs.len();
    if k < 2 {
        return Ok(0.0);
    }
    let mut exclude = vec![true; graph.num_nodes() as usize];
    for &nbr in nbrs {
        exclude[nbr as usize] = false;
    }
    let mut total = 0.0;
    for &root in nbrs {
        let state = path::ShortestPaths::from_source(graph, root, Some(&exclude))?;
        total += state
            .dist
            .iter()
            .filter_map(|d| *d)
            .filter(|&d| d > 0)
            .map(|d| 1.0 / f64::from(d))
            .sum::<f64>();
    }
    Ok(total / (k * (k - 1)) as f64)
}

fn inverse_length_sum(lengths: &[u32]) -> f64 {
    lengths
        .iter()
        .filter(|&&d| d > 0)
        .map(|&d| 1.0 / f64::from(d))
        .sum()
}
