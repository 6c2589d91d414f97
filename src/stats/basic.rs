use crate::{errors::GraphError, graph::Graph};

use super::{Target, cached_graph_value, cached_node_values, fields};

/// Fraction of possible edges that are present.
pub fn density(graph: &Graph) -> Result<f64, GraphError> {
    cached_graph_value(graph, fields::DENSITY, |graph| {
        let n = graph.num_nodes() as f64;
        if n < 2.0 {
            return Ok(0.0);
        }
        let possible = if graph.is_directed() {
            n * (n - 1.0)
        } else {
            n * (n - 1.0) / 2.0
        };
        Ok(graph.num_edges() as f64 / possible)
    })
}

pub fn degree(graph: &Graph, target: Target) -> Result<Vec<f64>, GraphError> {
    cached_node_values(graph, fields::DEGREE, target, |graph, node| {
        Ok(graph.degree(node) as f64)
    })
}

pub fn avg_degree(graph: &Graph) -> Result<f64, GraphError> {
    cached_graph_value(graph, fields::AVG_DEGREE, |graph| {
        let degrees = degree(graph, Target::All)?;
        Ok(super::mean(&degrees))
    })
}
