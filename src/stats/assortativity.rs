use crate::{errors::GraphError, graph::Graph};

use super::{cached_graph_value, fields};

/// Degree assortativity (Newman 2002): the Pearson correlation of the
/// degrees at either end of each edge. 0 when every edge joins nodes of
/// identical degree, or the graph has no edges.
pub fn assortativity(graph: &Graph) -> Result<f64, GraphError> {
    cached_graph_value(graph, fields::ASSORTATIVITY, |graph| {
        let (mut prod, mut sum, mut sq) = (0.0, 0.0, 0.0);
        let mut edges = 0usize;
        for (u, v, _) in graph.edges() {
            let j = f64::from(graph.degree(u));
            let k = f64::from(graph.degree(v));
            prod += j * k;
            sum += 0.5 * (j + k);
            sq += 0.5 * (j * j + k * k);
            edges += 1;
        }
        if edges == 0 {
            return Ok(0.0);
        }
        let m = edges as f64;
        let mean = sum / m;
        let denominator = sq / m - mean * mean;
        if denominator.abs() < f64::EPSILON {
            return Ok(0.0);
        }
        Ok((prod / m - mean * mean) / denominator)
    })
}
