//! Path sharing: how strongly the neighbourhoods at either end of an edge
//! overlap or touch.

use crate::{
    errors::GraphError,
    graph::{Graph, NodeId},
};

use super::{cached_edge_row, edge_betweenness::edge_index, fields};

/// Path sharing of the edge `(u, v)`.
///
/// With `A = N(u) \ {v}` and `B = N(v) \ {u}`, this is the fraction of pairs
/// `(a, b)` in `A × B` where `a == b` or `a` and `b` are adjacent. 0 when
/// either set is empty.
pub fn pathsharing_edge(graph: &Graph, u: NodeId, v: NodeId) -> Result<f64, GraphError> {
    edge_index(graph, u, v)?;
    let (mut pairs, mut shared) = (0usize, 0usize);
    for &a in graph.neighbours(u).iter().filter(|&&a| a != v) {
        for &b in graph.neighbours(v).iter().filter(|&&b| b != u) {
            pairs += 1;
            if a == b || graph.are_neighbours(a, b) {
                shared += 1;
            }
        }
    }
    if pairs == 0 {
        return Ok(0.0);
    }
    Ok(shared as f64 / pairs as f64)
}

/// Path sharing of the edges leaving `node`, or of the single edge
/// `node -> other` (returned as a one-element row).
pub fn pathsharing(
    graph: &Graph,
    node: NodeId,
    other: Option<NodeId>,
) -> Result<Vec<f64>, GraphError> {
    cached_edge_row(graph, fields::PATHSHARING, node, other, |graph| {
        graph
            .neighbours(node)
            .iter()
            .map(|&nbr| pathsharing_edge(graph, node, nbr))
            .collect()
    })
}

pub fn pathsharing_all(graph: &Graph) -> Result<Vec<Vec<f64>>, GraphError> {
    (0..graph.num_nodes())
        .map(|node| pathsharing(graph, node, None))
        .collect()
}
