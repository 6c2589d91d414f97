//! Network statistics.
//!
//! Every statistic is a pure function of the graph. When the graph has a
//! [`StatsCache`](crate::cache::StatsCache) attached, results are memoised
//! under the field IDs in [`fields`].

pub mod assortativity;
pub mod basic;
pub mod centrality;
pub mod clustering;
pub mod components;
pub mod edge_betweenness;
pub mod efficiency;
pub mod modularity;
pub mod mutual_info;
pub mod path;
pub mod pathsharing;
pub mod summary;

use crate::{
    cache::{self, CacheKind, CacheSlot, CacheValue, FieldId},
    errors::GraphError,
    graph::{Graph, NodeId},
};

/// Field IDs of the built-in statistics.
pub mod fields {
    use crate::cache::FieldId;

    pub const DEGREE: FieldId = 0;
    pub const CLUSTERING: FieldId = 1;
    pub const PATHLENGTH: FieldId = 2;
    pub const NUMPATHS: FieldId = 3;
    pub const COMPONENT: FieldId = 4;
    pub const COMPONENT_SIZES: FieldId = 5;
    pub const LOCAL_EFFICIENCY: FieldId = 6;
    pub const BETWEENNESS: FieldId = 7;
    pub const CLOSENESS: FieldId = 8;
    pub const EDGE_BETWEENNESS: FieldId = 9;
    pub const PATHSHARING: FieldId = 10;
    pub const DENSITY: FieldId = 11;
    pub const AVG_DEGREE: FieldId = 12;
    pub const AVG_CLUSTERING: FieldId = 13;
    pub const AVG_PATHLENGTH: FieldId = 14;
    pub const GLOBAL_EFFICIENCY: FieldId = 15;
    pub const AVG_LOCAL_EFFICIENCY: FieldId = 16;
    pub const ASSORTATIVITY: FieldId = 17;
    pub const LABEL_MODULARITY: FieldId = 18;

    /// First ID free for statistics defined outside this crate.
    pub const USER_FIELD_BASE: FieldId = 64;
}

/// Which nodes a node-level statistic is evaluated for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Single(NodeId),
    All,
}

impl Target {
    pub fn nodes(&self, graph: &Graph) -> Result<Vec<NodeId>, GraphError> {
        match *self {
            Target::Single(node) => {
                graph.check_node(node)?;
                Ok(vec![node])
            }
            Target::All => Ok((0..graph.num_nodes()).collect()),
        }
    }
}

pub(crate) fn cached_graph_value<F>(
    graph: &Graph,
    field: FieldId,
    compute: F,
) -> Result<f64, GraphError>
where
    F: FnOnce(&Graph) -> Result<f64, GraphError>,
{
    if let Some(value) = cache::check(graph, field, CacheSlot::Graph)?.and_then(|v| v.scalar()) {
        return Ok(value);
    }
    let value = compute(graph)?;
    cache::add(graph, field, CacheKind::Graph)?;
    cache::update(graph, field, CacheSlot::Graph, CacheValue::Scalar(value))?;
    Ok(value)
}

pub(crate) fn cached_node_values<F>(
    graph: &Graph,
    field: FieldId,
    target: Target,
    mut compute: F,
) -> Result<Vec<f64>, GraphError>
where
    F: FnMut(&Graph, NodeId) -> Result<f64, GraphError>,
{
    let nodes = target.nodes(graph)?;
    cache::add(graph, field, CacheKind::Node)?;
    let mut values = Vec::with_capacity(nodes.len());
    for node in nodes {
        let slot = CacheSlot::Node(node);
        let value = match cache::check(graph, field, slot)?.and_then(|v| v.scalar()) {
            Some(value) => value,
            None => {
                let value = compute(graph, node)?;
                cache::update(graph, field, slot, CacheValue::Scalar(value))?;
                value
            }
        };
        values.push(value);
    }
    Ok(values)
}

pub(crate) fn cached_row<F>(
    graph: &Graph,
    field: FieldId,
    slot: CacheSlot,
    compute: F,
) -> Result<Vec<f64>, GraphError>
where
    F: FnOnce(&Graph) -> Result<Vec<f64>, GraphError>,
{
    if let Some(row) = cache::check(graph, field, slot)?.and_then(CacheValue::into_row) {
        return Ok(row);
    }
    let row = compute(graph)?;
    cache::add(graph, field, slot.kind())?;
    cache::update(graph, field, slot, CacheValue::Row(row.clone()))?;
    Ok(row)
}

/// Edge-field lookup shared by the per-edge statistics: the row of edges
/// leaving `node`, or the one-element row of the edge `node -> other`.
/// `compute` produces the full row of `node` on a miss.
pub(crate) fn cached_edge_row<F>(
    graph: &Graph,
    field: FieldId,
    node: NodeId,
    other: Option<NodeId>,
    compute: F,
) -> Result<Vec<f64>, GraphError>
where
    F: FnOnce(&Graph) -> Result<Vec<f64>, GraphError>,
{
    graph.check_node(node)?;
    let Some(other) = other else {
        return cached_row(graph, field, CacheSlot::Edge(node, None), compute);
    };
    let idx = edge_betweenness::edge_index(graph, node, other)?;
    if let Some(value) =
        cache::check(graph, field, CacheSlot::Edge(node, Some(other)))?.and_then(|v| v.scalar())
    {
        return Ok(vec![value]);
    }
    let row = cached_row(graph, field, CacheSlot::Edge(node, None), compute)?;
    row.get(idx)
        .map(|&value| vec![value])
        .ok_or_else(|| GraphError::cache(format!("row {node} of field {field} is short")))
}

/// Mean of `values`, 0 when empty.
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
