//! Node groupings by connected component and by label value.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::{
    errors::GraphError,
    graph::{Graph, NodeId},
    stats::components,
};

/// Nodes that share a label value and lie in the same component.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Community {
    pub component: u32,
    pub label_value: u32,
    pub size: u32,
    pub nodes: Vec<NodeId>,
}

/// One entry per distinct `(component, label_value)` pair, ordered by
/// component and then label value. Members are ascending.
pub fn communities(graph: &Graph) -> Result<Vec<Community>, GraphError> {
    let assignment = components::components(graph)?;
    let mut groups: AHashMap<(u32, u32), Vec<NodeId>> = AHashMap::new();
    for (node, &component) in assignment.iter().enumerate() {
        let node = node as NodeId;
        groups
            .entry((component, graph.label(node).label_value))
            .or_default()
            .push(node);
    }

    let mut result: Vec<Community> = groups
        .into_iter()
        .map(|((component, label_value), nodes)| Community {
            component,
            label_value,
            size: nodes.len() as u32,
            nodes,
        })
        .collect();
    result.sort_unstable_by_key(|c| (c.component, c.label_value));
    Ok(result)
}

/// Nodes grouped by label value, ascending by value.
pub fn nodes_by_label(graph: &Graph) -> Vec<(u32, Vec<NodeId>)> {
    let mut groups: AHashMap<u32, Vec<NodeId>> = AHashMap::new();
    for (node, label) in graph.labels().iter().enumerate() {
        groups.entry(label.label_value).or_default().push(node as NodeId);
    }
    let mut groups: Vec<_> = groups.into_iter().collect();
    groups.sort_unstable_by_key(|(value, _)| *value);
    groups
}
