use crate::{
    errors::GraphError,
    graph::{Graph, NodeId},
};

/// Subgraph induced by the nodes whose `keep` entry is true.
///
/// Kept nodes are renumbered in ascending order of their old ids; the
/// returned vector maps each new id to its old id. Labels, edge weights and
/// the message log carry over.
pub fn mask(graph: &Graph, keep: &[bool]) -> Result<(Graph, Vec<NodeId>), GraphError> {
    let n = graph.num_nodes() as usize;
    if keep.len() != n {
        return Err(GraphError::invalid_input(format!(
            "mask has {} entries, graph has {n} nodes",
            keep.len()
        )));
    }

    let old_ids: Vec<NodeId> = (0..graph.num_nodes()).filter(|&u| keep[u as usize]).collect();
    let mut new_ids: Vec<Option<NodeId>> = vec![None; n];
    for (new, &old) in old_ids.iter().enumerate() {
        new_ids[old as usize] = Some(new as NodeId);
    }

    let mut masked = Graph::new(old_ids.len() as u32, graph.is_directed());
    for message in graph.log().messages() {
        masked.log_add(message.clone());
    }
    for (new, &old) in old_ids.iter().enumerate() {
        masked.set_node_label(new as NodeId, *graph.label(old))?;
    }
    for (u, v, weight) in graph.edges() {
        if let (Some(nu), Some(nv)) = (new_ids[u as usize], new_ids[v as usize]) {
            masked.add_edge(nu, nv, weight)?;
        }
    }
    masked.log_add(format!(
        "mask: kept {} of {} nodes",
        old_ids.len(),
        graph.num_nodes()
    ));
    Ok((masked, old_ids))
}
