use tracing::debug;

use crate::{
    errors::GraphError,
    graph::{Graph, NodeId},
    mask,
    stats::components,
};

/// Drops every node whose component has at most `max_discard_size` nodes.
/// Returns the pruned graph and the old id of each remaining node.
pub fn prune(graph: &Graph, max_discard_size: u32) -> Result<(Graph, Vec<NodeId>), GraphError> {
    let assignment = components::components(graph)?;
    let sizes = components::component_sizes(graph)?;
    let keep: Vec<bool> = assignment
        .iter()
        .map(|&component| sizes[component as usize] > max_discard_size)
        .collect();
    let dropped = keep.iter().filter(|&&k| !k).count();
    debug!(dropped, max_discard_size, "pruning small components");

    let (mut pruned, old_ids) = mask::mask(graph, &keep)?;
    pruned.log_add(format!(
        "prune: removed {dropped} nodes in components of size <= {max_discard_size}"
    ));
    Ok((pruned, old_ids))
}
