use tracing::debug;

use crate::{
    errors::GraphError,
    graph::{Graph, NodeId},
    stats::components,
};

/// Joins every component to the largest one through the pair of nodes
/// whose label coordinates are closest. New edges have weight 1.
///
/// The largest component is fixed before any edge is added; the first one
/// wins a size tie.
pub fn connect_components(graph: &Graph) -> Result<Graph, GraphError> {
    let mut connected = graph.clone();
    let assignment = components::components(graph)?;
    let sizes = components::component_sizes(graph)?;
    if sizes.len() < 2 {
        return Ok(connected);
    }

    let largest = sizes
        .iter()
        .enumerate()
        .fold(0, |best, (c, &size)| if size > sizes[best] { c } else { best }) as u32;
    let mut groups: Vec<Vec<NodeId>> = vec![Vec::new(); sizes.len()];
    for (node, &component) in assignment.iter().enumerate() {
        groups[component as usize].push(node as NodeId);
    }

    let hub = &groups[largest as usize];
    let mut added = 0u32;
    for (component, members) in groups.iter().enumerate() {
        if component as u32 == largest {
            continue;
        }
        let mut best: Option<(NodeId, NodeId, f32)> = None;
        for &a in members {
            for &b in hub {
                let distance = graph.label(a).distance(graph.label(b));
                if best.is_none_or(|(_, _, d)| distance < d) {
                    best = Some((a, b, distance));
                }
            }
        }
        if let Some((a, b, distance)) = best {
            debug!(component, a, b, distance, "joining component");
            connected.add_edge(a, b, 1.0)?;
            added += 1;
        }
    }
    connected.log_add(format!(
        "connect: joined {added} components to component {largest}"
    ));
    Ok(connected)
}
