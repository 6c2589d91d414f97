//! Connected components.
//!
//! Components are numbered in order of their lowest node id. On directed
//! graphs a component is the set reached from its lowest unassigned node
//! along out-edges.

use crate::{
    bfs::{self, NoopVisitor},
    cache::{self, CacheKind, CacheSlot, CacheValue},
    errors::GraphError,
    graph::{Graph, NodeId},
};

use super::fields;

/// Component index of every node.
pub fn components(graph: &Graph) -> Result<Vec<u32>, GraphError> {
    let cached = cached_assignment(graph)?;
    if let Some(assignment) = cached {
        return Ok(assignment);
    }
    let (assignment, sizes) = label_components(graph)?;
    cache::add(graph, fields::COMPONENT, CacheKind::Node)?;
    cache::add(graph, fields::COMPONENT_SIZES, CacheKind::List)?;
    for (node, &component) in assignment.iter().enumerate() {
        cache::update(
            graph,
            fields::COMPONENT,
            CacheSlot::Node(node as NodeId),
            CacheValue::Scalar(component as f64),
        )?;
    }
    let sizes: Vec<f64> = sizes.into_iter().map(f64::from).collect();
    cache::update(graph, fields::COMPONENT_SIZES, CacheSlot::List, CacheValue::Row(sizes))?;
    Ok(assignment)
}

/// Node count of each component, indexed by component.
pub fn component_sizes(graph: &Graph) -> Result<Vec<u32>, GraphError> {
    if let Some(sizes) =
        cache::check(graph, fields::COMPONENT_SIZES, CacheSlot::List)?.and_then(CacheValue::into_row)
    {
        return Ok(sizes.into_iter().map(|size| size as u32).collect());
    }
    let assignment = components(graph)?;
    Ok(sizes_of(&assignment))
}

/// Number of components with more than `ignore_size` nodes.
pub fn num_components(graph: &Graph, ignore_size: u32) -> Result<u32, GraphError> {
    let sizes = component_sizes(graph)?;
    Ok(sizes.iter().filter(|&&size| size > ignore_size).count() as u32)
}

/// Members of the component containing `root`, ascending.
pub fn component_nodes(graph: &Graph, root: NodeId) -> Result<Vec<NodeId>, GraphError> {
    let mut nodes = bfs::reachable(graph, root, None)?;
    nodes.sort_unstable();
    Ok(nodes)
}

/// Uncached component labelling: `(assignment, sizes)`.
///
/// Drives [`bfs::expand`] directly with one visited mask shared by every
/// component, so labelling stays linear in nodes plus edges.
pub fn label_components(graph: &Graph) -> Result<(Vec<u32>, Vec<u32>), GraphError> {
    let n = graph.num_nodes() as usize;
    let mut assignment = vec![0u32; n];
    let mut visited = vec![false; n];
    let mut sizes = Vec::new();
    let mut frontier = Vec::new();
    let mut next = Vec::new();
    for root in 0..graph.num_nodes() {
        if visited[root as usize] {
            continue;
        }
        let component = sizes.len() as u32;
        visited[root as usize] = true;
        assignment[root as usize] = component;
        let mut size = 1u32;
        frontier.clear();
        frontier.push(root);
        let mut depth = 0;
        while !frontier.is_empty() {
            bfs::expand(graph, &frontier, depth, &mut visited, &mut next, &mut NoopVisitor)?;
            for &member in &next {
                assignment[member as usize] = component;
            }
            size += next.len() as u32;
            std::mem::swap(&mut frontier, &mut next);
            next.clear();
            depth += 1;
        }
        sizes.push(size);
    }
    Ok((assignment, sizes))
}

fn cached_assignment(graph: &Graph) -> Result<Option<Vec<u32>>, GraphError> {
    let mut assignment = Vec::with_capacity(graph.num_nodes() as usize);
    for node in 0..graph.num_nodes() {
        match cache::check(graph, fields::COMPONENT, CacheSlot::Node(node))?
            .and_then(|v| v.scalar())
        {
            Some(component) => assignment.push(component as u32),
            None => return Ok(None),
        }
    }
    Ok(Some(assignment))
}

fn sizes_of(assignment: &[u32]) -> Vec<u32> {
    let count = assignment.iter().map(|&c| c as usize + 1).max().unwrap_or(0);
    let mut sizes = vec![0u32; count];
    for &component in assignment {
        sizes[component as usize] += 1;
    }
    sizes
}
