//! Newman modularity of a node partition.

use ahash::AHashMap;

use crate::{errors::GraphError, graph::Graph};

use super::{cached_graph_value, components, fields};

/// Modularity of the partition `communities` (one entry per node, each below
/// `ncommunities`).
///
/// Builds the community-by-community matrix `M` from adjacency entries,
/// each contributing `0.5 / numedges` (`1 / numedges` when directed), and
/// returns `Σ_i (M_ii - (Σ_j M_ij)²)`. A graph without edges has
/// modularity 0.
pub fn modularity(graph: &Graph, communities: &[u32], ncommunities: u32) -> Result<f64, GraphError> {
    let n = graph.num_nodes() as usize;
    if communities.len() != n {
        return Err(GraphError::invalid_input(format!(
            "{} community assignments for {n} nodes",
            communities.len()
        )));
    }
    if let Some(&bad) = communities.iter().find(|&&c| c >= ncommunities) {
        return Err(GraphError::invalid_input(format!(
            "community {bad} out of range (ncommunities = {ncommunities})"
        )));
    }
    if graph.num_edges() == 0 {
        return Ok(0.0);
    }

    let k = ncommunities as usize;
    let per_entry = if graph.is_directed() { 1.0 } else { 0.5 };
    let step = per_entry / f64::from(graph.num_edges());
    let mut matrix = vec![0.0; k * k];
    for u in 0..graph.num_nodes() {
        let cu = communities[u as usize] as usize;
        for &v in graph.neighbours(u) {
            let cv = communities[v as usize] as usize;
            matrix[cu * k + cv] += step;
        }
    }

    let q = (0..k)
        .map(|i| {
            let row = &matrix[i * k..(i + 1) * k];
            let total: f64 = row.iter().sum();
            row[i] - total * total
        })
        .sum();
    Ok(q)
}

/// Modularity of the partition induced by node label values.
pub fn label_modularity(graph: &Graph) -> Result<f64, GraphError> {
    cached_graph_value(graph, fields::LABEL_MODULARITY, |graph| {
        let mut index: AHashMap<u32, u32> = AHashMap::new();
        let communities: Vec<u32> = graph
            .labels()
            .iter()
            .map(|label| {
                let next = index.len() as u32;
                *index.entry(label.label_value).or_insert(next)
            })
            .collect();
        modularity(graph, &communities, index.len() as u32)
    })
}

/// Modularity of the partition into connected components.
pub fn component_modularity(graph: &Graph) -> Result<f64, GraphError> {
    let assignment = components::components(graph)?;
    let ncommunities = components::component_sizes(graph)?.len() as u32;
    modularity(graph, &assignment, ncommunities)
}
