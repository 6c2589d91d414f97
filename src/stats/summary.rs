use serde::{Deserialize, Serialize};

use crate::{errors::GraphError, graph::Graph};

use super::{
    assortativity, basic, clustering, components, efficiency, modularity, path,
};

/// Graph-level statistics in one serialisable record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphSummary {
    pub num_nodes: u32,
    pub num_edges: u32,
    pub directed: bool,
    pub density: f64,
    pub avg_degree: f64,
    pub num_components: u32,
    pub largest_component: u32,
    pub avg_clustering: f64,
    pub avg_pathlength: f64,
    pub global_efficiency: f64,
    pub avg_local_efficiency: f64,
    pub assortativity: f64,
    pub label_modularity: f64,
}

pub fn summarize(graph: &Graph) -> Result<GraphSummary, GraphError> {
    let sizes = components::component_sizes(graph)?;
    Ok(GraphSummary {
        num_nodes: graph.num_nodes(),
        num_edges: graph.num_edges(),
        directed: graph.is_directed(),
        density: basic::density(graph)?,
        avg_degree: basic::avg_degree(graph)?,
        num_components: sizes.len() as u32,
        largest_component: sizes.iter().copied().max().unwrap_or(0),
        avg_clustering: clustering::avg_clustering(graph)?,
        avg_pathlength: path::avg_pathlength(graph)?,
        global_efficiency: efficiency::global_efficiency(graph)?,
        avg_local_efficiency: efficiency::avg_local_efficiency(graph)?,
        assortativity: assortativity::assortativity(graph)?,
        label_modularity: modularity::label_modularity(graph)?,
    })
}
