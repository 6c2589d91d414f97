//! Thresholding by iterative edge removal.
//!
//! A strategy ([`EdgeRemoval`]) owns whatever per-edge working state it
//! needs, picks the extremal edge, removes it, then refreshes only the
//! values that removal can have changed. The drivers run a strategy on a
//! copy of the input graph until their stopping condition holds.
//!
//! Ties between equally extremal edges go to the smallest `(u, v)`.

use tracing::{debug, info};

use crate::{
    edge_array::EdgeArray,
    errors::GraphError,
    graph::{Graph, NodeId},
    stats::{
        components,
        edge_betweenness::{accumulate_edge_betweenness, zeroed_rows},
        modularity,
        pathsharing::pathsharing_edge,
    },
};

pub trait EdgeRemoval {
    /// Short name used in log messages.
    fn name(&self) -> &'static str;

    /// Computes the working values for every edge of `graph`.
    fn init(&mut self, graph: &Graph) -> Result<(), GraphError>;

    /// Removes the extremal edge and returns it, or `None` when the graph
    /// has no edges left.
    fn remove_extremal(&mut self, graph: &mut Graph) -> Result<Option<(NodeId, NodeId)>, GraphError>;

    /// Refreshes the working values invalidated by removing `removed`.
    fn recalculate(&mut self, graph: &Graph, removed: (NodeId, NodeId)) -> Result<(), GraphError>;

    /// Releases working state tied to `graph`.
    fn finish(&mut self, _graph: &Graph) {}
}

/// Removes the edge of highest betweenness. After each removal, betweenness
/// is recomputed within the components of both endpoints.
#[derive(Default)]
pub struct EdgeBetweennessRemoval {
    values: Option<EdgeArray<f64>>,
}

impl EdgeBetweennessRemoval {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EdgeRemoval for EdgeBetweennessRemoval {
    fn name(&self) -> &'static str {
        "edge betweenness"
    }

    fn init(&mut self, graph: &Graph) -> Result<(), GraphError> {
        let values = EdgeArray::new(graph);
        let mut rows = zeroed_rows(graph);
        let sources: Vec<NodeId> = (0..graph.num_nodes()).collect();
        accumulate_edge_betweenness(graph, &sources, &mut rows)?;
        for (node, row) in rows.iter().enumerate() {
            values.set_all(graph, node as NodeId, row)?;
        }
        self.values = Some(values);
        Ok(())
    }

    fn remove_extremal(&mut self, graph: &mut Graph) -> Result<Option<(NodeId, NodeId)>, GraphError> {
        let values = working_values(&self.values)?;
        let Some((u, v)) = extremal_edge(graph, values, |candidate, best| candidate > best)? else {
            return Ok(None);
        };
        graph.remove_edge(u, v)?;
        Ok(Some((u, v)))
    }

    fn recalculate(&mut self, graph: &Graph, (u, v): (NodeId, NodeId)) -> Result<(), GraphError> {
        let values = working_values(&self.values)?;
        let mut affected = components::component_nodes(graph, u)?;
        if affected.binary_search(&v).is_err() {
            affected.extend(components::component_nodes(graph, v)?);
        }
        let mut rows = zeroed_rows(graph);
        accumulate_edge_betweenness(graph, &affected, &mut rows)?;
        for &node in &affected {
            values.set_all(graph, node, &rows[node as usize])?;
        }
        Ok(())
    }

    fn finish(&mut self, graph: &Graph) {
        if let Some(values) = self.values.take() {
            values.detach(graph);
        }
    }
}

/// Removes the edge of lowest path sharing. After each removal, path
/// sharing is recomputed for every edge touching `{u, v} ∪ N(u) ∪ N(v)`.
#[derive(Default)]
pub struct PathSharingRemoval {
    values: Option<EdgeArray<f64>>,
}

impl PathSharingRemoval {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EdgeRemoval for PathSharingRemoval {
    fn name(&self) -> &'static str {
        "path sharing"
    }

    fn init(&mut self, graph: &Graph) -> Result<(), GraphError> {
        let values = EdgeArray::new(graph);
        for node in 0..graph.num_nodes() {
            let row = graph
                .neighbours(node)
                .iter()
                .map(|&nbr| pathsharing_edge(graph, node, nbr))
                .collect::<Result<Vec<_>, _>>()?;
            values.set_all(graph, node, &row)?;
        }
        self.values = Some(values);
        Ok(())
    }

    fn remove_extremal(&mut self, graph: &mut Graph) -> Result<Option<(NodeId, NodeId)>, GraphError> {
        let values = working_values(&self.values)?;
        let Some((u, v)) = extremal_edge(graph, values, |candidate, best| candidate < best)? else {
            return Ok(None);
        };
        graph.remove_edge(u, v)?;
        Ok(Some((u, v)))
    }

    fn recalculate(&mut self, graph: &Graph, (u, v): (NodeId, NodeId)) -> Result<(), GraphError> {
        let values = working_values(&self.values)?;
        let mut affected = vec![u, v];
        affected.extend_from_slice(graph.neighbours(u));
        affected.extend_from_slice(graph.neighbours(v));
        affected.sort_unstable();
        affected.dedup();
        for node in affected {
            for &nbr in graph.neighbours(node) {
                values.set(graph, node, nbr, pathsharing_edge(graph, node, nbr)?)?;
            }
        }
        Ok(())
    }

    fn finish(&mut self, graph: &Graph) {
        if let Some(values) = self.values.take() {
            values.detach(graph);
        }
    }
}

fn working_values(values: &Option<EdgeArray<f64>>) -> Result<&EdgeArray<f64>, GraphError> {
    values
        .as_ref()
        .ok_or_else(|| GraphError::invalid_input("edge removal strategy used before init"))
}

/// Scans edges in `(u, v)` order. A later edge only replaces the current
/// best when strictly better, so ties go to the smallest edge.
fn extremal_edge<F>(
    graph: &Graph,
    values: &EdgeArray<f64>,
    better: F,
) -> Result<Option<(NodeId, NodeId)>, GraphError>
where
    F: Fn(f64, f64) -> bool,
{
    let mut best: Option<((NodeId, NodeId), f64)> = None;
    for (u, v, _) in graph.edges() {
        let value = values.get(graph, u, v)?;
        match best {
            Some((_, current)) if !better(value, current) => {}
            _ => best = Some(((u, v), value)),
        }
    }
    Ok(best.map(|(edge, _)| edge))
}

fn remove_one<S>(graph: &mut Graph, strategy: &mut S) -> Result<Option<(NodeId, NodeId)>, GraphError>
where
    S: EdgeRemoval + ?Sized,
{
    let Some(removed) = strategy.remove_extremal(graph)? else {
        return Ok(None);
    };
    strategy.recalculate(graph, removed)?;
    debug!(
        strategy = strategy.name(),
        u = removed.0,
        v = removed.1,
        remaining = graph.num_edges(),
        "edge removed"
    );
    Ok(Some(removed))
}

/// Removes edges until at most `target_edges` remain.
pub fn threshold_edges<S>(graph: &Graph, strategy: &mut S, target_edges: u32) -> Result<Graph, GraphError>
where
    S: EdgeRemoval + ?Sized,
{
    let mut working = graph.clone();
    strategy.init(&working)?;
    let mut removed = 0u32;
    while working.num_edges() > target_edges {
        if remove_one(&mut working, strategy)?.is_none() {
            break;
        }
        removed += 1;
    }
    strategy.finish(&working);

    info!(strategy = strategy.name(), removed, remaining = working.num_edges(), "edge threshold finished");
    working.log_add(format!(
        "threshold by {}: removed {removed} edges, {} remain",
        strategy.name(),
        working.num_edges()
    ));
    Ok(working)
}

/// Removes edges until the graph has at least `cmplimit` components with
/// more than `igndis` nodes, or no edges are left.
pub fn threshold_components<S>(
    graph: &Graph,
    strategy: &mut S,
    cmplimit: u32,
    igndis: u32,
) -> Result<Graph, GraphError>
where
    S: EdgeRemoval + ?Sized,
{
    let mut working = graph.clone();
    strategy.init(&working)?;
    let mut removed = 0u32;
    let mut ncomponents = components::num_components(&working, igndis)?;
    while ncomponents < cmplimit {
        if remove_one(&mut working, strategy)?.is_none() {
            break;
        }
        removed += 1;
        ncomponents = components::num_components(&working, igndis)?;
    }
    strategy.finish(&working);

    info!(
        strategy = strategy.name(),
        removed,
        components = ncomponents,
        "component threshold finished"
    );
    working.log_add(format!(
        "threshold by {}: removed {removed} edges, {ncomponents} components (ignoring size <= {igndis})",
        strategy.name()
    ));
    Ok(working)
}

/// Removes up to `edge_budget` edges and returns the snapshot with the
/// highest component modularity seen along the way, the input included.
pub fn threshold_modularity<S>(graph: &Graph, strategy: &mut S, edge_budget: u32) -> Result<Graph, GraphError>
where
    S: EdgeRemoval + ?Sized,
{
    let mut working = graph.clone();
    strategy.init(&working)?;
    let mut best = working.clone();
    let mut best_q = modularity::component_modularity(&working)?;
    let mut best_at = 0u32;
    let mut removed = 0u32;
    while removed < edge_budget {
        if remove_one(&mut working, strategy)?.is_none() {
            break;
        }
        removed += 1;
        let q = modularity::component_modularity(&working)?;
        if q > best_q {
            debug!(removed, modularity = q, "modularity improved");
            best = working.clone();
            best_q = q;
            best_at = removed;
        }
    }
    strategy.finish(&working);

    info!(
        strategy = strategy.name(),
        removed,
        best_at,
        modularity = best_q,
        "modularity threshold finished"
    );
    best.log_add(format!(
        "threshold by {}: best modularity {best_q:.6} after removing {best_at} of {removed} edges",
        strategy.name()
    ));
    Ok(best)
}
