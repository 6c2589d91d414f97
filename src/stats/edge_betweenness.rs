//! Edge betweenness (Brandes' one-pass dependency accumulation).
//!
//! Each source contributes one BFS. Levels are replayed deepest first from a
//! [`LevelStack`]; every edge `v -> w` with `d(w) = d(v) + 1` receives
//! `σ(v)/σ(w) · (1 + δ(w))`, which is also added to `δ(v)`.

use crate::{
    bfs::{BfsVisitor, Traversal, bfs},
    cache::{self, CacheKind, CacheSlot, CacheValue},
    errors::GraphError,
    graph::{Graph, NodeId},
    level_stack::LevelStack,
    seq,
};

use super::{cached_edge_row, fields, path::ShortestPaths};

struct SourceSweep {
    paths: ShortestPaths,
    levels: LevelStack,
}

impl BfsVisitor for SourceSweep {
    fn level(&mut self, frontier: &[NodeId], depth: u32) -> Traversal {
        self.levels.level(frontier, depth)
    }

    fn edge(&mut self, parent: NodeId, child: NodeId, visited: bool, depth: u32) -> Traversal {
        self.paths.edge(parent, child, visited, depth)
    }
}

/// Adds the edge dependencies of every source in `sources` to `rows`.
///
/// `rows[u]` runs parallel to `graph.neighbours(u)`. Contributions on
/// undirected graphs are halved and written to both directions of the edge,
/// so summing over all sources counts each unordered pair once.
pub fn accumulate_edge_betweenness(
    graph: &Graph,
    sources: &[NodeId],
    rows: &mut [Vec<f64>],
) -> Result<(), GraphError> {
    check_shape(graph, rows)?;
    let scale = if graph.is_directed() { 1.0 } else { 0.5 };
    let mut delta = vec![0.0; graph.num_nodes() as usize];

    for &source in sources {
        let mut sweep = SourceSweep {
            paths: ShortestPaths::seeded(graph, source)?,
            levels: LevelStack::new(),
        };
        sweep.levels.push(vec![source]);
        bfs(graph, &[source], None, &mut sweep)?;

        let SourceSweep { paths, mut levels } = sweep;
        delta.fill(0.0);
        while let Some(level) = levels.pop() {
            for v in level {
                let Some(depth) = paths.dist[v as usize] else {
                    continue;
                };
                for (idx, &w) in graph.neighbours(v).iter().enumerate() {
                    if paths.dist[w as usize] != Some(depth + 1) {
                        continue;
                    }
                    let share = paths.paths[v as usize] / paths.paths[w as usize]
                        * (1.0 + delta[w as usize]);
                    delta[v as usize] += share;
                    rows[v as usize][idx] += share * scale;
                    if !graph.is_directed() {
                        if let Some(back) = seq::sorted_find(graph.neighbours(w), &v) {
                            rows[w as usize][back] += share * scale;
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

/// Edge betweenness of every edge, one row per node.
pub fn edge_betweenness_all(graph: &Graph) -> Result<Vec<Vec<f64>>, GraphError> {
    if let Some(rows) = cached_rows(graph)? {
        return Ok(rows);
    }
    let mut rows = zeroed_rows(graph);
    let sources: Vec<NodeId> = (0..graph.num_nodes()).collect();
    accumulate_edge_betweenness(graph, &sources, &mut rows)?;

    cache::add(graph, fields::EDGE_BETWEENNESS, CacheKind::Edge)?;
    for (node, row) in rows.iter().enumerate() {
        cache::update(
            graph,
            fields::EDGE_BETWEENNESS,
            CacheSlot::Edge(node as NodeId, None),
            CacheValue::Row(row.clone()),
        )?;
    }
    Ok(rows)
}

/// Edge betweenness of the edges leaving `node`, or of the single edge
/// `node -> other` (returned as a one-element row).
pub fn edge_betweenness(
    graph: &Graph,
    node: NodeId,
    other: Option<NodeId>,
) -> Result<Vec<f64>, GraphError> {
    cached_edge_row(graph, fields::EDGE_BETWEENNESS, node, other, |graph| {
        let mut rows = edge_betweenness_all(graph)?;
        Ok(std::mem::take(&mut rows[node as usize]))
    })
}

pub(crate) fn zeroed_rows(graph: &Graph) -> Vec<Vec<f64>> {
    (0..graph.num_nodes())
        .map(|u| vec![0.0; graph.degree(u) as usize])
        .collect()
}

pub(crate) fn edge_index(graph: &Graph, u: NodeId, v: NodeId) -> Result<usize, GraphError> {
    graph.check_node(u)?;
    graph.check_node(v)?;
    seq::sorted_find(graph.neighbours(u), &v)
        .ok_or_else(|| GraphError::not_found(format!("edge {u} -> {v}")))
}

fn check_shape(graph: &Graph, rows: &[Vec<f64>]) -> Result<(), GraphError> {
    if rows.len() != graph.num_nodes() as usize {
        return Err(GraphError::invalid_input(format!(
            "expected {} rows, got {}",
            graph.num_nodes(),
            rows.len()
        )));
    }
    for (u, row) in rows.iter().enumerate() {
        if row.len() != graph.degree(u as NodeId) as usize {
            return Err(GraphError::invalid_input(format!(
                "row {u} has {} values for degree {}",
                row.len(),
                graph.degree(u as NodeId)
            )));
        }
    }
    Ok(())
}

fn cached_rows(graph: &Graph) -> Result<Option<Vec<Vec<f64>>>, GraphError> {
    let mut rows = Vec::with_capacity(graph.num_nodes() as usize);
    for node in 0..graph.num_nodes() {
        match cache::check(graph, fields::EDGE_BETWEENNESS, CacheSlot::Edge(node, None))?
            .and_then(CacheValue::into_row)
        {
            Some(row) => rows.push(row),
            None => return Ok(None),
        }
    }
    Ok(Some(rows))
}
