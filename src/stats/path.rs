//! Shortest-path lengths and counts.
//!
//! Both are pair-level fields: one row of `numnodes` values per source.
//! Unreachable nodes, and the source itself, have path length 0; callers
//! tell the two apart with [`connected`].

use crate::{
    bfs::{BfsVisitor, Traversal, bfs},
    cache::{self, CacheKind, CacheSlot, CacheValue},
    errors::GraphError,
    graph::{Graph, NodeId},
};

use super::{cached_graph_value, fields};

/// Single-source BFS state: depth of every reached node and the number of
/// distinct shortest paths leading to it.
pub(crate) struct ShortestPaths {
    pub(crate) dist: Vec<Option<u32>>,
    pub(crate) paths: Vec<f64>,
}

impl ShortestPaths {
    pub(crate) fn from_source(
        graph: &Graph,
        source: NodeId,
        exclude: Option<&[bool]>,
    ) -> Result<Self, GraphError> {
        let mut state = Self::seeded(graph, source)?;
        bfs(graph, &[source], exclude, &mut state)?;
        Ok(state)
    }

    /// State before the search: only `source` is reached, with one path.
    pub(crate) fn seeded(graph: &Graph, source: NodeId) -> Result<Self, GraphError> {
        graph.check_node(source)?;
        let n = graph.num_nodes() as usize;
        let mut state = ShortestPaths {
            dist: vec![None; n],
            paths: vec![0.0; n],
        };
        state.dist[source as usize] = Some(0);
        state.paths[source as usize] = 1.0;
        Ok(state)
    }

    fn lengths(&self) -> Vec<f64> {
        self.dist
            .iter()
            .map(|d| d.map_or(0.0, f64::from))
            .collect()
    }
}

impl BfsVisitor for ShortestPaths {
    fn edge(&mut self, parent: NodeId, child: NodeId, visited: bool, depth: u32) -> Traversal {
        let child = child as usize;
        if !visited {
            self.dist[child] = Some(depth);
        }
        if self.dist[child] == Some(depth) {
            self.paths[child] += self.paths[parent as usize];
        }
        Traversal::Continue
    }
}

/// Path lengths and path counts from `source`, sharing one BFS.
pub fn shortest_paths(graph: &Graph, source: NodeId) -> Result<(Vec<u32>, Vec<f64>), GraphError> {
    graph.check_node(source)?;
    let slot = CacheSlot::Pair(source);
    let lengths = cache::check(graph, fields::PATHLENGTH, slot)?.and_then(CacheValue::into_row);
    let counts = cache::check(graph, fields::NUMPATHS, slot)?.and_then(CacheValue::into_row);
    if let (Some(lengths), Some(counts)) = (lengths, counts) {
        return Ok((lengths.into_iter().map(|d| d as u32).collect(), counts));
    }

    let state = ShortestPaths::from_source(graph, source, None)?;
    cache::add(graph, fields::PATHLENGTH, CacheKind::Pair)?;
    cache::add(graph, fields::NUMPATHS, CacheKind::Pair)?;
    cache::update(graph, fields::PATHLENGTH, slot, CacheValue::Row(state.lengths()))?;
    cache::update(graph, fields::NUMPATHS, slot, CacheValue::Row(state.paths.clone()))?;
    let lengths = state.dist.iter().map(|d| d.unwrap_or(0)).collect();
    Ok((lengths, state.paths))
}

/// BFS depth of every node from `source`; 0 for `source` and unreachable
/// nodes.
pub fn pathlength(graph: &Graph, source: NodeId) -> Result<Vec<u32>, GraphError> {
    Ok(shortest_paths(graph, source)?.0)
}

/// Number of distinct shortest paths from `source` to every node.
pub fn numpaths(graph: &Graph, source: NodeId) -> Result<Vec<f64>, GraphError> {
    Ok(shortest_paths(graph, source)?.1)
}

pub fn connected(graph: &Graph, u: NodeId, v: NodeId) -> Result<bool, GraphError> {
    graph.check_node(v)?;
    if u == v {
        graph.check_node(u)?;
        return Ok(true);
    }
    Ok(pathlength(graph, u)?[v as usize] > 0)
}

/// Length of the shortest path from `u` to `v`. Stops the search as soon as
/// `v` is reached.
pub fn shortest_path_length(
    graph: &Graph,
    u: NodeId,
    v: NodeId,
) -> Result<Option<u32>, GraphError> {
    struct Seek {
        target: NodeId,
        found: Option<u32>,
    }

    impl BfsVisitor for Seek {
        fn edge(&mut self, _parent: NodeId, child: NodeId, visited: bool, depth: u32) -> Traversal {
            if child == self.target && !visited {
                self.found = Some(depth);
                return Traversal::Stop;
            }
            Traversal::Continue
        }
    }

    graph.check_node(u)?;
    graph.check_node(v)?;
    if u == v {
        return Ok(Some(0));
    }
    let mut seek = Seek {
        target: v,
        found: None,
    };
    bfs(graph, &[u], None, &mut seek)?;
    Ok(seek.found)
}

/// Mean shortest-path length over all ordered pairs of distinct, connected
/// nodes. 0 when no such pair exists.
pub fn avg_pathlength(graph: &Graph) -> Result<f64, GraphError> {
    cached_graph_value(graph, fields::AVG_PATHLENGTH, |graph| {
        let mut total = 0u64;
        let mut pairs = 0u64;
        for source in 0..graph.num_nodes() {
            for length in pathlength(graph, source)? {
                if length > 0 {
                    total += u64::from(length);
                    pairs += 1;
                }
            }
        }
        if pairs == 0 {
            return Ok(0.0);
        }
        Ok(total as f64 / pairs as f64)
    })
}
