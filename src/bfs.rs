//! Level-synchronous breadth-first search with pluggable hooks.
//!
//! [`bfs`] drives an outer loop over depth levels and an inner
//! [`expand`] step over the edges leaving the current frontier. Algorithms
//! inject their bookkeeping through a [`BfsVisitor`]: `level` runs once per
//! depth (from depth 1), `edge` runs once per traversed adjacency entry.
//! Either hook can stop the search.

use crate::{
    errors::GraphError,
    graph::{Graph, NodeId},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Traversal {
    Continue,
    Stop,
}

pub trait BfsVisitor {
    /// Called with the frontier at `depth`, for every `depth > 0`.
    fn level(&mut self, _frontier: &[NodeId], _depth: u32) -> Traversal {
        Traversal::Continue
    }

    /// Called for every neighbour `child` of a frontier node `parent`.
    /// `visited` is true when `child` had already been reached (or was
    /// excluded); `depth` is the depth `child` has when discovered here.
    fn edge(&mut self, _parent: NodeId, _child: NodeId, _visited: bool, _depth: u32) -> Traversal {
        Traversal::Continue
    }
}

/// Visitor with no hooks, for plain reachability sweeps.
pub struct NoopVisitor;

impl BfsVisitor for NoopVisitor {}

/// Breadth-first search from `roots`.
///
/// `exclude`, when given, must have one entry per node; `true` entries are
/// treated as already visited, which scopes the search to the remaining
/// subgraph. Roots are always visited.
pub fn bfs<V>(
    graph: &Graph,
    roots: &[NodeId],
    exclude: Option<&[bool]>,
    visitor: &mut V,
) -> Result<(), GraphError>
where
    V: BfsVisitor + ?Sized,
{
    let n = graph.num_nodes() as usize;
    let mut visited = match exclude {
        Some(mask) => {
            if mask.len() != n {
                return Err(GraphError::invalid_input(format!(
                    "exclusion mask has {} entries, graph has {n} nodes",
                    mask.len()
                )));
            }
            mask.to_vec()
        }
        None => vec![false; n],
    };

    let mut frontier = Vec::with_capacity(roots.len());
    for &root in roots {
        graph.check_node(root)?;
        if !frontier.contains(&root) {
            visited[root as usize] = true;
            frontier.push(root);
        }
    }

    let mut next = Vec::new();
    let mut depth = 0u32;
    while !frontier.is_empty() {
        if depth > 0 && visitor.level(&frontier, depth) == Traversal::Stop {
            break;
        }
        if expand(graph, &frontier, depth, &mut visited, &mut next, visitor)? == Traversal::Stop {
            break;
        }
        std::mem::swap(&mut frontier, &mut next);
        next.clear();
        depth += 1;
    }
    Ok(())
}

/// Expands one frontier at `depth`, appending newly reached nodes to `next`.
pub fn expand<V>(
    graph: &Graph,
    frontier: &[NodeId],
    depth: u32,
    visited: &mut [bool],
    next: &mut Vec<NodeId>,
    visitor: &mut V,
) -> Result<Traversal, GraphError>
where
    V: BfsVisitor + ?Sized,
{
    if visited.len() != graph.num_nodes() as usize {
        return Err(GraphError::invalid_input("visited mask does not match graph"));
    }
    for &parent in frontier {
        graph.check_node(parent)?;
        for &child in graph.neighbours(parent) {
            let seen = visited[child as usize];
            if visitor.edge(parent, child, seen, depth + 1) == Traversal::Stop {
                return Ok(Traversal::Stop);
            }
            if !seen {
                visited[child as usize] = true;
                next.push(child);
            }
        }
    }
    Ok(Traversal::Continue)
}

/// Nodes reachable from `root` (including `root`), in discovery order.
pub fn reachable(
    graph: &Graph,
    root: NodeId,
    exclude: Option<&[bool]>,
) -> Result<Vec<NodeId>, GraphError> {
    struct Collect(Vec<NodeId>);

    impl BfsVisitor for Collect {
        fn edge(&mut self, _parent: NodeId, child: NodeId, visited: bool, _depth: u32) -> Traversal {
            if !visited {
                self.0.push(child);
            }
            Traversal::Continue
        }
    }

    let mut collect = Collect(vec![root]);
    bfs(graph, &[root], exclude, &mut collect)?;
    Ok(collect.0)
}
