use crate::{
    bfs::{BfsVisitor, Traversal, bfs},
    errors::GraphError,
    graph::{Graph, NodeId},
};

/// BFS frontiers stacked nearest-first, so popping yields the farthest
/// level first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LevelStack {
    levels: Vec<Vec<NodeId>>,
}

impl LevelStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs a BFS from `root` and records every level, depth 0 included.
    pub fn build(
        graph: &Graph,
        root: NodeId,
        exclude: Option<&[bool]>,
    ) -> Result<Self, GraphError> {
        graph.check_node(root)?;
        let mut stack = LevelStack::new();
        stack.push(vec![root]);
        bfs(graph, &[root], exclude, &mut stack)?;
        Ok(stack)
    }

    pub fn push(&mut self, level: Vec<NodeId>) {
        self.levels.push(level);
    }

    pub fn pop(&mut self) -> Option<Vec<NodeId>> {
        self.levels.pop()
    }

    pub fn peek(&self) -> Option<&[NodeId]> {
        self.levels.last().map(Vec::as_slice)
    }

    /// Number of levels currently on the stack.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl BfsVisitor for LevelStack {
    fn level(&mut self, frontier: &[NodeId], _depth: u32) -> Traversal {
        self.push(frontier.to_vec());
        Traversal::Continue
    }
}
