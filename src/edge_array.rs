//! Per-edge value storage that follows the shape of a graph's adjacency lists.
//!
//! Row `u` of an [`EdgeArray`] holds one value per entry of
//! `graph.neighbours(u)`, in the same order. The array registers an
//! [`EdgeListener`] on creation, so slots are inserted and removed in
//! lockstep with the adjacency lists. Mutations made before the array was
//! created are picked up from the graph's shape at construction time.

use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::{
    errors::GraphError,
    graph::{EdgeEvent, EdgeListener, Graph, ListenerId, NodeId},
    seq,
};

type Rows<T> = RwLock<Vec<Vec<T>>>;

pub struct EdgeArray<T> {
    rows: Arc<Rows<T>>,
    directed: bool,
    listener: ListenerId,
}

struct ShapeTracker<T> {
    rows: Weak<Rows<T>>,
}

impl<T> EdgeListener for ShapeTracker<T>
where
    T: Copy + Default + Send + Sync + 'static,
{
    fn on_edge_added(&self, event: &EdgeEvent) {
        let Some(rows) = self.rows.upgrade() else {
            return;
        };
        let mut rows = rows.write();
        rows[event.u as usize].insert(event.u_idx, T::default());
        if let Some(v_idx) = event.v_idx {
            rows[event.v as usize].insert(v_idx, T::default());
        }
    }

    fn on_edge_removed(&self, event: &EdgeEvent) {
        let Some(rows) = self.rows.upgrade() else {
            return;
        };
        let mut rows = rows.write();
        rows[event.u as usize].remove(event.u_idx);
        if let Some(v_idx) = event.v_idx {
            rows[event.v as usize].remove(v_idx);
        }
    }

    fn is_alive(&self) -> bool {
        self.rows.strong_count() > 0
    }
}

impl<T> EdgeArray<T>
where
    T: Copy + Default + Send + Sync + 'static,
{
    /// Allocates a zero-valued slot for every adjacency entry of `graph` and
    /// starts tracking its mutations.
    pub fn new(graph: &Graph) -> Self {
        let rows: Vec<Vec<T>> = (0..graph.num_nodes())
            .map(|u| vec![T::default(); graph.degree(u) as usize])
            .collect();
        let rows = Arc::new(RwLock::new(rows));
        let listener = graph.add_listener(Box::new(ShapeTracker {
            rows: Arc::downgrade(&rows),
        }));
        Self {
            rows,
            directed: graph.is_directed(),
            listener,
        }
    }

    pub fn listener_id(&self) -> ListenerId {
        self.listener
    }

    pub fn row_len(&self, u: NodeId) -> Result<usize, GraphError> {
        let rows = self.rows.read();
        rows.get(u as usize)
            .map(Vec::len)
            .ok_or_else(|| GraphError::invalid_input(format!("node {u} out of range")))
    }

    pub fn get(&self, graph: &Graph, u: NodeId, v: NodeId) -> Result<T, GraphError> {
        let idx = slot_index(graph, u, v)?;
        Ok(self.rows.read()[u as usize][idx])
    }

    pub fn get_all(&self, u: NodeId) -> Result<Vec<T>, GraphError> {
        let rows = self.rows.read();
        rows.get(u as usize)
            .cloned()
            .ok_or_else(|| GraphError::invalid_input(format!("node {u} out of range")))
    }

    /// Sets the value of edge `(u, v)`; mirrored to `(v, u)` on undirected
    /// graphs.
    pub fn set(&self, graph: &Graph, u: NodeId, v: NodeId, value: T) -> Result<(), GraphError> {
        let u_idx = slot_index(graph, u, v)?;
        let mirror = if self.directed {
            None
        } else {
            Some(slot_index(graph, v, u)?)
        };
        let mut rows = self.rows.write();
        rows[u as usize][u_idx] = value;
        if let Some(v_idx) = mirror {
            rows[v as usize][v_idx] = value;
        }
        Ok(())
    }

    /// Replaces every value in row `u`. `values` must have `degree(u)`
    /// entries; on undirected graphs each value is mirrored to the reverse
    /// edge.
    pub fn set_all(&self, graph: &Graph, u: NodeId, values: &[T]) -> Result<(), GraphError> {
        graph.check_node(u)?;
        let nbrs = graph.neighbours(u);
        if values.len() != nbrs.len() {
            return Err(GraphError::invalid_input(format!(
                "row {u} expects {} values, got {}",
                nbrs.len(),
                values.len()
            )));
        }
        let mut rows = self.rows.write();
        rows[u as usize].copy_from_slice(values);
        if !self.directed {
            for (&v, &value) in nbrs.iter().zip(values) {
                if let Some(idx) = seq::sorted_find(graph.neighbours(v), &u) {
                    rows[v as usize][idx] = value;
                }
            }
        }
        Ok(())
    }

    /// Resets every slot to `T::default()` without changing the shape.
    pub fn clear(&self) {
        for row in self.rows.write().iter_mut() {
            row.fill(T::default());
        }
    }

    /// Stops tracking `graph`. Dropping the array has the same effect, lazily.
    pub fn detach(self, graph: &Graph) {
        graph.remove_listener(self.listener);
    }
}

fn slot_index(graph: &Graph, u: NodeId, v: NodeId) -> Result<usize, GraphError> {
    graph.check_node(u)?;
    graph.check_node(v)?;
    seq::sorted_find(graph.neighbours(u), &v)
        .ok_or_else(|| GraphError::not_found(format!("edge {u} -> {v}")))
}
