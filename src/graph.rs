use std::fmt;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{cache::StatsCache, errors::GraphError, log::GraphLog, seq};

/// Node index. Nodes are numbered `0..num_nodes()` and never change.
pub type NodeId = u32;

/// Per-node label: an integer label value plus spatial coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphLabel {
    pub label_value: u32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl GraphLabel {
    pub fn new(label_value: u32, x: f32, y: f32, z: f32) -> Self {
        Self {
            label_value,
            x,
            y,
            z,
        }
    }

    /// Euclidean distance between the coordinates of two labels.
    pub fn distance(&self, other: &GraphLabel) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// Payload delivered to listeners on every successful edge mutation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeEvent {
    pub u: NodeId,
    pub v: NodeId,
    /// Position of `v` in the neighbour list of `u`.
    pub u_idx: usize,
    /// Position of `u` in the neighbour list of `v`. `None` on directed graphs.
    pub v_idx: Option<usize>,
    /// Weight of the added edge, or of the edge that was removed.
    pub weight: f32,
}

/// Observer of adjacency changes.
///
/// Listeners are called synchronously, in registration order, after the
/// adjacency lists have been updated and before the mutating call returns.
/// They must not mutate the graph.
pub trait EdgeListener: Send + Sync {
    fn on_edge_added(&self, _event: &EdgeEvent) {}

    fn on_edge_removed(&self, _event: &EdgeEvent) {}

    /// Dead listeners are dropped from the registry on the next mutation.
    fn is_alive(&self) -> bool {
        true
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

#[derive(Default)]
struct ListenerRegistry {
    next_id: u64,
    listeners: Vec<(ListenerId, Box<dyn EdgeListener>)>,
}

impl ListenerRegistry {
    fn register(&mut self, listener: Box<dyn EdgeListener>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    fn unregister(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn fire_added(&mut self, event: &EdgeEvent) {
        self.listeners.retain(|(_, listener)| listener.is_alive());
        for (_, listener) in &self.listeners {
            listener.on_edge_added(event);
        }
    }

    fn fire_removed(&mut self, event: &EdgeEvent) {
        self.listeners.retain(|(_, listener)| listener.is_alive());
        for (_, listener) in &self.listeners {
            listener.on_edge_removed(event);
        }
    }
}

/// Sparse adjacency-list graph with a fixed node count.
///
/// Neighbour lists are kept ascending and duplicate-free, with a parallel
/// list of weights. Undirected graphs store every edge in both endpoint
/// lists; `num_edges` counts each undirected edge once.
pub struct Graph {
    numnodes: u32,
    numedges: u32,
    directed: bool,
    labels: Vec<GraphLabel>,
    neighbours: Vec<Vec<NodeId>>,
    weights: Vec<Vec<f32>>,
    label_values: Vec<u32>,
    listeners: RwLock<ListenerRegistry>,
    cache: Option<StatsCache>,
    log: GraphLog,
}

impl Graph {
    pub fn new(numnodes: u32, directed: bool) -> Self {
        let n = numnodes as usize;
        Self {
            numnodes,
            numedges: 0,
            directed,
            labels: vec![GraphLabel::default(); n],
            neighbours: vec![Vec::new(); n],
            weights: vec![Vec::new(); n],
            label_values: Vec::new(),
            listeners: RwLock::new(ListenerRegistry::default()),
            cache: None,
            log: GraphLog::default(),
        }
    }

    pub fn undirected(numnodes: u32) -> Self {
        Self::new(numnodes, false)
    }

    pub fn num_nodes(&self) -> u32 {
        self.numnodes
    }

    pub fn num_edges(&self) -> u32 {
        self.numedges
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn check_node(&self, id: NodeId) -> Result<(), GraphError> {
        if id >= self.numnodes {
            return Err(GraphError::invalid_input(format!(
                "node {id} out of range (graph has {} nodes)",
                self.numnodes
            )));
        }
        Ok(())
    }

    /// Adds the edge `u -> v` (and `v -> u` when undirected).
    ///
    /// Adding an edge that already exists succeeds without changing anything,
    /// including its weight.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId, weight: f32) -> Result<(), GraphError> {
        self.check_node(u)?;
        self.check_node(v)?;
        if u == v {
            return Err(GraphError::invalid_input(format!(
                "self loops are not supported (node {u})"
            )));
        }
        let u_idx = match self.neighbours[u as usize].binary_search(&v) {
            Ok(_) => return Ok(()),
            Err(idx) => idx,
        };
        let v_idx = if self.directed {
            None
        } else {
            Some(seq::insertion_point(&self.neighbours[v as usize], &u))
        };

        self.neighbours[u as usize].insert(u_idx, v);
        self.weights[u as usize].insert(u_idx, weight);
        if let Some(v_idx) = v_idx {
            self.neighbours[v as usize].insert(v_idx, u);
            self.weights[v as usize].insert(v_idx, weight);
        }
        self.numedges += 1;

        let event = EdgeEvent {
            u,
            v,
            u_idx,
            v_idx,
            weight,
        };
        self.listeners.get_mut().fire_added(&event);
        self.invalidate_cache();
        trace!(u, v, weight, numedges = self.numedges, "edge added");
        Ok(())
    }

    pub fn remove_edge(&mut self, u: NodeId, v: NodeId) -> Result<(), GraphError> {
        self.check_node(u)?;
        self.check_node(v)?;
        let u_idx = seq::sorted_find(&self.neighbours[u as usize], &v)
            .ok_or_else(|| GraphError::not_found(format!("edge {u} -> {v}")))?;
        let v_idx = if self.directed {
            None
        } else {
            let idx = seq::sorted_find(&self.neighbours[v as usize], &u).ok_or_else(|| {
                GraphError::not_found(format!("reverse edge {v} -> {u} of undirected edge"))
            })?;
            Some(idx)
        };

        self.neighbours[u as usize].remove(u_idx);
        let weight = self.weights[u as usize].remove(u_idx);
        if let Some(v_idx) = v_idx {
            self.neighbours[v as usize].remove(v_idx);
            self.weights[v as usize].remove(v_idx);
        }
        self.numedges -= 1;

        let event = EdgeEvent {
            u,
            v,
            u_idx,
            v_idx,
            weight,
        };
        self.listeners.get_mut().fire_removed(&event);
        self.invalidate_cache();
        trace!(u, v, numedges = self.numedges, "edge removed");
        Ok(())
    }

    /// Overwrites the label of `id` and records its label value.
    pub fn set_node_label(&mut self, id: NodeId, label: GraphLabel) -> Result<(), GraphError> {
        self.check_node(id)?;
        self.labels[id as usize] = label;
        let _ = seq::sorted_insert(&mut self.label_values, label.label_value);
        Ok(())
    }

    /// Neighbours of `u`, ascending. Panics if `u` is out of range.
    pub fn neighbours(&self, u: NodeId) -> &[NodeId] {
        &self.neighbours[u as usize]
    }

    pub fn get_neighbours(&self, u: NodeId) -> Option<&[NodeId]> {
        self.neighbours.get(u as usize).map(Vec::as_slice)
    }

    /// Edge weights of `u`, parallel to [`neighbours`](Self::neighbours).
    pub fn weights(&self, u: NodeId) -> &[f32] {
        &self.weights[u as usize]
    }

    pub fn degree(&self, u: NodeId) -> u32 {
        self.neighbours[u as usize].len() as u32
    }

    pub fn are_neighbours(&self, u: NodeId, v: NodeId) -> bool {
        let (Some(nbrs_u), Some(nbrs_v)) = (self.get_neighbours(u), self.get_neighbours(v)) else {
            return false;
        };
        if seq::sorted_find(nbrs_u, &v).is_some() {
            return true;
        }
        !self.directed && seq::sorted_find(nbrs_v, &u).is_some()
    }

    pub fn weight(&self, u: NodeId, v: NodeId) -> Option<f32> {
        let nbrs = self.get_neighbours(u)?;
        let idx = seq::sorted_find(nbrs, &v)?;
        Some(self.weights[u as usize][idx])
    }

    /// Label of `id`. Panics if `id` is out of range.
    pub fn label(&self, id: NodeId) -> &GraphLabel {
        &self.labels[id as usize]
    }

    pub fn labels(&self) -> &[GraphLabel] {
        &self.labels
    }

    /// Distinct label values ever assigned through `set_node_label`, ascending.
    pub fn label_values(&self) -> &[u32] {
        &self.label_values
    }

    /// Every edge with its weight. Undirected edges are yielded once, `u < v`.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, f32)> + '_ {
        let directed = self.directed;
        self.neighbours
            .iter()
            .zip(self.weights.iter())
            .enumerate()
            .flat_map(move |(u, (nbrs, wts))| {
                let u = u as NodeId;
                nbrs.iter()
                    .zip(wts.iter())
                    .filter(move |(v, _)| directed || u < **v)
                    .map(move |(v, w)| (u, *v, *w))
            })
    }

    pub fn add_listener(&self, listener: Box<dyn EdgeListener>) -> ListenerId {
        self.listeners.write().register(listener)
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.listeners.write().unregister(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.read().listeners.len()
    }

    pub fn stats_cache(&self) -> Option<&StatsCache> {
        self.cache.as_ref()
    }

    pub(crate) fn attach_cache(&mut self, cache: StatsCache) -> Option<StatsCache> {
        self.cache.replace(cache)
    }

    pub(crate) fn detach_cache(&mut self) -> Option<StatsCache> {
        self.cache.take()
    }

    pub fn log(&self) -> &GraphLog {
        &self.log
    }

    pub fn log_add<T: Into<String>>(&mut self, message: T) {
        self.log.add(message);
    }

    fn invalidate_cache(&self) {
        if let Some(cache) = self.cache.as_ref() {
            cache.on_graph_mutated();
        }
    }
}

impl Clone for Graph {
    /// Deep copy of labels, adjacency and log. Listeners and the statistics
    /// cache belong to the original and are not carried over.
    fn clone(&self) -> Self {
        Self {
            numnodes: self.numnodes,
            numedges: self.numedges,
            directed: self.directed,
            labels: self.labels.clone(),
            neighbours: self.neighbours.clone(),
            weights: self.weights.clone(),
            label_values: self.label_values.clone(),
            listeners: RwLock::new(ListenerRegistry::default()),
            cache: None,
            log: self.log.clone(),
        }
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("numnodes", &self.numnodes)
            .field("numedges", &self.numedges)
            .field("directed", &self.directed)
            .field("cached", &self.cache.is_some())
            .finish()
    }
}
