//! Memoisation of statistics, attached to a [`Graph`].
//!
//! Each statistic owns a small integer [`FieldId`] and declares it once with
//! [`add`], choosing one of five storage strategies ([`CacheKind`]).
//! [`check`] is a pure lookup and [`update`] always overwrites. Rows are
//! never merged: a statistic that recomputes a node, pair or edge row writes
//! the whole row.
//!
//! Graphs without an attached cache are valid inputs everywhere: `check`
//! reports a miss and `add`/`update` do nothing.

pub mod pair_store;

use std::sync::atomic::{AtomicU64, Ordering};

use ahash::AHashMap;
use parking_lot::Mutex;
use tracing::debug;

use crate::{
    config::CacheConfig,
    edge_array::EdgeArray,
    errors::GraphError,
    graph::{Graph, NodeId},
};

use self::pair_store::{MemoryStore, PairStore, TempFileStore};

pub type FieldId = u16;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CacheKind {
    /// One scalar for the whole graph.
    Graph,
    /// A sequence of values for the whole graph.
    List,
    /// One scalar per node.
    Node,
    /// One row of `numnodes` values per node.
    Pair,
    /// One value per adjacency entry.
    Edge,
}

/// Address of a value inside a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheSlot {
    Graph,
    List,
    Node(NodeId),
    Pair(NodeId),
    /// A node's whole edge row, or the single edge to `Some(other)`.
    Edge(NodeId, Option<NodeId>),
}

impl CacheSlot {
    pub fn kind(&self) -> CacheKind {
        match self {
            CacheSlot::Graph => CacheKind::Graph,
            CacheSlot::List => CacheKind::List,
            CacheSlot::Node(_) => CacheKind::Node,
            CacheSlot::Pair(_) => CacheKind::Pair,
            CacheSlot::Edge(..) => CacheKind::Edge,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CacheValue {
    Scalar(f64),
    Row(Vec<f64>),
}

impl CacheValue {
    pub fn scalar(&self) -> Option<f64> {
        match self {
            CacheValue::Scalar(value) => Some(*value),
            CacheValue::Row(_) => None,
        }
    }

    pub fn into_row(self) -> Option<Vec<f64>> {
        match self {
            CacheValue::Row(values) => Some(values),
            CacheValue::Scalar(_) => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

enum CacheEntry {
    Graph { value: f64, cached: bool },
    List { values: Vec<f64>, cached: bool },
    Node { values: Vec<f64>, cached: Vec<bool> },
    Pair { store: Box<dyn PairStore>, cached: Vec<bool> },
    Edge { values: EdgeArray<f64>, cached: Vec<bool> },
}

impl CacheEntry {
    fn new(graph: &Graph, kind: CacheKind, config: &CacheConfig) -> Result<Self, GraphError> {
        let n = graph.num_nodes() as usize;
        let entry = match kind {
            CacheKind::Graph => CacheEntry::Graph {
                value: 0.0,
                cached: false,
            },
            CacheKind::List => CacheEntry::List {
                values: Vec::new(),
                cached: false,
            },
            CacheKind::Node => CacheEntry::Node {
                values: vec![0.0; n],
                cached: vec![false; n],
            },
            CacheKind::Pair => {
                let store: Box<dyn PairStore> = if config.pair_backing.spills(graph.num_nodes()) {
                    Box::new(TempFileStore::new(n)?)
                } else {
                    Box::new(MemoryStore::new(n))
                };
                CacheEntry::Pair {
                    store,
                    cached: vec![false; n],
                }
            }
            CacheKind::Edge => CacheEntry::Edge {
                values: EdgeArray::new(graph),
                cached: vec![false; n],
            },
        };
        Ok(entry)
    }

    fn kind(&self) -> CacheKind {
        match self {
            CacheEntry::Graph { .. } => CacheKind::Graph,
            CacheEntry::List { .. } => CacheKind::List,
            CacheEntry::Node { .. } => CacheKind::Node,
            CacheEntry::Pair { .. } => CacheKind::Pair,
            CacheEntry::Edge { .. } => CacheKind::Edge,
        }
    }

    fn invalidate(&mut self) {
        match self {
            CacheEntry::Graph { cached, .. } => *cached = false,
            CacheEntry::List { values, cached } => {
                values.clear();
                *cached = false;
            }
            CacheEntry::Node { cached, .. }
            | CacheEntry::Pair { cached, .. }
            | CacheEntry::Edge { cached, .. } => cached.fill(false),
        }
    }

    fn check(&mut self, graph: &Graph, slot: CacheSlot) -> Result<Option<CacheValue>, GraphError> {
        match (self, slot) {
            (CacheEntry::Graph { value, cached }, CacheSlot::Graph) => {
                Ok(cached.then_some(CacheValue::Scalar(*value)))
            }
            (CacheEntry::List { values, cached }, CacheSlot::List) => {
                Ok(cached.then(|| CacheValue::Row(values.clone())))
            }
            (CacheEntry::Node { values, cached }, CacheSlot::Node(node)) => {
                let idx = node_index(cached, node)?;
                Ok(cached[idx].then_some(CacheValue::Scalar(values[idx])))
            }
            (CacheEntry::Pair { store, cached }, CacheSlot::Pair(node)) => {
                let idx = node_index(cached, node)?;
                if !cached[idx] {
                    return Ok(None);
                }
                let mut row = vec![0.0; store.row_len()];
                store.read_row(node, &mut row)?;
                Ok(Some(CacheValue::Row(row)))
            }
            (CacheEntry::Edge { values, cached }, CacheSlot::Edge(node, other)) => {
                let idx = node_index(cached, node)?;
                if !cached[idx] {
                    return Ok(None);
                }
                let value = match other {
                    Some(other) => CacheValue::Scalar(values.get(graph, node, other)?),
                    None => CacheValue::Row(values.get_all(node)?),
                };
                Ok(Some(value))
            }
            (entry, slot) => Err(kind_mismatch(entry.kind(), slot)),
        }
    }

    fn update(&mut self, graph: &Graph, slot: CacheSlot, value: CacheValue) -> Result<(), GraphError> {
        match (self, slot, value) {
            (CacheEntry::Graph { value, cached }, CacheSlot::Graph, CacheValue::Scalar(new)) => {
                *value = new;
                *cached = true;
            }
            (CacheEntry::List { values, cached }, CacheSlot::List, CacheValue::Scalar(new)) => {
                values.push(new);
                *cached = true;
            }
            (CacheEntry::List { values, cached }, CacheSlot::List, CacheValue::Row(new)) => {
                *values = new;
                *cached = true;
            }
            (CacheEntry::Node { values, cached }, CacheSlot::Node(node), CacheValue::Scalar(new)) => {
                let idx = node_index(cached, node)?;
                values[idx] = new;
                cached[idx] = true;
            }
            (CacheEntry::Pair { store, cached }, CacheSlot::Pair(node), CacheValue::Row(row)) => {
                let idx = node_index(cached, node)?;
                store.write_row(node, &row)?;
                cached[idx] = true;
            }
            (CacheEntry::Edge { values, cached }, CacheSlot::Edge(node, None), CacheValue::Row(row)) => {
                let idx = node_index(cached, node)?;
                values.set_all(graph, node, &row)?;
                cached[idx] = true;
            }
            (
                CacheEntry::Edge { values, cached },
                CacheSlot::Edge(node, Some(other)),
                CacheValue::Scalar(new),
            ) => {
                let idx = node_index(cached, node)?;
                values.set(graph, node, other, new)?;
                cached[idx] = true;
            }
            (entry, slot, value) => {
                return Err(GraphError::invalid_input(format!(
                    "cannot store {value:?} at {slot:?} in a {:?} field",
                    entry.kind()
                )));
            }
        }
        Ok(())
    }
}

fn node_index(cached: &[bool], node: NodeId) -> Result<usize, GraphError> {
    let idx = node as usize;
    if idx >= cached.len() {
        return Err(GraphError::invalid_input(format!(
            "node {node} out of range for cache field"
        )));
    }
    Ok(idx)
}

fn kind_mismatch(kind: CacheKind, slot: CacheSlot) -> GraphError {
    GraphError::invalid_input(format!("slot {slot:?} does not address a {kind:?} field"))
}

/// Per-graph side table of cached statistics.
pub struct StatsCache {
    config: CacheConfig,
    entries: Mutex<AHashMap<FieldId, CacheEntry>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl StatsCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            entries: Mutex::new(AHashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> CacheConfig {
        self.config
    }

    /// Declares `field`. Declaring an existing field again is a no-op, as long
    /// as the kind matches.
    pub fn add(&self, graph: &Graph, field: FieldId, kind: CacheKind) -> Result<(), GraphError> {
        let mut entries = self.entries.lock();
        if let Some(existing) = entries.get(&field) {
            if existing.kind() != kind {
                return Err(GraphError::invalid_input(format!(
                    "field {field} already declared as {:?}, not {kind:?}",
                    existing.kind()
                )));
            }
            return Ok(());
        }
        let entry = CacheEntry::new(graph, kind, &self.config)?;
        entries.insert(field, entry);
        debug!(field, ?kind, "cache field declared");
        Ok(())
    }

    pub fn contains(&self, field: FieldId) -> bool {
        self.entries.lock().contains_key(&field)
    }

    pub fn kind_of(&self, field: FieldId) -> Option<CacheKind> {
        self.entries.lock().get(&field).map(CacheEntry::kind)
    }

    /// Looks up a value. Undeclared fields are reported as not cached.
    pub fn check(
        &self,
        graph: &Graph,
        field: FieldId,
        slot: CacheSlot,
    ) -> Result<Option<CacheValue>, GraphError> {
        let mut entries = self.entries.lock();
        let found = match entries.get_mut(&field) {
            Some(entry) => entry.check(graph, slot)?,
            None => None,
        };
        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        Ok(found)
    }

    /// Stores a value, overwriting whatever was there. The field must have
    /// been declared with [`add`](Self::add).
    pub fn update(
        &self,
        graph: &Graph,
        field: FieldId,
        slot: CacheSlot,
        value: CacheValue,
    ) -> Result<(), GraphError> {
        let mut entries = self.entries.lock();
        let entry = entries
            .get_mut(&field)
            .ok_or_else(|| GraphError::cache(format!("field {field} was never added")))?;
        entry.update(graph, slot, value)
    }

    /// Forgets every cached value, keeping field declarations.
    pub fn invalidate(&self) {
        let mut entries = self.entries.lock();
        for entry in entries.values_mut() {
            entry.invalidate();
        }
        debug!(fields = entries.len(), "cache invalidated");
    }

    /// Unregisters the edge-array listeners this cache holds on `graph`.
    pub fn teardown(self, graph: &Graph) {
        let mut released = 0usize;
        for (_, entry) in self.entries.into_inner() {
            if let CacheEntry::Edge { values, .. } = entry {
                values.detach(graph);
                released += 1;
            }
        }
        debug!(released, "cache torn down");
    }

    pub(crate) fn on_graph_mutated(&self) {
        if self.config.auto_invalidate {
            self.invalidate();
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.lock().len(),
        }
    }
}

/// Attaches a fresh cache with the default configuration.
pub fn init(graph: &mut Graph) {
    init_with(graph, CacheConfig::default());
}

/// Attaches a fresh cache, replacing any existing one.
pub fn init_with(graph: &mut Graph, config: CacheConfig) {
    if let Some(old) = graph.attach_cache(StatsCache::new(config)) {
        old.teardown(graph);
    }
}

/// Replaces the attached cache with an empty one using the same
/// configuration.
pub fn reset(graph: &mut Graph) {
    let config = graph
        .stats_cache()
        .map(StatsCache::config)
        .unwrap_or_default();
    init_with(graph, config);
}

/// Removes the cache from `graph`. Returns whether one was attached.
pub fn detach(graph: &mut Graph) -> bool {
    match graph.detach_cache() {
        Some(old) => {
            old.teardown(graph);
            true
        }
        None => false,
    }
}

pub fn add(graph: &Graph, field: FieldId, kind: CacheKind) -> Result<(), GraphError> {
    match graph.stats_cache() {
        Some(cache) => cache.add(graph, field, kind),
        None => Ok(()),
    }
}

pub fn check(
    graph: &Graph,
    field: FieldId,
    slot: CacheSlot,
) -> Result<Option<CacheValue>, GraphError> {
    match graph.stats_cache() {
        Some(cache) => cache.check(graph, field, slot),
        None => Ok(None),
    }
}

pub fn update(
    graph: &Graph,
    field: FieldId,
    slot: CacheSlot,
    value: CacheValue,
) -> Result<(), GraphError> {
    match graph.stats_cache() {
        Some(cache) => cache.update(graph, field, slot, value),
        None => Ok(()),
    }
}
