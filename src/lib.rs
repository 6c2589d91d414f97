//! Sparse graph engine with cached network statistics.
//!
//! A [`Graph`] optionally carries a [`StatsCache`]; every function under
//! [`stats`] memoises into it when attached. [`threshold`] removes edges by
//! betweenness or path sharing, and [`generators`] builds random graphs from
//! an explicit RNG.

pub mod bfs;
pub mod cache;
pub mod cli;
pub mod communities;
pub mod config;
pub mod connect;
pub mod edge_array;
pub mod errors;
pub mod generators;
pub mod graph;
pub mod level_stack;
pub mod log;
pub mod mask;
pub mod ncut;
pub mod prune;
pub mod seq;
pub mod stats;
pub mod threshold;

pub use crate::bfs::{BfsVisitor, Traversal, bfs, expand};
pub use crate::cache::{CacheKind, CacheSlot, CacheValue, FieldId, StatsCache};
pub use crate::config::{CacheConfig, PairBacking};
pub use crate::edge_array::EdgeArray;
pub use crate::errors::GraphError;
pub use crate::graph::{EdgeEvent, EdgeListener, Graph, GraphLabel, ListenerId, NodeId};
pub use crate::level_stack::LevelStack;
pub use crate::log::GraphLog;
pub use crate::stats::Target;
pub use crate::threshold::{EdgeBetweennessRemoval, EdgeRemoval, PathSharingRemoval};
