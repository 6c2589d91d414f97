//! Configuration for the statistics cache.
//!
//! The only resource decision the engine makes is where pair-level rows
//! live. Everything else is sized by the graph itself.

/// Backing store used for pair-level cache fields.
///
/// A pair field holds one row of `numnodes` values per node, so it grows with
/// the square of the node count. Small graphs are cheaper to keep resident;
/// large graphs spill rows to an anonymous temporary file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PairBacking {
    /// Always use an anonymous temporary file.
    TempFile,
    /// Always keep rows in memory.
    Memory,
    /// Keep rows in memory up to `max_resident_nodes`, spill above it.
    Auto { max_resident_nodes: u32 },
}

impl Default for PairBacking {
    fn default() -> Self {
        PairBacking::Auto {
            max_resident_nodes: DEFAULT_MAX_RESIDENT_NODES,
        }
    }
}

impl PairBacking {
    /// Whether a graph with `numnodes` nodes should use the temp-file store.
    pub fn spills(&self, numnodes: u32) -> bool {
        match *self {
            PairBacking::TempFile => true,
            PairBacking::Memory => false,
            PairBacking::Auto { max_resident_nodes } => numnodes > max_resident_nodes,
        }
    }
}

/// 2048 nodes is 32 MiB of `f64` per pair field.
pub const DEFAULT_MAX_RESIDENT_NODES: u32 = 2048;

/// Options for a [`StatsCache`](crate::cache::StatsCache).
///
/// # Examples
///
/// ```rust
/// use graphstats::config::{CacheConfig, PairBacking};
///
/// let cfg = CacheConfig::default();
/// assert!(cfg.auto_invalidate);
///
/// let cfg = CacheConfig::temp_file().with_auto_invalidate(false);
/// assert_eq!(cfg.pair_backing, PairBacking::TempFile);
/// assert!(!cfg.auto_invalidate);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheConfig {
    /// Store selection for pair-level fields.
    pub pair_backing: PairBacking,

    /// Clear every cached flag whenever the owning graph gains or loses an
    /// edge.
    ///
    /// **Default:** `true`
    ///
    /// When `false`, callers that mutate a graph after populating its cache
    /// must call [`cache::reset`](crate::cache::reset) themselves.
    pub auto_invalidate: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            pair_backing: PairBacking::default(),
            auto_invalidate: true,
        }
    }
}

impl CacheConfig {
    pub fn in_memory() -> Self {
        Self {
            pair_backing: PairBacking::Memory,
            ..Self::default()
        }
    }

    pub fn temp_file() -> Self {
        Self {
            pair_backing: PairBacking::TempFile,
            ..Self::default()
        }
    }

    pub fn with_auto_invalidate(mut self, auto_invalidate: bool) -> Self {
        self.auto_invalidate = auto_invalidate;
        self
    }
}
