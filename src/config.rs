//! Configuration for the traversal engines and the content-stream grouper.
//!
//! The values here are tuning parameters, not semantic contracts: they bound
//! how much work a single traversal may do on a hostile or very large graph.

use serde::{Deserialize, Serialize};

/// Default ceiling on nested recursion for equality and representation.
pub const DEFAULT_MAX_RECURSION_DEPTH: u32 = 1000;

/// Default number of compound objects rendered before elision.
pub const DEFAULT_REPR_MAX_OBJECTS: usize = 40;

/// Default number of stream payload bytes shown by the representation.
pub const DEFAULT_REPR_PEEK_BYTES: usize = 20;

/// Object-graph processing configuration.
///
/// # Example
///
/// ```
/// use pdf_graph::config::GraphOptions;
///
/// let options = GraphOptions::default().with_repr_max_objects(10);
/// assert_eq!(options.repr_max_objects, 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphOptions {
    /// Maximum recursion depth for equality and representation walks
    pub max_recursion_depth: u32,

    /// Compound objects rendered (below the top level) before `...` elision
    pub repr_max_objects: usize,

    /// Stream payload bytes shown before the `...` marker
    pub repr_peek_bytes: usize,

    /// Whitelisting either `q` or `Q` admits both; whitelisting neither
    /// filters both. When false the two are filtered independently.
    pub pair_save_restore: bool,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            max_recursion_depth: DEFAULT_MAX_RECURSION_DEPTH,
            repr_max_objects: DEFAULT_REPR_MAX_OBJECTS,
            repr_peek_bytes: DEFAULT_REPR_PEEK_BYTES,
            pair_save_restore: true,
        }
    }
}

impl GraphOptions {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tight limits for untrusted input.
    pub fn strict() -> Self {
        Self {
            max_recursion_depth: 100,
            ..Self::default()
        }
    }

    /// Set the recursion limit.
    pub fn with_max_recursion_depth(mut self, depth: u32) -> Self {
        self.max_recursion_depth = depth;
        self
    }

    /// Set the representation object ceiling.
    pub fn with_repr_max_objects(mut self, count: usize) -> Self {
        self.repr_max_objects = count;
        self
    }

    /// Set the stream peek length.
    pub fn with_repr_peek_bytes(mut self, count: usize) -> Self {
        self.repr_peek_bytes = count;
        self
    }

    /// Toggle q/Q whitelist pairing.
    pub fn with_pair_save_restore(mut self, enable: bool) -> Self {
        self.pair_save_restore = enable;
        self
    }
}
