//! Configuration and constants for the CLI.

/// Current JSON profile schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Backtraces in the allocator dump carry at most this many frames
pub const MAX_BACKTRACE_FRAMES: usize = 8;

/// Upper bound accepted for `--max-frames`
pub const MAX_CONFIGURABLE_FRAMES: usize = 64;

// Binary magnitude thresholds for size labels
pub const KIB: u64 = 1024;
pub const MIB: u64 = 1024 * 1024;

/// Graphviz program used to lay out and draw the graph
pub const DEFAULT_RENDERER: &str = "dot";

/// Image format passed to the renderer as `-T<format>`
pub const DEFAULT_IMAGE_FORMAT: &str = "png";

/// Name of the emitted digraph
pub const DEFAULT_GRAPH_NAME: &str = "allocations";

/// Number of hot nodes kept in summaries and JSON profiles
pub const DEFAULT_TOP_NODES: usize = 20;
