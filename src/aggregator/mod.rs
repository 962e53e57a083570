//! Aggregation of allocation records into a call-path graph and metrics.
//!
//! This module transforms parsed allocation records into:
//! - A deduplicated graph of call-path nodes and caller/callee edges
//! - Hot node rankings (top memory consumers)
//! - Dump-wide totals

pub mod metrics;
pub mod symbol_graph;

// Re-export main types and functions
pub use metrics::{calculate_hot_nodes, calculate_totals, AllocationTotals, HotNode};
pub use symbol_graph::{Edge, SymbolGraph, SymbolNode};
