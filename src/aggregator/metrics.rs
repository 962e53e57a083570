//! Rank call-path nodes and compute allocation totals.
//!
//! Hot nodes are the call paths responsible for the most allocated bytes.
//! These are the primary targets when hunting memory usage.

use super::symbol_graph::{SymbolGraph, SymbolNode};
use log::debug;

/// A node ranked by allocated bytes
#[derive(Debug, Clone, PartialEq)]
pub struct HotNode {
    pub index: usize,
    pub name: String,
    pub path_key: String,
    pub depth: usize,
    pub count: u64,
    pub size: u64,

    /// Share of all allocated bytes
    pub percentage: f64,
}

/// Calculate the hottest nodes of a graph
///
/// **Public** - main entry point for metrics calculation
///
/// # Arguments
/// * `graph` - Aggregated call-path graph
/// * `top_n` - Number of nodes to return
///
/// # Returns
/// Nodes sorted by total size (descending), ties broken by index
pub fn calculate_hot_nodes(graph: &SymbolGraph, top_n: usize) -> Vec<HotNode> {
    debug!("Calculating top {} hot nodes from {} nodes", top_n, graph.node_count());

    let total_size = calculate_totals(graph).total_size;

    let mut ranked: Vec<&SymbolNode> = graph.nodes().iter().collect();
    ranked.sort_by(|a, b| b.total_size.cmp(&a.total_size).then(a.index.cmp(&b.index)));

    ranked
        .into_iter()
        .take(top_n)
        .map(|node| create_hot_node(node, total_size))
        .collect()
}

/// Create a HotNode from a SymbolNode
///
/// **Private** - internal conversion
fn create_hot_node(node: &SymbolNode, total_size: u64) -> HotNode {
    let percentage = if total_size > 0 {
        (node.total_size as f64 / total_size as f64) * 100.0
    } else {
        0.0
    };

    HotNode {
        index: node.index,
        name: node.name.clone(),
        path_key: node.path_key(),
        depth: node.depth(),
        count: node.total_count,
        size: node.total_size,
        percentage,
    }
}

/// Graph-wide totals
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllocationTotals {
    pub record_count: usize,
    pub node_count: usize,
    pub edge_count: usize,
    pub root_count: usize,

    /// Allocations summed over root nodes
    pub total_count: u64,

    /// Bytes summed over root nodes
    pub total_size: u64,
}

impl AllocationTotals {
    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        format!(
            "Records: {} | Nodes: {} | Edges: {} | Roots: {} | Allocations: {} | Bytes: {}",
            self.record_count,
            self.node_count,
            self.edge_count,
            self.root_count,
            self.total_count,
            self.total_size
        )
    }
}

/// Compute totals for a graph
///
/// Every record with at least one frame passes through exactly one root,
/// so the root sums are the dump totals.
pub fn calculate_totals(graph: &SymbolGraph) -> AllocationTotals {
    let mut totals = AllocationTotals {
        record_count: graph.record_count(),
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        ..Default::default()
    };

    for root in graph.roots() {
        totals.root_count += 1;
        totals.total_count = totals.total_count.saturating_add(root.total_count);
        totals.total_size = totals.total_size.saturating_add(root.total_size);
    }

    totals
}
