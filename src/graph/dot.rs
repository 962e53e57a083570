//! Graphviz DOT generation for allocation call graphs.
//!
//! Each call-path node becomes a box labelled `[count/size] symbol`, each
//! caller/callee adjacency an arrow. Layout is left entirely to the
//! renderer.

use crate::aggregator::symbol_graph::{SymbolGraph, SymbolNode};
use crate::utils::config::{DEFAULT_GRAPH_NAME, KIB, MIB};
use log::info;

/// DOT output configuration
#[derive(Debug, Clone)]
pub struct DotConfig {
    pub name: String,
    /// Graph `rankdir` attribute (e.g. "LR"); renderer default when unset
    pub rankdir: Option<String>,
    pub node_shape: Option<String>,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_GRAPH_NAME.to_string(),
            rankdir: None,
            node_shape: Some("box".to_string()),
        }
    }
}

impl DotConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_rankdir(mut self, rankdir: impl Into<String>) -> Self {
        self.rankdir = Some(rankdir.into());
        self
    }

    pub fn with_node_shape(mut self, shape: Option<String>) -> Self {
        self.node_shape = shape;
        self
    }
}

/// Format a byte count with a binary magnitude suffix
///
/// **Public** - shared by labels, summaries and JSON output
///
/// Sizes of at least 1 MiB are shown in MB, at least 1 KiB in KB, anything
/// smaller in raw bytes. Quotients are rounded to two decimals with
/// trailing zeros dropped, so 2560 bytes is "2.5KB" and 2048 is "2KB".
pub fn format_size(bytes: u64) -> String {
    if bytes >= MIB {
        format!("{}MB", trim_decimal(bytes as f64 / MIB as f64))
    } else if bytes >= KIB {
        format!("{}KB", trim_decimal(bytes as f64 / KIB as f64))
    } else {
        format!("{}B", bytes)
    }
}

fn trim_decimal(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Human-readable node label, e.g. `[42/1.5MB] someFunction`
pub fn node_label(node: &SymbolNode) -> String {
    format!(
        "[{}/{}] {}",
        node.total_count,
        format_size(node.total_size),
        node.name
    )
}

/// Stable DOT identifier for a node index
pub fn node_id(index: usize) -> String {
    format!("n{}", index)
}

/// Escape text for use inside a double-quoted DOT string
pub fn escape_dot(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Generate a DOT digraph from an aggregated graph
///
/// **Public** - main entry point for graph emission
///
/// # Arguments
/// * `graph` - Aggregated call-path graph
/// * `config` - Optional output settings (defaults used when `None`)
///
/// # Returns
/// DOT text with nodes in index order and edges in first-seen order.
/// An empty graph still yields a valid, empty digraph.
pub fn generate_dot(graph: &SymbolGraph, config: Option<&DotConfig>) -> String {
    let config = config.cloned().unwrap_or_default();
    info!(
        "Generating DOT graph with {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    let mut dot = String::new();

    // Header
    dot.push_str(&format!("digraph \"{}\" {{\n", escape_dot(&config.name)));

    if let Some(rankdir) = &config.rankdir {
        dot.push_str(&format!("    rankdir=\"{}\";\n", escape_dot(rankdir)));
    }
    if let Some(shape) = &config.node_shape {
        dot.push_str(&format!("    node [shape=\"{}\"];\n", escape_dot(shape)));
    }

    for node in graph.nodes() {
        dot.push_str(&format!(
            "    {} [label=\"{}\"];\n",
            node_id(node.index),
            escape_dot(&node_label(node))
        ));
    }

    for edge in graph.edges() {
        dot.push_str(&format!(
            "    {} -> {};\n",
            node_id(edge.from),
            node_id(edge.to)
        ));
    }

    dot.push_str("}\n");
    dot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_decimal() {
        assert_eq!(trim_decimal(2.5), "2.5");
        assert_eq!(trim_decimal(2.0), "2");
        assert_eq!(trim_decimal(10.0), "10");
        assert_eq!(trim_decimal(1.126), "1.13");
        assert_eq!(trim_decimal(0.001), "0");
    }

    #[test]
    fn test_escape_dot() {
        assert_eq!(escape_dot(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(escape_dot(r"a\b"), r"a\\b");
        assert_eq!(escape_dot("a\r\nb"), r"a\nb");
        assert_eq!(escape_dot("operator<<"), "operator<<");
    }

    #[test]
    fn test_node_id() {
        assert_eq!(node_id(0), "n0");
        assert_eq!(node_id(42), "n42");
    }
}
