//! Alloc Graph
//!
//! Aggregates kernel allocation dumps into call graphs. Each `Alloc` block
//! of a dump carries a backtrace, an allocation count and a byte total;
//! backtraces sharing a call path are merged into one node, and the result
//! is emitted as Graphviz DOT.
//!
//! ## Getting Started
//!
//! ```bash
//! alloc-graph render --input serial.txt --image allocations.png
//! ```
//!
//! As a library:
//!
//! ```
//! let dump = "Alloc {\nBacktrace [0x1=\\main=\\, ]\nNum 2\nSz 64\n}\n";
//! let dot = alloc_graph::dump_to_dot(dump);
//! assert!(dot.contains("[2/64B] main"));
//! ```

pub mod aggregator;
pub mod commands;
pub mod graph;
pub mod output;
pub mod parser;
pub mod utils;

/// Parse, aggregate and emit a dump with default settings
pub fn dump_to_dot(text: &str) -> String {
    let graph = commands::build_graph(text, &parser::ExtractorConfig::default());
    graph::generate_dot(&graph, None)
}
