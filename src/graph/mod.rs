//! Graph description output.
//!
//! This module converts an aggregated call-path graph into Graphviz DOT
//! text for an external renderer, plus a plain-text summary.

pub mod dot;
pub mod summary;

// Re-export main types
pub use dot::{format_size, generate_dot, node_label, DotConfig};
pub use summary::generate_text_summary;
