//! JSON profile output.
//!
//! A profile is a self-contained snapshot of one aggregation run: every
//! node and edge plus the hot node ranking. Schema is versioned to allow
//! future evolution.

use super::{ensure_parent_dir, validate_path};
use crate::aggregator::metrics::{calculate_hot_nodes, calculate_totals};
use crate::aggregator::symbol_graph::SymbolGraph;
use crate::graph::dot::format_size;
use crate::utils::config::SCHEMA_VERSION;
use crate::utils::error::OutputError;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Top-level profile structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphProfile {
    /// Schema version for compatibility checking
    pub version: String,

    /// Where the dump came from (file path or "stdin")
    pub source: String,

    pub totals: ProfileTotals,

    pub nodes: Vec<ProfileNode>,

    pub edges: Vec<ProfileEdge>,

    /// Largest call paths, by bytes
    pub hot_nodes: Vec<ProfileHotNode>,

    /// Timestamp when profile was generated
    pub generated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileTotals {
    pub records: usize,
    pub allocations: u64,
    pub bytes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileNode {
    pub index: usize,
    pub name: String,
    pub path_key: String,
    pub depth: usize,
    pub count: u64,
    pub size: u64,
    pub size_label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileEdge {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileHotNode {
    pub index: usize,
    pub path_key: String,
    pub size: u64,
    pub percentage: f64,
}

/// Build a profile from an aggregated graph
///
/// **Public** - used by commands to create final output
pub fn to_profile(graph: &SymbolGraph, source: &str, top_n: usize) -> GraphProfile {
    use chrono::Utc;

    let totals = calculate_totals(graph);

    let nodes = graph
        .nodes()
        .iter()
        .map(|node| ProfileNode {
            index: node.index,
            name: node.name.clone(),
            path_key: node.path_key(),
            depth: node.depth(),
            count: node.total_count,
            size: node.total_size,
            size_label: format_size(node.total_size),
        })
        .collect();

    let edges = graph
        .edges()
        .iter()
        .map(|edge| ProfileEdge {
            from: edge.from,
            to: edge.to,
        })
        .collect();

    let hot_nodes = calculate_hot_nodes(graph, top_n)
        .into_iter()
        .map(|hot| ProfileHotNode {
            index: hot.index,
            path_key: hot.path_key,
            size: hot.size,
            percentage: hot.percentage,
        })
        .collect();

    GraphProfile {
        version: SCHEMA_VERSION.to_string(),
        source: source.to_string(),
        totals: ProfileTotals {
            records: totals.record_count,
            allocations: totals.total_count,
            bytes: totals.total_size,
        },
        nodes,
        edges,
        hot_nodes,
        generated_at: Utc::now().to_rfc3339(),
    }
}

/// Write a profile to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_profile(profile: &GraphProfile, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing profile to: {}", output_path.display());

    validate_path(output_path)?;
    ensure_parent_dir(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, profile).map_err(OutputError::SerializationFailed)?;

    info!(
        "Profile written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Read a profile from a JSON file
///
/// **Public** - useful for validation and testing
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_profile(input_path: impl AsRef<Path>) -> Result<GraphProfile, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading profile from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;

    let profile: GraphProfile =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Profile loaded: version {}, {} nodes",
        profile.version,
        profile.nodes.len()
    );

    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::{AllocationRecord, Frame};
    use tempfile::NamedTempFile;

    fn test_graph() -> SymbolGraph {
        SymbolGraph::from_records(vec![
            AllocationRecord::new(vec![Frame::new("0x1", "main"), Frame::new("0x2", "foo")], 5, 2048),
            AllocationRecord::new(vec![Frame::new("0x1", "main"), Frame::new("0x3", "bar")], 3, 512),
        ])
    }

    #[test]
    fn test_to_profile() {
        let profile = to_profile(&test_graph(), "dump.txt", 2);

        assert_eq!(profile.version, SCHEMA_VERSION);
        assert_eq!(profile.source, "dump.txt");
        assert_eq!(profile.totals.records, 2);
        assert_eq!(profile.totals.allocations, 8);
        assert_eq!(profile.totals.bytes, 2560);
        assert_eq!(profile.nodes.len(), 3);
        assert_eq!(profile.nodes[0].size_label, "2.5KB");
        assert_eq!(profile.edges.len(), 2);
        assert_eq!(profile.hot_nodes.len(), 2);
        assert_eq!(profile.hot_nodes[1].path_key, "mainfoo");
    }

    #[test]
    fn test_write_and_read_profile() {
        let profile = to_profile(&test_graph(), "stdin", 10);
        let temp_file = NamedTempFile::new().unwrap();

        write_profile(&profile, temp_file.path()).unwrap();
        let loaded = read_profile(temp_file.path()).unwrap();

        assert_eq!(loaded.version, profile.version);
        assert_eq!(loaded.nodes.len(), profile.nodes.len());
        assert_eq!(loaded.generated_at, profile.generated_at);
    }

    #[test]
    fn test_read_profile_rejects_garbage() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), "not json").unwrap();
        assert!(matches!(
            read_profile(temp_file.path()),
            Err(OutputError::SerializationFailed(_))
        ));
    }
}
