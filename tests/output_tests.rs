use alloc_graph::aggregator::SymbolGraph;
use alloc_graph::output::{read_profile, to_profile, validate_path, write_dot, write_profile};
use alloc_graph::parser::{AllocationRecord, Frame};
use std::path::Path;
use tempfile::NamedTempFile;

fn create_test_graph() -> SymbolGraph {
    SymbolGraph::from_records(vec![
        AllocationRecord::new(vec![Frame::new("0x1", "main"), Frame::new("0x2", "foo")], 5, 2048),
        AllocationRecord::new(vec![Frame::new("0x1", "main"), Frame::new("0x3", "bar")], 3, 512),
    ])
}

#[test]
fn test_write_and_read_profile() {
    let profile = to_profile(&create_test_graph(), "serial.txt", 20);
    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    // Write
    write_profile(&profile, path).unwrap();

    // Read back
    let loaded = read_profile(path).unwrap();

    assert_eq!(loaded.version, profile.version);
    assert_eq!(loaded.source, "serial.txt");
    assert_eq!(loaded.totals.bytes, 2560);
    assert_eq!(loaded.nodes.len(), 3);
    assert_eq!(loaded.nodes[2].path_key, "mainbar");
    assert_eq!(loaded.edges.len(), 2);
}

#[test]
fn test_validate_output_path_empty() {
    let result = validate_path(Path::new(""));
    assert!(result.is_err());
}

#[test]
fn test_validate_output_path_directory() {
    // Try to write to a directory path
    let temp_dir = tempfile::tempdir().unwrap();
    let result = validate_path(temp_dir.path());
    assert!(result.is_err());
}

#[test]
fn test_write_creates_parent_dirs() {
    let temp_dir = tempfile::tempdir().unwrap();
    let nested_path = temp_dir.path().join("nested/dirs/profile.json");

    let profile = to_profile(&create_test_graph(), "stdin", 5);
    write_profile(&profile, &nested_path).unwrap();

    assert!(nested_path.exists());
}

#[test]
fn test_write_dot_creates_parent_dirs() {
    let temp_dir = tempfile::tempdir().unwrap();
    let nested_path = temp_dir.path().join("nested/dirs/allocations.dot");

    write_dot("digraph \"allocations\" {\n}\n", &nested_path).unwrap();

    assert!(nested_path.exists());
    assert_eq!(
        std::fs::read_to_string(&nested_path).unwrap(),
        "digraph \"allocations\" {\n}\n"
    );
}

#[test]
fn test_read_missing_profile() {
    assert!(read_profile("/nonexistent/profile.json").is_err());
}
