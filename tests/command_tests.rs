use alloc_graph::commands::{execute_render, validate_args, validate_profile_file, RenderArgs};
use alloc_graph::output::read_profile;
use alloc_graph::parser::ExtractorConfig;
use std::path::PathBuf;

const DUMP: &str = "AllocDump {\n\
Alloc {\n\
Backtrace [0xc0101000=\\main=\\, 0xc0102000=\\foo=\\, 0x0=\\0=\\, ]\n\
Num 5\n\
Sz 2048\n\
}\n\
Alloc {\n\
Backtrace [0xc0101000=\\main=\\, 0xc0103000=\\bar=\\, 0x0=\\0=\\, ]\n\
Num 3\n\
Sz 512\n\
}\n\
}\n";

fn write_dump(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("serial.txt");
    std::fs::write(&path, DUMP).unwrap();
    path
}

#[test]
fn test_execute_render_returns_dot() {
    let temp_dir = tempfile::tempdir().unwrap();
    let args = RenderArgs {
        input: Some(write_dump(&temp_dir)),
        ..Default::default()
    };

    validate_args(&args).unwrap();
    let dot = execute_render(&args).unwrap();

    assert!(dot.contains("n0 [label=\"[8/2.5KB] main\"];"));
    assert!(dot.contains("n1 [label=\"[5/2KB] foo\"];"));
    assert!(dot.contains("n2 [label=\"[3/512B] bar\"];"));
    assert!(dot.contains("n0 -> n1;"));
    assert!(dot.contains("n0 -> n2;"));
    assert!(!dot.contains("] 0\""));
}

#[test]
fn test_execute_render_writes_outputs() {
    let temp_dir = tempfile::tempdir().unwrap();
    let dot_path = temp_dir.path().join("out/allocations.dot");
    let json_path = temp_dir.path().join("out/profile.json");

    let args = RenderArgs {
        input: Some(write_dump(&temp_dir)),
        output_dot: Some(dot_path.clone()),
        output_json: Some(json_path.clone()),
        ..Default::default()
    };

    let dot = execute_render(&args).unwrap();

    assert_eq!(std::fs::read_to_string(&dot_path).unwrap(), dot);

    let profile = read_profile(&json_path).unwrap();
    assert_eq!(profile.nodes.len(), 3);
    assert_eq!(profile.totals.allocations, 8);
    assert!(profile.source.ends_with("serial.txt"));

    validate_profile_file(&json_path).unwrap();
}

#[test]
fn test_execute_render_keeps_null_frames_when_asked() {
    let temp_dir = tempfile::tempdir().unwrap();
    let args = RenderArgs {
        input: Some(write_dump(&temp_dir)),
        extractor: ExtractorConfig::new().with_drop_null_frames(false),
        ..Default::default()
    };

    let dot = execute_render(&args).unwrap();
    assert!(dot.contains("n2 [label=\"[5/2KB] 0\"];"));
}

#[test]
fn test_execute_render_missing_input() {
    let args = RenderArgs {
        input: Some(PathBuf::from("/nonexistent/serial.txt")),
        ..Default::default()
    };
    assert!(execute_render(&args).is_err());
}

#[test]
fn test_validate_profile_rejects_dangling_edge() {
    let temp_dir = tempfile::tempdir().unwrap();
    let json_path = temp_dir.path().join("profile.json");

    let args = RenderArgs {
        input: Some(write_dump(&temp_dir)),
        output_json: Some(json_path.clone()),
        ..Default::default()
    };
    execute_render(&args).unwrap();

    let mut value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    value["edges"][0]["to"] = serde_json::json!(99);
    std::fs::write(&json_path, value.to_string()).unwrap();

    assert!(validate_profile_file(&json_path).is_err());
}
