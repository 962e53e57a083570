use crate::graph::format_size;
use crate::output::read_profile;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::Result;
use std::path::Path;

/// Validate a profile JSON file
pub fn validate_profile_file(file_path: &Path) -> Result<()> {
    println!("Validating profile: {}", file_path.display());

    let profile = read_profile(file_path)?;

    if profile.version != SCHEMA_VERSION {
        anyhow::bail!(
            "Unsupported profile version {} (expected {})",
            profile.version,
            SCHEMA_VERSION
        );
    }

    if let Some(edge) = profile
        .edges
        .iter()
        .find(|e| e.from >= profile.nodes.len() || e.to >= profile.nodes.len())
    {
        anyhow::bail!("Edge {} -> {} points outside the node list", edge.from, edge.to);
    }

    println!("✓ Valid profile JSON");
    println!("  Version: {}", profile.version);
    println!("  Source: {}", profile.source);
    println!("  Records: {}", profile.totals.records);
    println!("  Allocations: {}", profile.totals.allocations);
    println!("  Total Size: {}", format_size(profile.totals.bytes));
    println!("  Nodes: {}", profile.nodes.len());
    println!("  Edges: {}", profile.edges.len());

    Ok(())
}

/// Display version information
pub fn display_version() {
    println!("Alloc Graph v{}", env!("CARGO_PKG_VERSION"));
    println!("Profile Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Turns kernel allocation dumps into Graphviz call graphs.");
}
