//! Render command implementation.
//!
//! The render command:
//! 1. Reads the allocation dump (file or stdin)
//! 2. Extracts allocation records
//! 3. Aggregates them into a call-path graph
//! 4. Emits DOT and writes the requested outputs

use crate::aggregator::{calculate_hot_nodes, calculate_totals, SymbolGraph};
use crate::graph::{generate_dot, generate_text_summary, DotConfig};
use crate::output::{render_image, to_profile, write_dot, write_profile, RendererConfig};
use crate::parser::{extract_records, ExtractorConfig};
use crate::utils::config::{DEFAULT_TOP_NODES, MAX_CONFIGURABLE_FRAMES};
use anyhow::{Context, Result};
use log::{debug, info};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Arguments for the render command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct RenderArgs {
    /// Allocation dump to read; stdin when `None`
    pub input: Option<PathBuf>,

    /// Output path for the DOT description
    pub output_dot: Option<PathBuf>,

    /// Output path for the rendered image
    pub output_image: Option<PathBuf>,

    /// Output path for the JSON profile
    pub output_json: Option<PathBuf>,

    pub extractor: ExtractorConfig,

    pub dot_config: DotConfig,

    pub renderer: RendererConfig,

    /// Number of hot nodes in the summary and JSON profile
    pub top_nodes: usize,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for RenderArgs {
    fn default() -> Self {
        Self {
            input: None,
            output_dot: None,
            output_image: None,
            output_json: None,
            extractor: ExtractorConfig::default(),
            dot_config: DotConfig::default(),
            renderer: RendererConfig::default(),
            top_nodes: DEFAULT_TOP_NODES,
            print_summary: false,
        }
    }
}

impl RenderArgs {
    /// Whether any file output was requested
    pub fn has_file_output(&self) -> bool {
        self.output_dot.is_some() || self.output_image.is_some() || self.output_json.is_some()
    }
}

/// Parse and aggregate a dump in one go
///
/// **Public** - the whole in-memory pipeline short of emission
pub fn build_graph(text: &str, extractor: &ExtractorConfig) -> SymbolGraph {
    let records = extract_records(text, extractor);
    SymbolGraph::from_records(records)
}

/// Execute the render command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The generated DOT text. main.rs prints it when no file output was
/// requested.
///
/// # Errors
/// * Input read failures
/// * File write errors
/// * Renderer failures
pub fn execute_render(args: &RenderArgs) -> Result<String> {
    let start_time = Instant::now();

    // Step 1: Read input
    info!("Step 1/4: Reading allocation dump...");
    let (text, source) = read_input(args.input.as_deref())?;
    debug!("Read {} bytes from {}", text.len(), source);

    // Step 2: Extract records
    info!("Step 2/4: Extracting allocation records...");
    let records = extract_records(&text, &args.extractor);

    // Step 3: Aggregate
    info!("Step 3/4: Aggregating {} records...", records.len());
    let graph = SymbolGraph::from_records(records);

    let totals = calculate_totals(&graph);
    info!("Totals: {}", totals.summary());

    // Step 4: Emit and write outputs
    info!("Step 4/4: Writing outputs...");
    let dot = generate_dot(&graph, Some(&args.dot_config));

    if let Some(dot_path) = &args.output_dot {
        write_dot(&dot, dot_path).context("Failed to write DOT graph")?;
        info!("✓ DOT graph written to: {}", dot_path.display());
    }

    if let Some(image_path) = &args.output_image {
        render_image(&dot, image_path, &args.renderer).context("Failed to render graph image")?;
        info!("✓ Image written to: {}", image_path.display());
    }

    if let Some(json_path) = &args.output_json {
        let profile = to_profile(&graph, &source, args.top_nodes);
        write_profile(&profile, json_path).context("Failed to write profile JSON")?;
        info!("✓ Profile written to: {}", json_path.display());
    }

    if args.print_summary {
        let hot_nodes = calculate_hot_nodes(&graph, args.top_nodes);
        println!("\n{}", "=".repeat(80));
        println!("ALLOCATION SUMMARY");
        println!("{}", "=".repeat(80));
        println!("Source: {}", source);
        println!("\n{}", generate_text_summary(&hot_nodes, &totals, args.top_nodes));
        println!("{}", "=".repeat(80));
    }

    let elapsed = start_time.elapsed();
    info!("Render completed in {:.2}s", elapsed.as_secs_f64());

    Ok(dot)
}

/// Read the dump from a file, or stdin when no path is given
///
/// **Private** - internal helper for execute_render
///
/// # Returns
/// The text and a label naming its source
fn read_input(path: Option<&Path>) -> Result<(String, String)> {
    match path {
        Some(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("Failed to read input file {}", path.display()))?;
            // Serial captures may carry stray non-UTF-8 bytes
            let text = String::from_utf8_lossy(&bytes).into_owned();
            Ok((text, path.display().to_string()))
        }
        None => {
            let mut bytes = Vec::new();
            std::io::stdin()
                .read_to_end(&mut bytes)
                .context("Failed to read allocation dump from stdin")?;
            Ok((String::from_utf8_lossy(&bytes).into_owned(), "stdin".to_string()))
        }
    }
}

/// Validate render arguments
///
/// **Public** - can be called before execute_render for early validation
pub fn validate_args(args: &RenderArgs) -> Result<()> {
    if args.extractor.max_frames == 0 {
        anyhow::bail!("max_frames must be greater than 0");
    }

    if args.extractor.max_frames > MAX_CONFIGURABLE_FRAMES {
        anyhow::bail!("max_frames is too large (max {})", MAX_CONFIGURABLE_FRAMES);
    }

    if args.top_nodes == 0 {
        anyhow::bail!("top must be greater than 0");
    }

    if args.top_nodes > 1000 {
        anyhow::bail!("top is too large (max 1000)");
    }

    if let Some(input) = &args.input {
        if !input.is_file() {
            anyhow::bail!("Input file does not exist: {}", input.display());
        }
    }

    if args.output_image.is_some() {
        let format = &args.renderer.format;
        if format.is_empty() || !format.chars().all(|c| c.is_ascii_alphanumeric() || c == ':') {
            anyhow::bail!("Invalid image format: '{}'", format);
        }

        if args.renderer.program.is_empty() {
            anyhow::bail!("Renderer program cannot be empty");
        }
    }

    Ok(())
}
