//! Alloc Graph CLI
//!
//! Turns kernel allocation dumps into Graphviz call graphs.

use alloc_graph::commands::{
    display_version, execute_render, validate_args, validate_profile_file, RenderArgs,
};
use alloc_graph::graph::DotConfig;
use alloc_graph::output::RendererConfig;
use alloc_graph::parser::{ExtractorConfig, ShortBacktrace};
use alloc_graph::utils::config::{
    DEFAULT_IMAGE_FORMAT, DEFAULT_RENDERER, DEFAULT_TOP_NODES, MAX_BACKTRACE_FRAMES,
};
use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

/// Alloc Graph - call graphs from allocation dumps
#[derive(Parser, Debug)]
#[command(name = "alloc-graph")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a call graph from an allocation dump
    Render {
        /// Allocation dump to read (stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output path for the DOT description
        #[arg(short, long)]
        dot: Option<PathBuf>,

        /// Output path for a rendered image
        #[arg(long)]
        image: Option<PathBuf>,

        /// Image format passed to the renderer
        #[arg(short, long, default_value = DEFAULT_IMAGE_FORMAT)]
        format: String,

        /// Graphviz program used for rendering
        #[arg(long, default_value = DEFAULT_RENDERER, env = "ALLOC_GRAPH_RENDERER")]
        renderer: String,

        /// Output path for a JSON profile
        #[arg(long)]
        json: Option<PathBuf>,

        /// Frames kept per backtrace
        #[arg(long, default_value_t = MAX_BACKTRACE_FRAMES)]
        max_frames: usize,

        /// Drop backtraces shorter than --max-frames instead of using them as is
        #[arg(long)]
        skip_short: bool,

        /// Keep zero-address padding frames
        #[arg(long)]
        keep_null_frames: bool,

        /// Graph rankdir attribute (e.g. LR)
        #[arg(long)]
        rankdir: Option<String>,

        /// Number of hot paths in the summary and profile
        #[arg(long, default_value_t = DEFAULT_TOP_NODES)]
        top: usize,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Validate a profile JSON file
    Validate {
        /// Path to profile JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Render {
            input,
            dot,
            image,
            format,
            renderer,
            json,
            max_frames,
            skip_short,
            keep_null_frames,
            rankdir,
            top,
            summary,
        } => {
            let short_backtrace = if skip_short {
                ShortBacktrace::Skip
            } else {
                ShortBacktrace::Truncate
            };

            let extractor = ExtractorConfig::new()
                .with_max_frames(max_frames)
                .with_short_backtrace(short_backtrace)
                .with_drop_null_frames(!keep_null_frames);

            let mut dot_config = DotConfig::new();
            if let Some(rankdir) = rankdir {
                dot_config = dot_config.with_rankdir(rankdir);
            }

            let args = RenderArgs {
                input,
                output_dot: dot,
                output_image: image,
                output_json: json,
                extractor,
                dot_config,
                renderer: RendererConfig::new()
                    .with_program(renderer)
                    .with_format(format),
                top_nodes: top,
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            let dot_text = execute_render(&args)?;

            if !args.has_file_output() && !args.print_summary {
                print!("{}", dot_text);
            }
        }

        Commands::Validate { file } => {
            validate_profile_file(&file)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
