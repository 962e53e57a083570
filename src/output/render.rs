//! Hand DOT text to the external Graphviz renderer.
//!
//! The description is written to a temporary `.dot` file, the renderer is
//! run as `<program> -T<format> <file> -o <image>`, and the temporary file
//! is removed afterwards whether or not rendering succeeded.

use super::{ensure_parent_dir, validate_path};
use crate::utils::config::{DEFAULT_IMAGE_FORMAT, DEFAULT_RENDERER};
use crate::utils::error::RenderError;
use log::{debug, info};
use std::io::Write;
use std::path::Path;
use std::process::Command;

/// Renderer configuration
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Renderer executable, looked up on PATH
    pub program: String,
    /// Output format passed as `-T<format>`
    pub format: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_RENDERER.to_string(),
            format: DEFAULT_IMAGE_FORMAT.to_string(),
        }
    }
}

impl RendererConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }
}

/// Render DOT text to an image file
///
/// **Public** - main entry point for image output
///
/// # Errors
/// * `RenderError::Output` - Output path is invalid
/// * `RenderError::IoError` - Temporary file could not be written
/// * `RenderError::SpawnFailed` - Renderer is not installed or not executable
/// * `RenderError::RendererFailed` - Renderer exited unsuccessfully
pub fn render_image(
    dot: &str,
    output_path: impl AsRef<Path>,
    config: &RendererConfig,
) -> Result<(), RenderError> {
    let output_path = output_path.as_ref();

    info!(
        "Rendering {} image with '{}' to: {}",
        config.format,
        config.program,
        output_path.display()
    );

    validate_path(output_path)?;
    ensure_parent_dir(output_path)?;

    // Removed on drop, including on the error paths below
    let mut graph_file = tempfile::Builder::new()
        .prefix("alloc-graph-")
        .suffix(".dot")
        .tempfile()?;
    graph_file.write_all(dot.as_bytes())?;
    graph_file.flush()?;

    debug!("Intermediate graph file: {}", graph_file.path().display());

    let result = Command::new(&config.program)
        .arg(format!("-T{}", config.format))
        .arg(graph_file.path())
        .arg("-o")
        .arg(output_path)
        .output()
        .map_err(|source| RenderError::SpawnFailed {
            program: config.program.clone(),
            source,
        })?;

    if !result.status.success() {
        return Err(RenderError::RendererFailed {
            program: config.program.clone(),
            status: result.status,
            stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
        });
    }

    graph_file.close()?;

    info!("Image rendered successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRAPH: &str = "digraph \"allocations\" {\n}\n";

    #[test]
    fn test_missing_renderer() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = RendererConfig::new().with_program("alloc-graph-no-such-renderer");

        let result = render_image(GRAPH, temp_dir.path().join("out.png"), &config);
        assert!(matches!(result, Err(RenderError::SpawnFailed { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_renderer() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = RendererConfig::new().with_program("false");

        let result = render_image(GRAPH, temp_dir.path().join("out.png"), &config);
        assert!(matches!(result, Err(RenderError::RendererFailed { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_renderer() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = RendererConfig::new().with_program("true").with_format("svg");

        assert!(render_image(GRAPH, temp_dir.path().join("nested/out.svg"), &config).is_ok());
        assert!(temp_dir.path().join("nested").is_dir());
    }

    #[test]
    fn test_invalid_output_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = render_image(GRAPH, temp_dir.path(), &RendererConfig::default());
        assert!(matches!(result, Err(RenderError::Output(_))));
    }
}
