//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.
//!
//! Parsing, aggregation and DOT emission never fail: malformed records are
//! skipped. Only the I/O collaborators below can return errors.

use thiserror::Error;

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Errors that can occur while handing the graph to the external renderer
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to prepare intermediate graph file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Could not start renderer '{program}': {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Renderer '{program}' exited with {status}: {stderr}")]
    RendererFailed {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error(transparent)]
    Output(#[from] OutputError),
}
