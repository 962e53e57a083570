//! DOT graph output writer.

use super::{ensure_parent_dir, validate_path};
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write DOT text to a file
///
/// **Public** - main entry point for DOT output
///
/// # Arguments
/// * `dot` - Graph description from `generate_dot`
/// * `output_path` - Path to output file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path is empty or a directory
pub fn write_dot(dot: &str, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing DOT graph to: {}", output_path.display());

    validate_path(output_path)?;
    ensure_parent_dir(output_path)?;

    if let Some(ext) = output_path.extension() {
        if ext != "dot" && ext != "gv" {
            debug!("File does not have a .dot/.gv extension: {}", output_path.display());
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);

    writer
        .write_all(dot.as_bytes())
        .map_err(OutputError::WriteFailed)?;
    writer.flush().map_err(OutputError::WriteFailed)?;

    info!("DOT graph written successfully ({} bytes)", dot.len());

    Ok(())
}
