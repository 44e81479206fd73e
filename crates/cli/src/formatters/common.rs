//! Common utilities for formatters.
//!
//! Responsibilities:
//! - Shared cell rendering (status codes, elapsed time).
//! - Atomic file writing and the stdout/file switch.
//!
//! Does NOT handle:
//! - Format-specific logic (lives in respective formatter modules).

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Placeholder for a probe that never received an HTTP response.
pub const NO_STATUS: &str = "-";

/// Render a status code, showing transport failures (status 0) as `-`.
pub fn format_status(status: u16) -> String {
    if status == 0 {
        NO_STATUS.to_string()
    } else {
        status.to_string()
    }
}

/// Render an elapsed time as whole milliseconds, e.g. `42ms`.
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{}ms", elapsed.as_millis())
}

/// Write formatted output to a file or stdout.
///
/// With a file path the write is atomic and a confirmation goes to stderr,
/// keeping stdout empty for pipelines.
pub fn output_result(
    output: &str,
    format: crate::formatters::OutputFormat,
    output_file: Option<&PathBuf>,
) -> Result<()> {
    if let Some(path) = output_file {
        write_to_file(output, path)
            .with_context(|| format!("Failed to write output to {}", path.display()))?;
        eprintln!(
            "Results written to {} ({:?} format)",
            path.display(),
            format
        );
    } else {
        print!("{}", output);
    }
    Ok(())
}

/// Write formatted output to a file atomically.
///
/// Creates parent directories if needed, writes to a temp file in the same
/// directory, then renames it over `path`.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    use std::fs;
    use std::io::Write;
    use tempfile::NamedTempFile;

    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    if parent_dir != Path::new(".") {
        fs::create_dir_all(parent_dir)
            .with_context(|| format!("Failed to create directory: {}", parent_dir.display()))?;
    }

    let mut temp_file = NamedTempFile::new_in(parent_dir)
        .with_context(|| format!("Failed to create temp file in: {}", parent_dir.display()))?;

    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write to temp file")?;
    temp_file.flush().context("Failed to flush temp file")?;

    temp_file
        .persist(path)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    Ok(())
}
