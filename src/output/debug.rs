//! Raw page dump for diagnosing extraction failures

use crate::output::traits::{ensure_parent_dir, OutputResult};
use std::path::Path;

/// Writes the raw markup of a page that yielded no records
///
/// Missing parent directories are created and an existing file is replaced.
pub fn write_debug_page(path: &Path, content: &str) -> OutputResult<()> {
    ensure_parent_dir(path)?;
    std::fs::write(path, content)?;

    tracing::info!("Saved raw page to {}", path.display());
    Ok(())
}
