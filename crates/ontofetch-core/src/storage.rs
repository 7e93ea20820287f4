//! Local byte-stream copy.
//!
//! Destinations are replaced, never appended to. The file handle is scoped to
//! the call and closed on every path. Writes are not atomic: a failure part
//! way through leaves a truncated file, which format detection rejects.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

/// Copies `reader` into `dest`, truncating any existing file.
/// Creates missing parent directories. Returns the number of bytes written.
pub fn copy_to_path<R: Read>(mut reader: R, dest: &Path) -> Result<u64> {
    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    let file = File::create(dest)
        .with_context(|| format!("failed to create {}", dest.display()))?;
    let mut out = BufWriter::new(file);
    let written = io::copy(&mut reader, &mut out)
        .with_context(|| format!("failed to write {}", dest.display()))?;
    out.flush()
        .with_context(|| format!("failed to flush {}", dest.display()))?;
    tracing::debug!(path = %dest.display(), bytes = written, "copied stream to file");
    Ok(written)
}
