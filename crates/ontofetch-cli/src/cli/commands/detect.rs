//! `ontofetch detect <path>` – identify the serialization of a local file.

use anyhow::Result;
use ontofetch_core::acquire;
use std::path::Path;

pub fn run_detect(path: &Path) -> Result<()> {
    let got = acquire::acquire_local(path)?;
    println!(
        "{}: {} ({} statements, canonical name {})",
        path.display(),
        got.format.name,
        got.format.statements,
        got.canonical_filename()
    );
    Ok(())
}
