//! `ontofetch fetch <uri>` – download with format fallback, then detect.

use anyhow::Result;
use ontofetch_core::acquire::{self, AcquireError, AcquiredOntology};
use ontofetch_core::catalog;
use ontofetch_core::checksum;
use ontofetch_core::config::FetchConfig;
use ontofetch_core::negotiate::OrchestratorError;
use ontofetch_core::transport::CurlTransport;
use serde_json::{json, Value};
use std::path::Path;

pub fn run_fetch(
    cfg: &FetchConfig,
    uri: &str,
    work_dir: &Path,
    formats: &[String],
    json: bool,
) -> Result<()> {
    let full = cfg.catalog()?;
    let candidates = if formats.is_empty() {
        full
    } else {
        catalog::select(&full, formats)?
    };

    let transport = CurlTransport::new(cfg.transport_options());
    let got = match acquire::acquire_remote(
        &transport,
        uri,
        work_dir,
        candidates,
        cfg.max_redirects,
    ) {
        Ok(got) => got,
        Err(err) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&failure_json(uri, &err))?);
            }
            return Err(err.into());
        }
    };
    let digest = checksum::sha256_path(&got.path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&got)?);
    } else {
        print_summary(uri, &got, &digest);
    }
    Ok(())
}

/// Machine-readable form of a failed fetch. Download failures keep one
/// structured entry per candidate.
fn failure_json(uri: &str, err: &AcquireError) -> Value {
    match err {
        AcquireError::Download(OrchestratorError::AllCandidatesFailed(failures)) => json!({
            "uri": uri,
            "succeeded": false,
            "failures": failures,
        }),
        other => json!({
            "uri": uri,
            "succeeded": false,
            "error": format!("{:#}", other),
        }),
    }
}

fn print_summary(uri: &str, got: &AcquiredOntology, digest: &str) {
    if let Some(download) = &got.download {
        if let Some(chosen) = download.chosen() {
            println!(
                "Downloaded {} as {} ({}) after {} attempt(s)",
                uri,
                chosen.name,
                chosen.accept,
                download.attempts()
            );
        }
        for failure in download.failures() {
            println!("  skipped {}: {}", failure.candidate, failure.error);
        }
    }
    println!(
        "Detected serialization: {} ({}, {} statements)",
        got.format.name,
        got.canonical_filename(),
        got.format.statements
    );
    println!("Saved to: {}", got.path.display());
    println!("SHA-256: {}", digest);
}
