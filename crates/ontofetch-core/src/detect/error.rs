//! Detection failures.

use serde::Serialize;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why one decoder rejected the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodeFailure {
    pub format: String,
    pub reason: String,
}

#[derive(Debug, Error)]
pub enum DetectionError {
    /// Every decoder failed. The file is left in place for inspection.
    #[error(
        "{} does not parse as any known serialization ({})",
        path.display(),
        summarize(attempts)
    )]
    NoMatchingFormat {
        path: PathBuf,
        attempts: Vec<DecodeFailure>,
    },
    #[error("cannot open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn summarize(attempts: &[DecodeFailure]) -> String {
    if attempts.is_empty() {
        return "no decoders configured".to_string();
    }
    attempts
        .iter()
        .map(|a| format!("{}: {}", a.format, a.reason))
        .collect::<Vec<_>>()
        .join("; ")
}
