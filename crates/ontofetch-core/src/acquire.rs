//! Get an ontology onto local disk in a known serialization.
//!
//! Remote sources are downloaded with format fallback into the work directory
//! and then detected; local files are detected in place. Either way the caller
//! ends up with a path plus the serialization that actually parsed, ready for a
//! model loader.

use crate::catalog::SerializationCandidate;
use crate::detect::{self, DetectedFormat, DetectionError};
use crate::negotiate::{self, FetchRequest, FetchResult, OrchestratorError, RequestError};
use crate::transport::Transport;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name used for downloaded documents inside the work directory.
pub const DOWNLOAD_NAME: &str = "Ontology";

#[derive(Debug, Clone)]
pub enum OntologySource {
    Remote(String),
    Local(PathBuf),
}

/// A local document with its detected serialization.
#[derive(Debug, Clone, Serialize)]
pub struct AcquiredOntology {
    pub path: PathBuf,
    pub format: DetectedFormat,
    /// Present when the document was downloaded.
    pub download: Option<FetchResult>,
}

impl AcquiredOntology {
    pub fn canonical_filename(&self) -> String {
        self.format.canonical_filename()
    }
}

#[derive(Debug, Error)]
pub enum AcquireError {
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Download(#[from] OrchestratorError),
    #[error(transparent)]
    Detection(#[from] DetectionError),
}

/// Downloads (if remote) and detects the serialization of `source`.
pub fn acquire<T: Transport + ?Sized>(
    transport: &T,
    source: &OntologySource,
    work_dir: &Path,
    candidates: Vec<SerializationCandidate>,
    max_redirects: u32,
) -> Result<AcquiredOntology, AcquireError> {
    match source {
        OntologySource::Remote(uri) => {
            acquire_remote(transport, uri, work_dir, candidates, max_redirects)
        }
        OntologySource::Local(path) => acquire_local(path),
    }
}

pub fn acquire_remote<T: Transport + ?Sized>(
    transport: &T,
    uri: &str,
    work_dir: &Path,
    candidates: Vec<SerializationCandidate>,
    max_redirects: u32,
) -> Result<AcquiredOntology, AcquireError> {
    let request = FetchRequest::new(uri, work_dir.join(DOWNLOAD_NAME), candidates)?;
    let download = negotiate::download_with_fallback(transport, &request, max_redirects)
        .into_result()?;
    let format = detect::detect_with_base(
        download.destination(),
        &detect::default_decoders(),
        Some(request.source().as_str()),
    )?;
    if let Some(chosen) = download.chosen() {
        if chosen.name != format.name {
            tracing::info!(
                requested = %chosen.name,
                detected = %format.name,
                "served serialization differs from the negotiated one"
            );
        }
    }
    Ok(AcquiredOntology {
        path: download.destination().to_path_buf(),
        format,
        download: Some(download),
    })
}

pub fn acquire_local(path: &Path) -> Result<AcquiredOntology, AcquireError> {
    let format = detect::detect(path, &detect::default_decoders())?;
    Ok(AcquiredOntology {
        path: path.to_path_buf(),
        format,
        download: None,
    })
}
