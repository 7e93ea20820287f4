//! Validated input of one download operation.

use crate::catalog::SerializationCandidate;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

/// Caller mistakes caught before any network traffic.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("no serialization candidates given; at least one is required")]
    EmptyCandidates,
    #[error("invalid URI {uri:?}: {source}")]
    InvalidUri {
        uri: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported URI scheme {0:?}; only http and https can be fetched")]
    UnsupportedScheme(String),
}

/// Source URI, destination and ordered candidates. Immutable once built.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    source: Url,
    destination: PathBuf,
    candidates: Vec<SerializationCandidate>,
}

impl FetchRequest {
    /// Validates the request. The candidate list is checked first, so an empty
    /// list is rejected regardless of the URI.
    pub fn new(
        source: &str,
        destination: impl Into<PathBuf>,
        candidates: Vec<SerializationCandidate>,
    ) -> Result<Self, RequestError> {
        if candidates.is_empty() {
            return Err(RequestError::EmptyCandidates);
        }
        let source = parse_http_url(source)?;
        Ok(Self {
            source,
            destination: destination.into(),
            candidates,
        })
    }

    pub fn source(&self) -> &Url {
        &self.source
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn candidates(&self) -> &[SerializationCandidate] {
        &self.candidates
    }
}

/// Parses `uri` and requires an http or https scheme.
pub fn parse_http_url(uri: &str) -> Result<Url, RequestError> {
    let url = Url::parse(uri.trim()).map_err(|source| RequestError::InvalidUri {
        uri: uri.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(RequestError::UnsupportedScheme(other.to_string())),
    }
}
