//! Serialization catalog used for content negotiation.
//!
//! Each entry pairs an `Accept` token with a canonical short name and a file
//! extension. Catalog order is negotiation priority: the first entry is asked
//! for first.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One acceptable representation of a remote resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializationCandidate {
    /// Media type sent verbatim as the `Accept` header (e.g. `application/rdf+xml`).
    pub accept: String,
    /// Canonical short name (e.g. `RDF/XML`, `TTL`).
    pub name: String,
    /// File extension without the dot (e.g. `xml`).
    pub extension: String,
}

impl SerializationCandidate {
    pub fn new(accept: &str, name: &str, extension: &str) -> Self {
        Self {
            accept: accept.to_string(),
            name: name.to_string(),
            extension: extension.to_string(),
        }
    }

    /// True if `label` names this entry by canonical name or extension (case-insensitive).
    pub fn matches_label(&self, label: &str) -> bool {
        let label = label.trim();
        self.name.eq_ignore_ascii_case(label) || self.extension.eq_ignore_ascii_case(label)
    }
}

/// Built-in catalog, most preferred first.
pub fn default_catalog() -> Vec<SerializationCandidate> {
    vec![
        SerializationCandidate::new("application/rdf+xml", "RDF/XML", "xml"),
        SerializationCandidate::new("text/turtle", "TTL", "ttl"),
        SerializationCandidate::new("text/n3", "N3", "n3"),
        SerializationCandidate::new("application/n-triples", "N-Triples", "nt"),
        SerializationCandidate::new("application/ld+json", "JSON-LD", "jsonld"),
        SerializationCandidate::new("text/html", "HTML", "html"),
    ]
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unknown serialization {0:?}; see `ontofetch formats`")]
    UnknownFormat(String),
}

/// Restricts `catalog` to the entries named in `labels`, keeping catalog order.
///
/// Labels match on canonical name or extension. An unknown label is an error
/// rather than being silently ignored.
pub fn select(
    catalog: &[SerializationCandidate],
    labels: &[String],
) -> Result<Vec<SerializationCandidate>, CatalogError> {
    if let Some(unknown) = labels
        .iter()
        .find(|l| !catalog.iter().any(|c| c.matches_label(l)))
    {
        return Err(CatalogError::UnknownFormat(unknown.clone()));
    }
    Ok(catalog
        .iter()
        .filter(|c| labels.iter().any(|l| c.matches_label(l)))
        .cloned()
        .collect())
}
