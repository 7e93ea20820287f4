//! Local serialization detection.
//!
//! Servers often ignore or only partly honor `Accept`, so the requested format
//! says little about what was saved. The file is parsed with each decoder in
//! priority order (RDF/XML, Turtle, N3) and the first full parse wins. The
//! file is reopened for every decoder; a failed parse leaves a reader in an
//! undefined position.

mod error;

pub use error::{DecodeFailure, DetectionError};

use oxrdfio::{RdfFormat, RdfParser};
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use url::Url;

/// Stem used for canonical filenames (`ontology.ttl`, ...).
pub const CANONICAL_STEM: &str = "ontology";

/// One concrete-syntax decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoder {
    pub name: &'static str,
    pub extension: &'static str,
    format: RdfFormat,
}

pub const RDF_XML: Decoder = Decoder {
    name: "RDF/XML",
    extension: "xml",
    format: RdfFormat::RdfXml,
};

pub const TURTLE: Decoder = Decoder {
    name: "TTL",
    extension: "ttl",
    format: RdfFormat::Turtle,
};

pub const N3: Decoder = Decoder {
    name: "N3",
    extension: "n3",
    format: RdfFormat::N3,
};

/// Decoders in detection priority order.
pub fn default_decoders() -> [Decoder; 3] {
    [RDF_XML, TURTLE, N3]
}

impl Decoder {
    /// Parses the whole stream and returns the number of statements read.
    ///
    /// A document that parses cleanly with no statements (only prefixes, an
    /// empty `rdf:RDF` element) still matches.
    fn decode<R: Read>(&self, reader: R, base_iri: Option<&str>) -> Result<usize, String> {
        let mut parser = RdfParser::from_format(self.format);
        if let Some(base) = base_iri {
            parser = parser
                .with_base_iri(base)
                .map_err(|e| format!("invalid base IRI {}: {}", base, e))?;
        }
        let mut reader = MarkupTracker::new(reader);
        let mut statements = 0usize;
        for quad in parser.for_reader(&mut reader) {
            quad.map_err(|e| e.to_string())?;
            statements += 1;
        }
        // The XML parser stops quietly at end of input; a well-formed document
        // still needs a root element.
        if self.format == RdfFormat::RdfXml && !reader.saw_markup {
            return Err("no XML root element".to_string());
        }
        Ok(statements)
    }
}

/// Passes bytes through and records whether any `<` went by.
struct MarkupTracker<R> {
    inner: R,
    saw_markup: bool,
}

impl<R: Read> MarkupTracker<R> {
    fn new(inner: R) -> Self {
        Self {
            inner,
            saw_markup: false,
        }
    }
}

impl<R: Read> Read for MarkupTracker<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.inner.read(buf)?;
        if !self.saw_markup && buf[..n].contains(&b'<') {
            self.saw_markup = true;
        }
        Ok(n)
    }
}

/// Serialization that actually parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectedFormat {
    pub name: String,
    pub extension: String,
    pub statements: usize,
}

impl DetectedFormat {
    /// Canonical filename for this serialization, e.g. `ontology.ttl`.
    pub fn canonical_filename(&self) -> String {
        format!("{}.{}", CANONICAL_STEM, self.extension)
    }
}

/// Detects the serialization of `path`, resolving relative IRIs against the
/// file's own `file://` URL.
pub fn detect(path: &Path, decoders: &[Decoder]) -> Result<DetectedFormat, DetectionError> {
    let base = std::path::absolute(path)
        .ok()
        .and_then(|p| Url::from_file_path(p).ok());
    detect_with_base(path, decoders, base.as_ref().map(Url::as_str))
}

/// Like [`detect`] with an explicit base IRI (typically the URI the document
/// was downloaded from).
pub fn detect_with_base(
    path: &Path,
    decoders: &[Decoder],
    base_iri: Option<&str>,
) -> Result<DetectedFormat, DetectionError> {
    let mut attempts = Vec::with_capacity(decoders.len());

    for decoder in decoders {
        let file = File::open(path).map_err(|source| DetectionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match decoder.decode(BufReader::new(file), base_iri) {
            Ok(statements) => {
                tracing::info!(path = %path.display(), statements, "document parsed as {}", decoder.name);
                return Ok(DetectedFormat {
                    name: decoder.name.to_string(),
                    extension: decoder.extension.to_string(),
                    statements,
                });
            }
            Err(reason) => {
                tracing::debug!(path = %path.display(), %reason, "document is not {}", decoder.name);
                attempts.push(DecodeFailure {
                    format: decoder.name.to_string(),
                    reason,
                });
            }
        }
    }

    Err(DetectionError::NoMatchingFormat {
        path: path.to_path_buf(),
        attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const RDF_XML_DOC: &str = r#"<?xml version="1.0"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:ex="http://example.org/">
  <rdf:Description rdf:about="http://example.org/a">
    <ex:label>A</ex:label>
  </rdf:Description>
</rdf:RDF>
"#;

    const TURTLE_DOC: &str = "@prefix ex: <http://example.org/> .\n\
                              ex:a ex:b ex:c .\n\
                              ex:a ex:label \"A\" .\n";

    const N3_DOC: &str = "@prefix : <http://example.org/> .\n:a => :b .\n";

    fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let p = dir.path().join(name);
        fs::write(&p, content).unwrap();
        p
    }

    #[test]
    fn detects_rdf_xml() {
        let dir = tempfile::tempdir().unwrap();
        let p = write(&dir, "Ontology", RDF_XML_DOC);
        let f = detect(&p, &default_decoders()).unwrap();
        assert_eq!(f.name, "RDF/XML");
        assert_eq!(f.canonical_filename(), "ontology.xml");
        assert_eq!(f.statements, 1);
    }

    #[test]
    fn detects_turtle() {
        let dir = tempfile::tempdir().unwrap();
        let p = write(&dir, "Ontology", TURTLE_DOC);
        let f = detect(&p, &default_decoders()).unwrap();
        assert_eq!(f.name, "TTL");
        assert_eq!(f.extension, "ttl");
        assert_eq!(f.statements, 2);
    }

    #[test]
    fn detects_n3_only_syntax() {
        let dir = tempfile::tempdir().unwrap();
        let p = write(&dir, "Ontology", N3_DOC);
        let f = detect(&p, &default_decoders()).unwrap();
        assert_eq!(f.name, "N3");
        assert_eq!(f.canonical_filename(), "ontology.n3");
    }

    #[test]
    fn relative_iris_resolve_against_base() {
        let dir = tempfile::tempdir().unwrap();
        let p = write(&dir, "Ontology", "<#a> <#b> <#c> .\n");
        let f = detect_with_base(&p, &default_decoders(), Some("http://example.org/onto"))
            .unwrap();
        assert_eq!(f.name, "TTL");
    }

    #[test]
    fn garbage_matches_nothing_and_file_stays() {
        let dir = tempfile::tempdir().unwrap();
        let p = write(&dir, "Ontology", "@@@ this is not rdf at all {{{ <<<");
        match detect(&p, &default_decoders()) {
            Err(DetectionError::NoMatchingFormat { attempts, .. }) => {
                let names: Vec<_> = attempts.iter().map(|a| a.format.as_str()).collect();
                assert_eq!(names, ["RDF/XML", "TTL", "N3"]);
            }
            other => panic!("expected NoMatchingFormat, got {:?}", other),
        }
        assert!(p.exists());
    }

    #[test]
    fn empty_file_is_turtle() {
        let dir = tempfile::tempdir().unwrap();
        let p = write(&dir, "Ontology", "");
        let f = detect(&p, &default_decoders()).unwrap();
        assert_eq!(f.name, "TTL");
        assert_eq!(f.statements, 0);
    }

    #[test]
    fn prefix_only_turtle_matches() {
        let dir = tempfile::tempdir().unwrap();
        let p = write(
            &dir,
            "Ontology",
            "@prefix owl: <http://www.w3.org/2002/07/owl#> .\n",
        );
        let f = detect(&p, &default_decoders()).unwrap();
        assert_eq!(f.name, "TTL");
        assert_eq!(f.statements, 0);
    }

    #[test]
    fn empty_rdf_element_matches_rdf_xml() {
        let dir = tempfile::tempdir().unwrap();
        let p = write(
            &dir,
            "Ontology",
            "<rdf:RDF xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\"/>\n",
        );
        let f = detect(&p, &default_decoders()).unwrap();
        assert_eq!(f.name, "RDF/XML");
        assert_eq!(f.statements, 0);
    }

    #[test]
    fn rdf_xml_alone_rejects_whitespace_only() {
        let dir = tempfile::tempdir().unwrap();
        let p = write(&dir, "Ontology", "  \n");
        match detect(&p, &[RDF_XML]) {
            Err(DetectionError::NoMatchingFormat { attempts, .. }) => {
                assert_eq!(attempts[0].reason, "no XML root element");
            }
            other => panic!("expected NoMatchingFormat, got {:?}", other),
        }
    }

    #[test]
    fn decoder_order_is_respected() {
        let dir = tempfile::tempdir().unwrap();
        // Plain triples are valid Turtle and valid N3; the first listed wins.
        let p = write(&dir, "Ontology", TURTLE_DOC);
        let f = detect(&p, &[N3, TURTLE]).unwrap();
        assert_eq!(f.name, "N3");
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = detect(&dir.path().join("absent"), &default_decoders()).unwrap_err();
        assert!(matches!(err, DetectionError::Io { .. }));
    }

    #[test]
    fn no_decoders_is_no_match() {
        let dir = tempfile::tempdir().unwrap();
        let p = write(&dir, "Ontology", TURTLE_DOC);
        let err = detect(&p, &[]).unwrap_err();
        assert!(err.to_string().contains("no decoders configured"));
    }
}
