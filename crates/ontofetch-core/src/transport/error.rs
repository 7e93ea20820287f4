//! Classified failure of a single GET-with-redirects call.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Network-level fault category, derived from the underlying client error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IoFaultKind {
    /// Connect or transfer deadline elapsed.
    Timeout,
    /// DNS failure, refused or reset connection, nothing received.
    Connection,
    /// Anything else (bad URL, local write failure, protocol error).
    Other,
}

impl fmt::Display for IoFaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IoFaultKind::Timeout => "timeout",
            IoFaultKind::Connection => "connection",
            IoFaultKind::Other => "other",
        };
        f.write_str(s)
    }
}

/// Why one candidate could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum TransportError {
    /// Terminal response other than 200.
    #[error("HTTP {0}")]
    HttpStatus(u32),
    /// Redirect budget exhausted.
    #[error("redirect loop: gave up after {hops} hop(s) at {last_url}")]
    RedirectLoop { hops: u32, last_url: String },
    #[error("I/O fault ({kind}): {message}")]
    IoFault { kind: IoFaultKind, message: String },
}

impl TransportError {
    pub fn io_fault(kind: IoFaultKind, message: impl Into<String>) -> Self {
        TransportError::IoFault {
            kind,
            message: message.into(),
        }
    }
}

impl From<curl::Error> for TransportError {
    fn from(e: curl::Error) -> Self {
        TransportError::io_fault(super::classify::classify_curl_error(&e), e.to_string())
    }
}
