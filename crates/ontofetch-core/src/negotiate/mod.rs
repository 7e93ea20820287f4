//! Format fallback: ask for each serialization in turn, keep the first one served.
//!
//! Candidates are tried strictly in order and the loop stops at the first
//! success; there is no quality comparison between representations and no
//! retry of the same candidate. A failed candidate is recorded and the next
//! one is tried.

mod request;
mod result;

pub use request::{parse_http_url, FetchRequest, RequestError};
pub use result::{AttemptOutcome, CandidateFailure, FetchResult, OrchestratorError};

use crate::catalog::SerializationCandidate;
use crate::storage;
use crate::transport::{media_type, IoFaultKind, Transport, TransportError};

/// Downloads `request.source()` in the first candidate serialization the server serves,
/// writing it to `request.destination()` (replacing any existing file).
pub fn download_with_fallback<T: Transport + ?Sized>(
    transport: &T,
    request: &FetchRequest,
    max_redirects: u32,
) -> FetchResult {
    let mut outcomes = Vec::with_capacity(request.candidates().len());

    for candidate in request.candidates() {
        tracing::info!(
            uri = %request.source(),
            accept = %candidate.accept,
            "attempting download in {}",
            candidate.name
        );
        match attempt(transport, request, candidate, max_redirects) {
            Ok(outcome) => {
                tracing::info!(
                    path = %request.destination().display(),
                    "downloaded in {}",
                    candidate.name
                );
                outcomes.push(outcome);
                break;
            }
            Err(error) => {
                tracing::warn!(%error, "failed to download in {}", candidate.name);
                outcomes.push(AttemptOutcome::Failed {
                    candidate: candidate.clone(),
                    error,
                });
            }
        }
    }

    FetchResult::new(request.destination().to_path_buf(), outcomes)
}

fn attempt<T: Transport + ?Sized>(
    transport: &T,
    request: &FetchRequest,
    candidate: &SerializationCandidate,
    max_redirects: u32,
) -> Result<AttemptOutcome, TransportError> {
    let body = transport.fetch(request.source(), &candidate.accept, max_redirects)?;

    let content_type = body.content_type().map(str::to_string);
    if let Some(ct) = &content_type {
        if media_type(ct) != media_type(&candidate.accept) {
            tracing::debug!(
                requested = %candidate.accept,
                served = %ct,
                "server ignored Accept; detection will decide the real format"
            );
        }
    }
    let final_url = body.final_url().to_string();
    let hops = body.hops();

    let dest = request.destination();
    let bytes = storage::copy_to_path(body.into_reader(), dest)
        .map_err(|e| TransportError::io_fault(IoFaultKind::Other, format!("{:#}", e)))?;

    Ok(AttemptOutcome::Fetched {
        candidate: candidate.clone(),
        final_url,
        hops,
        bytes,
        content_type,
    })
}
