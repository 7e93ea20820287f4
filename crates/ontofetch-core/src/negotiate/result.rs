//! Outcome of a fallback download: one entry per attempted candidate.

use crate::catalog::SerializationCandidate;
use crate::transport::TransportError;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// What happened when one candidate was tried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AttemptOutcome {
    Fetched {
        candidate: SerializationCandidate,
        final_url: String,
        hops: u32,
        bytes: u64,
        content_type: Option<String>,
    },
    Failed {
        candidate: SerializationCandidate,
        error: TransportError,
    },
}

impl AttemptOutcome {
    pub fn candidate(&self) -> &SerializationCandidate {
        match self {
            AttemptOutcome::Fetched { candidate, .. } | AttemptOutcome::Failed { candidate, .. } => {
                candidate
            }
        }
    }

    pub fn error(&self) -> Option<&TransportError> {
        match self {
            AttemptOutcome::Failed { error, .. } => Some(error),
            AttemptOutcome::Fetched { .. } => None,
        }
    }
}

/// Result of `download_with_fallback`. At most one candidate is chosen.
#[derive(Debug, Clone, Serialize)]
pub struct FetchResult {
    succeeded: bool,
    chosen: Option<SerializationCandidate>,
    destination: PathBuf,
    attempts: usize,
    outcomes: Vec<AttemptOutcome>,
}

impl FetchResult {
    pub(crate) fn new(destination: PathBuf, outcomes: Vec<AttemptOutcome>) -> Self {
        let chosen = outcomes.iter().find_map(|o| match o {
            AttemptOutcome::Fetched { candidate, .. } => Some(candidate.clone()),
            AttemptOutcome::Failed { .. } => None,
        });
        Self {
            succeeded: chosen.is_some(),
            chosen,
            destination,
            attempts: outcomes.len(),
            outcomes,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    pub fn chosen(&self) -> Option<&SerializationCandidate> {
        self.chosen.as_ref()
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn attempts(&self) -> usize {
        self.attempts
    }

    pub fn outcomes(&self) -> &[AttemptOutcome] {
        &self.outcomes
    }

    /// Failed attempts in the order they were tried.
    pub fn failures(&self) -> Vec<CandidateFailure> {
        self.outcomes
            .iter()
            .filter_map(|o| {
                o.error().map(|e| CandidateFailure {
                    candidate: o.candidate().name.clone(),
                    accept: o.candidate().accept.clone(),
                    error: e.clone(),
                })
            })
            .collect()
    }

    /// Turns total failure into an error listing every attempt.
    pub fn into_result(self) -> Result<FetchResult, OrchestratorError> {
        if self.succeeded {
            Ok(self)
        } else {
            Err(OrchestratorError::AllCandidatesFailed(self.failures()))
        }
    }
}

/// One candidate that could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateFailure {
    pub candidate: String,
    pub accept: String,
    pub error: TransportError,
}

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("tried {} serialization(s), all failed:\n{}", .0.len(), format_failures(.0))]
    AllCandidatesFailed(Vec<CandidateFailure>),
}

fn format_failures(failures: &[CandidateFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("  {} ({}): {}", f.candidate, f.accept, f.error))
        .collect::<Vec<_>>()
        .join("\n")
}
