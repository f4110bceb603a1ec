//! Error types shared by every layer of the ledger.

use thiserror::Error;

use crate::vote::CommitStep;

/// Failure of the underlying key-value store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store could not serve the request.
    #[error("store unavailable during {operation} of {key}: {reason}")]
    Unavailable {
        operation: &'static str,
        key: String,
        reason: String,
    },
    /// A lock guarding the in-process store was poisoned.
    #[error("store lock poisoned during {0}")]
    LockPoisoned(&'static str),
}

/// Error type for every ledger operation.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Malformed input payload or undecodable stored record.
    #[error("could not decode {kind}: {reason}")]
    Decode { kind: String, reason: String },

    /// Key absent where presence is required.
    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    /// The eligibility rule refused the voter for this project.
    #[error("voter {voter_id} is not allowed to vote on project {project_id}")]
    Ineligible {
        voter_id: String,
        project_id: String,
    },

    /// The voter already holds a different vote for this project.
    #[error("voter {voter_id} has already voted on project {project_id}")]
    DuplicateVote {
        voter_id: String,
        project_id: String,
    },

    #[error(transparent)]
    Store(#[from] StoreError),

    /// A vote-commit step failed; steps before it remain written.
    #[error("vote commit failed at step {step}: {source}")]
    CommitFailed {
        step: CommitStep,
        #[source]
        source: Box<LedgerError>,
    },

    #[error("unknown {entry} function: {function}")]
    UnknownOperation { entry: &'static str, function: String },

    #[error("{function} expects {expected} argument(s), got {actual}")]
    Arity {
        function: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl LedgerError {
    pub(crate) fn decode(kind: impl Into<String>, err: impl std::fmt::Display) -> Self {
        LedgerError::Decode {
            kind: kind.into(),
            reason: err.to_string(),
        }
    }

    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            LedgerError::Decode { .. } => 400,
            LedgerError::NotFound { .. } => 404,
            LedgerError::Ineligible { .. } => 403,
            LedgerError::DuplicateVote { .. } => 409,
            LedgerError::Store(_) => 500,
            LedgerError::CommitFailed { .. } => 500,
            LedgerError::UnknownOperation { .. } => 404,
            LedgerError::Arity { .. } => 400,
        }
    }
}
