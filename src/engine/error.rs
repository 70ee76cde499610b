//! Matching errors.

use thiserror::Error;

/// Errors that can occur while computing an assignment
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// No assignment satisfies the restrictions. Always backed by a proof,
    /// never by an unlucky random search.
    #[error("matching impossible: {0}")]
    Impossible(String),

    /// Backtracking hit its step budget before finding an assignment or
    /// proving there is none.
    #[error("matching timed out after {steps} backtracking steps")]
    Timeout { steps: u64 },

    /// Malformed problem (too few participants, duplicate or unknown ids).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A produced assignment failed its post-condition check.
    #[error("internal error: {0}")]
    Internal(String),
}

impl MatchError {
    /// Whether calling again with the same input could succeed.
    ///
    /// Only a timeout qualifies: a fresh random order may find a solution.
    pub fn is_retryable(&self) -> bool {
        matches!(self, MatchError::Timeout { .. })
    }
}
