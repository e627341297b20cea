//! Error types for tsp_mix
//!
//! Every stage of the ordering pipeline reports failures through
//! [`MixError`]. Variants fall into two groups: input problems the caller can
//! fix by changing data or configuration, and internal consistency failures
//! that indicate a defect and must never be retried.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, MixError>;

/// Main error type for tsp_mix
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MixError {
    /// Too few items, mismatched dimensionality, or a missing feature weight
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Greedy pairing of odd-degree vertices ran out of acceptable pairs.
    /// Same input always yields the same failure.
    #[error("Matching exhausted: {unmatched} odd vertices left unpaired after {rejected} rejected pairs")]
    MatchingExhausted { unmatched: usize, rejected: usize },

    /// Degree-parity check after matching failed (internal defect)
    #[error("Graph is not Eulerian: odd-degree vertices {odd_vertices:?}")]
    NotEulerian { odd_vertices: Vec<usize> },

    /// Circuit construction did not reach every vertex (internal defect)
    #[error("Search exhausted: walk visited {visited} of {total} vertices")]
    SearchExhausted { visited: usize, total: usize },

    /// An observer asked the run to stop at a stage boundary
    #[error("Aborted before stage '{stage}'")]
    Aborted { stage: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl MixError {
    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a matching exhausted error
    pub fn matching_exhausted(unmatched: usize, rejected: usize) -> Self {
        Self::MatchingExhausted {
            unmatched,
            rejected,
        }
    }

    /// Create a not-Eulerian error
    pub fn not_eulerian(odd_vertices: Vec<usize>) -> Self {
        Self::NotEulerian { odd_vertices }
    }

    /// Create a search exhausted error
    pub fn search_exhausted(visited: usize, total: usize) -> Self {
        Self::SearchExhausted { visited, total }
    }

    /// Create an aborted error
    pub fn aborted(stage: impl Into<String>) -> Self {
        Self::Aborted {
            stage: stage.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Stable code for programmatic matching
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidInput { .. } => ErrorCode::InvalidInput,
            Self::MatchingExhausted { .. } => ErrorCode::MatchingExhausted,
            Self::NotEulerian { .. } => ErrorCode::NotEulerian,
            Self::SearchExhausted { .. } => ErrorCode::SearchExhausted,
            Self::Aborted { .. } => ErrorCode::Aborted,
            Self::Serialization { .. } => ErrorCode::Serialization,
        }
    }

    /// Check if this error signals a bug rather than bad input.
    /// Such errors must not be caught and retried.
    pub fn is_internal_defect(&self) -> bool {
        matches!(self, Self::NotEulerian { .. } | Self::SearchExhausted { .. })
    }

    /// Check if a retry can succeed once the caller changes data or weights
    pub fn is_retryable_after_reconfigure(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. } | Self::MatchingExhausted { .. }
        )
    }
}

impl From<serde_json::Error> for MixError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

/// Stable, machine-readable error codes.
///
/// Serialized in snake_case so JSON consumers can match on them without
/// depending on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidInput,
    MatchingExhausted,
    NotEulerian,
    SearchExhausted,
    Aborted,
    Serialization,
}

impl ErrorCode {
    /// The snake_case wire name of this code
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidInput => "invalid_input",
            ErrorCode::MatchingExhausted => "matching_exhausted",
            ErrorCode::NotEulerian => "not_eulerian",
            ErrorCode::SearchExhausted => "search_exhausted",
            ErrorCode::Aborted => "aborted",
            ErrorCode::Serialization => "serialization",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
