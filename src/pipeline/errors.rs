//! Serialisable error report for the JSON boundary.
//!
//! [`PipelineRuntimeError`] pairs a [`MixError`]'s stable [`ErrorCode`] with
//! the stage that produced it, a human-readable message and an optional
//! hint.
//!
//! # Display format
//!
//! ```text
//! [matching_exhausted] (stage: matching): Matching exhausted: 2 odd vertices left unpaired after 1 rejected pairs
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::observer::{STAGE_CIRCUIT, STAGE_MATCHING};
use crate::errors::{ErrorCode, MixError};

/// Stage name used for failures while decoding input.
pub const STAGE_DECODE: &str = "decode";

/// Stage name used for configuration that fails validation.
pub const STAGE_CONFIG: &str = "config";

/// Stage name used for items rejected before the first stage starts.
pub const STAGE_INPUT: &str = "input";

/// A pipeline failure in a form that survives a JSON round trip.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("[{code}] (stage: {stage}): {message}")]
pub struct PipelineRuntimeError {
    /// Stable error code for programmatic matching.
    pub code: ErrorCode,

    /// Name of the stage that failed.
    pub stage: String,

    /// Human-readable description of the failure.
    pub message: String,

    /// Optional suggestion for how to fix or work around the failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl PipelineRuntimeError {
    /// Create a new runtime error.
    pub fn new(code: ErrorCode, stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            stage: stage.into(),
            message: message.into(),
            hint: None,
        }
    }

    /// Attach a hint suggesting how to fix or work around the failure.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Report `err` as raised by `stage`.
    ///
    /// An abort always names the stage it stopped before.
    pub fn at_stage(err: &MixError, stage: &str) -> Self {
        let stage = match err {
            MixError::Aborted { stage } => stage.as_str(),
            _ => stage,
        };
        let report = Self::new(err.code(), stage, err.to_string());
        match hint_for(err) {
            Some(h) => report.with_hint(h),
            None => report,
        }
    }
}

fn hint_for(err: &MixError) -> Option<&'static str> {
    match err {
        MixError::InvalidInput { .. } => {
            Some("Check the item count, feature dimensions and that every feature has a weight")
        }
        MixError::MatchingExhausted { .. } => {
            Some("Change feature weights or the item set; retrying the same input fails again")
        }
        MixError::NotEulerian { .. } | MixError::SearchExhausted { .. } => {
            Some("Internal defect; please report it with the input that triggered it")
        }
        MixError::Aborted { .. } => None,
        MixError::Serialization { .. } => Some("Check that the input is well-formed JSON"),
    }
}

/// Without a known stage, the stage is inferred from the error kind:
/// input errors are reported against [`STAGE_INPUT`].
impl From<&MixError> for PipelineRuntimeError {
    fn from(err: &MixError) -> Self {
        let stage = match err {
            MixError::InvalidInput { .. } => STAGE_INPUT,
            MixError::MatchingExhausted { .. } | MixError::NotEulerian { .. } => STAGE_MATCHING,
            MixError::SearchExhausted { .. } => STAGE_CIRCUIT,
            MixError::Aborted { .. } => "",
            MixError::Serialization { .. } => STAGE_DECODE,
        };
        Self::at_stage(err, stage)
    }
}

impl From<MixError> for PipelineRuntimeError {
    fn from(err: MixError) -> Self {
        Self::from(&err)
    }
}
