//! Error types for inclusion analysis.

use thiserror::Error;

/// Result type alias for inclusion-analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Failure taxonomy for the analysis pipeline.
///
/// Expected "no detection" outcomes (zero segments, empty masks) are not
/// errors; they contribute zero signal and flow through normally. Only
/// genuinely invalid input or configuration surfaces here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// A precondition on the input failed (zero-area image, empty batch).
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// A calibration constant is outside its valid domain. Raised at
    /// configuration-validation time, before any image is processed.
    #[error("invalid configuration: {parameter} = {value} ({reason})")]
    InvalidConfig {
        parameter: &'static str,
        value: String,
        reason: &'static str,
    },

    /// Image file could not be loaded or decoded (boundary I/O only).
    #[error("failed to load image: {message}")]
    ImageLoad { message: String },
}

impl AnalysisError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    pub fn invalid_config(
        parameter: &'static str,
        value: impl ToString,
        reason: &'static str,
    ) -> Self {
        Self::InvalidConfig {
            parameter,
            value: value.to_string(),
            reason,
        }
    }
}
