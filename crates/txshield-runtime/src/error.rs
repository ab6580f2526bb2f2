//! Scorer error types

use std::time::Duration;
use thiserror::Error;
use txshield_core::ScorePayloadError;

/// Scorer failure
///
/// These are dependency faults, kept apart from business verdicts so the caller
/// can apply its own failure policy.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScorerError {
    /// Connection failure or an HTTP status signalling the scorer is down
    #[error("Scorer unavailable: {0}")]
    Unavailable(String),

    /// No answer within the deadline
    #[error("Scorer timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// The scorer answered, but not with a usable decision
    #[error("Scorer protocol error: {details}")]
    Protocol { details: String },

    /// The client could not be built (bad endpoint, zero capacity)
    #[error("Scorer client error: {0}")]
    Client(String),
}

impl ScorerError {
    pub fn protocol(details: impl Into<String>) -> Self {
        ScorerError::Protocol {
            details: details.into(),
        }
    }
}

impl From<ScorePayloadError> for ScorerError {
    fn from(err: ScorePayloadError) -> Self {
        ScorerError::protocol(err.to_string())
    }
}

/// Result type for scorer operations
pub type Result<T> = std::result::Result<T, ScorerError>;
