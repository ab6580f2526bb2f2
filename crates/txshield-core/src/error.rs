//! Error types for TXSHIELD Core

use thiserror::Error;

/// Rule definition error
///
/// Raised while building a [`RuleEngine`](crate::RuleEngine). A malformed rule is a
/// configuration fault, never something to skip at evaluation time.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuleError {
    #[error("Invalid rule '{id}': {message}")]
    InvalidRule { id: String, message: String },

    #[error("Duplicate rule id: {0}")]
    DuplicateRule(String),
}

impl RuleError {
    pub(crate) fn invalid(id: &str, message: impl Into<String>) -> Self {
        RuleError::InvalidRule {
            id: id.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RuleError>;
