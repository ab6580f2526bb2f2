//! SDK error types

use serde::Serialize;
use std::fmt;
use thiserror::Error;
use txshield_core::{RuleError, ValidationError};
use txshield_runtime::ScorerError;

/// Pipeline stage an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Engine construction (config, rule files, scorer client)
    Setup,
    Validation,
    /// Rule definitions
    Rule,
    Scoring,
    Merge,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Setup => "setup",
            Stage::Validation => "validation",
            Stage::Rule => "rule",
            Stage::Scoring => "scoring",
            Stage::Merge => "merge",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Request failed schema validation (client fault)
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Rule definition rejected
    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    /// Scorer failed and the failure policy is to reject
    #[error("Evaluation failed: {0}")]
    EvaluationFailed(#[from] ScorerError),

    /// Rule file could not be parsed
    #[error("Invalid rule file {path}: {message}")]
    InvalidRuleFile { path: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Broken pipeline invariant
    #[error("Internal error in {stage} stage: {message}")]
    Internal { stage: Stage, message: String },
}

impl SdkError {
    /// Stage that failed
    pub fn stage(&self) -> Stage {
        match self {
            SdkError::Validation(_) => Stage::Validation,
            SdkError::EvaluationFailed(_) => Stage::Scoring,
            SdkError::Internal { stage, .. } => *stage,
            SdkError::Rule(_) => Stage::Rule,
            SdkError::InvalidRuleFile { .. } | SdkError::ConfigError(_) => Stage::Setup,
        }
    }

    /// True when the caller sent a bad request
    pub fn is_client_error(&self) -> bool {
        matches!(self, SdkError::Validation(_))
    }

    pub(crate) fn internal(stage: Stage, message: impl Into<String>) -> Self {
        SdkError::Internal {
            stage,
            message: message.into(),
        }
    }
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
