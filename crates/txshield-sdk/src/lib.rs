//! TXSHIELD SDK
//!
//! High-level API for the hybrid fraud decision pipeline:
//! validation, rule evaluation, conditional ML scoring and decision merge.

pub mod builder;
pub mod config;
pub mod decision_engine;
pub mod error;
pub mod merger;
pub mod rule_loader;

// Re-export main types
pub use builder::DecisionEngineBuilder;
pub use config::{EngineConfig, ScorerFailurePolicy};
pub use decision_engine::{DecisionEngine, DecisionResponse};
pub use error::{Result, SdkError, Stage};
pub use merger::{merge, ScoreOutcome};

// Re-export commonly used types from dependencies
pub use txshield_core::{
    Condition, DecisionSource, FinalDecision, MlDecision, Operator, Outcome, Rule, RuleDecision,
    RuleEngine, RuleVerdict, ScoreResult, ValidatedTransaction, ValidationError,
};
pub use txshield_runtime::{HttpScorer, MockScorer, Scorer, ScorerConfig, ScorerError};
