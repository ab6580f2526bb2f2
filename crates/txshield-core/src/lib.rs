//! TXSHIELD Core - Core types and definitions for the hybrid fraud decision pipeline
//!
//! This crate provides the pure, synchronous half of the pipeline:
//! - Transaction types and the schema validator
//! - Declarative rules and the ordered rule engine
//! - Verdict, score and final decision types
//! - Error types

pub mod error;
pub mod rule;
pub mod types;

// Re-export commonly used types
pub use error::RuleError;
pub use rule::{Condition, Operator, Rule, RuleEngine, RuleFile};
pub use types::{
    validate, Channel, DecisionSource, FinalDecision, MlDecision, Outcome, RuleDecision,
    RuleVerdict, ScorePayloadError, ScoreResult, TransactionRequest, ValidatedTransaction,
    ValidationError, REQUIRED_FIELDS,
};
