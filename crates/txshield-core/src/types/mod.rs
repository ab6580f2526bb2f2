//! Runtime data types
//!
//! - `transaction`: transaction record and its validated form
//! - `validator`: required-field schema check
//! - `decision`: rule verdicts and the merged final decision
//! - `score`: scorer results

pub mod decision;
pub mod score;
pub mod transaction;
pub mod validator;

pub use decision::{DecisionSource, FinalDecision, Outcome, RuleDecision, RuleVerdict};
pub use score::{MlDecision, ScorePayloadError, ScoreResult};
pub use transaction::{Channel, TransactionRequest, ValidatedTransaction, REQUIRED_FIELDS};
pub use validator::{validate, ValidationError};
