//! Declarative fraud rules
//!
//! A [`Rule`] is a named conjunction of [`Condition`]s that blocks the transaction
//! when every condition holds. The [`RuleEngine`] evaluates an ordered list of
//! rules and stops at the first match.

mod condition;
mod definition;
mod engine;

pub use condition::{Condition, Operator};
pub use definition::{Rule, RuleFile, REFUND_SCAM_COLLECT_ID, REFUND_SCAM_COLLECT_REASON};
pub use engine::RuleEngine;
