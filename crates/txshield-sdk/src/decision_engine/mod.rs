//! DecisionEngine - Main API for evaluating transactions
//!
//! - `types`: Response types
//! - `engine`: Pipeline implementation (validate, rules, score, merge)
//! - `tests`: Unit tests (test-only)

mod engine;
mod types;

pub use engine::DecisionEngine;
pub use types::DecisionResponse;

// Tests module (only compiled in test mode)
#[cfg(test)]
mod tests;
