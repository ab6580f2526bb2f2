//! TXSHIELD Runtime - Calls into the external ML scoring service
//!
//! The pipeline only sees the [`Scorer`] trait. [`HttpScorer`] is the production
//! client; [`MockScorer`] is a deterministic stand-in for tests and local runs.

pub mod error;
pub mod scorer;

// Re-export main types
pub use error::{Result, ScorerError};
pub use scorer::{HttpScorer, MockScorer, Scorer, ScorerConfig, DEFAULT_SCORER_ENDPOINT};
