//! Scorer interface and configuration

mod http;
mod mock;

pub use http::HttpScorer;
pub use mock::MockScorer;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use txshield_core::{ScoreResult, ValidatedTransaction};

/// Scorer endpoint used when none is configured
pub const DEFAULT_SCORER_ENDPOINT: &str = "http://127.0.0.1:8000/predict-fraud";

/// ML scoring service
#[async_trait]
pub trait Scorer: Send + Sync {
    /// Score a validated transaction, giving up after `deadline`
    ///
    /// Implementations must not retry.
    async fn score(&self, txn: &ValidatedTransaction, deadline: Duration) -> Result<ScoreResult>;

    /// Scorer name (for logging)
    fn name(&self) -> &str;
}

/// Scorer client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorerConfig {
    /// Full URL of the scoring endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-call deadline in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum concurrent calls to the scorer
    #[serde(default = "default_max_in_flight")]
    pub max_in_flight: usize,
}

fn default_endpoint() -> String {
    DEFAULT_SCORER_ENDPOINT.to_string()
}

fn default_timeout_ms() -> u64 {
    3000
}

fn default_max_in_flight() -> usize {
    64
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_ms: default_timeout_ms(),
            max_in_flight: default_max_in_flight(),
        }
    }
}

impl ScorerConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
