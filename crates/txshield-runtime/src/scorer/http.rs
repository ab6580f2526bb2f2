//! HTTP scorer client

use super::{Scorer, ScorerConfig};
use crate::error::{Result, ScorerError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use txshield_core::{ScoreResult, ValidatedTransaction};

/// Scorer backed by an HTTP endpoint
///
/// POSTs the transaction payload as JSON and expects a JSON object with
/// `decision` and `risk_level`. Concurrent calls are capped at
/// `max_in_flight`; time spent waiting for a slot counts against the deadline.
pub struct HttpScorer {
    client: Client,
    endpoint: Url,
    permits: Arc<Semaphore>,
}

impl HttpScorer {
    /// Create a new HTTP scorer
    pub fn new(config: &ScorerConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| {
            ScorerError::Client(format!("invalid scorer endpoint '{}': {}", config.endpoint, e))
        })?;
        if config.timeout_ms == 0 {
            return Err(ScorerError::Client(
                "timeout_ms must be at least 1".to_string(),
            ));
        }
        if config.max_in_flight == 0 {
            return Err(ScorerError::Client(
                "max_in_flight must be at least 1".to_string(),
            ));
        }

        let client = Client::builder()
            .build()
            .map_err(|e| ScorerError::Client(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            permits: Arc::new(Semaphore::new(config.max_in_flight)),
        })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// Free call slots right now
    pub fn available_permits(&self) -> usize {
        self.permits.available_permits()
    }

    async fn call(&self, txn: &ValidatedTransaction, deadline: Duration) -> Result<ScoreResult> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| ScorerError::Unavailable("scorer client is shut down".to_string()))?;

        tracing::debug!("Calling scorer at {}", self.endpoint);

        let response = self
            .client
            .post(self.endpoint.clone())
            .timeout(deadline)
            .json(txn.payload())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ScorerError::Timeout(deadline)
                } else {
                    ScorerError::Unavailable(format!("HTTP request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(classify_status(status));
        }

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                ScorerError::Timeout(deadline)
            } else {
                ScorerError::Unavailable(format!("failed to read scorer response: {}", e))
            }
        })?;

        let json: serde_json::Value = serde_json::from_slice(&body)
            .map_err(|e| ScorerError::protocol(format!("response is not valid JSON: {}", e)))?;

        Ok(ScoreResult::from_payload(json)?)
    }
}

// 5xx and 429 mean the scorer is down or shedding load; any other status means
// it rejected what we sent.
fn classify_status(status: StatusCode) -> ScorerError {
    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
        ScorerError::Unavailable(format!("scorer returned HTTP {}", status))
    } else {
        ScorerError::protocol(format!("scorer returned HTTP {}", status))
    }
}

#[async_trait]
impl Scorer for HttpScorer {
    async fn score(&self, txn: &ValidatedTransaction, deadline: Duration) -> Result<ScoreResult> {
        let result = match tokio::time::timeout(deadline, self.call(txn, deadline)).await {
            Ok(result) => result,
            Err(_) => Err(ScorerError::Timeout(deadline)),
        };

        if let Err(ref e) = result {
            tracing::warn!("Scorer call to {} failed: {}", self.endpoint, e);
        }
        result
    }

    fn name(&self) -> &str {
        "http"
    }
}
