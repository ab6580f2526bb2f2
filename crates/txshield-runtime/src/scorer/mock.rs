//! Mock scorer for testing

use super::Scorer;
use crate::error::{Result, ScorerError};
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use txshield_core::{ScoreResult, ValidatedTransaction};

enum Reply {
    Payload(Value),
    Error(ScorerError),
}

/// Deterministic scorer
///
/// Returns a fixed payload (parsed with the real protocol rules) or a fixed
/// error, optionally after a delay. Counts calls and keeps the last payload.
pub struct MockScorer {
    reply: Reply,
    delay: Option<Duration>,
    calls: AtomicUsize,
    last_payload: Mutex<Option<Map<String, Value>>>,
}

impl MockScorer {
    /// Respond with a raw scorer payload
    pub fn with_response(payload: Value) -> Self {
        Self::from_reply(Reply::Payload(payload))
    }

    /// Respond `{decision: ALLOW, risk_level: LOW}`
    pub fn allow_low() -> Self {
        Self::with_response(json!({"decision": "ALLOW", "risk_level": "LOW"}))
    }

    /// Fail every call with `error`
    pub fn failing(error: ScorerError) -> Self {
        Self::from_reply(Reply::Error(error))
    }

    /// Wait `delay` before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of `score` calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Payload of the most recent call
    pub fn last_payload(&self) -> Option<Map<String, Value>> {
        self.last_payload.lock().ok().and_then(|guard| guard.clone())
    }

    fn from_reply(reply: Reply) -> Self {
        Self {
            reply,
            delay: None,
            calls: AtomicUsize::new(0),
            last_payload: Mutex::new(None),
        }
    }
}

#[async_trait]
impl Scorer for MockScorer {
    async fn score(&self, txn: &ValidatedTransaction, _deadline: Duration) -> Result<ScoreResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut guard) = self.last_payload.lock() {
            *guard = Some(txn.payload().clone());
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.reply {
            Reply::Payload(payload) => Ok(ScoreResult::from_payload(payload.clone())?),
            Reply::Error(err) => Err(err.clone()),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
