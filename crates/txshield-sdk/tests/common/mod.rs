//! Common test utilities for SDK integration tests

#![allow(dead_code)]

use serde_json::{json, Value};
use std::sync::Arc;
use txshield_sdk::{
    DecisionEngine, DecisionEngineBuilder, DecisionResponse, DecisionSource, MockScorer, Outcome,
    ScorerFailurePolicy,
};

/// A record with every required field set to a low-risk value
pub fn valid_record() -> Value {
    json!({
        "amount": 1500.0,
        "is_new_counterparty": false,
        "device_change": false,
        "location_change": false,
        "channel": "pay",
        "page_context": "home",
        "requires_pin": true,
        "anomaly_score": 0.12,
        "sender_in_degree_7d": 2,
        "sender_out_degree_7d": 5,
        "sender_in_out_ratio": 0.4,
        "fake_claim_count_user_7d": 0,
        "is_screen_recording_on": false,
        "is_remote_access_app_running": false,
        "is_call_active_during_payment": false
    })
}

/// `valid_record` with a refund-page collect request of `amount`
pub fn refund_collect(amount: f64) -> Value {
    with_fields(
        valid_record(),
        &[
            ("page_context", json!("refund_page")),
            ("channel", json!("collect")),
            ("amount", json!(amount)),
        ],
    )
}

/// Override fields of a record
pub fn with_fields(mut record: Value, fields: &[(&str, Value)]) -> Value {
    if let Some(map) = record.as_object_mut() {
        for (name, value) in fields {
            map.insert(name.to_string(), value.clone());
        }
    }
    record
}

/// Remove one field from a record
pub fn without_field(mut record: Value, field: &str) -> Value {
    if let Some(map) = record.as_object_mut() {
        map.remove(field);
    }
    record
}

/// Build an engine around a mock scorer
pub async fn engine_with(scorer: Arc<MockScorer>) -> DecisionEngine {
    engine_with_policy(scorer, ScorerFailurePolicy::Reject).await
}

pub async fn engine_with_policy(
    scorer: Arc<MockScorer>,
    policy: ScorerFailurePolicy,
) -> DecisionEngine {
    DecisionEngineBuilder::new()
        .with_scorer(scorer)
        .with_failure_policy(policy)
        .build()
        .await
        .expect("Failed to build engine")
}

/// Assertion helpers for DecisionResponse
pub trait ResponseAssertions {
    fn assert_source(&self, expected: DecisionSource);
    fn assert_final(&self, expected: &str);
    fn assert_ml_used(&self, expected: bool);
}

impl ResponseAssertions for DecisionResponse {
    fn assert_source(&self, expected: DecisionSource) {
        assert_eq!(
            self.decision.source, expected,
            "Expected source {:?}, got {:?}",
            expected, self.decision.source
        );
    }

    fn assert_final(&self, expected: &str) {
        let actual: &Outcome = &self.decision.final_decision;
        assert_eq!(
            actual.as_str(),
            expected,
            "Expected final decision {}, got {}",
            expected,
            actual.as_str()
        );
    }

    fn assert_ml_used(&self, expected: bool) {
        assert_eq!(
            self.decision.ml_used, expected,
            "Expected ml_used={}, got {}",
            expected, self.decision.ml_used
        );
    }
}
