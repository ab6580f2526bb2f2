//! Unit tests for DecisionEngine

use super::*;
use crate::config::{EngineConfig, ScorerFailurePolicy};
use crate::error::SdkError;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use txshield_core::{DecisionSource, Outcome, RuleDecision, RuleEngine};
use txshield_runtime::{MockScorer, ScorerError};

fn record(amount: f64, channel: &str, page_context: &str) -> Value {
    json!({
        "amount": amount,
        "is_new_counterparty": true,
        "device_change": false,
        "location_change": false,
        "channel": channel,
        "page_context": page_context,
        "requires_pin": true,
        "anomaly_score": 0.4,
        "sender_in_degree_7d": 3,
        "sender_out_degree_7d": 1,
        "sender_in_out_ratio": 3.0,
        "fake_claim_count_user_7d": 0,
        "is_screen_recording_on": false,
        "is_remote_access_app_running": false,
        "is_call_active_during_payment": true
    })
}

fn engine(scorer: Arc<MockScorer>, config: EngineConfig) -> DecisionEngine {
    DecisionEngine::new(config, RuleEngine::builtin(), scorer)
}

#[test]
fn test_generate_request_id_format() {
    let id = DecisionEngine::generate_request_id();
    assert!(id.starts_with("req_"));
    assert_eq!(id.len(), "req_".len() + 14 + 1 + 6);
    assert!(id[19..].chars().all(|c| c.is_ascii_hexdigit()));
}

#[tokio::test]
async fn test_rule_block_skips_scorer() {
    let scorer = Arc::new(MockScorer::allow_low());
    let engine = engine(scorer.clone(), EngineConfig::new());

    let response = engine
        .evaluate(record(25000.0, "collect", "refund_page"))
        .await
        .unwrap();

    assert_eq!(response.decision.source, DecisionSource::RuleEngine);
    assert_eq!(response.decision.final_decision, Outcome::Rule(RuleDecision::Block));
    assert!(!response.decision.ml_used);
    assert_eq!(scorer.calls(), 0);
    assert!(response.request_id.starts_with("req_"));
}

#[tokio::test]
async fn test_rule_allow_uses_scorer() {
    let scorer = Arc::new(MockScorer::allow_low());
    let engine = engine(scorer.clone(), EngineConfig::new());

    let response = engine
        .evaluate(record(15000.0, "collect", "refund_page"))
        .await
        .unwrap();

    assert_eq!(response.decision.source, DecisionSource::HybridEngine);
    assert!(response.decision.ml_used);
    assert_eq!(response.decision.final_risk_level.as_deref(), Some("LOW"));
    assert_eq!(scorer.calls(), 1);
}

#[tokio::test]
async fn test_validation_error_stops_pipeline() {
    let scorer = Arc::new(MockScorer::allow_low());
    let engine = engine(scorer.clone(), EngineConfig::new());

    let mut body = record(15000.0, "pay", "home");
    body.as_object_mut().unwrap().remove("channel");

    let err = engine.evaluate(body).await.unwrap_err();
    assert!(matches!(err, SdkError::Validation(_)));
    assert_eq!(err.to_string(), "Missing field in request body: channel");
    assert_eq!(scorer.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_engine_deadline_bounds_slow_scorer() {
    let scorer = Arc::new(MockScorer::allow_low().with_delay(Duration::from_secs(10)));
    let config = EngineConfig::new().with_scorer(
        txshield_runtime::ScorerConfig::default().with_timeout_ms(200),
    );
    let engine = engine(scorer.clone(), config);

    let err = engine
        .evaluate(record(100.0, "pay", "home"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SdkError::EvaluationFailed(ScorerError::Timeout(d)) if d == Duration::from_millis(200)
    ));
}

#[tokio::test]
async fn test_fail_closed_policy_blocks() {
    let scorer = Arc::new(MockScorer::failing(ScorerError::Unavailable(
        "connection refused".to_string(),
    )));
    let config = EngineConfig::new().with_failure_policy(ScorerFailurePolicy::FailClosed);
    let engine = engine(scorer, config);

    let decision = engine
        .evaluate(record(100.0, "pay", "home"))
        .await
        .unwrap()
        .decision;

    assert_eq!(decision.source, DecisionSource::FallbackPolicy);
    assert_eq!(decision.final_decision, Outcome::Fallback(RuleDecision::Block));
    assert!(decision.scorer_error.is_some());
}

#[tokio::test]
async fn test_accessors() {
    let scorer = Arc::new(MockScorer::allow_low());
    let engine = engine(scorer, EngineConfig::new());

    assert_eq!(engine.scorer_name(), "mock");
    assert_eq!(engine.rules().len(), 1);
    assert_eq!(engine.config().failure_policy, ScorerFailurePolicy::Reject);
}
