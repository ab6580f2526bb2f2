//! REST API type definitions

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use txshield_sdk::{DecisionEngine, DecisionResponse, DecisionSource, Outcome, RuleDecision};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<DecisionEngine>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub message: String,
}

/// Successful evaluation
#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub success: bool,
    pub request_id: String,
    pub source: DecisionSource,
    pub rule_decision: RuleDecision,
    pub rule_reason: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,

    pub ml_used: bool,

    /// Raw scorer payload
    pub ml_result: Option<Value>,

    pub final_decision: Outcome,
    pub final_risk_level: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scorer_error: Option<String>,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

impl From<DecisionResponse> for EvaluateResponse {
    fn from(response: DecisionResponse) -> Self {
        let decision = response.decision;
        Self {
            success: true,
            request_id: response.request_id,
            source: decision.source,
            rule_decision: decision.rule_decision,
            rule_reason: decision.rule_reason,
            rule_id: decision.rule_id,
            ml_used: decision.ml_used,
            ml_result: decision.ml_result.map(|score| score.raw),
            final_decision: decision.final_decision,
            final_risk_level: decision.final_risk_level,
            scorer_error: decision.scorer_error,
            processing_time_ms: response.processing_time_ms,
        }
    }
}
