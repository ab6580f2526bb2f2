//! Decision merge
//!
//! Combines the rule verdict with the scorer outcome into one [`FinalDecision`].
//! A rule BLOCK stands alone; otherwise the scorer is authoritative. A scorer
//! failure never turns into a decision unless the failure policy says so.

use crate::config::ScorerFailurePolicy;
use crate::error::{Result, SdkError, Stage};
use txshield_core::{
    DecisionSource, FinalDecision, Outcome, RuleDecision, RuleVerdict, ScoreResult,
};
use txshield_runtime::ScorerError;

/// What happened at the scoring stage
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreOutcome {
    /// Not called because a rule blocked
    Skipped,
    Scored(ScoreResult),
    Failed(ScorerError),
}

/// Merge a rule verdict with the scoring outcome
pub fn merge(
    verdict: RuleVerdict,
    outcome: ScoreOutcome,
    policy: ScorerFailurePolicy,
) -> Result<FinalDecision> {
    match (verdict.decision, outcome) {
        (RuleDecision::Block, ScoreOutcome::Skipped) => Ok(FinalDecision {
            source: DecisionSource::RuleEngine,
            rule_decision: RuleDecision::Block,
            rule_reason: verdict.reason,
            rule_id: verdict.rule_id,
            ml_used: false,
            ml_result: None,
            final_decision: Outcome::Rule(RuleDecision::Block),
            final_risk_level: None,
            scorer_error: None,
        }),

        (RuleDecision::Allow, ScoreOutcome::Scored(score)) => Ok(FinalDecision {
            source: DecisionSource::HybridEngine,
            rule_decision: RuleDecision::Allow,
            rule_reason: verdict.reason,
            rule_id: verdict.rule_id,
            ml_used: true,
            final_decision: Outcome::Model(score.decision),
            final_risk_level: Some(score.risk_level.clone()),
            ml_result: Some(score),
            scorer_error: None,
        }),

        (RuleDecision::Allow, ScoreOutcome::Failed(err)) => {
            let fallback = match policy {
                ScorerFailurePolicy::Reject => return Err(SdkError::EvaluationFailed(err)),
                ScorerFailurePolicy::FailOpen => RuleDecision::Allow,
                ScorerFailurePolicy::FailClosed => RuleDecision::Block,
            };
            tracing::warn!(
                "Scorer failed ({}), applying {:?} policy: {}",
                err,
                policy,
                fallback
            );
            Ok(FinalDecision {
                source: DecisionSource::FallbackPolicy,
                rule_decision: RuleDecision::Allow,
                rule_reason: verdict.reason,
                rule_id: verdict.rule_id,
                ml_used: false,
                ml_result: None,
                final_decision: Outcome::Fallback(fallback),
                final_risk_level: None,
                scorer_error: Some(err.to_string()),
            })
        }

        (RuleDecision::Block, ScoreOutcome::Scored(_) | ScoreOutcome::Failed(_)) => {
            Err(SdkError::internal(
                Stage::Merge,
                "scorer outcome present for a rule-blocked transaction",
            ))
        }

        (RuleDecision::Allow, ScoreOutcome::Skipped) => Err(SdkError::internal(
            Stage::Merge,
            "scoring skipped for a rule-allowed transaction",
        )),
    }
}
