//! Rule verdicts and the merged final decision

use super::score::{MlDecision, ScoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rule engine decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleDecision {
    Allow,
    Block,
}

impl RuleDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleDecision::Allow => "ALLOW",
            RuleDecision::Block => "BLOCK",
        }
    }
}

impl fmt::Display for RuleDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of the rule engine
///
/// `reason` and `rule_id` are set iff the decision is BLOCK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleVerdict {
    pub decision: RuleDecision,
    pub reason: Option<String>,
    pub rule_id: Option<String>,
}

impl RuleVerdict {
    /// Default verdict when no rule matches
    pub fn allow() -> Self {
        Self {
            decision: RuleDecision::Allow,
            reason: None,
            rule_id: None,
        }
    }

    pub fn block(rule_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            decision: RuleDecision::Block,
            reason: Some(reason.into()),
            rule_id: Some(rule_id.into()),
        }
    }

    pub fn is_block(&self) -> bool {
        self.decision == RuleDecision::Block
    }
}

/// Which component produced the final decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionSource {
    /// A rule blocked the transaction; the scorer was not called
    RuleEngine,
    /// Rules allowed the transaction and the scorer decided
    HybridEngine,
    /// The scorer failed and the configured failure policy decided
    FallbackPolicy,
}

impl DecisionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionSource::RuleEngine => "RULE_ENGINE",
            DecisionSource::HybridEngine => "HYBRID_ENGINE",
            DecisionSource::FallbackPolicy => "FALLBACK_POLICY",
        }
    }
}

impl fmt::Display for DecisionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final decision value, tagged by the component that produced it
///
/// Serializes as the bare decision string ("BLOCK", "WARN", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Rule(RuleDecision),
    Model(MlDecision),
    Fallback(RuleDecision),
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Rule(d) | Outcome::Fallback(d) => d.as_str(),
            Outcome::Model(d) => d.as_str(),
        }
    }

    /// Whether the transaction must be stopped
    pub fn is_blocking(&self) -> bool {
        matches!(
            self,
            Outcome::Rule(RuleDecision::Block)
                | Outcome::Fallback(RuleDecision::Block)
                | Outcome::Model(MlDecision::BlockAndAlert)
        )
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Merged decision with provenance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalDecision {
    pub source: DecisionSource,
    pub rule_decision: RuleDecision,
    pub rule_reason: Option<String>,
    pub rule_id: Option<String>,

    /// True iff the scorer was consulted successfully
    pub ml_used: bool,
    pub ml_result: Option<ScoreResult>,

    pub final_decision: Outcome,

    /// Absent when the rule engine decided alone or a fallback policy applied
    pub final_risk_level: Option<String>,

    /// Scorer failure text when a fallback policy applied
    pub scorer_error: Option<String>,
}
