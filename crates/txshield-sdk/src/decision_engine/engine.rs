//! Core DecisionEngine implementation

use super::types::DecisionResponse;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::merger::{merge, ScoreOutcome};
use serde_json::Value;
use std::sync::Arc;
use txshield_core::{validate, FinalDecision, RuleEngine, ValidatedTransaction};
use txshield_runtime::{Scorer, ScorerError};

pub struct DecisionEngine {
    /// Ordered rule set
    rules: RuleEngine,

    /// ML scoring backend
    scorer: Arc<dyn Scorer>,

    /// Configuration
    config: EngineConfig,
}

impl DecisionEngine {
    /// Generate a unique request ID
    /// Format: req_YYYYMMDDHHmmss_xxxxxx
    pub(super) fn generate_request_id() -> String {
        use chrono::Utc;
        use rand::Rng;

        let datetime_str = Utc::now().format("%Y%m%d%H%M%S").to_string();
        let random: u32 = rand::thread_rng().gen_range(0..0xFFFFFF);

        format!("req_{}_{:06x}", datetime_str, random)
    }

    /// Create an engine from already-built parts
    ///
    /// Most callers go through [`crate::DecisionEngineBuilder`].
    pub fn new(config: EngineConfig, rules: RuleEngine, scorer: Arc<dyn Scorer>) -> Self {
        Self {
            rules,
            scorer,
            config,
        }
    }

    /// Validate a raw record and run it through the pipeline
    pub async fn evaluate(&self, record: Value) -> Result<DecisionResponse> {
        let start = std::time::Instant::now();
        let request_id = Self::generate_request_id();
        tracing::debug!("Generated new request_id: {}", request_id);

        let txn = validate(record).map_err(|e| {
            tracing::info!(request_id = %request_id, "Rejected transaction: {}", e);
            e
        })?;

        let decision = self.decide(txn).await?;
        let processing_time_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            request_id = %request_id,
            source = decision.source.as_str(),
            decision = decision.final_decision.as_str(),
            "Decision made in {}ms",
            processing_time_ms
        );

        Ok(DecisionResponse {
            request_id,
            decision,
            processing_time_ms,
        })
    }

    /// Run rules, conditional scoring and merge on a validated transaction
    pub async fn decide(&self, txn: ValidatedTransaction) -> Result<FinalDecision> {
        let verdict = self.rules.evaluate(&txn);

        let outcome = if verdict.is_block() {
            tracing::debug!(
                "Rule {:?} blocked, skipping scorer",
                verdict.rule_id.as_deref().unwrap_or_default()
            );
            ScoreOutcome::Skipped
        } else {
            self.score(&txn).await
        };

        merge(verdict, outcome, self.config.failure_policy)
    }

    async fn score(&self, txn: &ValidatedTransaction) -> ScoreOutcome {
        let deadline = self.config.scorer_timeout();
        let call = self.scorer.score(txn, deadline);

        match tokio::time::timeout(deadline, call).await {
            Ok(Ok(score)) => {
                tracing::debug!(
                    "Scorer {} returned {} / {}",
                    self.scorer.name(),
                    score.decision.as_str(),
                    score.risk_level
                );
                ScoreOutcome::Scored(score)
            }
            Ok(Err(err)) => ScoreOutcome::Failed(err),
            Err(_) => {
                tracing::warn!(
                    "Scorer {} exceeded deadline of {}ms",
                    self.scorer.name(),
                    deadline.as_millis()
                );
                ScoreOutcome::Failed(ScorerError::Timeout(deadline))
            }
        }
    }

    /// Get the rule set
    pub fn rules(&self) -> &RuleEngine {
        &self.rules
    }

    /// Get engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Name of the scoring backend
    pub fn scorer_name(&self) -> &str {
        self.scorer.name()
    }
}
