//! Builder pattern for DecisionEngine

use crate::config::{EngineConfig, ScorerFailurePolicy};
use crate::decision_engine::DecisionEngine;
use crate::error::{Result, SdkError};
use crate::rule_loader;
use std::path::PathBuf;
use std::sync::Arc;
use txshield_core::{Rule, RuleEngine};
use txshield_runtime::{HttpScorer, Scorer, ScorerConfig};

/// Builder for DecisionEngine
///
/// Rules are assembled in this order: built-in rules, rule files, inline
/// rule content, then rules added in code.
///
/// # Example
///
/// ```rust,ignore
/// use txshield_sdk::DecisionEngineBuilder;
///
/// // HTTP scorer from configuration
/// let engine = DecisionEngineBuilder::new()
///     .with_scorer_endpoint("http://127.0.0.1:8000/predict-fraud")
///     .with_scorer_timeout(3000)
///     .add_rule_file("rules/claims.yaml")
///     .build()
///     .await?;
///
/// // Mock scorer (for testing)
/// let engine = DecisionEngineBuilder::new()
///     .with_scorer(Arc::new(MockScorer::allow_low()))
///     .build()
///     .await?;
/// ```
pub struct DecisionEngineBuilder {
    config: EngineConfig,
    rule_contents: Vec<(String, String)>,
    rules: Vec<Rule>,
    scorer: Option<Arc<dyn Scorer>>,
}

impl DecisionEngineBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: EngineConfig::new(),
            rule_contents: Vec::new(),
            rules: Vec::new(),
            scorer: None,
        }
    }

    /// Replace the whole engine configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    // ========== Scorer ==========

    /// Set scorer configuration
    pub fn with_scorer_config(mut self, scorer: ScorerConfig) -> Self {
        self.config.scorer = scorer;
        self
    }

    /// Set scorer endpoint URL
    pub fn with_scorer_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.scorer.endpoint = endpoint.into();
        self
    }

    /// Set scorer deadline in milliseconds
    pub fn with_scorer_timeout(mut self, timeout_ms: u64) -> Self {
        self.config.scorer.timeout_ms = timeout_ms;
        self
    }

    /// Cap concurrent scorer calls
    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.config.scorer.max_in_flight = max_in_flight;
        self
    }

    /// Set behaviour on scorer failure
    pub fn with_failure_policy(mut self, policy: ScorerFailurePolicy) -> Self {
        self.config.failure_policy = policy;
        self
    }

    /// Use a custom scorer instead of the HTTP one
    pub fn with_scorer(mut self, scorer: Arc<dyn Scorer>) -> Self {
        self.scorer = Some(scorer);
        self
    }

    // ========== Rules ==========

    /// Enable or disable the built-in rules
    pub fn include_builtin_rules(mut self, include: bool) -> Self {
        self.config.include_builtin_rules = include;
        self
    }

    /// Add a YAML rule file
    pub fn add_rule_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.rule_files.push(path.into());
        self
    }

    /// Add YAML rule content directly
    pub fn add_rule_content(mut self, id: impl Into<String>, content: impl Into<String>) -> Self {
        self.rule_contents.push((id.into(), content.into()));
        self
    }

    /// Append a rule defined in code
    pub fn add_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Build the engine
    pub async fn build(self) -> Result<DecisionEngine> {
        // Also covers injected scorers
        if self.config.scorer.timeout_ms == 0 {
            return Err(SdkError::ConfigError(
                "scorer timeout_ms must be at least 1".to_string(),
            ));
        }

        let mut rules = if self.config.include_builtin_rules {
            Rule::builtin()
        } else {
            Vec::new()
        };

        for path in &self.config.rule_files {
            rules.extend(rule_loader::load_rule_file(path).await?);
        }
        for (id, content) in &self.rule_contents {
            rules.extend(rule_loader::parse_rules(id, content)?);
        }
        rules.extend(self.rules);

        let rules = RuleEngine::new(rules)?;
        if rules.is_empty() {
            tracing::warn!("No rules configured, every transaction goes to the scorer");
        }

        let scorer: Arc<dyn Scorer> = match self.scorer {
            Some(scorer) => scorer,
            None => Arc::new(HttpScorer::new(&self.config.scorer).map_err(|e| {
                SdkError::ConfigError(format!("Failed to create scorer: {}", e))
            })?),
        };

        tracing::info!(
            "Decision engine ready: {} rule(s), scorer={}, timeout={}ms, policy={:?}",
            rules.len(),
            scorer.name(),
            self.config.scorer.timeout_ms,
            self.config.failure_policy
        );

        Ok(DecisionEngine::new(self.config, rules, scorer))
    }
}

impl Default for DecisionEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use txshield_core::Condition;
    use txshield_runtime::MockScorer;

    #[test]
    fn test_builder_creation() {
        let builder = DecisionEngineBuilder::new();
        assert!(builder.config.include_builtin_rules);
        assert!(builder.scorer.is_none());
    }

    #[test]
    fn test_builder_scorer_settings() {
        let builder = DecisionEngineBuilder::new()
            .with_scorer_endpoint("http://scorer.internal/predict")
            .with_scorer_timeout(500)
            .with_max_in_flight(8)
            .with_failure_policy(ScorerFailurePolicy::FailOpen);

        assert_eq!(builder.config.scorer.endpoint, "http://scorer.internal/predict");
        assert_eq!(builder.config.scorer.timeout_ms, 500);
        assert_eq!(builder.config.scorer.max_in_flight, 8);
        assert_eq!(builder.config.failure_policy, ScorerFailurePolicy::FailOpen);
    }

    #[tokio::test]
    async fn test_build_default_uses_http_scorer() {
        let engine = DecisionEngineBuilder::new().build().await.unwrap();
        assert_eq!(engine.scorer_name(), "http");
        assert_eq!(engine.rules().len(), 1);
    }

    #[tokio::test]
    async fn test_build_rejects_bad_endpoint() {
        let result = DecisionEngineBuilder::new()
            .with_scorer_endpoint("not a url")
            .build()
            .await;
        assert!(matches!(result, Err(SdkError::ConfigError(_))));
    }

    #[tokio::test]
    async fn test_rule_order() {
        let yaml = r#"
rules:
  - id: from_content
    name: From content
    reason: "RuleEngine: content"
    conditions:
      - { field: requires_pin, op: eq, value: false }
"#;
        let engine = DecisionEngineBuilder::new()
            .with_scorer(Arc::new(MockScorer::allow_low()))
            .add_rule(
                Rule::new("from_code", "From code", "RuleEngine: code")
                    .add_condition(Condition::eq("device_change", true)),
            )
            .add_rule_content("inline", yaml)
            .build()
            .await
            .unwrap();

        let ids: Vec<&str> = engine.rules().rules().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["refund_scam_collect", "from_content", "from_code"]);
    }

    #[tokio::test]
    async fn test_duplicate_rule_ids_rejected() {
        let result = DecisionEngineBuilder::new()
            .with_scorer(Arc::new(MockScorer::allow_low()))
            .add_rule(Rule::refund_scam_collect())
            .build()
            .await;
        assert!(matches!(result, Err(SdkError::Rule(_))));
    }

    #[tokio::test]
    async fn test_zero_timeout_rejected() {
        let result = DecisionEngineBuilder::new()
            .with_scorer_timeout(0)
            .build()
            .await;
        assert!(matches!(result, Err(SdkError::ConfigError(ref msg)) if msg.contains("timeout_ms")));

        // Injected scorer
        let result = DecisionEngineBuilder::new()
            .with_scorer(Arc::new(MockScorer::allow_low()))
            .with_scorer_timeout(0)
            .build()
            .await;
        assert!(matches!(result, Err(SdkError::ConfigError(_))));
    }

    #[tokio::test]
    async fn test_missing_rule_file() {
        let result = DecisionEngineBuilder::new()
            .with_scorer(Arc::new(MockScorer::allow_low()))
            .add_rule_file("/no/such/rules.yaml")
            .build()
            .await;
        assert!(matches!(result, Err(SdkError::InvalidRuleFile { .. })));
    }
}
