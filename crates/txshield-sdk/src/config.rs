//! Configuration types for DecisionEngine

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use txshield_runtime::ScorerConfig;

/// What to do when the scorer fails after the rules allowed a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorerFailurePolicy {
    /// Fail the evaluation; the caller sees a scoring error
    #[default]
    Reject,
    /// Allow the transaction, flagged as a fallback decision
    FailOpen,
    /// Block the transaction, flagged as a fallback decision
    FailClosed,
}

/// Main engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Scorer endpoint, deadline and concurrency cap
    #[serde(default)]
    pub scorer: ScorerConfig,

    /// Behaviour on scorer failure
    #[serde(default)]
    pub failure_policy: ScorerFailurePolicy,

    /// Prepend the built-in rules to the configured ones
    #[serde(default = "default_true")]
    pub include_builtin_rules: bool,

    /// YAML rule files, evaluated in list order after the built-in rules
    #[serde(default)]
    pub rule_files: Vec<PathBuf>,
}

fn default_true() -> bool {
    true
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            scorer: ScorerConfig::default(),
            failure_policy: ScorerFailurePolicy::default(),
            include_builtin_rules: true,
            rule_files: Vec::new(),
        }
    }

    /// Set scorer configuration
    pub fn with_scorer(mut self, scorer: ScorerConfig) -> Self {
        self.scorer = scorer;
        self
    }

    /// Set failure policy
    pub fn with_failure_policy(mut self, policy: ScorerFailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Add a rule file
    pub fn with_rule_file(mut self, path: PathBuf) -> Self {
        self.rule_files.push(path);
        self
    }

    /// Include built-in rules
    pub fn include_builtin_rules(mut self, include: bool) -> Self {
        self.include_builtin_rules = include;
        self
    }

    /// Scorer deadline
    pub fn scorer_timeout(&self) -> Duration {
        self.scorer.timeout()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
