//! Ordered rule evaluation

use super::definition::Rule;
use crate::error::{Result, RuleError};
use crate::types::{RuleVerdict, ValidatedTransaction};
use std::collections::HashSet;

/// Ordered set of blocking rules
///
/// Rules run in insertion order and the first match wins. Definitions are
/// checked once, in [`RuleEngine::new`]; evaluation itself cannot fail.
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    rules: Vec<Rule>,
}

impl RuleEngine {
    /// Build an engine from rules in priority order
    pub fn new(rules: Vec<Rule>) -> Result<Self> {
        let mut seen = HashSet::new();
        for rule in &rules {
            check_rule(rule)?;
            if !seen.insert(rule.id.as_str()) {
                return Err(RuleError::DuplicateRule(rule.id.clone()));
            }
        }
        Ok(Self { rules })
    }

    /// Engine with only the built-in rules
    pub fn builtin() -> Self {
        Self {
            rules: Rule::builtin(),
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluate the transaction; ALLOW unless a rule blocks it
    pub fn evaluate(&self, txn: &ValidatedTransaction) -> RuleVerdict {
        self.rules
            .iter()
            .find(|rule| rule.matches(txn))
            .map(|rule| RuleVerdict::block(rule.id.clone(), rule.reason.clone()))
            .unwrap_or_else(RuleVerdict::allow)
    }
}

fn check_rule(rule: &Rule) -> Result<()> {
    if rule.id.trim().is_empty() {
        return Err(RuleError::invalid(&rule.id, "rule id is empty"));
    }
    if rule.reason.trim().is_empty() {
        return Err(RuleError::invalid(&rule.id, "rule reason is empty"));
    }
    if rule.conditions.is_empty() {
        return Err(RuleError::invalid(&rule.id, "rule has no conditions"));
    }
    if let Some(problem) = rule.conditions.iter().find_map(|c| c.check()) {
        return Err(RuleError::invalid(&rule.id, problem));
    }
    Ok(())
}
