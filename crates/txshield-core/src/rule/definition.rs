//! Rule definitions

use super::condition::Condition;
use crate::types::ValidatedTransaction;
use serde::{Deserialize, Serialize};

/// Id of the built-in refund scam rule
pub const REFUND_SCAM_COLLECT_ID: &str = "refund_scam_collect";

/// Block reason of the built-in refund scam rule
pub const REFUND_SCAM_COLLECT_REASON: &str =
    "RuleEngine: Potential refund scam via COLLECT on refund page";

/// Blocking rule definition
///
/// The rule matches when all of its conditions hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Unique rule ID
    pub id: String,

    /// Human-readable name
    pub name: String,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Reason reported when the rule blocks
    pub reason: String,

    /// Conditions, all of which must hold
    pub conditions: Vec<Condition>,
}

impl Rule {
    /// Create a new rule with no conditions
    pub fn new(id: impl Into<String>, name: impl Into<String>, reason: impl Into<String>) -> Self {
        Rule {
            id: id.into(),
            name: name.into(),
            description: None,
            reason: reason.into(),
            conditions: Vec::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a condition
    pub fn add_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Collect-request on the refund screen above 20000: the classic refund scam,
    /// where the victim is asked to "receive" a refund by approving a collect.
    pub fn refund_scam_collect() -> Self {
        Rule::new(
            REFUND_SCAM_COLLECT_ID,
            "Refund scam via COLLECT",
            REFUND_SCAM_COLLECT_REASON,
        )
        .add_condition(Condition::eq("page_context", "refund_page"))
        .add_condition(Condition::eq("channel", "collect"))
        .add_condition(Condition::gt("amount", 20000))
    }

    /// Rules shipped with the engine, in priority order
    pub fn builtin() -> Vec<Rule> {
        vec![Rule::refund_scam_collect()]
    }

    /// Whether every condition holds for the transaction
    pub fn matches(&self, txn: &ValidatedTransaction) -> bool {
        self.conditions.iter().all(|c| c.matches(txn))
    }
}

/// On-disk rule file
///
/// ```yaml
/// rules:
///   - id: remote_access_new_payee
///     name: Remote access to new payee
///     reason: "RuleEngine: Remote access app active while paying a new counterparty"
///     conditions:
///       - { field: is_remote_access_app_running, op: eq, value: true }
///       - { field: is_new_counterparty, op: eq, value: true }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleFile {
    #[serde(default)]
    pub rules: Vec<Rule>,
}
