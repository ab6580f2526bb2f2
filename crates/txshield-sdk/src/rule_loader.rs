//! Rule file loading

use crate::error::{Result, SdkError};
use std::path::Path;
use txshield_core::{Rule, RuleFile};

/// Load rules from a YAML rule file
pub async fn load_rule_file(path: impl AsRef<Path>) -> Result<Vec<Rule>> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        SdkError::InvalidRuleFile {
            path: path.display().to_string(),
            message: e.to_string(),
        }
    })?;

    let rules = parse_rules(&path.display().to_string(), &content)?;
    tracing::info!("Loaded {} rule(s) from {}", rules.len(), path.display());
    Ok(rules)
}

/// Parse rules from YAML content
///
/// `source` names the content in error messages.
pub fn parse_rules(source: &str, content: &str) -> Result<Vec<Rule>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    let file: RuleFile =
        serde_yaml::from_str(content).map_err(|e| SdkError::InvalidRuleFile {
            path: source.to_string(),
            message: e.to_string(),
        })?;
    Ok(file.rules)
}
