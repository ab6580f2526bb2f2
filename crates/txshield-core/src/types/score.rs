//! Scorer result types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Decision returned by the ML scorer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MlDecision {
    BlockAndAlert,
    Warn,
    Allow,
}

impl MlDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            MlDecision::BlockAndAlert => "BLOCK_AND_ALERT",
            MlDecision::Warn => "WARN",
            MlDecision::Allow => "ALLOW",
        }
    }
}

impl fmt::Display for MlDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MlDecision {
    type Err = ScorePayloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BLOCK_AND_ALERT" => Ok(MlDecision::BlockAndAlert),
            "WARN" => Ok(MlDecision::Warn),
            "ALLOW" => Ok(MlDecision::Allow),
            other => Err(ScorePayloadError::InvalidDecision(other.to_string())),
        }
    }
}

/// Scorer response that does not honour the scoring protocol
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScorePayloadError {
    #[error("scorer response is not a JSON object")]
    NotAnObject,

    #[error("scorer response is missing '{0}'")]
    MissingField(&'static str),

    #[error("scorer returned unknown decision '{0}'")]
    InvalidDecision(String),

    #[error("scorer returned malformed risk_level: {0}")]
    InvalidRiskLevel(String),
}

/// Outcome of one scorer call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub decision: MlDecision,

    /// Categorical level such as "LOW" or "HIGH"; integral levels are kept as text
    pub risk_level: String,

    /// Full scorer response, passed through for audit
    pub raw: Value,
}

impl ScoreResult {
    /// Parse a scorer response body
    ///
    /// `decision` and `risk_level` are mandatory. Nothing is defaulted.
    pub fn from_payload(raw: Value) -> Result<Self, ScorePayloadError> {
        let obj = raw.as_object().ok_or(ScorePayloadError::NotAnObject)?;

        let decision = match obj.get("decision") {
            None | Some(Value::Null) => return Err(ScorePayloadError::MissingField("decision")),
            Some(Value::String(s)) => s.parse::<MlDecision>()?,
            Some(other) => return Err(ScorePayloadError::InvalidDecision(other.to_string())),
        };

        let risk_level = match obj.get("risk_level") {
            None | Some(Value::Null) => return Err(ScorePayloadError::MissingField("risk_level")),
            Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
            Some(Value::Number(n)) if n.is_u64() || n.is_i64() => n.to_string(),
            Some(other) => return Err(ScorePayloadError::InvalidRiskLevel(other.to_string())),
        };

        Ok(Self {
            decision,
            risk_level,
            raw,
        })
    }
}
