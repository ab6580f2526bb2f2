//! Transaction record types

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// Fields every transaction must carry, in the order the validator checks them.
pub const REQUIRED_FIELDS: &[&str] = &[
    "amount",
    "is_new_counterparty",
    "device_change",
    "location_change",
    "channel",
    "page_context",
    "requires_pin",
    "anomaly_score",
    "sender_in_degree_7d",
    "sender_out_degree_7d",
    "sender_in_out_ratio",
    "fake_claim_count_user_7d",
    "is_screen_recording_on",
    "is_remote_access_app_running",
    "is_call_active_during_payment",
];

/// Payment channel
///
/// Unknown channels are kept verbatim; the scorer decides what they mean.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Channel {
    Collect,
    Pay,
    Transfer,
    Other(String),
}

impl Channel {
    /// Parse a channel name. Matching is case-sensitive.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "collect" => Channel::Collect,
            "pay" => Channel::Pay,
            "transfer" => Channel::Transfer,
            other => Channel::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Channel::Collect => "collect",
            Channel::Pay => "pay",
            Channel::Transfer => "transfer",
            Channel::Other(s) => s,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Channel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Typed view of the required transaction attributes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRequest {
    /// Transaction amount (non-negative)
    pub amount: f64,
    pub is_new_counterparty: bool,
    pub device_change: bool,
    pub location_change: bool,
    pub channel: Channel,
    /// UI screen the payment was started from (e.g. "refund_page")
    pub page_context: String,
    pub requires_pin: bool,
    /// Upstream anomaly detector output, typically 0-1
    pub anomaly_score: f64,
    /// Counterparty graph fan-in over the trailing 7 days
    pub sender_in_degree_7d: u64,
    /// Counterparty graph fan-out over the trailing 7 days
    pub sender_out_degree_7d: u64,
    pub sender_in_out_ratio: f64,
    pub fake_claim_count_user_7d: u64,
    pub is_screen_recording_on: bool,
    pub is_remote_access_app_running: bool,
    pub is_call_active_during_payment: bool,
}

/// A transaction that passed schema validation
///
/// Only [`validate`](crate::validate) builds one. The original JSON object is kept
/// untouched: it is what the scorer receives and what rule conditions read.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedTransaction {
    request: TransactionRequest,
    payload: Map<String, Value>,
}

impl ValidatedTransaction {
    pub(crate) fn new(request: TransactionRequest, payload: Map<String, Value>) -> Self {
        Self { request, payload }
    }

    /// Typed required attributes
    pub fn request(&self) -> &TransactionRequest {
        &self.request
    }

    /// The original record, including any extra context fields
    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    /// Look up a raw field of the original record
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.payload.get(name)
    }

    pub fn into_payload(self) -> Map<String, Value> {
        self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_parse_known() {
        assert_eq!(Channel::parse("collect"), Channel::Collect);
        assert_eq!(Channel::parse("pay"), Channel::Pay);
        assert_eq!(Channel::parse("transfer"), Channel::Transfer);
    }

    #[test]
    fn test_channel_parse_is_case_sensitive() {
        assert_eq!(Channel::parse("COLLECT"), Channel::Other("COLLECT".to_string()));
        assert_eq!(Channel::parse("COLLECT").as_str(), "COLLECT");
    }

    #[test]
    fn test_channel_serializes_as_plain_string() {
        let json = serde_json::to_value(Channel::Collect).unwrap();
        assert_eq!(json, serde_json::json!("collect"));

        let json = serde_json::to_value(Channel::Other("qr".to_string())).unwrap();
        assert_eq!(json, serde_json::json!("qr"));
    }

    #[test]
    fn test_required_fields_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for field in REQUIRED_FIELDS {
            assert!(seen.insert(*field), "duplicate required field {}", field);
        }
        assert_eq!(REQUIRED_FIELDS.len(), 15);
    }
}
