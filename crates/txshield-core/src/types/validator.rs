//! Transaction schema validation
//!
//! Checks the required fields in [`REQUIRED_FIELDS`](crate::REQUIRED_FIELDS) order and stops at the first
//! failure. A field is missing when it is absent or `null`; `0`, `false` and `""`
//! are present values.

use super::transaction::{Channel, TransactionRequest, ValidatedTransaction};
use serde_json::{Map, Value};
use thiserror::Error;

/// Validation error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Required field absent or null
    #[error("Missing field in request body: {field}")]
    MissingField { field: String },

    /// Required field present with the wrong type or an out-of-range value
    #[error("Invalid field in request body: {field} (expected {expected}, got {actual})")]
    InvalidField {
        field: String,
        expected: &'static str,
        actual: String,
    },

    /// Request body is not a JSON object
    #[error("Request body must be a JSON object, got {actual}")]
    NotAnObject { actual: &'static str },
}

impl ValidationError {
    /// Name of the offending field, if the error concerns one
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::MissingField { field } | ValidationError::InvalidField { field, .. } => {
                Some(field)
            }
            ValidationError::NotAnObject { .. } => None,
        }
    }
}

/// Validate a raw transaction record
///
/// On success the record is moved, unchanged, into the returned
/// [`ValidatedTransaction`].
pub fn validate(record: Value) -> Result<ValidatedTransaction, ValidationError> {
    let obj = match record {
        Value::Object(obj) => obj,
        other => {
            return Err(ValidationError::NotAnObject {
                actual: type_name(&other),
            })
        }
    };

    let request = {
        let r = FieldReader { obj: &obj };
        // Initialisers run top to bottom, which keeps REQUIRED_FIELDS order.
        TransactionRequest {
            amount: r.non_negative_number("amount")?,
            is_new_counterparty: r.boolean("is_new_counterparty")?,
            device_change: r.boolean("device_change")?,
            location_change: r.boolean("location_change")?,
            channel: Channel::parse(r.string("channel")?),
            page_context: r.string("page_context")?.to_string(),
            requires_pin: r.boolean("requires_pin")?,
            anomaly_score: r.number("anomaly_score")?,
            sender_in_degree_7d: r.count("sender_in_degree_7d")?,
            sender_out_degree_7d: r.count("sender_out_degree_7d")?,
            sender_in_out_ratio: r.number("sender_in_out_ratio")?,
            fake_claim_count_user_7d: r.count("fake_claim_count_user_7d")?,
            is_screen_recording_on: r.boolean("is_screen_recording_on")?,
            is_remote_access_app_running: r.boolean("is_remote_access_app_running")?,
            is_call_active_during_payment: r.boolean("is_call_active_during_payment")?,
        }
    };

    Ok(ValidatedTransaction::new(request, obj))
}

struct FieldReader<'a> {
    obj: &'a Map<String, Value>,
}

impl<'a> FieldReader<'a> {
    fn present(&self, field: &str) -> Result<&'a Value, ValidationError> {
        match self.obj.get(field) {
            None | Some(Value::Null) => Err(ValidationError::MissingField {
                field: field.to_string(),
            }),
            Some(value) => Ok(value),
        }
    }

    fn number(&self, field: &str) -> Result<f64, ValidationError> {
        let value = self.present(field)?;
        value
            .as_f64()
            .ok_or_else(|| invalid(field, "number", value))
    }

    fn non_negative_number(&self, field: &str) -> Result<f64, ValidationError> {
        let n = self.number(field)?;
        if n < 0.0 {
            return Err(ValidationError::InvalidField {
                field: field.to_string(),
                expected: "non-negative number",
                actual: n.to_string(),
            });
        }
        Ok(n)
    }

    fn count(&self, field: &str) -> Result<u64, ValidationError> {
        let value = self.present(field)?;
        if let Some(n) = value.as_u64() {
            return Ok(n);
        }
        match value.as_f64() {
            Some(f) if f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => Ok(f as u64),
            _ => Err(invalid(field, "non-negative integer", value)),
        }
    }

    fn boolean(&self, field: &str) -> Result<bool, ValidationError> {
        let value = self.present(field)?;
        value
            .as_bool()
            .ok_or_else(|| invalid(field, "boolean", value))
    }

    fn string(&self, field: &str) -> Result<&'a str, ValidationError> {
        let value = self.present(field)?;
        value
            .as_str()
            .ok_or_else(|| invalid(field, "string", value))
    }
}

fn invalid(field: &str, expected: &'static str, value: &Value) -> ValidationError {
    let actual = match value {
        Value::Number(n) => n.to_string(),
        other => type_name(other).to_string(),
    };
    ValidationError::InvalidField {
        field: field.to_string(),
        expected,
        actual,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::transaction::REQUIRED_FIELDS;
    use serde_json::json;

    fn valid_record() -> Value {
        json!({
            "amount": 1500.0,
            "is_new_counterparty": true,
            "device_change": false,
            "location_change": false,
            "channel": "pay",
            "page_context": "home",
            "requires_pin": true,
            "anomaly_score": 0.12,
            "sender_in_degree_7d": 3,
            "sender_out_degree_7d": 5,
            "sender_in_out_ratio": 0.6,
            "fake_claim_count_user_7d": 0,
            "is_screen_recording_on": false,
            "is_remote_access_app_running": false,
            "is_call_active_during_payment": false
        })
    }

    fn without(field: &str) -> Value {
        let mut record = valid_record();
        record.as_object_mut().unwrap().remove(field);
        record
    }

    fn with(field: &str, value: Value) -> Value {
        let mut record = valid_record();
        record.as_object_mut().unwrap().insert(field.to_string(), value);
        record
    }

    #[test]
    fn test_valid_record() {
        let txn = validate(valid_record()).unwrap();
        let req = txn.request();

        assert_eq!(req.amount, 1500.0);
        assert!(req.is_new_counterparty);
        assert_eq!(req.channel, Channel::Pay);
        assert_eq!(req.page_context, "home");
        assert_eq!(req.sender_in_degree_7d, 3);
        assert_eq!(req.sender_out_degree_7d, 5);
        assert_eq!(req.fake_claim_count_user_7d, 0);
    }

    #[test]
    fn test_each_missing_field_is_named() {
        for field in REQUIRED_FIELDS {
            let err = validate(without(field)).unwrap_err();
            assert_eq!(
                err,
                ValidationError::MissingField {
                    field: field.to_string()
                }
            );
            assert_eq!(err.to_string(), format!("Missing field in request body: {}", field));
        }
    }

    #[test]
    fn test_null_counts_as_missing() {
        let err = validate(with("device_change", Value::Null)).unwrap_err();
        assert_eq!(err.field(), Some("device_change"));
        assert!(matches!(err, ValidationError::MissingField { .. }));
    }

    #[test]
    fn test_first_missing_field_wins() {
        let mut record = valid_record();
        let obj = record.as_object_mut().unwrap();
        obj.remove("sender_in_out_ratio");
        obj.remove("channel");
        obj.remove("is_call_active_during_payment");

        let err = validate(record).unwrap_err();
        assert_eq!(err.field(), Some("channel"));
    }

    #[test]
    fn test_falsy_values_are_present() {
        let mut record = valid_record();
        let obj = record.as_object_mut().unwrap();
        obj.insert("amount".to_string(), json!(0));
        obj.insert("page_context".to_string(), json!(""));
        obj.insert("channel".to_string(), json!(""));
        obj.insert("anomaly_score".to_string(), json!(0.0));
        obj.insert("requires_pin".to_string(), json!(false));

        let txn = validate(record).unwrap();
        assert_eq!(txn.request().amount, 0.0);
        assert_eq!(txn.request().page_context, "");
        assert_eq!(txn.request().channel, Channel::Other(String::new()));
    }

    #[test]
    fn test_wrong_type_is_invalid() {
        let err = validate(with("requires_pin", json!("yes"))).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidField {
                field: "requires_pin".to_string(),
                expected: "boolean",
                actual: "string".to_string(),
            }
        );

        let err = validate(with("amount", json!("100"))).unwrap_err();
        assert_eq!(err.field(), Some("amount"));
    }

    #[test]
    fn test_negative_amount_is_invalid() {
        let err = validate(with("amount", json!(-1))).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidField { ref field, .. } if field == "amount"));
    }

    #[test]
    fn test_counts_accept_integral_floats() {
        let txn = validate(with("sender_in_degree_7d", json!(4.0))).unwrap();
        assert_eq!(txn.request().sender_in_degree_7d, 4);
    }

    #[test]
    fn test_counts_reject_fractions_and_negatives() {
        let err = validate(with("sender_out_degree_7d", json!(2.5))).unwrap_err();
        assert_eq!(err.field(), Some("sender_out_degree_7d"));

        let err = validate(with("fake_claim_count_user_7d", json!(-3))).unwrap_err();
        assert_eq!(err.field(), Some("fake_claim_count_user_7d"));
    }

    #[test]
    fn test_negative_ratio_and_score_are_allowed() {
        let mut record = with("sender_in_out_ratio", json!(-0.5));
        record
            .as_object_mut()
            .unwrap()
            .insert("anomaly_score".to_string(), json!(-0.1));
        assert!(validate(record).is_ok());
    }

    #[test]
    fn test_not_an_object() {
        let err = validate(json!([1, 2, 3])).unwrap_err();
        assert_eq!(err, ValidationError::NotAnObject { actual: "array" });
        assert!(err.field().is_none());
    }

    #[test]
    fn test_extra_fields_are_preserved() {
        let record = with("merchant_id", json!("m-42"));
        let txn = validate(record.clone()).unwrap();

        assert_eq!(txn.field("merchant_id"), Some(&json!("m-42")));
        assert_eq!(Value::Object(txn.into_payload()), record);
    }
}
