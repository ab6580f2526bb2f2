//! Rule conditions

use crate::types::ValidatedTransaction;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// Equal (==)
    Eq,
    /// Not equal (!=)
    Ne,
    /// Greater than (>)
    Gt,
    /// Greater than or equal (>=)
    Ge,
    /// Less than (<)
    Lt,
    /// Less than or equal (<=)
    Le,
    /// Field value is one of the listed literals
    In,
    /// Field value is none of the listed literals
    NotIn,
}

impl Operator {
    /// Returns true for the numeric ordering operators
    pub fn is_ordering(&self) -> bool {
        matches!(self, Operator::Gt | Operator::Ge | Operator::Lt | Operator::Le)
    }

    /// Returns true for the membership operators
    pub fn is_membership(&self) -> bool {
        matches!(self, Operator::In | Operator::NotIn)
    }
}

/// A single comparison between a transaction field and a literal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Field name, or a dotted path into nested context objects
    pub field: String,

    #[serde(rename = "op")]
    pub operator: Operator,

    pub value: Value,
}

impl Condition {
    pub fn new(field: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, Operator::Eq, value)
    }

    pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, Operator::Gt, value)
    }

    /// Evaluate against a transaction
    ///
    /// An absent field or a type mismatch never matches.
    pub fn matches(&self, txn: &ValidatedTransaction) -> bool {
        match lookup(txn, &self.field) {
            Some(actual) => compare(actual, self.operator, &self.value),
            None => false,
        }
    }

    /// Structural problem with this condition, if any
    pub(crate) fn check(&self) -> Option<String> {
        if self.field.trim().is_empty() {
            return Some("condition has an empty field name".to_string());
        }
        if self.operator.is_ordering() && !self.value.is_number() {
            return Some(format!(
                "operator {:?} on '{}' needs a numeric value, got {}",
                self.operator, self.field, self.value
            ));
        }
        if self.operator.is_membership() && !self.value.is_array() {
            return Some(format!(
                "operator {:?} on '{}' needs a list value, got {}",
                self.operator, self.field, self.value
            ));
        }
        None
    }
}

fn lookup<'a>(txn: &'a ValidatedTransaction, field: &str) -> Option<&'a Value> {
    if let Some(value) = txn.field(field) {
        return Some(value);
    }
    let mut parts = field.split('.');
    let mut current = txn.field(parts.next()?)?;
    for part in parts {
        current = current.as_object()?.get(part)?;
    }
    Some(current)
}

fn compare(actual: &Value, operator: Operator, expected: &Value) -> bool {
    match operator {
        Operator::Eq => values_equal(actual, expected),
        Operator::Ne => !values_equal(actual, expected),
        Operator::Gt | Operator::Ge | Operator::Lt | Operator::Le => {
            let (Some(a), Some(b)) = (actual.as_f64(), expected.as_f64()) else {
                return false;
            };
            match operator {
                Operator::Gt => a > b,
                Operator::Ge => a >= b,
                Operator::Lt => a < b,
                _ => a <= b,
            }
        }
        Operator::In => expected
            .as_array()
            .is_some_and(|items| items.iter().any(|item| values_equal(actual, item))),
        Operator::NotIn => expected
            .as_array()
            .is_some_and(|items| !items.iter().any(|item| values_equal(actual, item))),
    }
}

// Numbers compare by value so that 20000 and 20000.0 are equal.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}
