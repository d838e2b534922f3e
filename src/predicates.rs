//! Primitive type and format predicates.
//!
//! Stateless checks the concrete rules delegate to. One instance is shared
//! (via `Arc`) by every rule a registry constructs.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;

// Pre-compiled regex patterns
static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| {
        // RFC 5322 simplified email regex
        Regex::new(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
        ).unwrap()
    })
}

// Formats accepted by the parameterless datetime check, tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Shared primitive predicates.
///
/// Carries the registered enumeration table; everything else is stateless.
#[derive(Debug, Default)]
pub struct Predicates {
    enums: HashMap<String, Vec<Value>>,
}

impl Predicates {
    /// Create predicates with no registered enums.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create predicates with a table of named enumerations.
    pub fn with_enums(enums: HashMap<String, Vec<Value>>) -> Self {
        Self { enums }
    }

    /// Value is a string.
    pub fn is_string(&self, value: &Value) -> bool {
        value.is_string()
    }

    /// Value is a boolean.
    pub fn is_boolean(&self, value: &Value) -> bool {
        value.is_boolean()
    }

    /// Integer or integer-like numeric string.
    pub fn is_integer(&self, value: &Value) -> bool {
        match value {
            Value::Number(n) => n.is_i64() || n.is_u64(),
            Value::String(s) => s.trim().parse::<i64>().is_ok(),
            _ => false,
        }
    }

    /// Exactly an integer, no string coercion.
    pub fn is_strict_integer(&self, value: &Value) -> bool {
        matches!(value, Value::Number(n) if n.is_i64() || n.is_u64())
    }

    /// Integer, float, or numeric string.
    pub fn is_numeric(&self, value: &Value) -> bool {
        self.numeric_value(value).is_some()
    }

    /// Numeric interpretation of a value, if it has one.
    pub fn numeric_value(&self, value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Email-address shape.
    pub fn is_email(&self, value: &str) -> bool {
        email_regex().is_match(value)
    }

    /// Recognized date-time string: RFC 3339 or one of a few common
    /// layouts, including a bare date.
    pub fn is_datetime(&self, value: &str) -> bool {
        let value = value.trim();
        if DateTime::parse_from_rfc3339(value).is_ok() {
            return true;
        }
        if DATETIME_FORMATS
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(value, fmt).is_ok())
        {
            return true;
        }
        NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
    }

    /// Strict match against an explicit chrono format string.
    ///
    /// The format may describe a date-time, a date, or a time; the value
    /// must parse fully under it.
    pub fn matches_datetime_format(&self, value: &str, format: &str) -> bool {
        NaiveDateTime::parse_from_str(value, format).is_ok()
            || NaiveDate::parse_from_str(value, format).is_ok()
            || NaiveTime::parse_from_str(value, format).is_ok()
    }

    /// Array/list or map-like container.
    pub fn is_array_like(&self, value: &Value) -> bool {
        matches!(value, Value::Array(_) | Value::Object(_))
    }

    /// Values of a registered enumeration, if one exists under `name`.
    pub fn enum_values(&self, name: &str) -> Option<&[Value]> {
        self.enums.get(name).map(|v| v.as_slice())
    }
}
