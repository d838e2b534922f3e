//! Concrete validation rules.
//!
//! Each rule is an independent check over one field value, delegating type
//! and format tests to the shared [`Predicates`] instance. A bad parameter
//! surfaces as the same error type as a data violation; only the message
//! differs.
//!
//! `required`, `nullable`, and `requiredWithout` are control directives
//! interpreted by the validator and have no rule here.

use crate::error::ValidationError;
use crate::predicates::Predicates;
use serde_json::Value;
use std::fmt::Debug;
use std::sync::Arc;

/// Contract for a named validation rule.
///
/// `check` is side-effect free: it succeeds, or fails with a formatted,
/// code-tagged error.
pub trait Rule: Debug + Send + Sync {
    /// The registry key for this rule (lowercase).
    fn name(&self) -> &'static str;

    /// Validate one field value against this rule.
    fn check(&self, field: &str, value: &Value, param: Option<&str>) -> Result<(), ValidationError>;
}

macro_rules! rule_struct {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug)]
        pub struct $name {
            predicates: Arc<Predicates>,
        }

        impl $name {
            /// Create the rule over a shared predicates instance.
            pub fn new(predicates: Arc<Predicates>) -> Self {
                Self { predicates }
            }
        }
    };
}

rule_struct! {
    /// Value must be a string.
    StringRule
}

impl Rule for StringRule {
    fn name(&self) -> &'static str {
        "string"
    }

    fn check(&self, field: &str, value: &Value, _param: Option<&str>) -> Result<(), ValidationError> {
        if self.predicates.is_string(value) {
            Ok(())
        } else {
            Err(ValidationError::violation(
                self.name(),
                format!("Field '{field}' must be a string."),
            ))
        }
    }
}

rule_struct! {
    /// Value must be an integer.
    ///
    /// Without a parameter, integer-like values (integers and integer
    /// strings) pass. With the `strict` parameter, only an actual integer
    /// passes. Any other parameter is a misuse of the rule.
    IntegerRule
}

impl Rule for IntegerRule {
    fn name(&self) -> &'static str {
        "integer"
    }

    fn check(&self, field: &str, value: &Value, param: Option<&str>) -> Result<(), ValidationError> {
        match param {
            None => {
                if self.predicates.is_integer(value) {
                    Ok(())
                } else {
                    Err(ValidationError::violation(
                        self.name(),
                        format!("Field '{field}' must be an integer."),
                    ))
                }
            }
            Some(p) if p.eq_ignore_ascii_case("strict") => {
                if self.predicates.is_strict_integer(value) {
                    Ok(())
                } else {
                    Err(ValidationError::violation(
                        self.name(),
                        format!("Field '{field}' must be of type integer."),
                    ))
                }
            }
            Some(p) => Err(ValidationError::invalid_rule(format!(
                "The 'integer' rule accepts no parameter or 'strict', got '{p}'."
            ))),
        }
    }
}

rule_struct! {
    /// Value must be numeric: an integer, a float, or a numeric string.
    NumericRule
}

impl Rule for NumericRule {
    fn name(&self) -> &'static str {
        "numeric"
    }

    fn check(&self, field: &str, value: &Value, _param: Option<&str>) -> Result<(), ValidationError> {
        if self.predicates.is_numeric(value) {
            Ok(())
        } else {
            Err(ValidationError::violation(
                self.name(),
                format!("Field '{field}' must be numeric."),
            ))
        }
    }
}

rule_struct! {
    /// Value must be a boolean.
    BooleanRule
}

impl Rule for BooleanRule {
    fn name(&self) -> &'static str {
        "boolean"
    }

    fn check(&self, field: &str, value: &Value, _param: Option<&str>) -> Result<(), ValidationError> {
        if self.predicates.is_boolean(value) {
            Ok(())
        } else {
            Err(ValidationError::violation(
                self.name(),
                format!("Field '{field}' must be a boolean."),
            ))
        }
    }
}

rule_struct! {
    /// Numeric value must be at least the parameter.
    MinRule
}

impl Rule for MinRule {
    fn name(&self) -> &'static str {
        "min"
    }

    fn check(&self, field: &str, value: &Value, param: Option<&str>) -> Result<(), ValidationError> {
        let raw = param.map_or("", str::trim);
        let min: f64 = raw.parse().map_err(|_| {
            ValidationError::invalid_rule("The 'min' rule requires a numeric parameter.")
        })?;

        match self.predicates.numeric_value(value) {
            Some(n) if n >= min => Ok(()),
            _ => Err(ValidationError::violation(
                self.name(),
                format!("Field '{field}' must have a minimum value of {raw}."),
            )),
        }
    }
}

rule_struct! {
    /// Numeric value must be at most the parameter.
    MaxRule
}

impl Rule for MaxRule {
    fn name(&self) -> &'static str {
        "max"
    }

    fn check(&self, field: &str, value: &Value, param: Option<&str>) -> Result<(), ValidationError> {
        let raw = param.map_or("", str::trim);
        let max: f64 = raw.parse().map_err(|_| {
            ValidationError::invalid_rule("The 'max' rule requires a numeric parameter.")
        })?;

        match self.predicates.numeric_value(value) {
            Some(n) if n <= max => Ok(()),
            _ => Err(ValidationError::violation(
                self.name(),
                format!("Field '{field}' must have a maximum value of {raw}."),
            )),
        }
    }
}

fn integer_param(param: Option<&str>, rule: &str) -> Result<usize, ValidationError> {
    param
        .and_then(|p| p.trim().parse().ok())
        .ok_or_else(|| {
            ValidationError::invalid_rule(format!("The '{rule}' rule requires an integer parameter."))
        })
}

rule_struct! {
    /// String length, in characters, must be at least the parameter.
    MinLengthRule
}

impl Rule for MinLengthRule {
    fn name(&self) -> &'static str {
        "minlength"
    }

    fn check(&self, field: &str, value: &Value, param: Option<&str>) -> Result<(), ValidationError> {
        let min = integer_param(param, "minLength")?;
        if !self.predicates.is_string(value) {
            return Err(ValidationError::violation(
                self.name(),
                format!("Field '{field}' must be a string."),
            ));
        }

        let len = value.as_str().map_or(0, |s| s.chars().count());
        if len >= min {
            Ok(())
        } else {
            Err(ValidationError::violation(
                self.name(),
                format!("Field '{field}' must be at least {min} characters long."),
            ))
        }
    }
}

rule_struct! {
    /// String length, in characters, must be at most the parameter.
    MaxLengthRule
}

impl Rule for MaxLengthRule {
    fn name(&self) -> &'static str {
        "maxlength"
    }

    fn check(&self, field: &str, value: &Value, param: Option<&str>) -> Result<(), ValidationError> {
        let max = integer_param(param, "maxLength")?;
        if !self.predicates.is_string(value) {
            return Err(ValidationError::violation(
                self.name(),
                format!("Field '{field}' must be a string."),
            ));
        }

        let len = value.as_str().map_or(0, |s| s.chars().count());
        if len <= max {
            Ok(())
        } else {
            Err(ValidationError::violation(
                self.name(),
                format!("Field '{field}' must be at most {max} characters long."),
            ))
        }
    }
}

rule_struct! {
    /// Value must have email-address shape.
    EmailRule
}

impl Rule for EmailRule {
    fn name(&self) -> &'static str {
        "email"
    }

    fn check(&self, field: &str, value: &Value, _param: Option<&str>) -> Result<(), ValidationError> {
        match value.as_str() {
            Some(s) if self.predicates.is_email(s) => Ok(()),
            _ => Err(ValidationError::violation(
                self.name(),
                format!("Field '{field}' must be a valid email address."),
            )),
        }
    }
}

rule_struct! {
    /// Value must be a recognized date-time string, or match an explicit
    /// format when one is given as the parameter.
    DateTimeRule
}

impl Rule for DateTimeRule {
    fn name(&self) -> &'static str {
        "datetime"
    }

    fn check(&self, field: &str, value: &Value, param: Option<&str>) -> Result<(), ValidationError> {
        let text = value.as_str();
        match param {
            None => match text {
                Some(s) if self.predicates.is_datetime(s) => Ok(()),
                _ => Err(ValidationError::violation(
                    self.name(),
                    format!("Field '{field}' must be a valid date-time."),
                )),
            },
            Some(format) => match text {
                Some(s) if self.predicates.matches_datetime_format(s, format) => Ok(()),
                _ => Err(ValidationError::violation(
                    self.name(),
                    format!("Field '{field}' must match the date-time format '{format}'."),
                )),
            },
        }
    }
}

rule_struct! {
    /// Value must be an array/list or map-like container.
    ArrayRule
}

impl Rule for ArrayRule {
    fn name(&self) -> &'static str {
        "array"
    }

    fn check(&self, field: &str, value: &Value, _param: Option<&str>) -> Result<(), ValidationError> {
        if self.predicates.is_array_like(value) {
            Ok(())
        } else {
            Err(ValidationError::violation(
                self.name(),
                format!("Field '{field}' must be an array."),
            ))
        }
    }
}

rule_struct! {
    /// Value must equal one of a registered enumeration's values.
    ///
    /// The parameter names the enumeration; it must be registered with the
    /// registry the validator uses.
    EnumRule
}

impl Rule for EnumRule {
    fn name(&self) -> &'static str {
        "enum"
    }

    fn check(&self, field: &str, value: &Value, param: Option<&str>) -> Result<(), ValidationError> {
        let name = param.ok_or_else(|| {
            ValidationError::invalid_rule("The 'enum' rule requires the name of a registered enum.")
        })?;

        let values = self.predicates.enum_values(name).ok_or_else(|| {
            ValidationError::invalid_rule(format!("Enum '{name}' is not registered."))
        })?;

        if values.contains(value) {
            Ok(())
        } else {
            Err(ValidationError::violation(
                self.name(),
                format!("Field '{field}' must be a valid value of enum '{name}'."),
            ))
        }
    }
}
