//! Validation error types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Error produced by the validation engine.
///
/// Two categories share one type: specification errors (a malformed rule
/// directive, an unusable parameter, an unknown rule name) and data
/// violations (a field missing, invalid, or conflicting). Callers are not
/// expected to branch on the category; the message text carries the
/// diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    /// The rule specification itself is unusable.
    #[error("{message}")]
    InvalidRule {
        /// Human-readable description of the specification problem
        message: String,
    },
    /// The input data violated a rule.
    #[error("{message}")]
    Violation {
        /// Lowercased rule code (e.g. "min", "required", "requiredwithout")
        code: String,
        /// Human-readable error message
        message: String,
    },
}

impl ValidationError {
    /// Create a specification error.
    pub fn invalid_rule(message: impl Into<String>) -> Self {
        Self::InvalidRule {
            message: message.into(),
        }
    }

    /// Create a data violation tagged with a rule code.
    pub fn violation(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Violation {
            code: code.into(),
            message: message.into(),
        }
    }

    /// The human-readable message.
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidRule { message } => message,
            Self::Violation { message, .. } => message,
        }
    }

    /// The rule code for a data violation, `None` for specification errors.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::InvalidRule { .. } => None,
            Self::Violation { code, .. } => Some(code),
        }
    }

    /// Replace the message, keeping the category and code.
    pub(crate) fn with_message(self, message: impl Into<String>) -> Self {
        match self {
            Self::InvalidRule { .. } => Self::InvalidRule {
                message: message.into(),
            },
            Self::Violation { code, .. } => Self::Violation {
                code,
                message: message.into(),
            },
        }
    }
}

/// Trait for translating default validation messages.
///
/// Implementations typically wrap a localized-message store. The engine
/// consults a translator only after the custom-message map missed; a `None`
/// return falls back to the rule's built-in wording.
pub trait Translator: Send + Sync {
    /// Translate the default message for a rule code on a field.
    ///
    /// # Arguments
    ///
    /// * `code` - The lowercased rule code (e.g. "min", "email")
    /// * `field` - The field name being reported
    /// * `params` - Parameters the default message would interpolate
    fn translate(
        &self,
        code: &str,
        field: &str,
        params: Option<&HashMap<String, serde_json::Value>>,
    ) -> Option<String>;
}
