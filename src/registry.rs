//! Rule registry: lowercase rule name to cached rule instance.
//!
//! The registry replaces a process-global factory: whoever assembles a
//! validator owns (or shares) one. Rules are built lazily from a fixed,
//! closed table of constructors; every rule constructed by one registry
//! holds the same shared [`Predicates`] instance.

use crate::error::ValidationError;
use crate::predicates::Predicates;
use crate::rules::{
    ArrayRule, BooleanRule, DateTimeRule, EmailRule, EnumRule, IntegerRule, MaxLengthRule, MaxRule,
    MinLengthRule, MinRule, NumericRule, Rule, StringRule,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

/// Lazily populated rule cache with one shared predicates instance.
#[derive(Debug, Default)]
pub struct RuleRegistry {
    enums: HashMap<String, Vec<Value>>,
    predicates: OnceLock<Arc<Predicates>>,
    // Guards first-population only; hits after that are a lock plus a map read.
    cache: Mutex<HashMap<String, Arc<dyn Rule>>>,
}

impl RuleRegistry {
    /// Create a registry with no registered enums.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry whose `enum` rule can resolve the given named
    /// enumerations.
    pub fn with_enums(enums: HashMap<String, Vec<Value>>) -> Self {
        Self {
            enums,
            ..Self::default()
        }
    }

    /// The shared predicates instance, created on first use.
    pub fn predicates(&self) -> Arc<Predicates> {
        self.predicates
            .get_or_init(|| Arc::new(Predicates::with_enums(self.enums.clone())))
            .clone()
    }

    /// Look up (or lazily construct) the rule registered under `name`.
    ///
    /// `name` must already be non-empty, trimmed, and lowercased by the
    /// caller. Returns `Ok(None)` for a well-formed but unregistered name;
    /// callers decide whether that is fatal. Repeat calls for the same name
    /// return the identical cached instance.
    pub fn create(&self, name: &str) -> Result<Option<Arc<dyn Rule>>, ValidationError> {
        if name.is_empty()
            || name != name.trim()
            || name.chars().any(|c| c.is_ascii_uppercase())
        {
            return Err(ValidationError::invalid_rule(
                "Rule name must be non-empty, trimmed, and lowercased",
            ));
        }

        let mut cache = self.cache.lock().expect("rule cache lock poisoned");
        if let Some(rule) = cache.get(name) {
            return Ok(Some(rule.clone()));
        }

        let predicates = self.predicates();
        let rule: Arc<dyn Rule> = match name {
            "string" => Arc::new(StringRule::new(predicates)),
            "integer" => Arc::new(IntegerRule::new(predicates)),
            "numeric" => Arc::new(NumericRule::new(predicates)),
            "boolean" => Arc::new(BooleanRule::new(predicates)),
            "min" => Arc::new(MinRule::new(predicates)),
            "max" => Arc::new(MaxRule::new(predicates)),
            "minlength" => Arc::new(MinLengthRule::new(predicates)),
            "maxlength" => Arc::new(MaxLengthRule::new(predicates)),
            "email" => Arc::new(EmailRule::new(predicates)),
            "datetime" => Arc::new(DateTimeRule::new(predicates)),
            "array" => Arc::new(ArrayRule::new(predicates)),
            "enum" => Arc::new(EnumRule::new(predicates)),
            _ => return Ok(None),
        };

        tracing::trace!(rule = name, "constructed rule instance");
        cache.insert(name.to_string(), rule.clone());
        Ok(Some(rule))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_is_idempotent() {
        let registry = RuleRegistry::new();
        let a = registry.create("min").unwrap().unwrap();
        let b = registry.create("min").unwrap().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn unknown_name_is_none_not_an_error() {
        let registry = RuleRegistry::new();
        assert!(registry.create("telephone").unwrap().is_none());
    }

    #[test]
    fn malformed_names_are_rejected() {
        let registry = RuleRegistry::new();
        for bad in ["", "Min", " min", "min "] {
            let err = registry.create(bad).unwrap_err();
            assert_eq!(
                err.message(),
                "Rule name must be non-empty, trimmed, and lowercased"
            );
        }
    }

    #[test]
    fn rules_share_one_predicates_instance() {
        let registry = RuleRegistry::new();
        let shared = registry.predicates();
        let baseline = Arc::strong_count(&shared);

        registry.create("min").unwrap().unwrap();
        registry.create("email").unwrap().unwrap();

        // Each cached rule holds a clone of the same Arc.
        assert_eq!(Arc::strong_count(&shared), baseline + 2);
        assert!(Arc::ptr_eq(&shared, &registry.predicates()));
    }

    #[test]
    fn enum_table_reaches_the_enum_rule() {
        let mut enums = HashMap::new();
        enums.insert("Status".to_string(), vec![json!("active")]);
        let registry = RuleRegistry::with_enums(enums);

        let rule = registry.create("enum").unwrap().unwrap();
        assert!(rule.check("s", &json!("active"), Some("Status")).is_ok());
        assert!(rule.check("s", &json!("other"), Some("Status")).is_err());
    }
}
