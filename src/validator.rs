//! Validation orchestration.
//!
//! A [`Validator`] compiles its rule specification once, then checks
//! payloads field by field in declaration order, failing fast on the first
//! violation. The `required` / `nullable` / `requiredWithout` control
//! directives are interpreted here rather than dispatched to the registry;
//! `requiredWithout` constraints across fields are resolved as a dependency
//! cluster so one coherent message reports the whole group.

use crate::access::DataAccessor;
use crate::error::{Translator, ValidationError};
use crate::registry::RuleRegistry;
use crate::ruleset::{CompiledRules, MetaRule, RuleSpec};
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// One side of a `requiredWithout` dependency cluster: the maximal group of
/// fields sharing an identical target set. Members are jointly required;
/// the first-declared member names the side in messages.
#[derive(Debug)]
struct Side {
    members: Vec<String>,
    targets: BTreeSet<String>,
    satisfied: bool,
}

/// Validates payloads against a compiled rule specification.
///
/// ## Example
///
/// ```
/// use payload_validate::{RuleSpec, Validator};
/// use serde_json::json;
///
/// let validator = Validator::new(
///     RuleSpec::new().field("Age", ["nullable", "integer", "min:18"]),
/// ).unwrap();
///
/// assert!(validator.validate(&json!({"Age": null})).is_ok());
/// let err = validator.validate(&json!({"Age": 17})).unwrap_err();
/// assert_eq!(err.message(), "Field 'Age' must have a minimum value of 18.");
/// ```
pub struct Validator {
    rules: CompiledRules,
    registry: Arc<RuleRegistry>,
    messages: HashMap<String, String>,
    translator: Option<Arc<dyn Translator>>,
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("rules", &self.rules)
            .field("registry", &self.registry)
            .field("messages", &self.messages)
            .field("translator", &self.translator.as_ref().map(|_| ".."))
            .finish()
    }
}

impl Validator {
    /// Compile a specification against a fresh registry.
    pub fn new(spec: RuleSpec) -> Result<Self, ValidationError> {
        Self::with_registry(spec, Arc::new(RuleRegistry::new()))
    }

    /// Compile a specification against a shared registry (e.g. one carrying
    /// registered enums, or shared across validators).
    pub fn with_registry(
        spec: RuleSpec,
        registry: Arc<RuleRegistry>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            rules: CompiledRules::compile(spec)?,
            registry,
            messages: HashMap::new(),
            translator: None,
        })
    }

    /// Set custom messages, keyed `"{field}.{ruleName}"`. The field portion
    /// matches case-sensitively, the rule portion case-insensitively; a hit
    /// replaces the generated message verbatim.
    pub fn messages(mut self, messages: HashMap<String, String>) -> Self {
        self.messages = messages;
        self
    }

    /// Set a translator consulted for default messages after the custom
    /// message map missed.
    pub fn translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    /// The compiled rules, read-only.
    pub fn rules(&self) -> &CompiledRules {
        &self.rules
    }

    /// Validate a payload.
    ///
    /// Fields are processed in declaration order; the first violation is
    /// returned immediately. On success the returned accessor wraps the
    /// original payload by reference.
    ///
    /// # Errors
    ///
    /// The first specification error or data violation encountered.
    pub fn validate<'a>(&self, data: &'a Value) -> Result<DataAccessor<'a>, ValidationError> {
        let accessor = DataAccessor::new(data);

        // Dependency-cluster state is a pure function of the specification
        // and the payload; recomputed per call, discarded after.
        let sides = self.build_sides(&accessor);
        let satisfied = sides.iter().filter(|s| s.satisfied).count();
        let mut cluster_resolved = sides.is_empty();

        for (field, metas) in self.rules.fields() {
            let nullable = metas.iter().any(|m| m.is_named("nullable"));
            let required = metas.iter().any(|m| m.is_named("required"));

            if required && !accessor.has_field(field) {
                let err = ValidationError::violation(
                    "required",
                    format!("Required field '{field}' is missing."),
                );
                tracing::debug!(field, "required field missing");
                return Err(self.finalize(field, "required", None, err));
            }

            if !cluster_resolved && metas.iter().any(|m| m.is_named("requiredWithout")) {
                cluster_resolved = true;
                if satisfied != 1 {
                    return Err(self.cluster_error(field, &sides, satisfied));
                }
            }

            let value = match accessor.resolve(field) {
                Some(v) => v,
                // Absent and not required: implicitly optional, no rule runs.
                None => continue,
            };

            // nullable exempts downstream rules, never the required check.
            if value.is_null() && nullable {
                continue;
            }

            for meta in metas {
                match meta {
                    MetaRule::Standard { name, param } => {
                        let key = name.trim().to_ascii_lowercase();
                        if matches!(key.as_str(), "nullable" | "required" | "requiredwithout") {
                            continue;
                        }
                        let rule = self.registry.create(&key)?.ok_or_else(|| {
                            ValidationError::invalid_rule(format!(
                                "Unknown validation rule '{name}'."
                            ))
                        })?;
                        if let Err(err) = rule.check(field, value, param.as_deref()) {
                            tracing::debug!(field, rule = %name, "validation failed");
                            return Err(self.finalize(field, name, param.as_deref(), err));
                        }
                    }
                    MetaRule::Custom { predicate } => {
                        if !predicate(value) {
                            tracing::debug!(field, "custom predicate failed");
                            return Err(ValidationError::violation(
                                "custom",
                                format!("Field '{field}' failed custom validation."),
                            ));
                        }
                    }
                }
            }
        }

        Ok(accessor)
    }

    /// Partition `requiredWithout`-declaring fields into sides by identical
    /// target set, in declaration order, and mark each side satisfied when
    /// every member is present.
    fn build_sides(&self, accessor: &DataAccessor<'_>) -> Vec<Side> {
        let mut sides: Vec<Side> = Vec::new();

        for (field, metas) in self.rules.fields() {
            let mut targets = BTreeSet::new();
            let mut declares = false;

            for meta in metas {
                if let MetaRule::Standard { name, param } = meta {
                    if name.trim().eq_ignore_ascii_case("requiredwithout") {
                        declares = true;
                        if let Some(target) = param.as_deref().map(str::trim) {
                            if !target.is_empty() && target != field {
                                targets.insert(target.to_string());
                            }
                        }
                    }
                }
            }

            if !declares {
                continue;
            }

            match sides.iter_mut().find(|s| s.targets == targets) {
                Some(side) => side.members.push(field.to_string()),
                None => sides.push(Side {
                    members: vec![field.to_string()],
                    targets,
                    satisfied: false,
                }),
            }
        }

        for side in &mut sides {
            side.satisfied = side.members.iter().all(|m| accessor.has_field(m));
        }
        sides
    }

    /// Build the one message reporting a dependency cluster, named by side
    /// representatives. `current` picks the leading side.
    fn cluster_error(&self, current: &str, sides: &[Side], satisfied: usize) -> ValidationError {
        let lead = sides
            .iter()
            .position(|s| s.members.iter().any(|m| m == current))
            .unwrap_or(0);
        let repr = sides[lead].members[0].as_str();
        let others: Vec<&str> = sides
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != lead)
            .map(|(_, s)| s.members[0].as_str())
            .collect();

        if let Some(custom) = self.custom_message(repr, "requiredWithout") {
            return ValidationError::violation("requiredwithout", custom.clone());
        }

        let message = match (satisfied, others.as_slice()) {
            (0, []) => format!("Field '{repr}' must be present."),
            (0, [other]) => format!("Either field '{repr}' or '{other}' must be present."),
            (0, rest) => format!(
                "Either field '{repr}' or one of {} must be present.",
                quoted_list(rest)
            ),
            (_, [other]) => format!("Only one of fields '{repr}' or '{other}' can be present."),
            (_, rest) => format!(
                "Only one of fields '{repr}' or one of {} can be present.",
                quoted_list(rest)
            ),
        };
        ValidationError::violation("requiredwithout", message)
    }

    /// Resolve the final message for a failing rule: custom-message map,
    /// then translator, then the rule's own wording.
    fn finalize(
        &self,
        field: &str,
        declared: &str,
        param: Option<&str>,
        err: ValidationError,
    ) -> ValidationError {
        if let Some(custom) = self.custom_message(field, declared) {
            return err.with_message(custom.clone());
        }

        if let (Some(translator), Some(code)) = (&self.translator, err.code()) {
            let params = param.map(|p| {
                let mut map = HashMap::new();
                map.insert("param".to_string(), Value::String(p.to_string()));
                map
            });
            if let Some(text) = translator.translate(code, field, params.as_ref()) {
                return err.with_message(text);
            }
        }

        err
    }

    /// Custom-message lookup: field part before the first separator exact,
    /// rule part after it case-insensitive.
    fn custom_message(&self, field: &str, declared: &str) -> Option<&String> {
        self.messages.iter().find_map(|(key, text)| {
            let (key_field, key_rule) = key.split_once('.')?;
            (key_field == field && key_rule.eq_ignore_ascii_case(declared)).then_some(text)
        })
    }
}

/// Comma-joined single-quoted names: `'b', 'c'`.
fn quoted_list(names: &[&str]) -> String {
    names
        .iter()
        .map(|n| format!("'{n}'"))
        .collect::<Vec<_>>()
        .join(", ")
}
