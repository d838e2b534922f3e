//! End-to-end tests for the validation engine.
//!
//! These exercise the full pipeline: specification compilation, per-field
//! orchestration, dependency clusters, message resolution, and the accessor
//! returned on success.

use payload_validate::prelude::*;
use payload_validate::ruleset::Descriptor;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

fn age_validator() -> Validator {
    Validator::new(RuleSpec::new().field("Age", ["nullable", "integer", "min:18"])).unwrap()
}

#[test]
fn nullable_age_null_passes() {
    let data = json!({"Age": null});
    let validated = age_validator().validate(&data).unwrap();
    assert_eq!(validated.get_field("Age").unwrap(), &Value::Null);
}

#[test]
fn underage_fails_with_min_message() {
    let err = age_validator().validate(&json!({"Age": 17})).unwrap_err();
    assert_eq!(err.message(), "Field 'Age' must have a minimum value of 18.");
}

#[test]
fn absent_non_required_field_passes() {
    // No `required` directive: absence skips the field entirely, so
    // `integer` and `min` never run.
    assert!(age_validator().validate(&json!({})).is_ok());
}

#[test]
fn valid_age_passes_and_accessor_wraps_original() {
    let data = json!({"Age": 30});
    let validated = age_validator().validate(&data).unwrap();
    assert!(std::ptr::eq(validated.data(), &data));
}

#[test]
fn integer_like_string_passes_lenient_integer() {
    assert!(age_validator().validate(&json!({"Age": "21"})).is_ok());
}

#[test]
fn required_missing_fails_regardless_of_nullable() {
    let validator = Validator::new(
        RuleSpec::new().field("name", ["required", "nullable", "string"]),
    )
    .unwrap();

    let err = validator.validate(&json!({})).unwrap_err();
    assert_eq!(err.message(), "Required field 'name' is missing.");

    // Present null with nullable: downstream `string` never runs.
    assert!(validator.validate(&json!({"name": null})).is_ok());
}

#[test]
fn required_missing_honors_custom_message() {
    let validator = Validator::new(RuleSpec::new().field("name", ["required"]))
        .unwrap()
        .messages(HashMap::from([(
            "name.Required".to_string(),
            "We need your name.".to_string(),
        )]));

    let err = validator.validate(&json!({})).unwrap_err();
    assert_eq!(err.message(), "We need your name.");
}

#[test]
fn nullable_without_null_still_validates() {
    let validator =
        Validator::new(RuleSpec::new().field("Age", ["nullable", "integer"])).unwrap();
    let err = validator.validate(&json!({"Age": "abc"})).unwrap_err();
    assert_eq!(err.message(), "Field 'Age' must be an integer.");
}

#[test]
fn first_failure_wins_in_declaration_order() {
    let validator = Validator::new(
        RuleSpec::new()
            .field("a", ["string"])
            .field("b", ["integer"]),
    )
    .unwrap();

    // Both fields invalid; field declaration order decides.
    let err = validator
        .validate(&json!({"a": 1, "b": "x"}))
        .unwrap_err();
    assert_eq!(err.message(), "Field 'a' must be a string.");

    // Within a field, rule declaration order decides.
    let validator =
        Validator::new(RuleSpec::new().field("n", ["integer", "min:10"])).unwrap();
    let err = validator.validate(&json!({"n": "x"})).unwrap_err();
    assert_eq!(err.message(), "Field 'n' must be an integer.");
}

#[test]
fn dotted_fields_reach_nested_values() {
    let validator = Validator::new(
        RuleSpec::new()
            .field("user.age", ["required", "integer", "min:18"])
            .field("user.contact.email", ["email"]),
    )
    .unwrap();

    let ok = json!({"user": {"age": 30, "contact": {"email": "a@b.com"}}});
    assert!(validator.validate(&ok).is_ok());

    let err = validator
        .validate(&json!({"user": {"age": 12}}))
        .unwrap_err();
    assert_eq!(
        err.message(),
        "Field 'user.age' must have a minimum value of 18."
    );

    // Scalar parent: the nested field counts as missing.
    let err = validator.validate(&json!({"user": 42})).unwrap_err();
    assert_eq!(err.message(), "Required field 'user.age' is missing.");
}

#[test]
fn custom_predicate_failure_is_generic() {
    let validator = Validator::new(
        RuleSpec::new().field("flag", Descriptor::predicate(|v| v.is_boolean())),
    )
    .unwrap();

    assert!(validator.validate(&json!({"flag": true})).is_ok());
    let err = validator.validate(&json!({"flag": "yes"})).unwrap_err();
    assert_eq!(err.message(), "Field 'flag' failed custom validation.");
}

#[test]
fn mixed_directives_and_predicate_run_in_order() {
    let validator = Validator::new(RuleSpec::new().field(
        "count",
        vec![
            Descriptor::from("integer"),
            Descriptor::predicate(|v| v.as_i64().is_some_and(|n| n % 2 == 0)),
        ],
    ))
    .unwrap();

    assert!(validator.validate(&json!({"count": 4})).is_ok());
    let err = validator.validate(&json!({"count": 3})).unwrap_err();
    assert_eq!(err.message(), "Field 'count' failed custom validation.");
}

#[test]
fn enum_rule_through_a_shared_registry() {
    let registry = Arc::new(RuleRegistry::with_enums(HashMap::from([(
        "Status".to_string(),
        vec![json!("active"), json!("inactive")],
    )])));

    let validator = Validator::with_registry(
        RuleSpec::new().field("status", ["required", "enum:Status"]),
        registry.clone(),
    )
    .unwrap();

    assert!(validator.validate(&json!({"status": "active"})).is_ok());
    let err = validator.validate(&json!({"status": "gone"})).unwrap_err();
    assert_eq!(
        err.message(),
        "Field 'status' must be a valid value of enum 'Status'."
    );

    // A second validator over the same registry sees the same rules.
    let other = Validator::with_registry(
        RuleSpec::new().field("state", ["enum:Status"]),
        registry,
    )
    .unwrap();
    assert!(other.validate(&json!({"state": "inactive"})).is_ok());
}

#[test]
fn cluster_mixed_with_ordinary_rules() {
    let validator = Validator::new(
        RuleSpec::new()
            .field("phone", ["requiredWithout:email", "string"])
            .field("email", ["requiredWithout:phone", "email"]),
    )
    .unwrap();

    assert!(validator.validate(&json!({"phone": "555-0100"})).is_ok());

    // The cluster is satisfied, then the ordinary rule still applies.
    let err = validator.validate(&json!({"phone": 5550100})).unwrap_err();
    assert_eq!(err.message(), "Field 'phone' must be a string.");

    let err = validator.validate(&json!({})).unwrap_err();
    assert_eq!(
        err.message(),
        "Either field 'phone' or 'email' must be present."
    );
}

#[test]
fn datetime_format_param_keeps_its_colons() {
    let validator = Validator::new(
        RuleSpec::new().field("at", ["datetime:%H:%M:%S"]),
    )
    .unwrap();

    assert!(validator.validate(&json!({"at": "12:30:45"})).is_ok());
    let err = validator.validate(&json!({"at": "12:30"})).unwrap_err();
    assert_eq!(
        err.message(),
        "Field 'at' must match the date-time format '%H:%M:%S'."
    );
}

#[test]
fn bad_rule_parameter_is_fatal_at_validate_time() {
    let validator =
        Validator::new(RuleSpec::new().field("age", ["min:notanumber"])).unwrap();
    let err = validator.validate(&json!({"age": 30})).unwrap_err();
    assert_eq!(err.message(), "The 'min' rule requires a numeric parameter.");
}

#[test]
fn spec_error_surfaces_at_construction() {
    let err = Validator::new(RuleSpec::new().field("a", [":18"])).unwrap_err();
    assert_eq!(err.message(), "Rule must be a non-empty string.");
}
