// inputguard-core/tests/validator_integration_tests.rs
use std::sync::Arc;
use std::thread;

use serde_json::json;
use test_log::test;

use inputguard_core::rules::builtin;
use inputguard_core::{
    FnRule, RuleError, RulesByKey, StringOptions, ValidationResult, Validator, ValidatorConfig,
    Value,
};

fn strict() -> Validator {
    Validator::new(ValidatorConfig::new(true, 1_000))
}

fn lenient() -> Validator {
    Validator::new(ValidatorConfig::new(false, 1_000))
}

fn rules_by_key(pairs: &[(&str, &[&str])]) -> RulesByKey {
    pairs
        .iter()
        .map(|(key, names)| (key.to_string(), names.iter().map(|n| n.to_string()).collect()))
        .collect()
}

#[test]
fn test_every_builtin_accepts_its_grammar() {
    let validator = strict();
    let samples = [
        ("email", json!("test@example.com")),
        ("url", json!("http://example.com")),
        ("uuid", json!("f47ac10b-58cc-4372-a567-0e02b2c3d479")),
        ("alphanumericOnly", json!("User42")),
        ("numeric", json!("3.14")),
        ("noEmpty", json!("x")),
        ("noSpecialChars", json!("plain text_1.0-final")),
        ("noHtml", json!("no markup here")),
        ("noSqlInjection", json!("SELECT is a word I like")),
        ("noXss", json!("a perfectly safe comment")),
    ];
    for (name, value) in samples {
        let result = validator.validate(&value, &[name]);
        assert!(result.valid, "{} rejected {}: {:?}", name, value, result.errors);
        assert!(result.errors.is_empty());
    }
}

#[test]
fn test_email_scenario() {
    let result = strict().validate(&json!("test@example.com"), &["email"]);
    assert_eq!(
        result,
        ValidationResult {
            valid: true,
            errors: vec![],
            sanitized: Some(json!("test@example.com")),
        }
    );
}

#[test]
fn test_unknown_rule_reports_exact_message() {
    let result = strict().validate(&json!("anything"), &["doesNotExist"]);
    assert!(!result.valid);
    assert_eq!(result.errors, vec!["Unknown validation rule: doesNotExist"]);
}

#[test]
fn test_unknown_rule_does_not_stop_evaluation() {
    let result = strict().validate(&json!(""), &["doesNotExist", "noEmpty"]);
    assert_eq!(
        result.errors,
        vec!["Unknown validation rule: doesNotExist", "Value cannot be empty"]
    );
}

#[test]
fn test_errors_follow_rule_order() {
    let validator = strict();
    let value = json!("<b>@</b>");
    assert_eq!(
        validator.validate(&value, &["noHtml", "email"]).errors,
        vec!["HTML tags are not allowed", "Invalid email format"]
    );
    assert_eq!(
        validator.validate(&value, &["email", "noHtml"]).errors,
        vec!["Invalid email format", "HTML tags are not allowed"]
    );
}

#[test]
fn test_strict_xss_scenario() {
    let result = strict().validate(&json!("<script>alert(1)</script>"), &["noXss"]);
    assert!(!result.valid);
    assert_eq!(result.errors, vec!["Potentially dangerous XSS patterns detected"]);
    assert_eq!(result.sanitized, None);
}

#[test]
fn test_lenient_xss_scenario() {
    let result = lenient().validate(&json!("<script>alert(1)</script>"), &["noXss"]);
    assert!(!result.valid);
    let sanitized = result.sanitized.expect("non-strict mode always sanitizes");
    let text = sanitized.as_str().unwrap();
    assert!(!text.contains("<script>"));
    assert!(text.contains("&lt;"));
}

#[test]
fn test_numeric_changes_type() {
    let result = strict().validate(&json!("123"), &["numeric"]);
    assert!(result.valid);
    assert_eq!(result.sanitized, Some(json!(123)));
    assert_ne!(result.sanitized, Some(json!("123")));
}

#[test]
fn test_length_limit_short_circuits() {
    let validator = Validator::new(ValidatorConfig::new(false, 5));
    let result = validator.validate(&json!("abcdef"), &["email", "unknownRule"]);
    assert_eq!(result.errors, vec!["Input exceeds maximum length (5)"]);
    assert!(result.sanitized.is_none());
}

#[test]
fn test_non_string_fails_string_rules() {
    let result = strict().validate(&json!(12), &["email", "noEmpty"]);
    assert_eq!(result.errors, vec!["Invalid email format", "Value cannot be empty"]);
    let result = strict().validate(&Value::Null, &["noEmpty"]);
    assert_eq!(result.errors, vec!["Value cannot be empty"]);
}

#[test]
fn test_object_scenario() {
    let result = strict().validate_object(
        &json!({"email": "bad", "age": "12"}),
        &rules_by_key(&[("email", &["email"]), ("age", &["numeric"])]),
    );
    assert!(!result.valid);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].starts_with("email:"));
}

#[test]
fn test_object_error_count_matches_failing_keys() {
    let result = strict().validate_object(
        &json!({"a": "x", "b": "", "c": "nope", "d": "ok"}),
        &rules_by_key(&[
            ("a", &["noEmpty"]),
            ("b", &["noEmpty"]),
            ("c", &["uuid"]),
            ("d", &["noEmpty"]),
        ]),
    );
    assert_eq!(result.errors.len(), 2);
    assert!(result.errors[0].starts_with("b: "));
    assert!(result.errors[1].starts_with("c: "));
}

#[test]
fn test_object_sanitized_keeps_unvalidated_keys() {
    let result = strict().validate_object(
        &json!({"age": "42", "note": "<b>raw</b>"}),
        &rules_by_key(&[("age", &["numeric"])]),
    );
    assert!(result.valid);
    assert_eq!(result.sanitized, Some(json!({"age": 42, "note": "<b>raw</b>"})));
}

#[test]
fn test_lenient_object_sanitizes_failed_keys() {
    let result = lenient().validate_object(
        &json!({"bio": "<i>hi</i>", "age": "7"}),
        &rules_by_key(&[("bio", &["noHtml"]), ("age", &["numeric"])]),
    );
    assert!(!result.valid);
    assert_eq!(result.errors, vec!["bio: HTML tags are not allowed"]);
    assert_eq!(result.sanitized, Some(json!({"bio": "hi", "age": 7})));
}

#[test]
fn test_array_errors_name_failing_indices() {
    let result = strict().validate_array(&json!(["a@b.io", "bad", "c@d.io", ""]), &["email"]);
    assert!(!result.valid);
    assert_eq!(result.errors.len(), 2);
    assert!(result.errors[0].contains("Index 1:"));
    assert!(result.errors[1].contains("Index 3:"));
}

#[test]
fn test_array_sanitized_replaces_elements() {
    let result = strict().validate_array(&json!(["1", "2.5"]), &["numeric"]);
    assert!(result.valid);
    assert_eq!(result.sanitized, Some(json!([1, 2.5])));

    let result = lenient().validate_array(&json!(["1", "x"]), &["numeric"]);
    assert_eq!(result.errors, vec!["Index 1: Value must be numeric"]);
    assert_eq!(result.sanitized, Some(json!([1, "x"])));
}

#[test]
fn test_sanitize_never_fails_with_throwing_rule() {
    let mut validator = strict();
    validator.register_rule(
        FnRule::new("explode", "never shown", |_| Err(RuleError::failed("predicate boom")))
            .with_sanitizer(|_| Err(RuleError::failed("sanitizer boom")))
            .into_shared(),
    );

    assert_eq!(validator.sanitize(&json!("<b>x</b>"), &["explode", "noHtml"]), json!("<b>x</b>"));
    assert_eq!(validator.sanitize(&json!("<b>x</b>"), &["noHtml", "explode"]), json!("x"));
    assert_eq!(validator.sanitize(&json!("<b>x</b>"), &["nope", "noHtml"]), json!("x"));

    let result = validator.validate(&json!("x"), &["explode"]);
    assert_eq!(result.errors, vec!["Validation error in rule explode: predicate boom"]);
}

#[test]
fn test_sanitize_ignores_predicates() {
    let validator = strict();
    assert_eq!(validator.sanitize(&json!("a b-c!"), &["alphanumericOnly"]), json!("abc"));
    assert_eq!(validator.sanitize(&json!("O'Neil;"), &["noSqlInjection"]), json!(r"O\'Neil\;"));
    assert_eq!(validator.sanitize(&json!("12"), &[] as &[&str]), json!("12"));
}

#[test]
fn test_register_and_remove_restore_rule_list() {
    let mut validator = strict();
    let before = validator.available_rules();

    validator.register_rule(
        FnRule::new("zipCode", "Invalid zip", |v| {
            Ok(v.as_str().is_some_and(|s| s.len() == 5))
        })
        .into_shared(),
    );
    validator.register_rule(FnRule::new(builtin::EMAIL, "Shadowed", |_| Ok(false)).into_shared());
    assert_eq!(validator.available_rules().len(), before.len() + 1);
    assert_eq!(validator.validate(&json!("test@example.com"), &["email"]).errors, vec!["Shadowed"]);

    validator.remove_rule("zipCode");
    validator.remove_rule(builtin::EMAIL);
    validator.remove_rule("neverRegistered");

    assert_eq!(validator.available_rules(), before);
    assert!(validator.validate(&json!("test@example.com"), &["email"]).valid);
}

#[test]
fn test_validate_string_options() {
    let validator = strict();
    let options = StringOptions {
        min_length: Some(3),
        max_length: Some(6),
        allow_empty: false,
        alphanumeric_only: true,
        ..Default::default()
    };

    assert!(validator.validate_string("abc12", &options).valid);
    assert_eq!(
        validator.validate_string("a!", &options).errors,
        vec!["below minimum length 3", "Only alphanumeric characters are allowed"]
    );
    assert_eq!(
        validator.validate_string("abcdefg", &options).errors,
        vec!["exceeds maximum length 6"]
    );
    assert_eq!(
        validator.validate_string("", &options).errors,
        vec![
            "Value cannot be empty",
            "below minimum length 3",
            "Only alphanumeric characters are allowed",
        ]
    );
}

#[test]
fn test_validate_string_allows_empty_by_default() {
    let options = StringOptions {
        min_length: Some(3),
        email: true,
        ..Default::default()
    };
    let result = strict().validate_string("", &options);
    assert!(result.valid);
    assert_eq!(result.sanitized, Some(json!("")));
}

#[test]
fn test_validate_string_sanitizes_like_validate() {
    let options = StringOptions {
        no_html: true,
        ..Default::default()
    };
    let result = lenient().validate_string("<p>para</p>", &options);
    assert_eq!(result.errors, vec!["HTML tags are not allowed"]);
    assert_eq!(result.sanitized, Some(json!("para")));
}

#[test]
fn test_shared_validator_across_threads() {
    let shared = strict().into_shared();

    let writer = {
        let shared = Arc::clone(&shared);
        thread::spawn(move || {
            let mut guard = shared.write().expect("lock poisoned");
            guard.register_rule(FnRule::new("always", "never", |_| Ok(true)).into_shared());
        })
    };
    writer.join().expect("writer thread panicked");

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                let guard = shared.read().expect("lock poisoned");
                guard.validate(&json!("x"), &["always", "noEmpty"]).valid
            })
        })
        .collect();

    for reader in readers {
        assert!(reader.join().expect("reader thread panicked"));
    }
}

#[test]
fn test_no_xss_rejects_any_inline_event_handler() {
    let validator = strict();
    for payload in [
        "<video onplay=alert(1)>",
        "<body onpageshow=alert(1)>",
        "<body onbeforeunload=alert(1)>",
    ] {
        let result = validator.validate(&json!(payload), &["noXss"]);
        assert!(!result.valid, "{} was accepted", payload);
        assert_eq!(result.errors, vec!["Potentially dangerous XSS patterns detected"]);
    }
}

#[test]
fn test_no_sql_injection_rejects_quote_separated_tautology() {
    let result = strict().validate(&json!("x'OR'1'='1"), &["noSqlInjection"]);
    assert_eq!(result.errors, vec!["Potentially dangerous SQL patterns detected"]);
}

#[test]
fn test_removed_builtin_is_not_revived_by_custom_round_trip() {
    let mut validator = strict();
    validator.remove_rule(builtin::EMAIL);
    let before = validator.available_rules();

    validator.register_rule(FnRule::new(builtin::EMAIL, "custom", |_| Ok(true)).into_shared());
    validator.remove_rule(builtin::EMAIL);

    assert_eq!(validator.available_rules(), before);
    assert_eq!(
        validator.validate(&json!("test@example.com"), &["email"]).errors,
        vec!["Unknown validation rule: email"]
    );
}

#[test]
fn test_numeric_keeps_integers_beyond_i64_as_floats() {
    let result = strict().validate(&json!("9223372036854775808"), &["numeric"]);
    assert!(result.valid);
    let sanitized = result.sanitized.expect("valid input is sanitized");
    assert_eq!(sanitized.as_i64(), None);
    assert_eq!(sanitized.as_f64(), Some(9_223_372_036_854_775_808.0));

    let result = strict().validate(&json!("-9223372036854775808"), &["numeric"]);
    assert_eq!(result.sanitized, Some(json!(i64::MIN)));
}
