// inputguard-core/src/rules/builtin.rs
//! The built-in rules every registry is seeded with.
//!
//! String-oriented rules treat any non-string value as failing the check
//! rather than erroring, and their sanitizers pass non-string values through
//! untouched.
//!
//! License: MIT OR APACHE 2.0

use std::sync::Arc;

use super::Rule;
use crate::errors::RuleError;
use crate::patterns;
use crate::sanitizers;
use crate::validators;
use crate::value::{number_from_f64, type_name, Value};

pub const EMAIL: &str = "email";
pub const URL: &str = "url";
pub const UUID: &str = "uuid";
pub const ALPHANUMERIC_ONLY: &str = "alphanumericOnly";
pub const NUMERIC: &str = "numeric";
pub const NO_EMPTY: &str = "noEmpty";
pub const NO_SPECIAL_CHARS: &str = "noSpecialChars";
pub const NO_HTML: &str = "noHtml";
pub const NO_SQL_INJECTION: &str = "noSqlInjection";
pub const NO_XSS: &str = "noXss";

/// Every built-in rule, in a stable order.
pub fn builtin_rules() -> Vec<Arc<dyn Rule>> {
    vec![
        Arc::new(EmailRule),
        Arc::new(UrlRule),
        Arc::new(UuidRule),
        Arc::new(AlphanumericOnlyRule),
        Arc::new(NumericRule),
        Arc::new(NoEmptyRule),
        Arc::new(NoSpecialCharsRule),
        Arc::new(NoHtmlRule),
        Arc::new(NoSqlInjectionRule),
        Arc::new(NoXssRule),
    ]
}

fn check_text(value: &Value, predicate: impl FnOnce(&str) -> bool) -> Result<bool, RuleError> {
    Ok(value.as_str().is_some_and(predicate))
}

fn map_text(value: &Value, transform: impl FnOnce(&str) -> String) -> Result<Value, RuleError> {
    Ok(match value {
        Value::String(s) => Value::String(transform(s.as_str())),
        other => other.clone(),
    })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EmailRule;

impl Rule for EmailRule {
    fn name(&self) -> &str {
        EMAIL
    }
    fn error_message(&self) -> &str {
        "Invalid email format"
    }
    fn check(&self, value: &Value) -> Result<bool, RuleError> {
        check_text(value, validators::is_valid_email)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UrlRule;

impl Rule for UrlRule {
    fn name(&self) -> &str {
        URL
    }
    fn error_message(&self) -> &str {
        "Invalid URL format"
    }
    fn check(&self, value: &Value) -> Result<bool, RuleError> {
        check_text(value, validators::is_valid_url)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRule;

impl Rule for UuidRule {
    fn name(&self) -> &str {
        UUID
    }
    fn error_message(&self) -> &str {
        "Invalid UUID format"
    }
    fn check(&self, value: &Value) -> Result<bool, RuleError> {
        check_text(value, validators::is_valid_uuid)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AlphanumericOnlyRule;

impl Rule for AlphanumericOnlyRule {
    fn name(&self) -> &str {
        ALPHANUMERIC_ONLY
    }
    fn error_message(&self) -> &str {
        "Only alphanumeric characters are allowed"
    }
    fn check(&self, value: &Value) -> Result<bool, RuleError> {
        check_text(value, validators::is_alphanumeric)
    }
    fn sanitize(&self, value: &Value) -> Option<Result<Value, RuleError>> {
        Some(map_text(value, sanitizers::strip_non_alphanumeric))
    }
}

/// Accepts numeric strings and JSON numbers; sanitizes strings into numbers.
///
/// Sanitizing a string that does not parse fails the step, so the pipeline
/// keeps whatever value it had before this rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericRule;

impl Rule for NumericRule {
    fn name(&self) -> &str {
        NUMERIC
    }
    fn error_message(&self) -> &str {
        "Value must be numeric"
    }
    fn check(&self, value: &Value) -> Result<bool, RuleError> {
        Ok(match value {
            Value::String(s) => validators::parse_numeric(s).is_some(),
            Value::Number(_) => true,
            _ => false,
        })
    }
    fn sanitize(&self, value: &Value) -> Option<Result<Value, RuleError>> {
        Some(match value {
            Value::String(s) => validators::parse_numeric(s)
                .and_then(number_from_f64)
                .map(Value::Number)
                .ok_or_else(|| RuleError::failed(format!("'{}' is not a finite number", s))),
            Value::Number(_) => Ok(value.clone()),
            other => Err(RuleError::TypeMismatch {
                expected: "a string or a number",
                found: type_name(other),
            }),
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoEmptyRule;

impl Rule for NoEmptyRule {
    fn name(&self) -> &str {
        NO_EMPTY
    }
    fn error_message(&self) -> &str {
        "Value cannot be empty"
    }
    fn check(&self, value: &Value) -> Result<bool, RuleError> {
        check_text(value, validators::is_non_blank)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoSpecialCharsRule;

impl Rule for NoSpecialCharsRule {
    fn name(&self) -> &str {
        NO_SPECIAL_CHARS
    }
    fn error_message(&self) -> &str {
        "Special characters are not allowed"
    }
    fn check(&self, value: &Value) -> Result<bool, RuleError> {
        check_text(value, validators::has_only_safe_chars)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoHtmlRule;

impl Rule for NoHtmlRule {
    fn name(&self) -> &str {
        NO_HTML
    }
    fn error_message(&self) -> &str {
        "HTML tags are not allowed"
    }
    fn check(&self, value: &Value) -> Result<bool, RuleError> {
        check_text(value, |s| !patterns::contains_html_tag(s))
    }
    fn sanitize(&self, value: &Value) -> Option<Result<Value, RuleError>> {
        Some(map_text(value, sanitizers::strip_html_tags))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoSqlInjectionRule;

impl Rule for NoSqlInjectionRule {
    fn name(&self) -> &str {
        NO_SQL_INJECTION
    }
    fn error_message(&self) -> &str {
        "Potentially dangerous SQL patterns detected"
    }
    fn check(&self, value: &Value) -> Result<bool, RuleError> {
        check_text(value, |s| patterns::detect_sql_injection(s).is_none())
    }
    fn sanitize(&self, value: &Value) -> Option<Result<Value, RuleError>> {
        Some(map_text(value, sanitizers::escape_sql))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoXssRule;

impl Rule for NoXssRule {
    fn name(&self) -> &str {
        NO_XSS
    }
    fn error_message(&self) -> &str {
        "Potentially dangerous XSS patterns detected"
    }
    fn check(&self, value: &Value) -> Result<bool, RuleError> {
        check_text(value, |s| patterns::detect_xss(s).is_none())
    }
    fn sanitize(&self, value: &Value) -> Option<Result<Value, RuleError>> {
        Some(map_text(value, sanitizers::neutralize_xss))
    }
}
