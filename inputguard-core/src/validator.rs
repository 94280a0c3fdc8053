//! validator.rs - Orchestrates rule lookup and application.
//!
//! A [`Validator`] owns a [`RuleRegistry`] and a [`ValidatorConfig`]. Every
//! entry point is total: problems are reported inside the returned
//! [`ValidationResult`], never as an `Err` or a panic.
//!
//! Object and array validation are the same recursive walk over a
//! [`Schema`]; `validate_object` and `validate_array` only build the
//! one-level schema for it.
//!
//! License: MIT OR APACHE 2.0

use std::sync::{Arc, RwLock};

use log::{debug, warn};

use crate::config::ValidatorConfig;
use crate::errors::ValidationIssue;
use crate::options::StringOptions;
use crate::registry::RuleRegistry;
use crate::result::ValidationResult;
use crate::rules::builtin::NoEmptyRule;
use crate::rules::{FnRule, Rule};
use crate::sanitizers::pipeline::fold_fail_open;
use crate::schema::{RulesByKey, Schema};
use crate::value::Value;

/// A validator shared between threads that may also register rules.
pub type SharedValidator = Arc<RwLock<Validator>>;

/// A rule name after lookup against the registry.
enum Step {
    Unknown(String),
    Resolved(Arc<dyn Rule>),
}

#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidatorConfig,
    registry: RuleRegistry,
}

impl Validator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self::with_registry(config, RuleRegistry::new())
    }

    pub fn with_registry(config: ValidatorConfig, registry: RuleRegistry) -> Self {
        debug!(
            "Creating validator (strict: {}, max_input_length: {}, rules: {}).",
            config.strict,
            config.max_input_length,
            registry.len()
        );
        Self { config, registry }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn into_shared(self) -> SharedValidator {
        Arc::new(RwLock::new(self))
    }

    pub fn register_rule(&mut self, rule: Arc<dyn Rule>) {
        self.registry.register(rule);
    }

    pub fn remove_rule(&mut self, name: &str) {
        self.registry.remove(name);
    }

    /// Names of all currently known rules, sorted.
    pub fn available_rules(&self) -> Vec<String> {
        self.registry.names()
    }

    /// Validates a single value against the named rules, in order.
    ///
    /// Every rule is evaluated even after one fails, so `errors` lists all
    /// problems in rule order.
    pub fn validate<S: AsRef<str>>(&self, value: &Value, rule_names: &[S]) -> ValidationResult {
        let steps = self.resolve(rule_names);
        self.evaluate(value, &steps)
    }

    /// Validates a string against an ephemeral constraint set built from `options`.
    pub fn validate_string(&self, value: &str, options: &StringOptions) -> ValidationResult {
        if let Some(rejected) = self.check_input_length(value) {
            return rejected;
        }
        if options.allow_empty && value.is_empty() {
            return ValidationResult::from_parts(Vec::new(), Some(Value::String(String::new())));
        }

        let mut steps = Vec::new();
        if !options.allow_empty {
            steps.push(Step::Resolved(Arc::new(NoEmptyRule)));
        }
        if let Some(min) = options.min_length {
            steps.push(Step::Resolved(min_length_rule(min)));
        }
        if let Some(max) = options.max_length {
            steps.push(Step::Resolved(max_length_rule(max)));
        }
        steps.extend(self.resolve(&options.rule_names()));

        self.evaluate(&Value::String(value.to_string()), &steps)
    }

    /// Validates the listed keys of an object. Other keys pass through unchanged.
    pub fn validate_object(&self, object: &Value, rules_by_key: &RulesByKey) -> ValidationResult {
        self.validate_schema(object, &Schema::fields(rules_by_key))
    }

    /// Validates every element of an array against the same rules.
    pub fn validate_array<S: AsRef<str>>(
        &self,
        array: &Value,
        rule_names: &[S],
    ) -> ValidationResult {
        self.validate_schema(array, &Schema::each(Schema::rules(rule_names)))
    }

    /// Validates an arbitrarily nested value. Errors carry the path they were
    /// found under, e.g. `"address: Index 0: Invalid email format"`.
    pub fn validate_schema(&self, value: &Value, schema: &Schema) -> ValidationResult {
        match schema {
            Schema::Rules(names) => self.validate(value, names),
            Schema::Fields(fields) => {
                let Value::Object(object) = value else {
                    return ValidationResult::rejected(ValidationIssue::ShapeMismatch("an object"));
                };

                let mut errors = Vec::new();
                let mut cleaned = object.clone();
                for (key, sub_schema) in fields {
                    let field = object.get(key).unwrap_or(&Value::Null);
                    let child = self.validate_schema(field, sub_schema);
                    errors.extend(prefixed(key, child.errors));
                    if let (Some(sanitized), true) = (child.sanitized, object.contains_key(key)) {
                        cleaned.insert(key.clone(), sanitized);
                    }
                }
                self.finish(errors, Value::Object(cleaned))
            }
            Schema::Elements(element_schema) => {
                let Value::Array(elements) = value else {
                    return ValidationResult::rejected(ValidationIssue::ShapeMismatch("an array"));
                };

                let mut errors = Vec::new();
                let mut cleaned = elements.clone();
                for (index, element) in elements.iter().enumerate() {
                    let child = self.validate_schema(element, element_schema);
                    errors.extend(prefixed(&format!("Index {}", index), child.errors));
                    if let Some(sanitized) = child.sanitized {
                        cleaned[index] = sanitized;
                    }
                }
                self.finish(errors, Value::Array(cleaned))
            }
        }
    }

    /// Folds `value` through the named rules' sanitizers, ignoring predicates.
    ///
    /// Never fails: unknown names are skipped, and a failing sanitizer stops
    /// the fold at the last good value.
    pub fn sanitize<S: AsRef<str>>(&self, value: &Value, rule_names: &[S]) -> Value {
        let rules: Vec<Arc<dyn Rule>> = self
            .resolve(rule_names)
            .into_iter()
            .filter_map(|step| match step {
                Step::Resolved(rule) => Some(rule),
                Step::Unknown(name) => {
                    debug!("Skipping unknown rule '{}' during sanitization.", name);
                    None
                }
            })
            .collect();
        fold_fail_open(value, &rules)
    }

    fn resolve<S: AsRef<str>>(&self, rule_names: &[S]) -> Vec<Step> {
        rule_names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                match self.registry.resolve(name) {
                    Some(rule) => Step::Resolved(rule),
                    None => Step::Unknown(name.to_string()),
                }
            })
            .collect()
    }

    fn check_input_length(&self, text: &str) -> Option<ValidationResult> {
        let max = self.config.max_input_length;
        if text.chars().count() > max {
            debug!("Rejecting input longer than {} characters.", max);
            return Some(ValidationResult::rejected(ValidationIssue::LengthExceeded(max)));
        }
        None
    }

    fn evaluate(&self, value: &Value, steps: &[Step]) -> ValidationResult {
        if let Value::String(text) = value {
            if let Some(rejected) = self.check_input_length(text) {
                return rejected;
            }
        }

        let mut issues = Vec::new();
        let mut rules = Vec::with_capacity(steps.len());
        for step in steps {
            match step {
                Step::Unknown(name) => {
                    warn!("Unknown validation rule '{}'.", name);
                    issues.push(ValidationIssue::UnknownRule(name.clone()));
                }
                Step::Resolved(rule) => {
                    match rule.check(value) {
                        Ok(true) => {}
                        Ok(false) => issues.push(ValidationIssue::PredicateFailure(
                            rule.error_message().to_string(),
                        )),
                        Err(source) => {
                            warn!("Rule '{}' could not evaluate input: {}", rule.name(), source);
                            issues.push(ValidationIssue::PredicateError {
                                rule: rule.name().to_string(),
                                source,
                            });
                        }
                    }
                    rules.push(Arc::clone(rule));
                }
            }
        }

        let sanitized =
            (issues.is_empty() || !self.config.strict).then(|| fold_fail_open(value, &rules));
        debug!("Validated value against {} rule(s); {} issue(s).", steps.len(), issues.len());
        ValidationResult::from_issues(&issues, sanitized)
    }

    fn finish(&self, errors: Vec<String>, cleaned: Value) -> ValidationResult {
        let sanitized = (errors.is_empty() || !self.config.strict).then_some(cleaned);
        ValidationResult::from_parts(errors, sanitized)
    }
}

fn prefixed(path: &str, errors: Vec<String>) -> impl Iterator<Item = String> + '_ {
    errors.into_iter().map(move |issue| {
        ValidationIssue::Structural {
            path: path.to_string(),
            issue,
        }
        .to_string()
    })
}

fn min_length_rule(min: usize) -> Arc<dyn Rule> {
    FnRule::new("minLength", ValidationIssue::BelowMinLength(min).to_string(), move |v| {
        Ok(v.as_str().is_some_and(|s| s.chars().count() >= min))
    })
    .into_shared()
}

fn max_length_rule(max: usize) -> Arc<dyn Rule> {
    FnRule::new("maxLength", ValidationIssue::AboveMaxLength(max).to_string(), move |v| {
        Ok(v.as_str().is_some_and(|s| s.chars().count() <= max))
    })
    .into_shared()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RuleError;
    use serde_json::json;

    fn lenient() -> Validator {
        Validator::new(ValidatorConfig::new(false, 100))
    }

    #[test]
    fn resolves_known_and_unknown_names() {
        let validator = Validator::default();
        let steps = validator.resolve(&["email", "missing"]);
        assert!(matches!(steps[0], Step::Resolved(_)));
        assert!(matches!(&steps[1], Step::Unknown(name) if name == "missing"));
    }

    #[test]
    fn length_limit_counts_characters() {
        let validator = Validator::new(ValidatorConfig::new(true, 3));
        assert!(validator.validate(&json!("äöü"), &["noEmpty"]).valid);
        let result = validator.validate(&json!("abcd"), &["noEmpty", "missing"]);
        assert_eq!(result.errors, vec!["Input exceeds maximum length (3)"]);
    }

    #[test]
    fn predicate_errors_are_wrapped_with_rule_name() {
        let mut validator = Validator::default();
        validator.register_rule(
            FnRule::new("typed", "unused", |v| match v {
                Value::String(_) => Ok(true),
                other => Err(RuleError::TypeMismatch {
                    expected: "a string",
                    found: crate::value::type_name(other),
                }),
            })
            .into_shared(),
        );
        let result = validator.validate(&json!(1), &["typed"]);
        assert_eq!(
            result.errors,
            vec!["Validation error in rule typed: expected a string, found a number"]
        );
    }

    #[test]
    fn non_strict_sanitizes_failed_values() {
        let result = lenient().validate(&json!("<b>hi</b>"), &["noHtml"]);
        assert!(!result.valid);
        assert_eq!(result.sanitized, Some(json!("hi")));
    }

    #[test]
    fn nested_schema_prefixes_compose() {
        let schema = Schema::Fields(
            [("contacts".to_string(), Schema::each(Schema::rules(&["email"])))]
                .into_iter()
                .collect(),
        );
        let input = json!({"contacts": ["a@b.co", "nope"]});
        let result = Validator::default().validate_schema(&input, &schema);
        assert_eq!(result.errors, vec!["contacts: Index 1: Invalid email format"]);
    }

    #[test]
    fn shape_mismatch_is_reported() {
        let validator = Validator::default();
        assert_eq!(
            validator.validate_array(&json!("x"), &["email"]).errors,
            vec!["Expected an array"]
        );
        assert_eq!(
            validator.validate_object(&json!([1]), &RulesByKey::new()).errors,
            vec!["Expected an object"]
        );
    }

    #[test]
    fn missing_keys_validate_null_without_being_added() {
        let mut by_key = RulesByKey::new();
        by_key.insert("name".into(), vec!["noEmpty".into()]);
        let result = lenient().validate_object(&json!({}), &by_key);
        assert_eq!(result.errors, vec!["name: Value cannot be empty"]);
        assert_eq!(result.sanitized, Some(json!({})));
    }
}
