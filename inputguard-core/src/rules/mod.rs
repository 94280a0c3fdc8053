// inputguard-core/src/rules/mod.rs
//! Defines the core `Rule` trait and the closure-backed [`FnRule`].
//!
//! A rule is the atomic unit of validation: a predicate over a value, an
//! optional transform, and a fixed error message. The registry stores rules as
//! `Arc<dyn Rule>` keyed by name, so new behavior can be registered at runtime
//! without touching the validator.
//!
//! License: MIT OR APACHE 2.0

pub mod builtin;

use std::fmt;
use std::sync::Arc;

use crate::errors::RuleError;
use crate::value::Value;

/// A named predicate with an optional sanitizing transform.
///
/// Implementations must be pure: the validator may call `check` and
/// `sanitize` any number of times, from any thread.
pub trait Rule: Send + Sync {
    /// The unique name the rule is registered under.
    fn name(&self) -> &str;

    /// The message reported when `check` returns `Ok(false)`.
    fn error_message(&self) -> &str;

    /// Evaluates the predicate.
    ///
    /// `Ok(false)` is an ordinary failure and is reported with
    /// [`Rule::error_message`]. `Err` means the predicate could not be
    /// evaluated; the validator reports it together with the rule's name.
    fn check(&self, value: &Value) -> Result<bool, RuleError>;

    /// Produces a cleaned copy of `value`.
    ///
    /// `None` means the rule has no sanitizer and the pipeline skips it.
    fn sanitize(&self, _value: &Value) -> Option<Result<Value, RuleError>> {
        None
    }
}

type Predicate = dyn Fn(&Value) -> Result<bool, RuleError> + Send + Sync;
type Transform = dyn Fn(&Value) -> Result<Value, RuleError> + Send + Sync;

/// A rule assembled from closures, for callers registering their own checks.
///
/// ```rust
/// use inputguard_core::{FnRule, Validator};
/// use serde_json::json;
///
/// let mut validator = Validator::default();
/// validator.register_rule(
///     FnRule::new("even", "Value must be even", |v| {
///         Ok(v.as_i64().is_some_and(|n| n % 2 == 0))
///     })
///     .into_shared(),
/// );
///
/// assert!(validator.validate(&json!(4), &["even"]).valid);
/// assert_eq!(validator.validate(&json!(3), &["even"]).errors, vec!["Value must be even"]);
/// ```
#[derive(Clone)]
pub struct FnRule {
    name: String,
    error_message: String,
    predicate: Arc<Predicate>,
    transform: Option<Arc<Transform>>,
}

impl FnRule {
    pub fn new<F>(name: impl Into<String>, error_message: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value) -> Result<bool, RuleError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            error_message: error_message.into(),
            predicate: Arc::new(predicate),
            transform: None,
        }
    }

    /// Attaches a sanitizing transform.
    pub fn with_sanitizer<F>(mut self, transform: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, RuleError> + Send + Sync + 'static,
    {
        self.transform = Some(Arc::new(transform));
        self
    }

    pub fn into_shared(self) -> Arc<dyn Rule> {
        Arc::new(self)
    }
}

impl Rule for FnRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn error_message(&self) -> &str {
        &self.error_message
    }

    fn check(&self, value: &Value) -> Result<bool, RuleError> {
        (self.predicate)(value)
    }

    fn sanitize(&self, value: &Value) -> Option<Result<Value, RuleError>> {
        self.transform.as_ref().map(|transform| transform(value))
    }
}

impl fmt::Debug for FnRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnRule")
            .field("name", &self.name)
            .field("error_message", &self.error_message)
            .field("has_sanitizer", &self.transform.is_some())
            .finish()
    }
}
