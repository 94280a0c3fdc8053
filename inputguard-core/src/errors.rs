//! errors.rs - Error and issue types for the inputguard-core library.
//!
//! Three layers live here:
//!
//! * [`RuleError`]: what a single rule step (predicate or sanitizer) may fail with.
//! * [`ValidationIssue`]: the taxonomy reported back to callers inside
//!   `ValidationResult::errors`. Validation itself never fails; issues are data.
//! * [`GuardError`]: library-level failures, such as an unusable configuration
//!   or schema.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// Failure raised by a rule's predicate or sanitizer.
///
/// The validator wraps predicate failures into
/// [`ValidationIssue::PredicateError`]; the sanitizer pipeline treats a failing
/// step as the point where it falls back to the last good value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RuleError {
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("{0}")]
    Failed(String),
}

impl RuleError {
    pub fn failed(message: impl Into<String>) -> Self {
        RuleError::Failed(message.into())
    }
}

/// A single problem found while validating a value.
///
/// The `Display` output of each variant is the exact string placed into
/// `ValidationResult::errors`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationIssue {
    #[error("Unknown validation rule: {0}")]
    UnknownRule(String),

    #[error("Input exceeds maximum length ({0})")]
    LengthExceeded(usize),

    /// The rule's fixed error message.
    #[error("{0}")]
    PredicateFailure(String),

    #[error("Validation error in rule {rule}: {source}")]
    PredicateError { rule: String, source: RuleError },

    #[error("below minimum length {0}")]
    BelowMinLength(usize),

    #[error("exceeds maximum length {0}")]
    AboveMaxLength(usize),

    #[error("Expected {0}")]
    ShapeMismatch(&'static str),

    /// A nested issue, prefixed by the key or index it was found under.
    #[error("{path}: {issue}")]
    Structural { path: String, issue: String },
}

/// Errors raised by fallible library operations outside of validation.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GuardError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),
}
