//! The per-call outcome of a validation.

use serde::{Deserialize, Serialize};

use crate::errors::ValidationIssue;
use crate::value::Value;

/// Validity verdict, ordered error messages and an optional cleaned value.
///
/// `valid` is always `errors.is_empty()`. When `valid` is false, a present
/// `sanitized` value is cleaned but untrusted output, not proof of safety.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sanitized: Option<Value>,
}

impl ValidationResult {
    pub fn from_parts(errors: Vec<String>, sanitized: Option<Value>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            sanitized,
        }
    }

    pub fn from_issues(issues: &[ValidationIssue], sanitized: Option<Value>) -> Self {
        Self::from_parts(issues.iter().map(ToString::to_string).collect(), sanitized)
    }

    /// A failed result carrying a single issue and no sanitized value.
    pub fn rejected(issue: ValidationIssue) -> Self {
        Self::from_parts(vec![issue.to_string()], None)
    }
}
