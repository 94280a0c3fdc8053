// inputguard-core/src/lib.rs
//! # InputGuard Core Library
//!
//! `inputguard-core` checks untrusted values (request parameters, form fields,
//! object payloads) against a registry of named rules before they reach
//! business logic, and optionally produces a cleaned replacement value.
//!
//! It is a best-effort input hygiene layer. It performs no I/O during
//! validation and is not a security boundary of last resort.
//!
//! ## Modules
//!
//! * `rules`: the `Rule` trait, the closure-backed `FnRule`, and the built-in rules.
//! * `registry`: the runtime-mutable mapping from rule name to rule.
//! * `validator`: scalar, string, object, array and nested-schema validation.
//! * `sanitizers`: string transforms and the fail-open sanitizer pipeline.
//! * `validators`: grammar checks (email, URL, UUID, numeric, ...).
//! * `patterns`: the markup and injection detection catalogue.
//! * `schema`: recursive descriptions of which rules apply where.
//! * `config`: `ValidatorConfig`, loadable from YAML and the environment.
//! * `errors`: rule errors, the reported issue taxonomy, library errors.
//!
//! ## Usage Example
//!
//! ```rust
//! use inputguard_core::{RulesByKey, Validator, ValidatorConfig};
//! use serde_json::json;
//!
//! let validator = Validator::new(ValidatorConfig::default());
//!
//! let result = validator.validate(&json!("123"), &["numeric"]);
//! assert!(result.valid);
//! assert_eq!(result.sanitized, Some(json!(123)));
//!
//! let mut rules = RulesByKey::new();
//! rules.insert("email".into(), vec!["email".into()]);
//! rules.insert("age".into(), vec!["numeric".into()]);
//! let result = validator.validate_object(&json!({"email": "bad", "age": "12"}), &rules);
//! assert!(!result.valid);
//! assert_eq!(result.errors, vec!["email: Invalid email format"]);
//! ```
//!
//! ## Error Handling
//!
//! Validation and sanitization never fail; problems are reported inside
//! [`ValidationResult`]. Loading configuration or schemas from disk returns
//! `anyhow::Result` with context.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod errors;
pub mod options;
pub mod patterns;
pub mod registry;
pub mod result;
pub mod rules;
pub mod sanitizers;
pub mod schema;
pub mod validator;
pub mod validators;
pub mod value;

/// Re-exports configuration types.
pub use config::{ValidatorConfig, DEFAULT_MAX_INPUT_LENGTH};

/// Re-exports error and issue types.
pub use errors::{GuardError, RuleError, ValidationIssue};

pub use options::StringOptions;
pub use registry::RuleRegistry;
pub use result::ValidationResult;
pub use rules::{FnRule, Rule};
pub use schema::{RulesByKey, Schema};
pub use validator::{SharedValidator, Validator};
pub use value::Value;
