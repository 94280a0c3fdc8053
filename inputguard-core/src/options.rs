//! Constraint flags for `Validator::validate_string`.

use serde::{Deserialize, Serialize};

use crate::rules::builtin;

/// Describes the constraints a single string must meet.
///
/// Boolean flags switch on the built-in rule of the same meaning; names in
/// `extra_rules` are resolved against the registry like any other rule list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct StringOptions {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub allow_empty: bool,
    pub email: bool,
    pub url: bool,
    pub uuid: bool,
    pub numeric: bool,
    pub alphanumeric_only: bool,
    pub no_special_chars: bool,
    pub no_html: bool,
    pub no_sql_injection: bool,
    pub no_xss: bool,
    pub extra_rules: Vec<String>,
}

impl Default for StringOptions {
    fn default() -> Self {
        Self {
            min_length: None,
            max_length: None,
            allow_empty: true,
            email: false,
            url: false,
            uuid: false,
            numeric: false,
            alphanumeric_only: false,
            no_special_chars: false,
            no_html: false,
            no_sql_injection: false,
            no_xss: false,
            extra_rules: Vec::new(),
        }
    }
}

impl StringOptions {
    /// Names of the rules switched on by the flags, in evaluation order,
    /// followed by `extra_rules`.
    pub fn rule_names(&self) -> Vec<String> {
        let flags = [
            (self.email, builtin::EMAIL),
            (self.url, builtin::URL),
            (self.uuid, builtin::UUID),
            (self.numeric, builtin::NUMERIC),
            (self.alphanumeric_only, builtin::ALPHANUMERIC_ONLY),
            (self.no_special_chars, builtin::NO_SPECIAL_CHARS),
            (self.no_html, builtin::NO_HTML),
            (self.no_sql_injection, builtin::NO_SQL_INJECTION),
            (self.no_xss, builtin::NO_XSS),
        ];

        flags
            .into_iter()
            .filter(|(enabled, _)| *enabled)
            .map(|(_, name)| name.to_string())
            .chain(self.extra_rules.iter().cloned())
            .collect()
    }
}
