// File: inputguard-core/src/validators.rs
//! Programmatic grammar checks used by the built-in rules.
//!
//! Each function here answers a single yes/no question about a string slice.
//! They are deliberately free of any knowledge about rules, registries or
//! values so they can be unit-tested in isolation and reused by custom rules.
//!
//! License: MIT OR APACHE 2.0

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;
use uuid::Uuid;

static EMAIL_LOCAL_PART: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~.-]+$").expect("valid email local-part regex")
});

static EMAIL_DOMAIN_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?$").expect("valid domain label regex")
});

static EMAIL_TLD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]{2,}$").expect("valid tld regex"));

static NUMERIC_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?$").expect("valid numeric regex")
});

static SAFE_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9 ._-]*$").expect("valid safe text regex"));

const ALLOWED_URL_SCHEMES: [&str; 4] = ["http", "https", "ftp", "ftps"];

/// Checks the `local@domain.tld` shape of an email address.
///
/// The local part must be non-empty, must not start or end with a dot, and no
/// part of the address may contain consecutive dots. The domain needs at least
/// one dot and an alphabetic top-level label of two or more characters.
///
/// # Arguments
///
/// * `email` - The candidate address.
///
/// # Returns
///
/// `true` if the address has a plausible shape, `false` otherwise.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };

    if local.is_empty() || domain.is_empty() || email.contains("..") {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || !EMAIL_LOCAL_PART.is_match(local) {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    let [hosts @ .., tld] = labels.as_slice() else {
        return false;
    };
    if hosts.is_empty() || !EMAIL_TLD.is_match(tld) {
        return false;
    }

    hosts.iter().all(|label| EMAIL_DOMAIN_LABEL.is_match(label))
}

/// Checks for an absolute URL with an http, https, ftp or ftps scheme and a host.
///
/// Pseudo-schemes such as `javascript:` and `data:` fail the scheme check.
pub fn is_valid_url(candidate: &str) -> bool {
    if candidate.trim() != candidate || candidate.is_empty() {
        return false;
    }

    let Ok(parsed) = Url::parse(candidate) else {
        return false;
    };

    ALLOWED_URL_SCHEMES.contains(&parsed.scheme())
        && parsed.host_str().is_some_and(|host| !host.is_empty())
}

/// Checks for the canonical hyphenated `8-4-4-4-12` UUID form, any version.
///
/// The `uuid` parser also accepts simple, braced and URN forms; those are
/// excluded by requiring the exact hyphenated length and hyphen positions.
pub fn is_valid_uuid(candidate: &str) -> bool {
    const HYPHENATED_LENGTH: usize = 36;
    const HYPHEN_POSITIONS: [usize; 4] = [8, 13, 18, 23];

    if candidate.len() != HYPHENATED_LENGTH {
        return false;
    }
    let bytes = candidate.as_bytes();
    if !HYPHEN_POSITIONS.iter().all(|&i| bytes[i] == b'-') {
        return false;
    }

    Uuid::try_parse(candidate).is_ok()
}

/// Returns `true` for a non-empty string of ASCII letters and digits.
pub fn is_alphanumeric(candidate: &str) -> bool {
    !candidate.is_empty() && candidate.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Parses a finite decimal or exponential literal.
///
/// Literals such as `NaN` or `inf`, which `f64::from_str` would otherwise
/// accept, are rejected by the grammar check before parsing.
///
/// # Returns
///
/// `Some(n)` for a finite number, `None` otherwise.
pub fn parse_numeric(candidate: &str) -> Option<f64> {
    if !NUMERIC_LITERAL.is_match(candidate) {
        return None;
    }
    candidate.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Returns `true` when the string is non-empty after trimming whitespace.
pub fn is_non_blank(candidate: &str) -> bool {
    !candidate.trim().is_empty()
}

/// Returns `true` when the string contains only letters, digits, space, `.`, `_` and `-`.
pub fn has_only_safe_chars(candidate: &str) -> bool {
    SAFE_TEXT.is_match(candidate)
}
