//! String transforms used by the built-in rules' sanitize steps, and the
//! fail-open [`pipeline`] that folds a value through a list of rules.
//!
//! Every transform here is total: it takes a string slice and returns a new
//! string. None of them is idempotent in general. In particular
//! [`escape_html`] re-escapes the `&` of an entity it produced earlier, so
//! sanitizing an already sanitized value changes it further.
//!
//! License: MIT OR APACHE 2.0

pub mod pipeline;

use crate::patterns::{DANGEROUS_SCHEME, HTML_TAG};

/// Removes every character that is not an ASCII letter or digit.
pub fn strip_non_alphanumeric(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

/// Removes tag-shaped substrings, keeping the text between them.
///
/// `"<b>bold</b> move"` becomes `"bold move"`.
pub fn strip_html_tags(input: &str) -> String {
    HTML_TAG.replace_all(input, "").into_owned()
}

/// Backslash-escapes backslashes, quotes and semicolons.
pub fn escape_sql(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + input.len() / 8);
    for c in input.chars() {
        match c {
            '\\' | '\'' | '"' | ';' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// HTML-escapes `& < > " ' /`.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + input.len() / 4);
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            _ => out.push(c),
        }
    }
    out
}

/// Removes `javascript:`, `vbscript:` and `data:text/html` prefixes.
///
/// Removal repeats until nothing matches, so nested payloads such as
/// `javajavascript:script:` cannot reassemble a scheme.
pub fn strip_dangerous_schemes(input: &str) -> String {
    let mut current = input.to_string();
    while DANGEROUS_SCHEME.is_match(&current) {
        current = DANGEROUS_SCHEME.replace_all(&current, "").into_owned();
    }
    current
}

/// Strips dangerous scheme prefixes, then HTML-escapes the remainder.
pub fn neutralize_xss(input: &str) -> String {
    escape_html(&strip_dangerous_schemes(input))
}
