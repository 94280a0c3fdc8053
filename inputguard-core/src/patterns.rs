// File: inputguard-core/src/patterns.rs
//! Detection pattern catalogue for markup and injection checks.
//!
//! Each entry carries a short name (used in debug logs when it fires) and a
//! regex string. Catalogues are compiled once, on first use.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, error};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

/// A single named detection pattern.
pub struct DetectionPattern {
    pub name: &'static str,
    pub pattern: &'static str,
}

/// Matches an opening, closing or self-closing tag, a comment or a doctype.
pub const HTML_TAG_PATTERN: &str = r"</?[A-Za-z][A-Za-z0-9:-]*(?:\s[^<>]*)?/?>|<!--.*?-->|<![A-Za-z][^<>]*>";

pub static SQL_INJECTION_PATTERNS: &[DetectionPattern] = &[
    DetectionPattern {
        name: "stacked_statement",
        pattern: r";\s*(?:drop|delete|insert|update|alter|create|truncate|exec(?:ute)?|shutdown)\b",
    },
    DetectionPattern {
        name: "tautology",
        pattern: r#"\b(?:or|and)(?:\s|/\*.*?\*/)*(?:['"]?\d+['"]?\s*=\s*['"]?\d+|['"]\w*['"]\s*=\s*['"])"#,
    },
    DetectionPattern {
        name: "union_select",
        pattern: r"\bunion\s+(?:all\s+)?select\b",
    },
    DetectionPattern {
        name: "quoted_comment",
        pattern: r"'[^\n]*--",
    },
    DetectionPattern {
        name: "trailing_comment",
        pattern: r"--\s*$",
    },
    DetectionPattern {
        name: "statement_comment",
        pattern: r";\s*--",
    },
    DetectionPattern {
        name: "block_comment",
        pattern: r"/\*.*?\*/",
    },
];

pub static XSS_PATTERNS: &[DetectionPattern] = &[
    DetectionPattern {
        name: "dangerous_tag",
        pattern: r"<\s*/?\s*(?:script|iframe|object|embed|link)\b",
    },
    DetectionPattern {
        name: "event_handler",
        pattern: r#"<[^>]*[\s/"']on[a-z]{3,}\s*="#,
    },
    DetectionPattern {
        name: "attribute_breakout",
        pattern: r#"["'][\s/]*on[a-z]{3,}\s*="#,
    },
    DetectionPattern {
        name: "javascript_scheme",
        pattern: r"javascript\s*:",
    },
    DetectionPattern {
        name: "vbscript_scheme",
        pattern: r"vbscript\s*:",
    },
    DetectionPattern {
        name: "html_data_uri",
        pattern: r"data\s*:\s*text/html",
    },
];

/// Scheme prefixes removed by the XSS sanitizer.
pub const DANGEROUS_SCHEME_PATTERN: &str = r"(?i)(?:javascript|vbscript)\s*:|data\s*:\s*text/html[^,]*,?";

struct CompiledPattern {
    name: &'static str,
    regex: Regex,
}

fn compile_catalogue(patterns: &[DetectionPattern]) -> Vec<CompiledPattern> {
    patterns
        .iter()
        .filter_map(|p| {
            match RegexBuilder::new(p.pattern)
                .case_insensitive(true)
                .dot_matches_new_line(true)
                .build()
            {
                Ok(regex) => Some(CompiledPattern { name: p.name, regex }),
                Err(e) => {
                    error!("Skipping detection pattern '{}': {}", p.name, e);
                    None
                }
            }
        })
        .collect()
}

static COMPILED_SQL: Lazy<Vec<CompiledPattern>> =
    Lazy::new(|| compile_catalogue(SQL_INJECTION_PATTERNS));
static COMPILED_XSS: Lazy<Vec<CompiledPattern>> =
    Lazy::new(|| compile_catalogue(XSS_PATTERNS));

pub(crate) static HTML_TAG: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(HTML_TAG_PATTERN)
        .dot_matches_new_line(true)
        .build()
        .expect("valid html tag regex")
});

pub(crate) static DANGEROUS_SCHEME: Lazy<Regex> =
    Lazy::new(|| Regex::new(DANGEROUS_SCHEME_PATTERN).expect("valid scheme regex"));

fn first_match(catalogue: &[CompiledPattern], text: &str) -> Option<&'static str> {
    let hit = catalogue.iter().find(|p| p.regex.is_match(text)).map(|p| p.name);
    if let Some(name) = hit {
        debug!("Detection pattern '{}' matched input.", name);
    }
    hit
}

/// Returns the name of the first SQL-injection pattern found in `text`.
pub fn detect_sql_injection(text: &str) -> Option<&'static str> {
    first_match(&COMPILED_SQL, text)
}

/// Returns the name of the first XSS pattern found in `text`.
pub fn detect_xss(text: &str) -> Option<&'static str> {
    first_match(&COMPILED_XSS, text)
}

/// Returns `true` if `text` contains a tag-shaped substring.
pub fn contains_html_tag(text: &str) -> bool {
    HTML_TAG.is_match(text)
}
