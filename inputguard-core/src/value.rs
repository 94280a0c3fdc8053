//! The value model every rule consumes and produces.
//!
//! Untrusted input arrives as a `serde_json::Value`: a closed tagged union of
//! null, boolean, number, string, array and object. Sanitized output uses the
//! same type, so a rule may legitimately change the variant (a numeric string
//! becoming a number) and callers pattern-match on what they get back.

pub use serde_json::{Map, Number, Value};

/// Human-readable name of the variant, used in type-mismatch messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Converts a finite float into a JSON number, preferring the integer
/// representation when the float is integral and fits in an `i64`.
pub fn number_from_f64(n: f64) -> Option<Number> {
    if !n.is_finite() {
        return None;
    }
    // `i64::MAX as f64` rounds up to 2^63, which is already out of range.
    if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
        return Some(Number::from(n as i64));
    }
    Number::from_f64(n)
}
