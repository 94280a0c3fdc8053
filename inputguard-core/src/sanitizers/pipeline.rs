//! pipeline.rs - Fail-open fold of a value through a list of rules' sanitizers.
//!
//! The fold threads the last good value. When a step fails, the fold stops and
//! returns that value, which is the original input if the very first step
//! fails. Nothing here ever returns an error to the caller.
//!
//! License: MIT OR APACHE 2.0

use std::sync::Arc;

use log::{debug, warn};

use crate::rules::Rule;
use crate::value::Value;

/// Applies each rule's sanitize step in order, skipping rules without one.
pub fn fold_fail_open(value: &Value, rules: &[Arc<dyn Rule>]) -> Value {
    let mut last_good = value.clone();

    for rule in rules {
        let Some(outcome) = rule.sanitize(&last_good) else {
            continue;
        };
        match outcome {
            Ok(next) => {
                debug!("Sanitizer '{}' applied.", rule.name());
                last_good = next;
            }
            Err(e) => {
                warn!(
                    "Sanitizer '{}' failed ({}); keeping the value from before this step.",
                    rule.name(),
                    e
                );
                return last_good;
            }
        }
    }

    last_good
}
