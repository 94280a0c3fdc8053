//! Configuration management for `inputguard-core`.
//!
//! A [`ValidatorConfig`] carries the two settings a validator is built with:
//! strict mode and the maximum accepted string length. It can be loaded from
//! a YAML file and overridden from environment variables. A validator copies
//! its configuration at construction; changing it means building a new one.
//!
//! License: MIT OR Apache-2.0

use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::errors::GuardError;

/// Default upper bound on the length of a string input, in characters.
pub const DEFAULT_MAX_INPUT_LENGTH: usize = 10_000;

pub const ENV_STRICT: &str = "INPUTGUARD_STRICT";
pub const ENV_MAX_INPUT_LENGTH: &str = "INPUTGUARD_MAX_INPUT_LENGTH";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct ValidatorConfig {
    /// When true, a failed validation never carries a sanitized value.
    pub strict: bool,
    /// Strings longer than this are rejected before any rule runs.
    pub max_input_length: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            strict: true,
            max_input_length: DEFAULT_MAX_INPUT_LENGTH,
        }
    }
}

impl ValidatorConfig {
    pub fn new(strict: bool, max_input_length: usize) -> Self {
        Self {
            strict,
            max_input_length,
        }
    }

    /// Loads a configuration from a YAML file. Missing keys take their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading validator configuration from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: ValidatorConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.validate()?;
        debug!("Loaded configuration {:?} from {}.", config, path.display());
        Ok(config)
    }

    /// Applies `INPUTGUARD_STRICT` and `INPUTGUARD_MAX_INPUT_LENGTH` on top of `self`.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary key lookup.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_STRICT) {
            self.strict = parse_flag(&raw)
                .with_context(|| format!("Failed to parse {}", ENV_STRICT))?;
            debug!("Overriding strict mode with {}.", self.strict);
        }

        if let Some(raw) = lookup(ENV_MAX_INPUT_LENGTH) {
            self.max_input_length = raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("Failed to parse {}='{}'", ENV_MAX_INPUT_LENGTH, raw))?;
            debug!("Overriding max input length with {}.", self.max_input_length);
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), GuardError> {
        if self.max_input_length == 0 {
            return Err(GuardError::InvalidConfig(
                "'max_input_length' must be greater than 0".to_string(),
            ));
        }
        if !self.strict {
            warn!(
                "Validator running in non-strict mode: failed inputs will carry sanitized values."
            );
        }
        Ok(())
    }
}

fn parse_flag(raw: &str) -> Result<bool, GuardError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(GuardError::InvalidConfig(format!("'{}' is not a boolean", other))),
    }
}
