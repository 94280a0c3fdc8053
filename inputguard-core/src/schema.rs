//! Recursive description of which rules apply where inside a value.
//!
//! In YAML or JSON a schema is written as:
//!
//! * a list of rule names, applied to the value itself;
//! * `{ each: <schema> }`, applied to every element of an array;
//! * any other map of `key: <schema>`, applied to the fields of an object.
//!
//! ```yaml
//! email: [noEmpty, email]
//! tags:
//!   each: [alphanumericOnly]
//! address:
//!   city: [noSpecialChars]
//! ```
//!
//! License: MIT OR Apache-2.0

use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use log::info;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::GuardError;

/// Key reserved for the array-element form.
const EACH_KEY: &str = "each";

/// Rule names per object key, in the order they should be evaluated.
pub type RulesByKey = IndexMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schema {
    Rules(Vec<String>),
    Fields(IndexMap<String, Schema>),
    Elements(Box<Schema>),
}

impl Schema {
    pub fn rules<S: AsRef<str>>(names: &[S]) -> Self {
        Schema::Rules(names.iter().map(|n| n.as_ref().to_string()).collect())
    }

    pub fn each(inner: Schema) -> Self {
        Schema::Elements(Box::new(inner))
    }

    /// One level of object fields, each with a flat rule list.
    pub fn fields(rules_by_key: &RulesByKey) -> Self {
        Schema::Fields(
            rules_by_key
                .iter()
                .map(|(key, names)| (key.clone(), Schema::Rules(names.clone())))
                .collect(),
        )
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let schema: Schema = serde_yml::from_str(text).context("Failed to parse schema")?;
        schema.validate()?;
        Ok(schema)
    }

    /// Rejects shapes that parse but cannot mean what the author intended:
    /// empty field maps, blank rule names, and `each` mixed with other keys.
    pub fn validate(&self) -> Result<(), GuardError> {
        match self {
            Schema::Rules(names) => match names.iter().find(|n| n.trim().is_empty()) {
                Some(_) => Err(GuardError::InvalidSchema("rule names cannot be blank".to_string())),
                None => Ok(()),
            },
            Schema::Elements(inner) => inner.validate(),
            Schema::Fields(fields) => {
                if fields.is_empty() {
                    return Err(GuardError::InvalidSchema(
                        "a field map needs at least one key".to_string(),
                    ));
                }
                if fields.contains_key(EACH_KEY) {
                    return Err(GuardError::InvalidSchema(format!(
                        "'{}' cannot be combined with other keys",
                        EACH_KEY
                    )));
                }
                fields.values().try_for_each(Schema::validate)
            }
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading validation schema from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read schema file {}", path.display()))?;
        Self::from_yaml_str(&text).with_context(|| format!("Invalid schema in {}", path.display()))
    }
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct EachForm {
    each: Box<SchemaForm>,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum SchemaForm {
    Rules(Vec<String>),
    Each(EachForm),
    Fields(IndexMap<String, SchemaForm>),
}

impl From<SchemaForm> for Schema {
    fn from(form: SchemaForm) -> Self {
        match form {
            SchemaForm::Rules(names) => Schema::Rules(names),
            SchemaForm::Each(each) => Schema::Elements(Box::new(Schema::from(*each.each))),
            SchemaForm::Fields(fields) => {
                Schema::Fields(fields.into_iter().map(|(k, v)| (k, Schema::from(v))).collect())
            }
        }
    }
}

impl From<&Schema> for SchemaForm {
    fn from(schema: &Schema) -> Self {
        match schema {
            Schema::Rules(names) => SchemaForm::Rules(names.clone()),
            Schema::Elements(inner) => SchemaForm::Each(EachForm {
                each: Box::new(SchemaForm::from(inner.as_ref())),
            }),
            Schema::Fields(fields) => {
                SchemaForm::Fields(
                    fields
                        .iter()
                        .map(|(k, v)| (k.clone(), SchemaForm::from(v)))
                        .collect(),
                )
            }
        }
    }
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        SchemaForm::deserialize(deserializer).map(Schema::from)
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SchemaForm::from(self).serialize(serializer)
    }
}
