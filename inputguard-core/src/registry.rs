//! registry.rs - The live mapping from rule name to rule.
//!
//! The registry is seeded with the built-in rules and can be changed at
//! runtime. Registering a name that already exists replaces the entry; a
//! built-in replaced this way is remembered and comes back when the custom
//! rule is removed. A built-in removed outright is forgotten.
//!
//! License: MIT OR APACHE 2.0

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use log::{debug, info};

use crate::rules::builtin::builtin_rules;
use crate::rules::Rule;

#[derive(Clone)]
pub struct RuleRegistry {
    rules: HashMap<String, Arc<dyn Rule>>,
    /// Built-ins that can still be restored after a shadowing rule is removed.
    builtins: HashMap<String, Arc<dyn Rule>>,
}

impl RuleRegistry {
    /// Creates a registry holding every built-in rule.
    pub fn new() -> Self {
        let builtins: HashMap<String, Arc<dyn Rule>> = builtin_rules()
            .into_iter()
            .map(|rule| (rule.name().to_string(), rule))
            .collect();
        debug!("Seeded rule registry with {} built-in rules.", builtins.len());

        Self {
            rules: builtins.clone(),
            builtins,
        }
    }

    /// Creates a registry with no rules at all.
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
            builtins: HashMap::new(),
        }
    }

    /// Inserts `rule` under its name, replacing any existing entry.
    pub fn register(&mut self, rule: Arc<dyn Rule>) {
        let name = rule.name().to_string();
        if self.rules.insert(name.clone(), rule).is_some() {
            info!("Rule '{}' replaced an existing rule.", name);
        } else {
            debug!("Registered rule '{}'.", name);
        }
    }

    /// Removes the entry for `name`. Absent names are ignored.
    ///
    /// If the removed rule was shadowing a built-in of the same name, the
    /// built-in is restored.
    pub fn remove(&mut self, name: &str) {
        let Some(removed) = self.rules.remove(name) else {
            debug!("Rule '{}' is not registered; nothing to remove.", name);
            return;
        };

        match self.builtins.get(name) {
            Some(builtin) if Arc::ptr_eq(builtin, &removed) => {
                debug!("Removed built-in rule '{}'.", name);
                self.builtins.remove(name);
            }
            Some(builtin) => {
                info!("Removed custom rule '{}'; built-in restored.", name);
                self.rules.insert(name.to_string(), Arc::clone(builtin));
            }
            None => debug!("Removed rule '{}'.", name),
        }
    }

    pub fn resolve(&self, name: &str) -> Option<Arc<dyn Rule>> {
        self.rules.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Names of every registered rule, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.rules.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.names())
            .finish()
    }
}
