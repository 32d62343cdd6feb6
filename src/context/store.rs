//! Context Record Store: named contexts plus the designated current one.
//!
//! Invariant: `current_context`, when set, always names an entry in `contexts`.

use crate::context::profile::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationStore {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    current_context: Option<String>,

    #[serde(default)]
    contexts: BTreeMap<String, Context>,
}

impl ConfigurationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_context(&self) -> Option<&str> {
        self.current_context.as_deref()
    }

    /// The current context's name and profile.
    pub fn current(&self) -> Option<(&str, &Context)> {
        let name = self.current_context.as_deref()?;
        self.contexts.get(name).map(|ctx| (name, ctx))
    }

    /// Point `current_context` at an existing entry. Returns false (and changes nothing)
    /// when the name is unknown.
    pub fn set_current(&mut self, name: &str) -> bool {
        if self.contexts.contains_key(name) {
            self.current_context = Some(name.to_string());
            true
        } else {
            false
        }
    }

    pub fn get(&self, name: &str) -> Option<&Context> {
        self.contexts.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.contexts.contains_key(name)
    }

    /// Insert or replace; returns true when the name already existed.
    pub fn upsert(&mut self, name: &str, context: Context) -> bool {
        self.contexts.insert(name.to_string(), context).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Context)> {
        self.contexts.iter().map(|(name, ctx)| (name.as_str(), ctx))
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    /// Check the current-context invariant; used after deserialising a stored file.
    pub fn check_invariants(&self) -> Result<(), String> {
        match self.current_context.as_deref() {
            Some(name) if !self.contexts.contains_key(name) => Err(format!(
                "current_context \"{}\" does not name a stored context",
                name
            )),
            _ => Ok(()),
        }
    }
}
