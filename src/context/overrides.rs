//! Field overrides with provenance.
//!
//! `Override::Unset` means the flag was never given; `Override::Set("")` means it was given
//! empty. The merge engine only looks at provenance, never at the value's emptiness.

use crate::context::version::KafkaVersion;

/// A field value together with whether it was explicitly provided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Override<T> {
    Unset,
    Set(T),
}

impl<T> Default for Override<T> {
    fn default() -> Self {
        Override::Unset
    }
}

impl<T> Override<T> {
    pub fn provided(&self) -> bool {
        matches!(self, Override::Set(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Override::Set(v) => Some(v),
            Override::Unset => None,
        }
    }

    pub fn set(&mut self, value: T) {
        *self = Override::Set(value);
    }

    /// Apply onto `target` when provided.
    pub fn apply_to(&self, target: &mut T)
    where
        T: Clone,
    {
        if let Override::Set(v) = self {
            *target = v.clone();
        }
    }
}

impl<T> From<Option<T>> for Override<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Override::Set(v),
            None => Override::Unset,
        }
    }
}

/// Every field `set-context` can change. `tls` is not tracked: it always carries the
/// flag's current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextOverrides {
    pub bootstrap_servers: Override<Vec<String>>,
    pub kafka_version: Override<KafkaVersion>,
    pub schema_registry: Override<String>,
    pub ksql: Override<String>,
    pub sasl: Override<bool>,
    pub algorithm: Override<String>,
    pub username: Override<String>,
    pub password: Override<String>,
    pub tls: bool,
}

impl Default for ContextOverrides {
    fn default() -> Self {
        Self {
            bootstrap_servers: Override::Unset,
            kafka_version: Override::Unset,
            schema_registry: Override::Unset,
            ksql: Override::Unset,
            sasl: Override::Unset,
            algorithm: Override::Unset,
            username: Override::Unset,
            password: Override::Unset,
            tls: true,
        }
    }
}

impl ContextOverrides {
    /// True when any SASL-related field was supplied.
    pub fn touches_sasl(&self) -> bool {
        self.sasl.provided()
            || self.algorithm.provided()
            || self.username.provided()
            || self.password.provided()
    }

    pub fn set_bootstrap_servers(&mut self, raw: &str) {
        self.bootstrap_servers.set(split_servers(raw));
    }
}

/// Split a comma-separated server list: trimmed, empties dropped, first occurrence wins.
pub fn split_servers(raw: &str) -> Vec<String> {
    let mut servers: Vec<String> = Vec::new();
    for entry in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !servers.iter().any(|s| s == entry) {
            servers.push(entry.to_string());
        }
    }
    servers
}
