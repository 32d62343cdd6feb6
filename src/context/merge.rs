//! Field Merge Engine: apply provided overrides onto a base context.
//!
//! The base is taken by reference and the result is a fresh value, so the caller's copy
//! is never touched. Fields without an override keep their base value; `tls` is always
//! taken from the override, and any SASL override latches `sasl.enabled` on.

use crate::context::overrides::ContextOverrides;
use crate::context::profile::{Context, SaslConfig};
use tracing::debug;

pub fn merge(base: &Context, overrides: &ContextOverrides) -> Context {
    let mut merged = base.clone();

    overrides
        .bootstrap_servers
        .apply_to(&mut merged.bootstrap_servers);

    if let Some(version) = overrides.kafka_version.value() {
        merged.kafka_version = Some(*version);
    }
    if let Some(registry) = overrides.schema_registry.value() {
        merged.schema_registry = endpoint(registry);
    }
    if let Some(ksql) = overrides.ksql.value() {
        merged.ksql = endpoint(ksql);
    }

    if overrides.touches_sasl() {
        let sasl = merged.sasl.get_or_insert_with(SaslConfig::default);
        sasl.enabled = true;
        if let Some(algorithm) = overrides.algorithm.value() {
            sasl.algorithm = Some(algorithm.clone());
        }
        if let Some(username) = overrides.username.value() {
            sasl.username = Some(username.clone());
        }
        if let Some(password) = overrides.password.value() {
            sasl.password = Some(password.clone());
        }
    }

    merged.tls = overrides.tls;

    debug!(merged = %merged, "Merged context overrides");
    merged
}

/// A provided-empty endpoint clears the stored one.
fn endpoint(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
