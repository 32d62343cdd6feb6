//! Context command service: `set-context` orchestration plus the read/select commands.
//!
//! `set_context` walks ResolveName -> LoadOrCreate -> Complete -> Merge -> Validate ->
//! ConnectivityCheck -> Persist. Any failure returns before Persist, so the in-memory
//! store is only touched once everything has passed.

use crate::cluster::ClusterConnector;
use crate::context::completion::{complete, Prompter};
use crate::context::merge::merge;
use crate::context::overrides::ContextOverrides;
use crate::context::profile::{Context, SaslMechanism};
use crate::context::store::ConfigurationStore;
use crate::error::CommandError;
use crate::probe::{parse_address, HostProbe};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub struct ContextCommandService;

/// Inputs of one `set-context` invocation.
#[derive(Debug, Clone, Default)]
pub struct SetContextRequest {
    pub name: Option<String>,
    pub current: bool,
    pub overrides: ContextOverrides,
    pub quiet: bool,
}

/// Collaborators used while setting a context.
pub struct SetContextDeps<'a> {
    pub prompter: &'a mut dyn Prompter,
    pub probe: &'a dyn HostProbe,
    pub connector: &'a dyn ClusterConnector,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetContextOutcome {
    Created,
    Modified,
}

/// Result of set-context.
#[derive(Debug, Clone)]
pub struct SetContextResult {
    pub name: String,
    pub outcome: SetContextOutcome,
    pub context: Context,
}

/// One row of get-contexts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextListEntry {
    pub name: String,
    pub current: bool,
    pub bootstrap_servers: Vec<String>,
    pub kafka_version: Option<String>,
    pub schema_registry: Option<String>,
    pub ksql: Option<String>,
    pub sasl: bool,
    pub tls: bool,
}

/// Result of get-contexts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextListResult {
    pub current_context: Option<String>,
    pub contexts: Vec<ContextListEntry>,
}

impl ContextCommandService {
    /// Target name from an explicit NAME or `--current`; exactly one must be given.
    pub fn resolve_name(
        store: &ConfigurationStore,
        name: Option<&str>,
        current: bool,
    ) -> Result<String, CommandError> {
        let name = name.filter(|n| !n.is_empty());
        match (name, current) {
            (Some(_), true) => Err(CommandError::Usage(
                "you cannot specify both a context name and --current".to_string(),
            )),
            (None, false) => Err(CommandError::Usage(
                "you must specify a non-empty context name or --current".to_string(),
            )),
            (Some(n), false) => Ok(n.to_string()),
            (None, true) => store
                .current_context()
                .map(str::to_string)
                .ok_or(CommandError::NoCurrentContext),
        }
    }

    /// Create-or-merge a context. Mutates `store` only on success; the caller persists it.
    pub fn set_context(
        store: &mut ConfigurationStore,
        request: SetContextRequest,
        deps: SetContextDeps<'_>,
    ) -> Result<SetContextResult, CommandError> {
        let SetContextRequest {
            name,
            current,
            mut overrides,
            quiet,
        } = request;

        let name = Self::resolve_name(store, name.as_deref(), current)?;

        let (base, exists) = match store.get(&name) {
            Some(existing) => (existing.clone(), true),
            None => (Context::default(), false),
        };
        debug!(context = %name, exists, quiet, "Loaded starting context");

        complete(&base, &mut overrides, deps.prompter, quiet)?;

        let merged = merge(&base, &overrides);

        Self::validate(&merged, &overrides, quiet, deps.probe)?;
        Self::check_connection(&merged, &overrides, deps.connector)?;

        store.upsert(&name, merged.clone());
        let outcome = if exists {
            SetContextOutcome::Modified
        } else {
            SetContextOutcome::Created
        };
        info!(context = %name, ?outcome, "Context stored");

        Ok(SetContextResult {
            name,
            outcome,
            context: merged,
        })
    }

    /// Structural checks on the merged context. Endpoint syntax is checked before any probe.
    pub fn validate(
        merged: &Context,
        overrides: &ContextOverrides,
        quiet: bool,
        probe: &dyn HostProbe,
    ) -> Result<(), CommandError> {
        let endpoints = [
            ("ksql", overrides.ksql.provided(), merged.ksql.as_deref()),
            (
                "schema-registry",
                overrides.schema_registry.provided(),
                merged.schema_registry.as_deref(),
            ),
        ];

        for (label, provided, address) in endpoints {
            let Some(address) = address.filter(|_| provided) else {
                continue;
            };
            let target = parse_address(address)?;
            if quiet {
                continue;
            }
            if !probe.is_reachable(&target) {
                return Err(CommandError::Connectivity {
                    target: address.to_string(),
                    reason: format!("failed to connect on {}", label),
                });
            }
            debug!(endpoint = label, %address, "Endpoint reachable");
        }

        if let Some(algorithm) = overrides.algorithm.value() {
            algorithm
                .parse::<SaslMechanism>()
                .map_err(CommandError::Validation)?;
        }

        if quiet && overrides.touches_sasl() {
            let present = |v: Option<&str>| v.map(|s| !s.is_empty()).unwrap_or(false);
            if !present(merged.sasl_username()) {
                return Err(CommandError::Validation(
                    "username is required when SASL is enabled in quiet mode".to_string(),
                ));
            }
            if !present(merged.sasl_password()) {
                return Err(CommandError::Validation(
                    "password is required when SASL is enabled in quiet mode".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Live cluster check, only when this update changed the bootstrap servers.
    pub fn check_connection(
        merged: &Context,
        overrides: &ContextOverrides,
        connector: &dyn ClusterConnector,
    ) -> Result<(), CommandError> {
        if !overrides.bootstrap_servers.provided() {
            debug!("Bootstrap servers unchanged, skipping connectivity check");
            return Ok(());
        }

        let session = connector
            .connect(merged)
            .map_err(|e| CommandError::Connectivity {
                target: merged.bootstrap_servers.join(","),
                reason: e.to_string(),
            })?;
        drop(session);
        Ok(())
    }

    /// Select the current context.
    pub fn use_context(store: &mut ConfigurationStore, name: &str) -> Result<(), CommandError> {
        if store.set_current(name) {
            info!(context = %name, "Switched current context");
            Ok(())
        } else {
            Err(CommandError::ContextNotFound(name.to_string()))
        }
    }

    pub fn current_context(store: &ConfigurationStore) -> Result<String, CommandError> {
        store
            .current_context()
            .map(str::to_string)
            .ok_or(CommandError::NoCurrentContext)
    }

    pub fn list_contexts(store: &ConfigurationStore) -> ContextListResult {
        let current = store.current_context();
        let contexts = store
            .iter()
            .map(|(name, ctx)| ContextListEntry {
                name: name.to_string(),
                current: current == Some(name),
                bootstrap_servers: ctx.bootstrap_servers.clone(),
                kafka_version: ctx.kafka_version.map(|v| v.to_string()),
                schema_registry: ctx.schema_registry.clone(),
                ksql: ctx.ksql.clone(),
                sasl: ctx.sasl_enabled(),
                tls: ctx.tls,
            })
            .collect();
        ContextListResult {
            current_context: current.map(str::to_string),
            contexts,
        }
    }
}
