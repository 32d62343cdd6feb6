//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::cluster::commands::BrokerCommandService;
use crate::cluster::{ClusterConnector, WireConnector};
use crate::config::{ConfigLoader, KafkactxConfig};
use crate::context::{
    ContextCommandService, ContextOverrides, ContextStorage, DialoguerPrompter,
    FileContextStorage, Prompter, SetContextDeps, SetContextRequest,
};
use crate::error::CommandError;
use crate::probe::{HostProbe, TcpProbe};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use crate::cli::command_name;
use crate::cli::parse::{BrokerCommands, Commands, ConfigCommands, SetContextArgs};
use crate::cli::presentation::{
    format_broker_configs_text, format_context_list_json, format_context_list_text,
    format_set_context_result, format_use_context_result,
};

/// Runtime context for CLI execution: settings plus the collaborators commands use.
pub struct RunContext {
    settings: KafkactxConfig,
    storage: Box<dyn ContextStorage>,
    connector: Arc<dyn ClusterConnector>,
    probe: Arc<dyn HostProbe>,
    prompter: Mutex<Box<dyn Prompter>>,
    quiet: bool,
}

impl RunContext {
    /// Build from the settings file chain and the contexts file location.
    pub fn new(
        config_path: Option<PathBuf>,
        store_path: Option<PathBuf>,
        quiet: bool,
    ) -> Result<Self, CommandError> {
        let settings = ConfigLoader::load_optional(config_path.as_deref())?;
        settings.validate()?;

        let store_path = settings.resolve_store_path(store_path.as_deref())?;
        debug!(store = %store_path.display(), "Resolved contexts file");

        let connector = WireConnector::new(
            settings.network.connect_timeout(),
            settings.network.client_id.clone(),
        );
        let probe = TcpProbe::new(settings.network.probe_timeout());

        Ok(Self::with_components(
            settings,
            Box::new(FileContextStorage::new(store_path)),
            Arc::new(connector),
            Arc::new(probe),
            Box::new(DialoguerPrompter),
            quiet,
        ))
    }

    /// Assemble from explicit collaborators.
    pub fn with_components(
        settings: KafkactxConfig,
        storage: Box<dyn ContextStorage>,
        connector: Arc<dyn ClusterConnector>,
        probe: Arc<dyn HostProbe>,
        prompter: Box<dyn Prompter>,
        quiet: bool,
    ) -> Self {
        Self {
            settings,
            storage,
            connector,
            probe,
            prompter: Mutex::new(prompter),
            quiet,
        }
    }

    pub fn settings(&self) -> &KafkactxConfig {
        &self.settings
    }

    pub fn store_location(&self) -> &Path {
        self.storage.location()
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, CommandError> {
        let name = command_name(command);
        debug!(command = %name, quiet = self.quiet, "Executing command");
        let result = match command {
            Commands::Config { command } => self.handle_config_command(command),
            Commands::Broker { command } => self.handle_broker_command(command),
        };
        if let Err(e) = &result {
            debug!(command = %name, kind = e.kind(), error = %e, "Command failed");
        }
        result
    }

    fn handle_config_command(&self, command: &ConfigCommands) -> Result<String, CommandError> {
        match command {
            ConfigCommands::SetContext(args) => self.set_context(args),
            ConfigCommands::UseContext { name } => {
                let mut store = self.storage.load()?;
                ContextCommandService::use_context(&mut store, name)?;
                self.storage.save(&store)?;
                Ok(format_use_context_result(name))
            }
            ConfigCommands::CurrentContext => {
                let store = self.storage.load()?;
                ContextCommandService::current_context(&store)
            }
            ConfigCommands::GetContexts { format } => {
                let store = self.storage.load()?;
                let result = ContextCommandService::list_contexts(&store);
                match format.as_str() {
                    "json" => format_context_list_json(&result),
                    "text" => Ok(format_context_list_text(&result)),
                    other => Err(CommandError::Usage(format!(
                        "unknown format '{}' (expected text or json)",
                        other
                    ))),
                }
            }
        }
    }

    fn set_context(&self, args: &SetContextArgs) -> Result<String, CommandError> {
        let mut store = self.storage.load()?;
        let request = SetContextRequest {
            name: args.name.clone(),
            current: args.current,
            overrides: overrides_from_args(args),
            quiet: self.quiet,
        };

        let result = {
            let mut prompter = self.prompter.lock();
            ContextCommandService::set_context(
                &mut store,
                request,
                SetContextDeps {
                    prompter: &mut **prompter,
                    probe: self.probe.as_ref(),
                    connector: self.connector.as_ref(),
                },
            )?
        };

        self.storage.save(&store)?;
        info!(
            context = %result.name,
            store = %self.storage.location().display(),
            "Contexts file saved"
        );
        Ok(format_set_context_result(&result))
    }

    fn handle_broker_command(&self, command: &BrokerCommands) -> Result<String, CommandError> {
        match command {
            BrokerCommands::GetConfigs { broker_id } => {
                let store = self.storage.load()?;
                let result = BrokerCommandService::get_configs(
                    &store,
                    self.connector.as_ref(),
                    broker_id.as_deref(),
                )?;
                Ok(format_broker_configs_text(&result))
            }
        }
    }
}

/// Flags to overrides. Only flags actually given count as provided; `--tls` always applies.
pub fn overrides_from_args(args: &SetContextArgs) -> ContextOverrides {
    let mut overrides = ContextOverrides::default();
    if let Some(raw) = &args.server {
        overrides.set_bootstrap_servers(raw);
    }
    overrides.kafka_version = args.kafka_version.into();
    overrides.schema_registry = args.schema_registry.clone().into();
    overrides.ksql = args.ksql.clone().into();
    if args.sasl {
        overrides.sasl.set(true);
    }
    overrides.algorithm = args.algorithm.clone().into();
    overrides.username = args.username.clone().into();
    overrides.password = args.password.clone().into();
    overrides.tls = args.tls;
    overrides
}
