//! CLI help and command-name contract for logging and usage hints.

use crate::cli::parse::{BrokerCommands, Commands, ConfigCommands};

/// Dotted command name for logs (e.g. "config.set_context").
pub fn command_name(command: &Commands) -> String {
    match command {
        Commands::Config { command } => format!("config.{}", config_command_name(command)),
        Commands::Broker { command } => format!("broker.{}", broker_command_name(command)),
    }
}

/// Command path as typed on the command line (e.g. "config set-context").
pub fn command_path(command: &Commands) -> String {
    command_name(command).replace('.', " ").replace('_', "-")
}

pub fn config_command_name(command: &ConfigCommands) -> &'static str {
    match command {
        ConfigCommands::SetContext(_) => "set_context",
        ConfigCommands::UseContext { .. } => "use_context",
        ConfigCommands::CurrentContext => "current_context",
        ConfigCommands::GetContexts { .. } => "get_contexts",
    }
}

pub fn broker_command_name(command: &BrokerCommands) -> &'static str {
    match command {
        BrokerCommands::GetConfigs { .. } => "get_configs",
    }
}
