//! CLI parse: clap types for kafkactx. No behavior; definitions only.

use crate::context::version::KafkaVersion;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// kafkactx - named Kafka connection contexts
#[derive(Parser)]
#[command(name = "kafkactx")]
#[command(about = "Manage named Kafka cluster contexts and inspect brokers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Settings file path (replaces the global settings file)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Contexts file path (overrides KAFKACTX_STORE and settings)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Never prompt; missing values stay missing
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stderr, stdout, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (when output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage connection contexts
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Inspect brokers of the current context
    Broker {
        #[command(subcommand)]
        command: BrokerCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Create a context or update fields of an existing one
    SetContext(SetContextArgs),
    /// Make NAME the current context
    UseContext {
        /// Context name
        name: String,
    },
    /// Print the current context name
    CurrentContext,
    /// List stored contexts
    GetContexts {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[derive(Args, Debug, Clone)]
pub struct SetContextArgs {
    /// Context name
    pub name: Option<String>,

    /// Modify the current context instead of a named one
    #[arg(long)]
    pub current: bool,

    /// Bootstrap servers, comma separated
    #[arg(long = "server")]
    pub server: Option<String>,

    /// Schema registry address (host:port or URL)
    #[arg(long)]
    pub schema_registry: Option<String>,

    /// ksqlDB address (host:port or URL)
    #[arg(long)]
    pub ksql: Option<String>,

    /// Kafka protocol version, e.g. 2.8.0
    #[arg(long = "version", value_parser = parse_kafka_version)]
    pub kafka_version: Option<KafkaVersion>,

    /// Enable SASL authentication
    #[arg(long)]
    pub sasl: bool,

    /// SASL mechanism: PLAIN, SCRAM-SHA-256, SCRAM-SHA-512
    #[arg(short = 'a', long)]
    pub algorithm: Option<String>,

    /// SASL username
    #[arg(short = 'u', long)]
    pub username: Option<String>,

    /// SASL password
    #[arg(short = 'p', long)]
    pub password: Option<String>,

    /// Use TLS for broker connections
    #[arg(long, action = ArgAction::Set, default_value_t = true)]
    pub tls: bool,
}

#[derive(Subcommand)]
pub enum BrokerCommands {
    /// Show broker configs, the controller by default
    GetConfigs {
        /// Broker id (defaults to the controller)
        broker_id: Option<String>,
    },
}

fn parse_kafka_version(raw: &str) -> Result<KafkaVersion, String> {
    raw.parse::<KafkaVersion>().map_err(|e| e.to_string())
}
