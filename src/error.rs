//! Error types for kafkactx.

use std::path::PathBuf;
use thiserror::Error;

/// Persistence errors raised by the configuration store collaborator
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read store {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write store {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse store {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Failed to serialize store: {0}")]
    Serialize(String),
}

/// Address syntax errors raised before any network probe
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    #[error("address is empty")]
    EmptyAddress,

    #[error("port is needed on {address}")]
    MissingPort { address: String },

    #[error("invalid port '{port}' on {address}")]
    InvalidPort { address: String, port: String },
}

/// Errors from the broker query collaborator
#[derive(Debug, Error)]
pub enum ClusterError {
    #[error("no bootstrap servers configured")]
    NoBootstrapServers,

    #[error("connection to {address} failed: {reason}")]
    Connection { address: String, reason: String },

    #[error("TLS error: {0}")]
    Tls(String),

    #[error("SASL authentication failed: {0}")]
    Authentication(String),

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("broker returned error code {code}: {message}")]
    Broker { code: i16, message: String },

    #[error("broker {0} not found in cluster metadata")]
    BrokerNotFound(i32),

    #[error("could not find the controller broker")]
    NoController,

    #[error("Kafka version {0} predates ApiVersions; 0.10.0.0 or newer is required")]
    UnsupportedVersion(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Command-level errors. Every variant is terminal to the invocation and
/// leaves the configuration store untouched.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    Usage(String),

    #[error("{0}")]
    Validation(String),

    #[error("could not connect to {target}: {reason}")]
    Connectivity { target: String, reason: String },

    #[error("no current context is set")]
    NoCurrentContext,

    #[error("context \"{0}\" not found")]
    ContextNotFound(String),

    #[error(transparent)]
    Persistence(#[from] StoreError),

    #[error(transparent)]
    Cluster(#[from] ClusterError),

    #[error("Failed to get user input: {0}")]
    Prompt(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CommandError {
    /// Stable category name, used in logs and by callers that branch on failure class.
    pub fn kind(&self) -> &'static str {
        match self {
            CommandError::Usage(_) => "usage",
            CommandError::Validation(_) => "validation",
            CommandError::Connectivity { .. } => "connectivity",
            CommandError::NoCurrentContext | CommandError::ContextNotFound(_) => "not_found",
            CommandError::Persistence(_) => "persistence",
            CommandError::Cluster(_) => "cluster",
            CommandError::Prompt(_) => "prompt",
            CommandError::Config(_) => "config",
        }
    }

    pub fn is_usage(&self) -> bool {
        matches!(self, CommandError::Usage(_))
    }
}

impl From<config::ConfigError> for CommandError {
    fn from(err: config::ConfigError) -> Self {
        CommandError::Config(err.to_string())
    }
}

impl From<ProbeError> for CommandError {
    fn from(err: ProbeError) -> Self {
        CommandError::Validation(err.to_string())
    }
}

impl From<dialoguer::Error> for CommandError {
    fn from(err: dialoguer::Error) -> Self {
        CommandError::Prompt(err.to_string())
    }
}
