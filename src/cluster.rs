//! Broker Query Collaborator
//!
//! Narrow contract the context commands consume: open a session for a context, list the
//! brokers (with the controller flagged), and describe one broker's effective configuration.
//! [`WireConnector`] implements it over the Kafka wire protocol.

use crate::context::profile::Context;
use crate::error::ClusterError;
use serde::{Deserialize, Serialize};

pub mod client;
pub mod commands;
pub mod sasl;
pub mod transport;
pub mod wire;

pub use client::WireConnector;

/// One cluster member as reported by metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerSummary {
    pub id: i32,
    pub host: String,
    pub port: i32,
    pub is_controller: bool,
}

impl BrokerSummary {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// One effective broker configuration entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntry {
    pub name: String,
    pub value: Option<String>,
    pub is_default: bool,
    pub is_sensitive: bool,
}

/// An open session. Dropping it closes every socket it holds.
pub trait ClusterSession {
    fn list_brokers(&mut self) -> Result<Vec<BrokerSummary>, ClusterError>;

    fn describe_broker_config(&mut self, broker_id: i32) -> Result<Vec<ConfigEntry>, ClusterError>;
}

/// Opens sessions against the cluster a context describes (possibly one not yet saved).
pub trait ClusterConnector: Send + Sync {
    fn connect(&self, context: &Context) -> Result<Box<dyn ClusterSession>, ClusterError>;
}
