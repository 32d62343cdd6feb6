//! Broker commands: effective configuration of one broker (the controller by default).

use super::{ClusterConnector, ConfigEntry};
use crate::context::store::ConfigurationStore;
use crate::error::{ClusterError, CommandError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Column width for config values before they wrap.
pub const VALUE_WRAP_WIDTH: usize = 100;

pub struct BrokerCommandService;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerConfigsResult {
    pub context: String,
    pub broker_id: i32,
    pub entries: Vec<ConfigEntry>,
}

impl BrokerCommandService {
    pub fn parse_broker_id(raw: &str) -> Result<i32, CommandError> {
        raw.trim().parse::<i32>().map_err(|_| {
            CommandError::Usage(format!("broker id must be an integer, got '{}'", raw))
        })
    }

    /// Describe `broker_id`, or the controller when none is given, using the current context.
    pub fn get_configs(
        store: &ConfigurationStore,
        connector: &dyn ClusterConnector,
        broker_id: Option<&str>,
    ) -> Result<BrokerConfigsResult, CommandError> {
        let requested = broker_id.map(Self::parse_broker_id).transpose()?;
        let (name, context) = store.current().ok_or(CommandError::NoCurrentContext)?;

        let mut session = connector
            .connect(context)
            .map_err(|e| CommandError::Connectivity {
                target: context.bootstrap_servers.join(","),
                reason: e.to_string(),
            })?;

        let broker_id = match requested {
            Some(id) => id,
            None => {
                let controller = session
                    .list_brokers()?
                    .into_iter()
                    .find(|b| b.is_controller)
                    .ok_or(ClusterError::NoController)?;
                debug!(broker_id = controller.id, "Using controller broker");
                controller.id
            }
        };

        let entries = session.describe_broker_config(broker_id)?;
        info!(context = %name, broker_id, entries = entries.len(), "Described broker configs");
        Ok(BrokerConfigsResult {
            context: name.to_string(),
            broker_id,
            entries,
        })
    }
}

/// Split `value` into lines of at most `width` characters.
pub fn wrap(value: &str, width: usize) -> Vec<String> {
    if width == 0 || value.chars().count() <= width {
        return vec![value.to_string()];
    }
    let chars: Vec<char> = value.chars().collect();
    chars
        .chunks(width)
        .map(|chunk| chunk.iter().collect())
        .collect()
}
