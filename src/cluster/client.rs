//! [`ClusterConnector`] over the Kafka wire protocol.

use super::sasl::{plain_payload, ScramClient};
use super::transport::Transport;
use super::wire::{
    self, check_error, ApiVersionsRequest, DescribeConfigsRequest, MetadataRequest, Request,
    SaslAuthenticateRequest, SaslHandshakeRequest,
};
use super::{BrokerSummary, ClusterConnector, ClusterSession, ConfigEntry};
use crate::context::profile::{Context, SaslMechanism};
use crate::error::ClusterError;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_CLIENT_ID: &str = "kafkactx";

/// Opens authenticated connections from a [`Context`].
#[derive(Debug, Clone)]
pub struct WireConnector {
    connect_timeout: Duration,
    client_id: String,
}

impl WireConnector {
    pub fn new(connect_timeout: Duration, client_id: impl Into<String>) -> Self {
        Self {
            connect_timeout,
            client_id: client_id.into(),
        }
    }
}

impl Default for WireConnector {
    fn default() -> Self {
        Self::new(DEFAULT_CONNECT_TIMEOUT, DEFAULT_CLIENT_ID)
    }
}

impl ClusterConnector for WireConnector {
    fn connect(&self, context: &Context) -> Result<Box<dyn ClusterSession>, ClusterError> {
        if context.bootstrap_servers.is_empty() {
            return Err(ClusterError::NoBootstrapServers);
        }
        if let Some(version) = context.kafka_version {
            if !version.supports_api_versions() {
                return Err(ClusterError::UnsupportedVersion(version.to_string()));
            }
        }

        let mut last_error = ClusterError::NoBootstrapServers;
        for address in &context.bootstrap_servers {
            match BrokerConnection::open(address, context, self) {
                Ok(connection) => {
                    info!(%address, "Connected to cluster");
                    return Ok(Box::new(WireSession {
                        bootstrap: connection,
                        context: context.clone(),
                        connector: self.clone(),
                    }));
                }
                Err(e) => {
                    warn!(%address, error = %e, "Bootstrap server failed");
                    last_error = match e {
                        e @ ClusterError::Connection { .. } => e,
                        other => ClusterError::Connection {
                            address: address.clone(),
                            reason: other.to_string(),
                        },
                    };
                }
            }
        }
        Err(last_error)
    }
}

/// One open, authenticated broker connection.
struct BrokerConnection {
    address: String,
    transport: Transport,
    client_id: String,
    correlation_id: i32,
}

impl BrokerConnection {
    fn open(
        address: &str,
        context: &Context,
        connector: &WireConnector,
    ) -> Result<Self, ClusterError> {
        let transport = Transport::connect(address, context.tls, connector.connect_timeout)?;
        let mut connection = Self {
            address: address.to_string(),
            transport,
            client_id: connector.client_id.clone(),
            correlation_id: 0,
        };

        let versions = connection.call(&ApiVersionsRequest)?;
        check_error(versions.error_code)?;
        debug!(
            %address,
            apis = versions.api_versions.len(),
            "Broker answered ApiVersions"
        );

        if context.sasl_enabled() {
            connection.authenticate(context)?;
        }
        Ok(connection)
    }

    fn call<R: Request>(&mut self, request: &R) -> Result<R::Response, ClusterError> {
        self.correlation_id = self.correlation_id.wrapping_add(1);
        let frame = wire::encode_request(request, self.correlation_id, &self.client_id);
        wire::write_frame(&mut self.transport, &frame)?;
        let response = wire::read_frame(&mut self.transport)?;
        wire::decode_response::<R>(&response, self.correlation_id)
    }

    fn authenticate(&mut self, context: &Context) -> Result<(), ClusterError> {
        let mechanism = match context.sasl_algorithm() {
            Some(raw) => raw
                .parse::<SaslMechanism>()
                .map_err(ClusterError::Authentication)?,
            None => SaslMechanism::Plain,
        };
        let username = context.sasl_username().unwrap_or_default();
        let password = context.sasl_password().unwrap_or_default();

        let handshake = self.call(&SaslHandshakeRequest {
            mechanism: mechanism.wire_name().to_string(),
        })?;
        if handshake.error_code != 0 {
            return Err(ClusterError::Authentication(format!(
                "{} rejected by broker ({}); enabled mechanisms: {}",
                mechanism.wire_name(),
                wire::error_name(handshake.error_code),
                handshake.mechanisms.join(", ")
            )));
        }

        match mechanism {
            SaslMechanism::Plain => {
                self.sasl_round(plain_payload(username, password))?;
            }
            SaslMechanism::ScramSha256 | SaslMechanism::ScramSha512 => {
                let mut scram = ScramClient::new(mechanism, username, password)?;
                let server_first = self.sasl_round(scram.client_first().into_bytes())?;
                let server_first = String::from_utf8(server_first).map_err(|_| {
                    ClusterError::Authentication("server-first is not UTF-8".to_string())
                })?;
                let client_final = scram.client_final(&server_first)?;
                let server_final = self.sasl_round(client_final.into_bytes())?;
                let server_final = String::from_utf8(server_final).map_err(|_| {
                    ClusterError::Authentication("server-final is not UTF-8".to_string())
                })?;
                scram.verify_server_final(&server_final)?;
            }
        }
        debug!(address = %self.address, mechanism = %mechanism, "SASL authenticated");
        Ok(())
    }

    fn sasl_round(&mut self, auth_bytes: Vec<u8>) -> Result<Vec<u8>, ClusterError> {
        let response = self.call(&SaslAuthenticateRequest { auth_bytes })?;
        if response.error_code != 0 {
            return Err(ClusterError::Authentication(
                response
                    .error_message
                    .unwrap_or_else(|| wire::error_name(response.error_code).to_string()),
            ));
        }
        Ok(response.auth_bytes)
    }
}

/// Session bound to the bootstrap connection that answered first.
struct WireSession {
    bootstrap: BrokerConnection,
    context: Context,
    connector: WireConnector,
}

impl ClusterSession for WireSession {
    fn list_brokers(&mut self) -> Result<Vec<BrokerSummary>, ClusterError> {
        let metadata = self.bootstrap.call(&MetadataRequest)?;
        let mut brokers: Vec<BrokerSummary> = metadata
            .brokers
            .into_iter()
            .map(|b| BrokerSummary {
                is_controller: b.node_id == metadata.controller_id,
                id: b.node_id,
                host: b.host,
                port: b.port,
            })
            .collect();
        brokers.sort_by_key(|b| b.id);
        Ok(brokers)
    }

    fn describe_broker_config(&mut self, broker_id: i32) -> Result<Vec<ConfigEntry>, ClusterError> {
        let broker = self
            .list_brokers()?
            .into_iter()
            .find(|b| b.id == broker_id)
            .ok_or(ClusterError::BrokerNotFound(broker_id))?;

        // Broker-scoped DescribeConfigs must reach that broker.
        let mut connection =
            BrokerConnection::open(&broker.address(), &self.context, &self.connector)?;
        let response = connection.call(&DescribeConfigsRequest::broker(broker_id))?;

        let result = response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| ClusterError::Protocol("empty DescribeConfigs response".into()))?;
        if result.error_code != 0 {
            return Err(ClusterError::Broker {
                code: result.error_code,
                message: result
                    .error_message
                    .unwrap_or_else(|| wire::error_name(result.error_code).to_string()),
            });
        }

        Ok(result
            .configs
            .into_iter()
            .map(|c| ConfigEntry {
                name: c.name,
                value: c.value,
                is_default: c.is_default,
                is_sensitive: c.is_sensitive,
            })
            .collect())
    }
}
