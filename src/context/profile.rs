//! Context profile schema owned by the context domain.

use crate::context::version::KafkaVersion;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Connection parameters for one cluster and its auxiliary services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    /// `host:port` endpoints; order is kept for display only
    #[serde(default)]
    pub bootstrap_servers: Vec<String>,

    /// Protocol dialect used when talking to the cluster
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kafka_version: Option<KafkaVersion>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_registry: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ksql: Option<String>,

    #[serde(default = "default_tls")]
    pub tls: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sasl: Option<SaslConfig>,
}

fn default_tls() -> bool {
    true
}

impl Default for Context {
    fn default() -> Self {
        Self {
            bootstrap_servers: Vec::new(),
            kafka_version: None,
            schema_registry: None,
            ksql: None,
            tls: default_tls(),
            sasl: None,
        }
    }
}

impl Context {
    pub fn sasl_enabled(&self) -> bool {
        self.sasl.as_ref().map(|s| s.enabled).unwrap_or(false)
    }

    pub fn sasl_algorithm(&self) -> Option<&str> {
        self.sasl.as_ref().and_then(|s| s.algorithm.as_deref())
    }

    pub fn sasl_username(&self) -> Option<&str> {
        self.sasl.as_ref().and_then(|s| s.username.as_deref())
    }

    pub fn sasl_password(&self) -> Option<&str> {
        self.sasl.as_ref().and_then(|s| s.password.as_deref())
    }
}

/// Redacted single-line rendering, safe for logs.
impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "servers=[{}]", self.bootstrap_servers.join(","))?;
        if let Some(version) = &self.kafka_version {
            write!(f, " version={}", version)?;
        }
        if let Some(registry) = &self.schema_registry {
            write!(f, " schema_registry={}", registry)?;
        }
        if let Some(ksql) = &self.ksql {
            write!(f, " ksql={}", ksql)?;
        }
        write!(f, " tls={}", self.tls)?;
        if let Some(sasl) = &self.sasl {
            write!(
                f,
                " sasl={{enabled={} algorithm={} username={} password={}}}",
                sasl.enabled,
                sasl.algorithm.as_deref().unwrap_or("-"),
                sasl.username.as_deref().unwrap_or("-"),
                if sasl.password.is_some() { "***" } else { "-" }
            )?;
        }
        Ok(())
    }
}

/// SASL credentials block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaslConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Supported SASL mechanisms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaslMechanism {
    Plain,
    ScramSha256,
    ScramSha512,
}

impl SaslMechanism {
    /// Name sent in the SaslHandshake request.
    pub fn wire_name(&self) -> &'static str {
        match self {
            SaslMechanism::Plain => "PLAIN",
            SaslMechanism::ScramSha256 => "SCRAM-SHA-256",
            SaslMechanism::ScramSha512 => "SCRAM-SHA-512",
        }
    }
}

impl fmt::Display for SaslMechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for SaslMechanism {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" => Ok(SaslMechanism::Plain),
            "scram-sha-256" | "sha256" => Ok(SaslMechanism::ScramSha256),
            "scram-sha-512" | "sha512" => Ok(SaslMechanism::ScramSha512),
            other => Err(format!(
                "unsupported SASL algorithm '{}': must be PLAIN, SCRAM-SHA-256 or SCRAM-SHA-512",
                other
            )),
        }
    }
}
