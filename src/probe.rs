//! Connectivity Prober
//!
//! Decides whether an auxiliary endpoint (schema registry, ksql) is reachable. An address
//! must carry an explicit `:port`; a missing port is a configuration error reported before
//! any socket is opened. Reachability is a single bounded-timeout TCP connect whose socket
//! is dropped as soon as the answer is known.

use crate::error::ProbeError;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;
use tracing::debug;

/// Reference probe bound.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Host and port extracted from an endpoint string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeTarget {
    pub host: String,
    pub port: u16,
}

impl ProbeTarget {
    pub fn authority(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

/// Parse `host:port`, tolerating a URL scheme and path around the authority
/// (`http://registry:8081/` probes `registry:8081`).
pub fn parse_address(address: &str) -> Result<ProbeTarget, ProbeError> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(ProbeError::EmptyAddress);
    }

    let without_scheme = match trimmed.split_once("://") {
        Some((_, rest)) => rest,
        None => trimmed,
    };
    let authority = without_scheme
        .split(&['/', '?', '#'][..])
        .next()
        .unwrap_or_default();
    let authority = match authority.rsplit_once('@') {
        Some((_, host_part)) => host_part,
        None => authority,
    };

    let (host, port) = if let Some(rest) = authority.strip_prefix('[') {
        // [v6]:port
        let (host, tail) = rest.split_once(']').ok_or_else(|| ProbeError::MissingPort {
            address: address.to_string(),
        })?;
        let port = tail.strip_prefix(':').ok_or_else(|| ProbeError::MissingPort {
            address: address.to_string(),
        })?;
        (host, port)
    } else {
        authority
            .rsplit_once(':')
            .ok_or_else(|| ProbeError::MissingPort {
                address: address.to_string(),
            })?
    };

    if host.is_empty() {
        return Err(ProbeError::EmptyAddress);
    }
    if port.is_empty() {
        return Err(ProbeError::MissingPort {
            address: address.to_string(),
        });
    }
    let port = port.parse::<u16>().map_err(|_| ProbeError::InvalidPort {
        address: address.to_string(),
        port: port.to_string(),
    })?;

    Ok(ProbeTarget {
        host: host.to_string(),
        port,
    })
}

/// Reachability check seam. The command layer validates syntax with [`parse_address`]
/// first, so implementations only see well-formed targets.
pub trait HostProbe: Send + Sync {
    fn is_reachable(&self, target: &ProbeTarget) -> bool;
}

/// TCP connect probe with a fixed timeout.
#[derive(Debug, Clone)]
pub struct TcpProbe {
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for TcpProbe {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_TIMEOUT)
    }
}

impl HostProbe for TcpProbe {
    fn is_reachable(&self, target: &ProbeTarget) -> bool {
        let addrs: Vec<SocketAddr> = match (target.host.as_str(), target.port).to_socket_addrs() {
            Ok(addrs) => addrs.collect(),
            Err(e) => {
                debug!(endpoint = %target.authority(), error = %e, "Probe address did not resolve");
                return false;
            }
        };

        for addr in addrs {
            match TcpStream::connect_timeout(&addr, self.timeout) {
                Ok(stream) => {
                    drop(stream);
                    debug!(endpoint = %target.authority(), %addr, "Probe connected");
                    return true;
                }
                Err(e) => {
                    debug!(endpoint = %target.authority(), %addr, error = %e, "Probe attempt failed");
                }
            }
        }
        false
    }
}

/// Syntax check plus probe in one call.
pub fn is_reachable(probe: &dyn HostProbe, address: &str) -> Result<bool, ProbeError> {
    let target = parse_address(address)?;
    Ok(probe.is_reachable(&target))
}
