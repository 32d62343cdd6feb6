//! Byte transport to one broker: plain TCP or TLS over TCP.

use crate::error::ClusterError;
use crate::probe::parse_address;
use rustls::pki_types::ServerName;
use rustls::{ClientConfig, ClientConnection, RootCertStore, StreamOwned};
use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub enum Transport {
    Plain(TcpStream),
    Tls(Box<StreamOwned<ClientConnection, TcpStream>>),
}

impl Transport {
    /// Connect to `address` (`host:port`), bounded by `timeout` for connect and each read/write.
    pub fn connect(address: &str, tls: bool, timeout: Duration) -> Result<Self, ClusterError> {
        let target = parse_address(address).map_err(|e| ClusterError::Connection {
            address: address.to_string(),
            reason: e.to_string(),
        })?;

        let stream = connect_tcp(&target.host, target.port, timeout).map_err(|e| {
            ClusterError::Connection {
                address: address.to_string(),
                reason: e.to_string(),
            }
        })?;
        stream.set_read_timeout(Some(timeout))?;
        stream.set_write_timeout(Some(timeout))?;
        stream.set_nodelay(true)?;

        if !tls {
            debug!(%address, "Plaintext connection established");
            return Ok(Transport::Plain(stream));
        }

        let server_name = ServerName::try_from(target.host.clone())
            .map_err(|e| ClusterError::Tls(format!("invalid server name {}: {}", target.host, e)))?;
        let connection = ClientConnection::new(tls_config()?, server_name)
            .map_err(|e| ClusterError::Tls(e.to_string()))?;
        debug!(%address, "TLS connection established");
        Ok(Transport::Tls(Box::new(StreamOwned::new(connection, stream))))
    }

    pub fn is_tls(&self) -> bool {
        matches!(self, Transport::Tls(_))
    }
}

fn connect_tcp(host: &str, port: u16, timeout: Duration) -> io::Result<TcpStream> {
    let addrs: Vec<SocketAddr> = (host, port).to_socket_addrs()?.collect();
    let mut last_err = io::Error::new(io::ErrorKind::NotFound, "address did not resolve");
    for addr in addrs {
        match TcpStream::connect_timeout(&addr, timeout) {
            Ok(stream) => return Ok(stream),
            Err(e) => {
                debug!(%addr, error = %e, "Connect attempt failed");
                last_err = e;
            }
        }
    }
    Err(last_err)
}

fn tls_config() -> Result<Arc<ClientConfig>, ClusterError> {
    let roots = RootCertStore {
        roots: webpki_roots::TLS_SERVER_ROOTS.iter().cloned().collect(),
    };
    let config = ClientConfig::builder_with_provider(Arc::new(
        rustls::crypto::ring::default_provider(),
    ))
    .with_safe_default_protocol_versions()
    .map_err(|e| ClusterError::Tls(e.to_string()))?
    .with_root_certificates(roots)
    .with_no_client_auth();
    Ok(Arc::new(config))
}

impl Read for Transport {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Transport::Plain(s) => s.read(buf),
            Transport::Tls(s) => s.read(buf),
        }
    }
}

impl Write for Transport {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Transport::Plain(s) => s.write(buf),
            Transport::Tls(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Transport::Plain(s) => s.flush(),
            Transport::Tls(s) => s.flush(),
        }
    }
}
