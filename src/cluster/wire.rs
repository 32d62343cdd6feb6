//! Kafka wire codec: the handful of requests kafkactx sends and their responses.
//!
//! Every request uses header v1 (api key, api version, correlation id, client id) inside a
//! big-endian `i32` size prefix. Responses carry the correlation id followed by the body.

use crate::error::ClusterError;
use std::io::{Read, Write};

/// Refuse frames larger than this; a sane broker never sends them for our requests.
pub const MAX_FRAME_BYTES: usize = 64 * 1024 * 1024;

pub const API_METADATA: i16 = 3;
pub const API_SASL_HANDSHAKE: i16 = 17;
pub const API_API_VERSIONS: i16 = 18;
pub const API_DESCRIBE_CONFIGS: i16 = 32;
pub const API_SASL_AUTHENTICATE: i16 = 36;

/// DescribeConfigs resource type for a broker.
pub const RESOURCE_BROKER: i8 = 4;

/// Symbolic name for the broker error codes kafkactx is likely to see.
pub fn error_name(code: i16) -> &'static str {
    match code {
        0 => "NONE",
        -1 => "UNKNOWN_SERVER_ERROR",
        7 => "REQUEST_TIMED_OUT",
        29 => "TOPIC_AUTHORIZATION_FAILED",
        31 => "CLUSTER_AUTHORIZATION_FAILED",
        33 => "UNSUPPORTED_SASL_MECHANISM",
        34 => "ILLEGAL_SASL_STATE",
        35 => "UNSUPPORTED_VERSION",
        41 => "NOT_CONTROLLER",
        42 => "INVALID_REQUEST",
        58 => "SASL_AUTHENTICATION_FAILED",
        _ => "UNKNOWN",
    }
}

/// Turn a non-zero error code into a [`ClusterError::Broker`].
pub fn check_error(code: i16) -> Result<(), ClusterError> {
    if code == 0 {
        Ok(())
    } else {
        Err(ClusterError::Broker {
            code,
            message: error_name(code).to_string(),
        })
    }
}

#[derive(Debug, Default)]
pub struct Encoder {
    buf: Vec<u8>,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_i8(&mut self, v: i8) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn put_i16(&mut self, v: i16) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn put_i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn put_string(&mut self, s: &str) {
        self.put_i16(s.len() as i16);
        self.buf.extend_from_slice(s.as_bytes());
    }

    pub fn put_nullable_string(&mut self, s: Option<&str>) {
        match s {
            Some(s) => self.put_string(s),
            None => self.put_i16(-1),
        }
    }

    pub fn put_bytes(&mut self, b: &[u8]) {
        self.put_i32(b.len() as i32);
        self.buf.extend_from_slice(b);
    }

    /// Array length prefix; `None` encodes a null array.
    pub fn put_array_len(&mut self, len: Option<usize>) {
        self.put_i32(len.map(|l| l as i32).unwrap_or(-1));
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

/// Cursor over a response body.
#[derive(Debug)]
pub struct Decoder<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], ClusterError> {
        if self.remaining() < n {
            return Err(ClusterError::Protocol(format!(
                "truncated response: wanted {} bytes at offset {}, {} left",
                n,
                self.pos,
                self.remaining()
            )));
        }
        let buf = self.buf;
        let slice = &buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], ClusterError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn i8(&mut self) -> Result<i8, ClusterError> {
        Ok(i8::from_be_bytes(self.take_array()?))
    }

    pub fn bool(&mut self) -> Result<bool, ClusterError> {
        Ok(self.i8()? != 0)
    }

    pub fn i16(&mut self) -> Result<i16, ClusterError> {
        Ok(i16::from_be_bytes(self.take_array()?))
    }

    pub fn i32(&mut self) -> Result<i32, ClusterError> {
        Ok(i32::from_be_bytes(self.take_array()?))
    }

    pub fn nullable_string(&mut self) -> Result<Option<String>, ClusterError> {
        let len = self.i16()?;
        if len < 0 {
            return Ok(None);
        }
        let raw = self.take(len as usize)?;
        String::from_utf8(raw.to_vec())
            .map(Some)
            .map_err(|_| ClusterError::Protocol("string is not valid UTF-8".to_string()))
    }

    pub fn string(&mut self) -> Result<String, ClusterError> {
        self.nullable_string()?
            .ok_or_else(|| ClusterError::Protocol("unexpected null string".to_string()))
    }

    pub fn bytes(&mut self) -> Result<Vec<u8>, ClusterError> {
        let len = self.i32()?;
        if len < 0 {
            return Ok(Vec::new());
        }
        Ok(self.take(len as usize)?.to_vec())
    }

    /// Array length; a null array reads as empty.
    pub fn array_len(&mut self) -> Result<usize, ClusterError> {
        let len = self.i32()?;
        if len < 0 {
            return Ok(0);
        }
        let len = len as usize;
        // Each element is at least one byte; guards against absurd allocations.
        if len > self.remaining() {
            return Err(ClusterError::Protocol(format!(
                "array length {} exceeds remaining {} bytes",
                len,
                self.remaining()
            )));
        }
        Ok(len)
    }
}

/// A request kafkactx knows how to send.
pub trait Request {
    const API_KEY: i16;
    const API_VERSION: i16;
    type Response: Response;

    fn encode_body(&self, enc: &mut Encoder);
}

pub trait Response: Sized {
    fn decode(dec: &mut Decoder<'_>) -> Result<Self, ClusterError>;
}

/// Full frame (size prefix included) for `request`.
pub fn encode_request<R: Request>(request: &R, correlation_id: i32, client_id: &str) -> Vec<u8> {
    let mut enc = Encoder::new();
    enc.put_i16(R::API_KEY);
    enc.put_i16(R::API_VERSION);
    enc.put_i32(correlation_id);
    enc.put_nullable_string(Some(client_id));
    request.encode_body(&mut enc);

    let body = enc.into_inner();
    let mut frame = Vec::with_capacity(body.len() + 4);
    frame.extend_from_slice(&(body.len() as i32).to_be_bytes());
    frame.extend_from_slice(&body);
    frame
}

/// Decode a response frame (size prefix already stripped).
pub fn decode_response<R: Request>(
    frame: &[u8],
    correlation_id: i32,
) -> Result<R::Response, ClusterError> {
    let mut dec = Decoder::new(frame);
    let got = dec.i32()?;
    if got != correlation_id {
        return Err(ClusterError::Protocol(format!(
            "correlation id mismatch: sent {}, received {}",
            correlation_id, got
        )));
    }
    R::Response::decode(&mut dec)
}

pub fn write_frame<W: Write>(writer: &mut W, frame: &[u8]) -> Result<(), ClusterError> {
    writer.write_all(frame)?;
    writer.flush()?;
    Ok(())
}

/// Read one size-prefixed frame and return its payload.
pub fn read_frame<R: Read>(reader: &mut R) -> Result<Vec<u8>, ClusterError> {
    let mut size = [0u8; 4];
    reader.read_exact(&mut size)?;
    let size = i32::from_be_bytes(size);
    if size < 0 || size as usize > MAX_FRAME_BYTES {
        return Err(ClusterError::Protocol(format!("invalid frame size {}", size)));
    }
    let mut payload = vec![0u8; size as usize];
    reader.read_exact(&mut payload)?;
    Ok(payload)
}

// ApiVersions v0

#[derive(Debug, Clone, Default)]
pub struct ApiVersionsRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiVersionRange {
    pub api_key: i16,
    pub min_version: i16,
    pub max_version: i16,
}

#[derive(Debug, Clone)]
pub struct ApiVersionsResponse {
    pub error_code: i16,
    pub api_versions: Vec<ApiVersionRange>,
}

impl ApiVersionsResponse {
    pub fn supports(&self, api_key: i16, version: i16) -> bool {
        self.api_versions
            .iter()
            .any(|r| r.api_key == api_key && r.min_version <= version && version <= r.max_version)
    }
}

impl Request for ApiVersionsRequest {
    const API_KEY: i16 = API_API_VERSIONS;
    const API_VERSION: i16 = 0;
    type Response = ApiVersionsResponse;

    fn encode_body(&self, _enc: &mut Encoder) {}
}

impl Response for ApiVersionsResponse {
    fn decode(dec: &mut Decoder<'_>) -> Result<Self, ClusterError> {
        let error_code = dec.i16()?;
        let count = dec.array_len()?;
        let mut api_versions = Vec::with_capacity(count);
        for _ in 0..count {
            api_versions.push(ApiVersionRange {
                api_key: dec.i16()?,
                min_version: dec.i16()?,
                max_version: dec.i16()?,
            });
        }
        Ok(Self {
            error_code,
            api_versions,
        })
    }
}

// SaslHandshake v1

#[derive(Debug, Clone)]
pub struct SaslHandshakeRequest {
    pub mechanism: String,
}

#[derive(Debug, Clone)]
pub struct SaslHandshakeResponse {
    pub error_code: i16,
    pub mechanisms: Vec<String>,
}

impl Request for SaslHandshakeRequest {
    const API_KEY: i16 = API_SASL_HANDSHAKE;
    const API_VERSION: i16 = 1;
    type Response = SaslHandshakeResponse;

    fn encode_body(&self, enc: &mut Encoder) {
        enc.put_string(&self.mechanism);
    }
}

impl Response for SaslHandshakeResponse {
    fn decode(dec: &mut Decoder<'_>) -> Result<Self, ClusterError> {
        let error_code = dec.i16()?;
        let count = dec.array_len()?;
        let mut mechanisms = Vec::with_capacity(count);
        for _ in 0..count {
            mechanisms.push(dec.string()?);
        }
        Ok(Self {
            error_code,
            mechanisms,
        })
    }
}

// SaslAuthenticate v0

#[derive(Debug, Clone)]
pub struct SaslAuthenticateRequest {
    pub auth_bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct SaslAuthenticateResponse {
    pub error_code: i16,
    pub error_message: Option<String>,
    pub auth_bytes: Vec<u8>,
}

impl Request for SaslAuthenticateRequest {
    const API_KEY: i16 = API_SASL_AUTHENTICATE;
    const API_VERSION: i16 = 0;
    type Response = SaslAuthenticateResponse;

    fn encode_body(&self, enc: &mut Encoder) {
        enc.put_bytes(&self.auth_bytes);
    }
}

impl Response for SaslAuthenticateResponse {
    fn decode(dec: &mut Decoder<'_>) -> Result<Self, ClusterError> {
        Ok(Self {
            error_code: dec.i16()?,
            error_message: dec.nullable_string()?,
            auth_bytes: dec.bytes()?,
        })
    }
}

// Metadata v1

/// Metadata for brokers only; the topic list is sent empty.
#[derive(Debug, Clone, Default)]
pub struct MetadataRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataBroker {
    pub node_id: i32,
    pub host: String,
    pub port: i32,
    pub rack: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MetadataResponse {
    pub brokers: Vec<MetadataBroker>,
    pub controller_id: i32,
}

impl Request for MetadataRequest {
    const API_KEY: i16 = API_METADATA;
    const API_VERSION: i16 = 1;
    type Response = MetadataResponse;

    fn encode_body(&self, enc: &mut Encoder) {
        enc.put_array_len(Some(0));
    }
}

impl Response for MetadataResponse {
    fn decode(dec: &mut Decoder<'_>) -> Result<Self, ClusterError> {
        let count = dec.array_len()?;
        let mut brokers = Vec::with_capacity(count);
        for _ in 0..count {
            brokers.push(MetadataBroker {
                node_id: dec.i32()?,
                host: dec.string()?,
                port: dec.i32()?,
                rack: dec.nullable_string()?,
            });
        }
        let controller_id = dec.i32()?;
        // Topic metadata follows; we asked for none.
        Ok(Self {
            brokers,
            controller_id,
        })
    }
}

// DescribeConfigs v0

#[derive(Debug, Clone)]
pub struct DescribeConfigsRequest {
    pub resource_type: i8,
    pub resource_name: String,
    /// `None` asks for every entry.
    pub config_names: Option<Vec<String>>,
}

impl DescribeConfigsRequest {
    pub fn broker(broker_id: i32) -> Self {
        Self {
            resource_type: RESOURCE_BROKER,
            resource_name: broker_id.to_string(),
            config_names: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescribeConfigsEntry {
    pub name: String,
    pub value: Option<String>,
    pub read_only: bool,
    pub is_default: bool,
    pub is_sensitive: bool,
}

#[derive(Debug, Clone)]
pub struct DescribeConfigsResult {
    pub error_code: i16,
    pub error_message: Option<String>,
    pub resource_type: i8,
    pub resource_name: String,
    pub configs: Vec<DescribeConfigsEntry>,
}

#[derive(Debug, Clone)]
pub struct DescribeConfigsResponse {
    pub throttle_time_ms: i32,
    pub results: Vec<DescribeConfigsResult>,
}

impl Request for DescribeConfigsRequest {
    const API_KEY: i16 = API_DESCRIBE_CONFIGS;
    const API_VERSION: i16 = 0;
    type Response = DescribeConfigsResponse;

    fn encode_body(&self, enc: &mut Encoder) {
        enc.put_array_len(Some(1));
        enc.put_i8(self.resource_type);
        enc.put_string(&self.resource_name);
        match &self.config_names {
            Some(names) => {
                enc.put_array_len(Some(names.len()));
                for name in names {
                    enc.put_string(name);
                }
            }
            None => enc.put_array_len(None),
        }
    }
}

impl Response for DescribeConfigsResponse {
    fn decode(dec: &mut Decoder<'_>) -> Result<Self, ClusterError> {
        let throttle_time_ms = dec.i32()?;
        let count = dec.array_len()?;
        let mut results = Vec::with_capacity(count);
        for _ in 0..count {
            let error_code = dec.i16()?;
            let error_message = dec.nullable_string()?;
            let resource_type = dec.i8()?;
            let resource_name = dec.string()?;
            let entries = dec.array_len()?;
            let mut configs = Vec::with_capacity(entries);
            for _ in 0..entries {
                configs.push(DescribeConfigsEntry {
                    name: dec.string()?,
                    value: dec.nullable_string()?,
                    read_only: dec.bool()?,
                    is_default: dec.bool()?,
                    is_sensitive: dec.bool()?,
                });
            }
            results.push(DescribeConfigsResult {
                error_code,
                error_message,
                resource_type,
                resource_name,
                configs,
            });
        }
        Ok(Self {
            throttle_time_ms,
            results,
        })
    }
}
