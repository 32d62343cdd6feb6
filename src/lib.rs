//! kafkactx: named Kafka connection contexts
//!
//! Stores connection parameters for Kafka clusters (bootstrap servers, protocol version,
//! schema registry, ksqlDB, SASL, TLS) under names, lets one be current, and uses the
//! current one to inspect brokers.

pub mod cli;
pub mod cluster;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod probe;
