//! Integration tests for kafkactx

mod broker_cli;
mod config_loading;
mod context_cli;
mod wire_connector;

pub use test_utils::with_xdg_env;
