//! CLI domain: parse, route, help, output, and presentation only.
//! No domain orchestration; single route table dispatches to domain services.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::{command_name, command_path};
pub use output::map_error;
pub use parse::{BrokerCommands, Cli, Commands, ConfigCommands, SetContextArgs};
pub use presentation::{
    format_broker_configs_text, format_context_list_json, format_context_list_text,
    format_section_heading, format_set_context_result, format_use_context_result,
};
pub use route::{overrides_from_args, RunContext};
