//! Context command presentation: set/use confirmations and the get-contexts table.

use crate::cli::presentation::format_section_heading;
use crate::context::{ContextListResult, SetContextOutcome, SetContextResult};
use crate::error::CommandError;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;

pub fn format_set_context_result(result: &SetContextResult) -> String {
    let verb = match result.outcome {
        SetContextOutcome::Created => "created",
        SetContextOutcome::Modified => "modified",
    };
    format!("Context {:?} {}.", result.name, verb)
}

pub fn format_use_context_result(name: &str) -> String {
    format!("Switched to context {:?}.", name)
}

pub fn format_context_list_text(result: &ContextListResult) -> String {
    if result.contexts.is_empty() {
        return "No contexts found.\n\nUse 'kafkactx config set-context NAME' to add one."
            .to_string();
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["CURRENT", "NAME", "SERVERS", "VERSION", "SASL", "TLS"]);
    for entry in &result.contexts {
        table.add_row(vec![
            current_marker(entry.current).to_string(),
            entry.name.clone(),
            entry.bootstrap_servers.join(","),
            entry.kafka_version.clone().unwrap_or_else(|| "-".to_string()),
            yes_no(entry.sasl).to_string(),
            yes_no(entry.tls).to_string(),
        ]);
    }

    format!("{}\n\n{}", format_section_heading("Contexts"), table)
}

pub fn format_context_list_json(result: &ContextListResult) -> Result<String, CommandError> {
    serde_json::to_string_pretty(result)
        .map_err(|e| CommandError::Validation(format!("Failed to render contexts: {}", e)))
}

fn current_marker(current: bool) -> &'static str {
    if current {
        "*"
    } else {
        ""
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
