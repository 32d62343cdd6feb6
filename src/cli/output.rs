//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::cli::help::command_path;
use crate::cli::parse::Commands;
use crate::error::CommandError;

/// `Error: <message>`; usage errors also point at the command's help.
pub fn map_error(e: &CommandError, command: Option<&Commands>) -> String {
    let mut out = format!("Error: {}", e);
    if e.is_usage() {
        let path = command
            .map(|c| format!("kafkactx {}", command_path(c)))
            .unwrap_or_else(|| "kafkactx".to_string());
        out.push_str(&format!("\nSee '{} --help'.", path));
    }
    out
}
