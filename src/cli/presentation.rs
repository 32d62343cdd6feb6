//! CLI presentation: text and json formatters per command family.

mod broker;
mod context;

pub use broker::format_broker_configs_text;
pub use context::{
    format_context_list_json, format_context_list_text, format_set_context_result,
    format_use_context_result,
};

use owo_colors::OwoColorize;

/// Section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}
