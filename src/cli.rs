//! CLI domain: parse, route, output, and presentation only.
//! No verification logic; the route table dispatches to library services.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::{exit_code, map_error, EXIT_FAILURE, EXIT_FATAL, EXIT_SUCCESS};
pub use parse::{Cli, Commands};
pub use presentation::{
    format_manifest_json, format_manifest_text, format_summary_json, format_summary_text,
    ConsoleProgress,
};
pub use route::{CommandOutput, OutputFormat, RunContext};
