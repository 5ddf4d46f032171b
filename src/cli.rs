//! CLI domain: parse, route, help, output, and presentation only.
//! No domain orchestration; single route table dispatches to domain services.

mod form;
mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use form::{run_contact_form, ContactOutcome, FormInput, TerminalInput};
pub use help::{command_name, config_command_name};
pub use output::map_error;
pub use parse::{Cli, Commands, ConfigCommands};
pub use presentation::{
    format_config_show, format_config_validate_result, format_contact_outcome_json,
    format_contact_outcome_text, format_field_errors, format_notice, redact,
};
pub use route::{CommandOutput, RunContext};
