//! CLI command-name contract for logging and routing.

use crate::cli::parse::{Commands, ConfigCommands};

/// Command name string for log records (e.g. "contact", "config.show").
pub fn command_name(command: &Commands) -> String {
    match command {
        Commands::Contact { .. } => "contact".to_string(),
        Commands::Config { command } => format!("config.{}", config_command_name(command)),
    }
}

pub fn config_command_name(command: &ConfigCommands) -> &'static str {
    match command {
        ConfigCommands::Validate { .. } => "validate",
        ConfigCommands::Show { .. } => "show",
    }
}
