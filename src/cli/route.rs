//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::cli::form::{run_contact_form, FormInput, TerminalInput};
use crate::cli::parse::{Commands, ConfigCommands};
use crate::cli::presentation::{
    format_config_show, format_config_validate_result, format_contact_outcome_json,
    format_contact_outcome_text,
};
use crate::cli::command_name;
use crate::config::{ConfigLoader, FolioConfig};
use crate::contact::{ContactFormController, ContactSubmission};
use crate::delivery::EmailJsClient;
use crate::error::ApiError;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Result of a routed command: text for stdout and whether it succeeded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub text: String,
    pub success: bool,
}

impl CommandOutput {
    fn ok(text: String) -> Self {
        Self {
            text,
            success: true,
        }
    }
}

/// Runtime context for CLI execution: workspace and loaded configuration.
pub struct RunContext {
    workspace_root: PathBuf,
    config: FolioConfig,
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        Ok(Self::with_config(workspace_root, config))
    }

    pub fn with_config(workspace_root: PathBuf, config: FolioConfig) -> Self {
        Self {
            workspace_root,
            config,
        }
    }

    /// Execute a CLI command via the single route table.
    pub async fn execute(&self, command: &Commands) -> Result<CommandOutput, ApiError> {
        let started = Instant::now();
        let name = command_name(command);
        let result = self.execute_inner(command).await;
        info!(
            command = %name,
            workspace = %self.workspace_root.display(),
            ok = result.as_ref().map(|o| o.success).unwrap_or(false),
            duration_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    async fn execute_inner(&self, command: &Commands) -> Result<CommandOutput, ApiError> {
        match command {
            Commands::Contact {
                name,
                email,
                subject,
                message,
                format,
                no_input,
            } => {
                let initial = ContactSubmission::new(
                    name.clone().unwrap_or_default(),
                    email.clone().unwrap_or_default(),
                    subject.clone().unwrap_or_default(),
                    message.clone().unwrap_or_default(),
                );
                let interactive = !*no_input && std::io::stdin().is_terminal();
                let terminal = TerminalInput;
                let input: Option<&dyn FormInput> = if interactive { Some(&terminal) } else { None };
                self.handle_contact(initial, format, input).await
            }
            Commands::Config { command } => self.handle_config_command(command),
        }
    }

    /// Build the controller from configuration and drive the form.
    ///
    /// Fails before any prompt when delivery credentials are missing.
    pub async fn handle_contact(
        &self,
        initial: ContactSubmission,
        format: &str,
        input: Option<&dyn FormInput>,
    ) -> Result<CommandOutput, ApiError> {
        let settings = self.config.require_email()?;
        let client = Arc::new(EmailJsClient::from_settings(&settings)?);
        let controller = ContactFormController::new(client, settings, self.config.contact.clone());

        let outcome = run_contact_form(&controller, initial, input).await?;
        let text = if format == "json" {
            format_contact_outcome_json(&outcome)
        } else {
            format_contact_outcome_text(&outcome, std::io::stdout().is_terminal())
        };
        Ok(CommandOutput {
            text,
            success: outcome.is_sent(),
        })
    }

    fn handle_config_command(&self, command: &ConfigCommands) -> Result<CommandOutput, ApiError> {
        match command {
            ConfigCommands::Validate { format } => {
                let result = self.config.require_email().map(|_| ());
                let success = result.is_ok();
                Ok(CommandOutput {
                    text: format_config_validate_result(&result, format),
                    success,
                })
            }
            ConfigCommands::Show { format } => {
                format_config_show(&self.config, format).map(CommandOutput::ok)
            }
        }
    }
}
