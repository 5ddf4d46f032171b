//! CLI parse: clap types for Folio. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Folio CLI - contact form for a personal portfolio site
#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Send portfolio contact messages through EmailJS")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (where config/config.toml is looked up)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false", conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fill in and send the contact form
    Contact {
        /// Your name (at least 2 characters)
        #[arg(long)]
        name: Option<String>,
        /// Your email address
        #[arg(long)]
        email: Option<String>,
        /// Subject (at least 5 characters)
        #[arg(long)]
        subject: Option<String>,
        /// Message (at least 10 characters)
        #[arg(long)]
        message: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
        /// Never prompt; fail on missing or invalid fields
        #[arg(long)]
        no_input: bool,
    },
    /// Configuration commands (validate, show)
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Check that delivery credentials are present and the configuration is valid
    Validate {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show the effective configuration with secrets redacted
    Show {
        /// Output format (text, json or toml)
        #[arg(long, default_value = "text")]
        format: String,
    },
}
