//! Configuration System
//!
//! Layered configuration for the contact form: built-in defaults, a global user file,
//! workspace files and `FOLIO_` environment variables. Delivery credentials have no
//! usable default; they are resolved into [`EmailSettings`] and startup fails when
//! any of them is missing or still a placeholder.

use crate::delivery::emailjs::EMAILJS_DEFAULT_BASE_URL;
use crate::error::ApiError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Placeholder literals that must never reach the delivery service
pub const PLACEHOLDER_VALUES: [&str; 3] = ["YOUR_SERVICE_ID", "YOUR_TEMPLATE_ID", "YOUR_PUBLIC_KEY"];

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FolioConfig {
    /// Email delivery service
    #[serde(default)]
    pub email: EmailConfig,

    /// Contact form behavior
    #[serde(default)]
    pub contact: ContactConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Email delivery configuration as loaded; credentials may be absent
#[derive(Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    pub service_id: Option<String>,
    pub template_id: Option<String>,
    pub public_key: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    EMAILJS_DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            service_id: None,
            template_id: None,
            public_key: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailConfig")
            .field("service_id", &self.service_id)
            .field("template_id", &self.template_id)
            .field("public_key", &self.public_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Email settings with every credential present
#[derive(Clone, PartialEq, Eq)]
pub struct EmailSettings {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl fmt::Debug for EmailSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailSettings")
            .field("service_id", &self.service_id)
            .field("template_id", &self.template_id)
            .field("public_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Any placeholder literal is rejected for every credential key.
fn is_placeholder(value: &str) -> bool {
    PLACEHOLDER_VALUES.contains(&value)
}

impl EmailConfig {
    /// Resolve into settings, failing with every missing or placeholder key.
    pub fn resolve(&self) -> Result<EmailSettings, ApiError> {
        let mut missing = Vec::new();
        let mut take = |key: &str, value: &Option<String>| -> String {
            match value.as_deref().map(str::trim) {
                Some(v) if !v.is_empty() && !is_placeholder(v) => v.to_string(),
                _ => {
                    missing.push(format!("email.{}", key));
                    String::new()
                }
            }
        };

        let service_id = take("service_id", &self.service_id);
        let template_id = take("template_id", &self.template_id);
        let public_key = take("public_key", &self.public_key);

        if !missing.is_empty() {
            return Err(ApiError::MissingConfig(missing));
        }

        Ok(EmailSettings {
            service_id,
            template_id,
            public_key,
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(format!(
                "base_url must start with http:// or https:// (got '{}')",
                self.base_url
            ));
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// Contact form configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactConfig {
    /// Value of the `to_name` template parameter
    #[serde(default = "default_recipient_name")]
    pub recipient_name: String,

    /// Address offered in the failure notice as a fallback channel
    #[serde(default)]
    pub fallback_email: Option<String>,
}

fn default_recipient_name() -> String {
    "Portfolio Owner".to_string()
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            recipient_name: default_recipient_name(),
            fallback_email: None,
        }
    }
}

impl ContactConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.recipient_name.trim().is_empty() {
            return Err("recipient_name cannot be empty".to_string());
        }
        if let Some(email) = &self.fallback_email {
            if !email.contains('@') {
                return Err(format!("fallback_email '{}' is not an email address", email));
            }
        }
        Ok(())
    }
}

/// Configuration validation issues
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssue {
    Email(String),
    Contact(String),
    Logging(String),
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigIssue::Email(msg) => write!(f, "email: {}", msg),
            ConfigIssue::Contact(msg) => write!(f, "contact: {}", msg),
            ConfigIssue::Logging(msg) => write!(f, "logging: {}", msg),
        }
    }
}

impl FolioConfig {
    /// Validate the non-credential parts of the configuration
    pub fn validate(&self) -> Result<(), Vec<ConfigIssue>> {
        let mut issues = Vec::new();

        if let Err(e) = self.email.validate() {
            issues.push(ConfigIssue::Email(e));
        }
        if let Err(e) = self.contact.validate() {
            issues.push(ConfigIssue::Contact(e));
        }
        if let Err(e) = self.logging.validate() {
            issues.push(ConfigIssue::Logging(e));
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }

    /// Validate everything and resolve delivery settings in one step.
    pub fn require_email(&self) -> Result<EmailSettings, ApiError> {
        self.validate().map_err(|issues| {
            let msgs: Vec<String> = issues.iter().map(|i| i.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                msgs.join("\n")
            ))
        })?;
        self.email.resolve()
    }
}
