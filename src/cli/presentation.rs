//! CLI presentation: contact outcomes and configuration views, text and json.

use crate::cli::form::ContactOutcome;
use crate::config::{ContactConfig, FolioConfig};
use crate::contact::{FieldErrors, Notice, NoticeKind};
use crate::error::ApiError;
use crate::logging::LoggingConfig;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::json;

pub fn format_notice(notice: &Notice, color: bool) -> String {
    let title = match (notice.kind, color) {
        (NoticeKind::Success, true) => format!("✓ {}", notice.title).green().bold().to_string(),
        (NoticeKind::Failure, true) => format!("✗ {}", notice.title).red().bold().to_string(),
        (NoticeKind::Success, false) => format!("✓ {}", notice.title),
        (NoticeKind::Failure, false) => format!("✗ {}", notice.title),
    };
    format!("{}\n{}", title, notice.body)
}

pub fn format_field_errors(errors: &FieldErrors, color: bool) -> String {
    let mut lines = vec!["Please fix the following fields:".to_string()];
    for (field, message) in errors.iter() {
        let line = format!("  {}: {}", field.label(), message);
        lines.push(if color { line.yellow().to_string() } else { line });
    }
    lines.join("\n")
}

pub fn format_contact_outcome_text(outcome: &ContactOutcome, color: bool) -> String {
    if let Some(notice) = &outcome.notice {
        return format_notice(notice, color);
    }
    if !outcome.errors.is_empty() {
        return format_field_errors(&outcome.errors, color);
    }
    "Message not sent.".to_string()
}

pub fn format_contact_outcome_json(outcome: &ContactOutcome) -> String {
    let out = json!({
        "sent": outcome.is_sent(),
        "state": outcome.state,
        "attempts": outcome.attempts,
        "status": outcome.receipt.as_ref().map(|r| r.status),
        "notice": outcome.notice,
        "errors": outcome.errors,
    });
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
}

/// Mask all but the last four characters of a secret
pub fn redact(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}

#[derive(Serialize)]
struct EmailView {
    #[serde(skip_serializing_if = "Option::is_none")]
    service_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    template_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    public_key: Option<String>,
    base_url: String,
    timeout_secs: u64,
}

#[derive(Serialize)]
struct ConfigView<'a> {
    email: EmailView,
    contact: &'a ContactConfig,
    logging: &'a LoggingConfig,
}

fn config_view(config: &FolioConfig) -> ConfigView<'_> {
    ConfigView {
        email: EmailView {
            service_id: config.email.service_id.clone(),
            template_id: config.email.template_id.clone(),
            public_key: config.email.public_key.as_deref().map(redact),
            base_url: config.email.base_url.clone(),
            timeout_secs: config.email.timeout_secs,
        },
        contact: &config.contact,
        logging: &config.logging,
    }
}

pub fn format_config_show(config: &FolioConfig, format: &str) -> Result<String, ApiError> {
    let view = config_view(config);
    match format {
        "json" => serde_json::to_string_pretty(&view)
            .map_err(|e| ApiError::ConfigError(format!("Failed to render config: {}", e))),
        "toml" => toml::to_string_pretty(&view)
            .map_err(|e| ApiError::ConfigError(format!("Failed to render config: {}", e))),
        _ => {
            let unset = || "(unset)".to_string();
            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["Key", "Value"]);
            let rows = vec![
                ("email.service_id", view.email.service_id.unwrap_or_else(unset)),
                ("email.template_id", view.email.template_id.unwrap_or_else(unset)),
                ("email.public_key", view.email.public_key.unwrap_or_else(unset)),
                ("email.base_url", view.email.base_url),
                ("email.timeout_secs", view.email.timeout_secs.to_string()),
                ("contact.recipient_name", config.contact.recipient_name.clone()),
                (
                    "contact.fallback_email",
                    config.contact.fallback_email.clone().unwrap_or_else(unset),
                ),
                ("logging.level", config.logging.level.clone()),
                ("logging.format", config.logging.format.clone()),
                ("logging.output", config.logging.output.clone()),
            ];
            for (key, value) in rows {
                table.add_row(vec![key.to_string(), value]);
            }
            Ok(table.to_string())
        }
    }
}

pub fn format_config_validate_result(result: &Result<(), ApiError>, format: &str) -> String {
    if format == "json" {
        let out = match result {
            Ok(()) => json!({ "valid": true }),
            Err(ApiError::MissingConfig(keys)) => json!({ "valid": false, "missing": keys }),
            Err(e) => json!({ "valid": false, "error": e.to_string() }),
        };
        return serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string());
    }
    match result {
        Ok(()) => "Configuration is valid: email delivery credentials are present.".to_string(),
        Err(e) => format!("Configuration is invalid:\n  {}", super::map_error(e)),
    }
}
