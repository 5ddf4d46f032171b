//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::cli::presentation::format_field_errors;
use crate::error::ApiError;

/// Map domain/service errors to a string for CLI output.
///
/// Delivery failures never expose transport details; the log keeps the cause.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::Delivery(_) => {
            "Failed to send message. Please try again later.".to_string()
        }
        ApiError::MissingConfig(keys) => format!(
            "Missing or placeholder configuration: {}\n\
             Set them in config/config.toml, or via FOLIO_EMAIL__<KEY> / EMAILJS_<KEY> environment variables.",
            keys.join(", ")
        ),
        ApiError::Validation(errors) => format_field_errors(errors, false),
        other => other.to_string(),
    }
}
