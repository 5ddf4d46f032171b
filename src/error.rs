//! Error types for the Folio contact form core.

use crate::contact::FieldErrors;
use thiserror::Error;

/// Delivery-related errors raised by an email delivery client
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    #[error("Delivery client not initialized: no public key available")]
    NotInitialized,

    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Delivery service answered with status {status}: {text}")]
    Status { status: u16, text: String },

    #[error("Delivery service returned an unexpected response: {0}")]
    InvalidResponse(String),
}

impl DeliveryError {
    /// HTTP status carried by the error, if the remote service answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            DeliveryError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Crate-level errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Missing or placeholder configuration: {}", .0.join(", "))]
    MissingConfig(Vec<String>),

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Failed to send message: {0}")]
    Delivery(#[from] DeliveryError),

    #[error("A submission is already in flight")]
    SubmissionInFlight,

    #[error("Input error: {0}")]
    InputError(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
