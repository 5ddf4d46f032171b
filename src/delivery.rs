//! Email Delivery Abstraction
//!
//! Interface over a third-party transactional email provider. The contact form only
//! knows about templated sends: a service, a template, and the named parameters the
//! remote template substitutes.

use crate::contact::ContactSubmission;
use crate::error::DeliveryError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod emailjs;

pub use emailjs::EmailJsClient;

/// Named values substituted into the remote email template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateParams {
    pub from_name: String,
    pub from_email: String,
    pub subject: String,
    pub message: String,
    pub to_name: String,
}

impl TemplateParams {
    pub fn from_submission(submission: &ContactSubmission, to_name: &str) -> Self {
        Self {
            from_name: submission.name.clone(),
            from_email: submission.email.clone(),
            subject: submission.subject.clone(),
            message: submission.message.clone(),
            to_name: to_name.to_string(),
        }
    }
}

/// What the provider answered for an accepted send
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    pub status: u16,
    pub text: String,
}

impl DeliveryReceipt {
    pub fn ok() -> Self {
        Self {
            status: 200,
            text: "OK".to_string(),
        }
    }
}

/// Email delivery client trait
#[async_trait]
pub trait EmailDeliveryClient: Send + Sync {
    /// Register the public key used when a send does not carry one. Idempotent.
    fn initialize(&self, public_key: &str);

    /// Send one templated message.
    ///
    /// An empty `public_key` falls back to the key given to [`initialize`](Self::initialize).
    async fn send(
        &self,
        service_id: &str,
        template_id: &str,
        params: &TemplateParams,
        public_key: &str,
    ) -> Result<DeliveryReceipt, DeliveryError>;

    /// Get the provider name
    fn provider_name(&self) -> &str;
}
