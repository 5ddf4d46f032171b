//! EmailJS REST client.

use super::{DeliveryReceipt, EmailDeliveryClient, TemplateParams};
use crate::config::EmailSettings;
use crate::error::{ApiError, DeliveryError};
use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

pub const EMAILJS_DEFAULT_BASE_URL: &str = "https://api.emailjs.com";
const EMAILJS_SEND_PATH: &str = "/api/v1.0/email/send";

const DELIVERY_HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a TemplateParams,
}

fn map_http_error(error: reqwest::Error) -> DeliveryError {
    if error.is_timeout() {
        DeliveryError::Transport(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        DeliveryError::Transport(format!("Connection error: {}", error))
    } else {
        DeliveryError::Transport(format!("HTTP error: {}", error))
    }
}

fn build_delivery_http_client(timeout: Duration) -> Result<Client, ApiError> {
    Client::builder()
        .no_proxy()
        .connect_timeout(DELIVERY_HTTP_CONNECT_TIMEOUT)
        .timeout(timeout)
        .build()
        .map_err(|e| ApiError::ConfigError(format!("Failed to create HTTP client: {}", e)))
}

/// EmailJS delivery client
pub struct EmailJsClient {
    client: Client,
    base_url: String,
    public_key: RwLock<Option<String>>,
}

impl EmailJsClient {
    pub fn new(base_url: Option<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = build_delivery_http_client(timeout)?;
        let base_url = base_url
            .unwrap_or_else(|| EMAILJS_DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client,
            base_url,
            public_key: RwLock::new(None),
        })
    }

    /// Build and initialize a client from resolved settings.
    pub fn from_settings(settings: &EmailSettings) -> Result<Self, ApiError> {
        let client = Self::new(Some(settings.base_url.clone()), settings.timeout)?;
        client.initialize(&settings.public_key);
        Ok(client)
    }

    pub fn send_url(&self) -> String {
        format!("{}{}", self.base_url, EMAILJS_SEND_PATH)
    }

    pub fn is_initialized(&self) -> bool {
        self.public_key.read().is_some()
    }

    fn effective_key(&self, public_key: &str) -> Result<String, DeliveryError> {
        if !public_key.is_empty() {
            return Ok(public_key.to_string());
        }
        self.public_key
            .read()
            .clone()
            .ok_or(DeliveryError::NotInitialized)
    }
}

#[async_trait]
impl EmailDeliveryClient for EmailJsClient {
    fn initialize(&self, public_key: &str) {
        let mut key = self.public_key.write();
        if key.as_deref() != Some(public_key) {
            debug!(provider = "emailjs", "Delivery client initialized");
            *key = Some(public_key.to_string());
        }
    }

    async fn send(
        &self,
        service_id: &str,
        template_id: &str,
        params: &TemplateParams,
        public_key: &str,
    ) -> Result<DeliveryReceipt, DeliveryError> {
        let user_id = self.effective_key(public_key)?;
        let request = SendRequest {
            service_id,
            template_id,
            user_id: &user_id,
            template_params: params,
        };

        let response = self
            .client
            .post(self.send_url())
            .json(&request)
            .send()
            .await
            .map_err(map_http_error)?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| DeliveryError::InvalidResponse(format!("Failed to read body: {}", e)))?;

        if !status.is_success() {
            return Err(DeliveryError::Status {
                status: status.as_u16(),
                text,
            });
        }

        Ok(DeliveryReceipt {
            status: status.as_u16(),
            text,
        })
    }

    fn provider_name(&self) -> &str {
        "emailjs"
    }
}
