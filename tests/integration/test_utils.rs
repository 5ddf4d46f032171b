//! Shared test utilities for integration tests
//!
//! Delivery client doubles and scripted form input, so controller behavior can be
//! checked without a network.

#![allow(dead_code)]

use async_trait::async_trait;
use folio::cli::FormInput;
use folio::config::{ContactConfig, EmailSettings};
use folio::contact::{ContactFormController, ContactSubmission, Field, Notice};
use folio::delivery::{DeliveryReceipt, EmailDeliveryClient, TemplateParams};
use folio::error::{ApiError, DeliveryError};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

pub fn email_settings(base_url: &str) -> EmailSettings {
    EmailSettings {
        service_id: "service_test".to_string(),
        template_id: "template_test".to_string(),
        public_key: "pk_test_key".to_string(),
        base_url: base_url.to_string(),
        timeout: Duration::from_secs(5),
    }
}

pub fn contact_config() -> ContactConfig {
    ContactConfig {
        recipient_name: "Grace Hopper".to_string(),
        fallback_email: Some("grace@example.com".to_string()),
    }
}

pub fn valid_submission() -> ContactSubmission {
    ContactSubmission::new(
        "Ada Lovelace",
        "ada@example.com",
        "Hello there",
        "This is a message",
    )
}

/// One recorded `send` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentCall {
    pub service_id: String,
    pub template_id: String,
    pub params: TemplateParams,
    pub public_key: String,
}

/// Client that records calls and answers from a script (200 OK once the script runs out)
#[derive(Default)]
pub struct RecordingClient {
    script: Mutex<VecDeque<Result<DeliveryReceipt, DeliveryError>>>,
    calls: Mutex<Vec<SentCall>>,
    init_keys: Mutex<Vec<String>>,
}

impl RecordingClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_script(results: Vec<Result<DeliveryReceipt, DeliveryError>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(results.into()),
            ..Self::default()
        })
    }

    pub fn calls(&self) -> Vec<SentCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn init_keys(&self) -> Vec<String> {
        self.init_keys.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailDeliveryClient for RecordingClient {
    fn initialize(&self, public_key: &str) {
        self.init_keys.lock().unwrap().push(public_key.to_string());
    }

    async fn send(
        &self,
        service_id: &str,
        template_id: &str,
        params: &TemplateParams,
        public_key: &str,
    ) -> Result<DeliveryReceipt, DeliveryError> {
        self.calls.lock().unwrap().push(SentCall {
            service_id: service_id.to_string(),
            template_id: template_id.to_string(),
            params: params.clone(),
            public_key: public_key.to_string(),
        });
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(DeliveryReceipt::ok()))
    }

    fn provider_name(&self) -> &str {
        "recording"
    }
}

/// Client whose sends block until released, to observe the in-flight state
#[derive(Default)]
pub struct GatedClient {
    entered: Notify,
    release: Notify,
    calls: AtomicUsize,
}

impl GatedClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Wait until a send has started.
    pub async fn wait_for_send(&self) {
        self.entered.notified().await;
    }

    /// Let the pending send resolve with 200 OK.
    pub fn release(&self) {
        self.release.notify_one();
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmailDeliveryClient for GatedClient {
    fn initialize(&self, _public_key: &str) {}

    async fn send(
        &self,
        _service_id: &str,
        _template_id: &str,
        _params: &TemplateParams,
        _public_key: &str,
    ) -> Result<DeliveryReceipt, DeliveryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entered.notify_one();
        self.release.notified().await;
        Ok(DeliveryReceipt::ok())
    }

    fn provider_name(&self) -> &str {
        "gated"
    }
}

pub fn controller_with(client: Arc<dyn EmailDeliveryClient>) -> ContactFormController {
    ContactFormController::new(client, email_settings("http://localhost"), contact_config())
}

/// Form input answering from per-field queues and a queue of retry decisions
#[derive(Default)]
pub struct ScriptedInput {
    answers: Mutex<HashMap<Field, VecDeque<String>>>,
    retries: Mutex<VecDeque<bool>>,
    prompts: Mutex<Vec<(Field, Option<String>)>>,
    retry_prompts: AtomicUsize,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(self, field: Field, value: &str) -> Self {
        self.answers
            .lock()
            .unwrap()
            .entry(field)
            .or_default()
            .push_back(value.to_string());
        self
    }

    pub fn retry(self, decision: bool) -> Self {
        self.retries.lock().unwrap().push_back(decision);
        self
    }

    /// Fields prompted, in order, with the error shown at the time
    pub fn prompts(&self) -> Vec<(Field, Option<String>)> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn retry_prompts(&self) -> usize {
        self.retry_prompts.load(Ordering::SeqCst)
    }
}

impl FormInput for ScriptedInput {
    fn field(&self, field: Field, _current: &str, error: Option<&str>) -> Result<String, ApiError> {
        self.prompts
            .lock()
            .unwrap()
            .push((field, error.map(str::to_string)));
        self.answers
            .lock()
            .unwrap()
            .get_mut(&field)
            .and_then(VecDeque::pop_front)
            .ok_or_else(|| ApiError::InputError(format!("no scripted answer for {}", field)))
    }

    fn confirm_retry(&self, _notice: &Notice) -> Result<bool, ApiError> {
        self.retry_prompts.fetch_add(1, Ordering::SeqCst);
        Ok(self.retries.lock().unwrap().pop_front().unwrap_or(false))
    }
}
