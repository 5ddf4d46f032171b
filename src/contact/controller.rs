//! Contact form controller: field state, validation and the submission state machine.
//!
//! Transitions:
//! - `Idle --submit(valid)--> Submitting`
//! - `Submitting --status 200--> Succeeded` (fields cleared)
//! - `Submitting --error or non-200--> Failed` (fields kept)
//! - `Succeeded | Failed --edit or submit--> Idle`
//!
//! The lock guarding form state is never held across the delivery call, so the
//! form stays editable while a send is in flight. A submit future dropped while
//! `Submitting` settles the form to `Failed`.

use crate::config::{ContactConfig, EmailSettings};
use crate::delivery::{DeliveryReceipt, EmailDeliveryClient, TemplateParams};
use crate::error::{ApiError, DeliveryError};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::fields::{ContactSubmission, Field};
use super::state::{Notice, SubmissionState};
use super::validation::FieldErrors;

#[derive(Debug, Default)]
struct FormState {
    fields: ContactSubmission,
    state: SubmissionState,
    errors: FieldErrors,
    notice: Option<Notice>,
}

impl FormState {
    /// Leave a settled state; the notice goes with it.
    fn settle_to_idle(&mut self) {
        if self.state.is_settled() {
            self.state = SubmissionState::Idle;
            self.notice = None;
        }
    }
}

/// Settles an abandoned submission to `Failed` unless disarmed first.
struct InFlightGuard<'a> {
    form: &'a Mutex<FormState>,
    fallback_email: Option<&'a str>,
    armed: bool,
}

impl InFlightGuard<'_> {
    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut form = self.form.lock();
        if form.state == SubmissionState::Submitting {
            warn!("Contact submission cancelled before delivery completed");
            form.state = SubmissionState::Failed;
            form.notice = Some(Notice::failed(self.fallback_email));
        }
    }
}

/// Contact form controller
pub struct ContactFormController {
    client: Arc<dyn EmailDeliveryClient>,
    email: EmailSettings,
    contact: ContactConfig,
    form: Mutex<FormState>,
}

impl ContactFormController {
    /// Create a controller in `Idle` with empty fields. Initializes the delivery client.
    pub fn new(
        client: Arc<dyn EmailDeliveryClient>,
        email: EmailSettings,
        contact: ContactConfig,
    ) -> Self {
        client.initialize(&email.public_key);
        Self {
            client,
            email,
            contact,
            form: Mutex::new(FormState::default()),
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.form.lock().state
    }

    pub fn fields(&self) -> ContactSubmission {
        self.form.lock().fields.clone()
    }

    pub fn field_errors(&self) -> FieldErrors {
        self.form.lock().errors.clone()
    }

    pub fn notice(&self) -> Option<Notice> {
        self.form.lock().notice.clone()
    }

    /// Whether the submit control is enabled
    pub fn can_submit(&self) -> bool {
        self.state() != SubmissionState::Submitting
    }

    /// Edit one field. Clears that field's error and leaves a settled state.
    pub fn set_field(&self, field: Field, value: impl Into<String>) {
        let mut form = self.form.lock();
        form.fields.set(field, value);
        form.errors.remove(field);
        form.settle_to_idle();
    }

    pub fn set_name(&self, value: impl Into<String>) {
        self.set_field(Field::Name, value);
    }

    pub fn set_email(&self, value: impl Into<String>) {
        self.set_field(Field::Email, value);
    }

    pub fn set_subject(&self, value: impl Into<String>) {
        self.set_field(Field::Subject, value);
    }

    pub fn set_message(&self, value: impl Into<String>) {
        self.set_field(Field::Message, value);
    }

    /// Replace all four fields at once.
    pub fn fill(&self, submission: ContactSubmission) {
        let mut form = self.form.lock();
        form.fields = submission;
        form.errors = FieldErrors::new();
        form.settle_to_idle();
    }

    /// Run the validation contract against the current fields without submitting.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        self.form.lock().fields.check()
    }

    /// Submit the current fields.
    ///
    /// Makes at most one delivery call. Returns `SubmissionInFlight` without side
    /// effects while another submit is pending, and `Validation` without touching
    /// the network when any rule fails.
    pub async fn submit(&self) -> Result<DeliveryReceipt, ApiError> {
        let submission = {
            let mut form = self.form.lock();
            if form.state == SubmissionState::Submitting {
                debug!("Submit ignored: a submission is already in flight");
                return Err(ApiError::SubmissionInFlight);
            }
            form.settle_to_idle();

            if let Err(errors) = form.fields.check() {
                debug!(
                    failing_fields = errors.len(),
                    "Contact submission rejected by validation"
                );
                form.errors = errors.clone();
                return Err(ApiError::Validation(errors));
            }

            form.errors = FieldErrors::new();
            form.state = SubmissionState::Submitting;
            form.fields.clone()
        };
        let mut guard = InFlightGuard {
            form: &self.form,
            fallback_email: self.contact.fallback_email.as_deref(),
            armed: true,
        };

        let params = TemplateParams::from_submission(&submission, &self.contact.recipient_name);
        info!(
            provider = self.client.provider_name(),
            service_id = %self.email.service_id,
            template_id = %self.email.template_id,
            "Submitting contact message"
        );

        let started = Instant::now();
        let result = self
            .client
            .send(
                &self.email.service_id,
                &self.email.template_id,
                &params,
                &self.email.public_key,
            )
            .await
            .and_then(|receipt| {
                if receipt.status == 200 {
                    Ok(receipt)
                } else {
                    Err(DeliveryError::Status {
                        status: receipt.status,
                        text: receipt.text,
                    })
                }
            });
        let duration_ms = started.elapsed().as_millis() as u64;

        let mut form = self.form.lock();
        guard.disarm();
        match result {
            Ok(receipt) => {
                info!(duration_ms, "Contact message delivered");
                form.state = SubmissionState::Succeeded;
                form.fields.clear();
                form.notice = Some(Notice::sent());
                Ok(receipt)
            }
            Err(e) => {
                warn!(
                    duration_ms,
                    http_status = ?e.status(),
                    error = %e,
                    "Contact message delivery failed"
                );
                form.state = SubmissionState::Failed;
                form.notice = Some(Notice::failed(self.contact.fallback_email.as_deref()));
                Err(ApiError::Delivery(e))
            }
        }
    }
}
