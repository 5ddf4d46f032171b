//! Terminal rendition of the contact form: fill fields, submit, react to the outcome.

use crate::contact::{
    ContactFormController, ContactSubmission, Field, FieldErrors, Notice, SubmissionState,
};
use crate::delivery::DeliveryReceipt;
use crate::error::ApiError;
use owo_colors::OwoColorize;
use tracing::debug;

/// Source of field values and retry decisions
pub trait FormInput {
    /// Ask for a field value. `current` is what the field holds now; `error` is the
    /// message from the last failed validation, if any.
    fn field(&self, field: Field, current: &str, error: Option<&str>) -> Result<String, ApiError>;

    /// Ask whether to send again after a failed delivery.
    fn confirm_retry(&self, notice: &Notice) -> Result<bool, ApiError>;
}

/// Interactive terminal input via dialoguer
pub struct TerminalInput;

impl FormInput for TerminalInput {
    fn field(&self, field: Field, current: &str, error: Option<&str>) -> Result<String, ApiError> {
        use dialoguer::Input;

        if let Some(error) = error {
            eprintln!("{}", error.red());
        }
        let mut input = Input::<String>::new()
            .with_prompt(format!("{} ({})", field.label(), field.placeholder()))
            .allow_empty(true);
        if !current.is_empty() {
            input = input.with_initial_text(current);
        }
        input
            .interact_text()
            .map_err(|e| ApiError::InputError(format!("Failed to get user input: {}", e)))
    }

    fn confirm_retry(&self, notice: &Notice) -> Result<bool, ApiError> {
        use dialoguer::Confirm;

        eprintln!("{}", super::presentation::format_notice(notice, true));
        Confirm::new()
            .with_prompt("Try sending again?")
            .default(true)
            .interact()
            .map_err(|e| ApiError::InputError(format!("Failed to get user input: {}", e)))
    }
}

/// Where the form ended up once the user stopped submitting
#[derive(Debug, Clone)]
pub struct ContactOutcome {
    pub state: SubmissionState,
    pub notice: Option<Notice>,
    pub errors: FieldErrors,
    pub receipt: Option<DeliveryReceipt>,
    /// Delivery calls made
    pub attempts: u32,
}

impl ContactOutcome {
    pub fn is_sent(&self) -> bool {
        self.state == SubmissionState::Succeeded
    }

    fn from_controller(
        controller: &ContactFormController,
        receipt: Option<DeliveryReceipt>,
        attempts: u32,
    ) -> Self {
        Self {
            state: controller.state(),
            notice: controller.notice(),
            errors: controller.field_errors(),
            receipt,
            attempts,
        }
    }
}

/// Drive the form to completion.
///
/// Without `input` the form is submitted once as filled. With `input`, empty fields
/// are asked for first, invalid fields are asked for again after each validation
/// failure, and a failed delivery is only retried when the user confirms.
pub async fn run_contact_form(
    controller: &ContactFormController,
    initial: ContactSubmission,
    input: Option<&dyn FormInput>,
) -> Result<ContactOutcome, ApiError> {
    controller.fill(initial);
    let mut attempts = 0;

    loop {
        if let Some(input) = input {
            let fields = controller.fields();
            let errors = controller.field_errors();
            for field in Field::ALL {
                let error = errors.get(field);
                if fields.get(field).is_empty() || error.is_some() {
                    let value = input.field(field, fields.get(field), error)?;
                    controller.set_field(field, value);
                }
            }
        }

        match controller.submit().await {
            Ok(receipt) => {
                attempts += 1;
                return Ok(ContactOutcome::from_controller(
                    controller,
                    Some(receipt),
                    attempts,
                ));
            }
            Err(ApiError::Validation(errors)) => {
                debug!(fields = %errors, "Contact form needs corrections");
                if input.is_none() {
                    return Ok(ContactOutcome::from_controller(controller, None, attempts));
                }
            }
            Err(ApiError::Delivery(_)) => {
                attempts += 1;
                let retry = match (input, controller.notice()) {
                    (Some(input), Some(notice)) => input.confirm_retry(&notice)?,
                    _ => false,
                };
                if !retry {
                    return Ok(ContactOutcome::from_controller(controller, None, attempts));
                }
            }
            Err(other) => return Err(other),
        }
    }
}
