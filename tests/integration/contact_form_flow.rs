//! Integration tests for the terminal contact form flow and command routing

use super::test_utils::{
    controller_with, valid_submission, RecordingClient, ScriptedInput,
};
use folio::cli::{run_contact_form, Commands, ConfigCommands, FormInput, RunContext};
use folio::config::FolioConfig;
use folio::contact::{ContactSubmission, Field, SubmissionState};
use folio::error::{ApiError, DeliveryError};
use std::path::PathBuf;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_non_interactive_invalid_form_is_not_sent() {
    let client = RecordingClient::new();
    let controller = controller_with(client.clone());
    let mut initial = valid_submission();
    initial.email = "not-an-email".to_string();

    let outcome = run_contact_form(&controller, initial, None).await.unwrap();
    assert!(!outcome.is_sent());
    assert_eq!(outcome.state, SubmissionState::Idle);
    assert_eq!(outcome.attempts, 0);
    assert_eq!(
        outcome.errors.get(Field::Email),
        Some("Please enter a valid email address")
    );
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_prompts_only_for_missing_then_invalid_fields() {
    let client = RecordingClient::new();
    let controller = controller_with(client.clone());
    let initial = ContactSubmission::new("Ada Lovelace", "ada@example.com", "", "");
    let input = ScriptedInput::new()
        .answer(Field::Subject, "Hi")
        .answer(Field::Message, "This is a message")
        .answer(Field::Subject, "Hello there");

    let outcome = run_contact_form(&controller, initial, Some(&input as &dyn FormInput))
        .await
        .unwrap();

    assert!(outcome.is_sent());
    assert_eq!(outcome.attempts, 1);
    assert_eq!(
        input.prompts(),
        vec![
            (Field::Subject, None),
            (Field::Message, None),
            (
                Field::Subject,
                Some("Subject must be at least 5 characters".to_string())
            ),
        ]
    );
    let calls = client.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].params.subject, "Hello there");
    assert!(controller.fields().is_empty());
}

#[tokio::test]
async fn test_failed_send_is_retried_only_on_confirmation() {
    let client = RecordingClient::with_script(vec![
        Err(DeliveryError::Transport("offline".to_string())),
        Err(DeliveryError::Transport("offline".to_string())),
    ]);
    let controller = controller_with(client.clone());
    let input = ScriptedInput::new().retry(true).retry(false);

    let outcome = run_contact_form(
        &controller,
        valid_submission(),
        Some(&input as &dyn FormInput),
    )
    .await
    .unwrap();

    assert!(!outcome.is_sent());
    assert_eq!(outcome.state, SubmissionState::Failed);
    assert_eq!(outcome.attempts, 2);
    assert_eq!(input.retry_prompts(), 2);
    assert_eq!(client.call_count(), 2);
    assert!(input.prompts().is_empty(), "fields were kept, nothing to re-enter");
    assert_eq!(controller.fields(), valid_submission());
}

#[tokio::test]
async fn test_non_interactive_failure_does_not_retry() {
    let client = RecordingClient::with_script(vec![Err(DeliveryError::Status {
        status: 500,
        text: "Internal Server Error".to_string(),
    })]);
    let controller = controller_with(client.clone());

    let outcome = run_contact_form(&controller, valid_submission(), None)
        .await
        .unwrap();
    assert_eq!(outcome.state, SubmissionState::Failed);
    assert_eq!(outcome.attempts, 1);
    assert_eq!(client.call_count(), 1);
    assert!(outcome.notice.is_some());
}

fn configured(base_url: &str) -> FolioConfig {
    let mut config = FolioConfig::default();
    config.email.service_id = Some("service_test".to_string());
    config.email.template_id = Some("template_test".to_string());
    config.email.public_key = Some("pk_test_key".to_string());
    config.email.base_url = base_url.to_string();
    config
}

#[tokio::test]
async fn test_contact_command_delivers_through_emailjs() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1.0/email/send"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&server)
        .await;

    let context = RunContext::with_config(PathBuf::from("."), configured(&server.uri()));
    let output = context
        .handle_contact(valid_submission(), "json", None)
        .await
        .unwrap();

    assert!(output.success);
    let value: serde_json::Value = serde_json::from_str(&output.text).unwrap();
    assert_eq!(value["sent"], true);
    assert_eq!(value["status"], 200);
}

#[tokio::test]
async fn test_contact_command_reports_failure_without_cause() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1.0/email/send"))
        .respond_with(ResponseTemplate::new(403).set_body_string("API calls are disabled"))
        .mount(&server)
        .await;

    let context = RunContext::with_config(PathBuf::from("."), configured(&server.uri()));
    let output = context
        .handle_contact(valid_submission(), "text", None)
        .await
        .unwrap();

    assert!(!output.success);
    assert!(output.text.contains("Failed to send message"));
    assert!(!output.text.contains("API calls are disabled"));
}

#[tokio::test]
async fn test_contact_command_requires_credentials() {
    let context = RunContext::with_config(PathBuf::from("."), FolioConfig::default());
    let err = context
        .handle_contact(valid_submission(), "text", None)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::MissingConfig(_)));
}

#[tokio::test]
async fn test_config_validate_command() {
    let context = RunContext::with_config(PathBuf::from("."), FolioConfig::default());
    let output = context
        .execute(&Commands::Config {
            command: ConfigCommands::Validate {
                format: "json".to_string(),
            },
        })
        .await
        .unwrap();
    assert!(!output.success);
    let value: serde_json::Value = serde_json::from_str(&output.text).unwrap();
    assert_eq!(value["valid"], false);
    assert_eq!(value["missing"].as_array().unwrap().len(), 3);

    let context = RunContext::with_config(PathBuf::from("."), configured("https://api.emailjs.com"));
    let output = context
        .execute(&Commands::Config {
            command: ConfigCommands::Validate {
                format: "text".to_string(),
            },
        })
        .await
        .unwrap();
    assert!(output.success);
}
