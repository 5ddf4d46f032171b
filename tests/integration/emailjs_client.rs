//! Integration tests for the EmailJS delivery client against a mock HTTP server

use super::test_utils::email_settings;
use folio::delivery::{EmailDeliveryClient, EmailJsClient, TemplateParams};
use folio::error::DeliveryError;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEND_PATH: &str = "/api/v1.0/email/send";

fn params() -> TemplateParams {
    TemplateParams {
        from_name: "Ada Lovelace".to_string(),
        from_email: "ada@example.com".to_string(),
        subject: "Hello there".to_string(),
        message: "This is a message".to_string(),
        to_name: "Grace Hopper".to_string(),
    }
}

#[tokio::test]
async fn test_send_posts_template_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .and(body_json(json!({
            "service_id": "service_test",
            "template_id": "template_test",
            "user_id": "pk_test_key",
            "template_params": {
                "from_name": "Ada Lovelace",
                "from_email": "ada@example.com",
                "subject": "Hello there",
                "message": "This is a message",
                "to_name": "Grace Hopper"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&server)
        .await;

    let client = EmailJsClient::from_settings(&email_settings(&server.uri())).unwrap();
    let receipt = client
        .send("service_test", "template_test", &params(), "pk_test_key")
        .await
        .unwrap();
    assert_eq!(receipt.status, 200);
    assert_eq!(receipt.text, "OK");
}

#[tokio::test]
async fn test_empty_key_falls_back_to_initialized_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&server)
        .await;

    let client = EmailJsClient::new(Some(server.uri()), Duration::from_secs(5)).unwrap();
    client.initialize("pk_from_init");
    client
        .send("service_test", "template_test", &params(), "")
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["user_id"], "pk_from_init");
}

#[tokio::test]
async fn test_error_status_is_reported_with_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_string("The Public Key is invalid"))
        .mount(&server)
        .await;

    let client = EmailJsClient::from_settings(&email_settings(&server.uri())).unwrap();
    let err = client
        .send("service_test", "template_test", &params(), "pk_test_key")
        .await
        .unwrap_err();
    assert_eq!(
        err,
        DeliveryError::Status {
            status: 400,
            text: "The Public Key is invalid".to_string(),
        }
    );
}

#[tokio::test]
async fn test_unreachable_service_is_a_transport_error() {
    let client = EmailJsClient::from_settings(&email_settings("http://127.0.0.1:1")).unwrap();
    let err = client
        .send("service_test", "template_test", &params(), "pk_test_key")
        .await
        .unwrap_err();
    assert!(matches!(err, DeliveryError::Transport(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_slow_service_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("OK")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = EmailJsClient::new(Some(server.uri()), Duration::from_millis(200)).unwrap();
    client.initialize("pk_test_key");
    let err = client
        .send("service_test", "template_test", &params(), "")
        .await
        .unwrap_err();
    match err {
        DeliveryError::Transport(message) => assert!(message.contains("timeout")),
        other => panic!("expected transport error, got {:?}", other),
    }
}
