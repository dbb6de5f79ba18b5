use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use registration::flows::ProviderSections;
use registration::{Application, HttpGateway, SubmissionError, SubmissionGateway};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENDPOINT: &str = "/api/provider-registration/applications";

fn application() -> Application<ProviderSections> {
    Application {
        application_id: Uuid::new_v4(),
        flow: "provider-registration",
        applicant_id: "u-9".into(),
        submitted_at: Utc::now(),
        sections: Arc::new(ProviderSections::default()),
    }
}

fn gateway(server: &MockServer) -> HttpGateway {
    HttpGateway::new(&format!("{}/", server.uri()), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_accepted_application_returns_ack() {
    let server = MockServer::start().await;
    let application = application();
    let id = application.application_id.to_string();

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("Idempotency-Key", id.as_str()))
        .and(header("Authorization", "Bearer s3cret"))
        .and(body_partial_json(json!({
            "applicationId": id,
            "flow": "provider-registration",
            "applicantId": "u-9",
            "sections": { "account": { "accountType": "freelancer" } }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "reference": "PR-2041",
            "receivedAt": "2026-03-01T09:30:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ack = gateway(&server)
        .with_api_key("s3cret".into())
        .submit_application(&application)
        .await
        .unwrap();

    assert_eq!(ack.reference, "PR-2041");
    assert_eq!(ack.received_at.to_rfc3339(), "2026-03-01T09:30:00+00:00");
}

#[tokio::test]
async fn test_error_status_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(422).set_body_string("username already taken"))
        .mount(&server)
        .await;

    let err = gateway(&server)
        .submit_application(&application())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        SubmissionError::Rejected {
            status: 422,
            message: "username already taken".into()
        }
    );
}

#[tokio::test]
async fn test_server_error_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = gateway(&server)
        .submit_application(&application())
        .await
        .unwrap_err();

    assert!(matches!(err, SubmissionError::Rejected { status: 503, .. }));
}

#[tokio::test]
async fn test_unreadable_ack_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let err = gateway(&server)
        .submit_application(&application())
        .await
        .unwrap_err();

    assert!(matches!(err, SubmissionError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_gateway_is_transport_error() {
    // Nothing listens on the discard port
    let gateway = HttpGateway::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();

    let err = gateway.submit_application(&application()).await.unwrap_err();

    assert!(matches!(err, SubmissionError::Transport(_)));
}

#[tokio::test]
async fn test_slow_gateway_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({
                    "reference": "PR-1",
                    "receivedAt": "2026-03-01T09:30:00Z"
                }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let gateway = HttpGateway::new(&server.uri(), Duration::from_millis(200)).unwrap();
    let err = gateway.submit_application(&application()).await.unwrap_err();

    assert!(matches!(err, SubmissionError::Transport(_)));
}

#[test]
fn test_endpoint_trims_trailing_slash() {
    let gateway = HttpGateway::new("http://gateway.internal/", Duration::from_secs(1)).unwrap();
    assert_eq!(
        gateway.endpoint("freelancer-verification"),
        "http://gateway.internal/api/freelancer-verification/applications"
    );
}
