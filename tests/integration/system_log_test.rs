//! Integration tests for the centralized logging endpoint.

mod helpers;

use std::net::SocketAddr;
use std::sync::Arc;

use http::StatusCode;
use serde_json::json;

use curricula_core::config::reporting::{LOG_ERROR_PATH, ReportingConfig};
use curricula_core::traits::sink::Channel;
use curricula_core::types::{SystemErrorDetails, SystemLevel};
use curricula_telemetry::logger::Logger;
use curricula_telemetry::sink::MemorySink;
use curricula_telemetry::{DispatchOutcome, SystemErrorLogger};

#[tokio::test]
async fn test_log_error_accepts_report() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            LOG_ERROR_PATH,
            Some(json!({
                "message": "Critical system error: Database connection failed.",
                "stack": "Error: Database connection failed at src/utils/db.rs:50:10",
                "timestamp": 1_700_000_000_000_i64,
                "level": "error",
                "component": "SystemRouter",
                "context": { "userId": "sys_admin_1", "reqId": "req_xyz123" },
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert!(
        response.body["data"]["incidentId"]
            .as_str()
            .is_some_and(|id| uuid_like(id))
    );

    let errors = app.sink.on(Channel::Error);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "Client reported system error");
    let payload = errors[0].payload.as_ref().expect("payload");
    assert_eq!(payload["component"], "SystemRouter");
    assert_eq!(payload["context"]["reqId"], "req_xyz123");
    assert_eq!(
        errors[0].stack.as_deref(),
        Some("Error: Database connection failed at src/utils/db.rs:50:10")
    );
}

#[tokio::test]
async fn test_log_error_rejects_empty_message() {
    let app = helpers::TestApp::new();

    let response = app
        .request("POST", LOG_ERROR_PATH, Some(json!({ "message": "" })))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(
        response.body["message"]
            .as_str()
            .is_some_and(|m| m.starts_with("Invalid error report"))
    );
    // Logged once, by the error middleware.
    let errors = app.sink.on(Channel::Error);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "Error caught by errorHandler:");
}

#[tokio::test]
async fn test_log_error_rejects_malformed_json() {
    let app = helpers::TestApp::new();

    let response = app
        .send("POST", LOG_ERROR_PATH, "{ not json".to_string())
        .await;

    assert!(response.status.is_client_error());
    assert!(response.body["message"].is_string());
    assert_eq!(app.sink.count(Channel::Error), 1);
}

#[tokio::test]
async fn test_health() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["status"], "ok");
    assert!(app.sink.is_empty());
}

#[tokio::test]
async fn test_dispatcher_delivers_to_running_server() {
    let app = helpers::TestApp::new();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let router = app.router.clone();
    tokio::spawn(async move {
        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("serve");
    });

    let client_sink = MemorySink::new();
    let dispatcher = SystemErrorLogger::new(
        &ReportingConfig {
            endpoint_base_url: format!("http://{addr}"),
            timeout_seconds: 5,
        },
        Logger::new(Arc::new(client_sink.clone())),
    )
    .expect("runtime");

    let notice = dispatcher
        .display(Some(
            SystemErrorDetails::new("User session expired unexpectedly.")
                .with_level(SystemLevel::Warn)
                .with_component("SessionGuard")
                .stamped_now(),
        ))
        .expect("notice");

    assert_eq!(notice.message(), "User session expired unexpectedly.");
    assert_eq!(notice.delivery().await, DispatchOutcome::Delivered);
    assert!(client_sink.is_empty());

    let received = app.sink.on(Channel::Error);
    assert_eq!(received.len(), 1);
    let payload = received[0].payload.as_ref().expect("payload");
    assert_eq!(payload["message"], "User session expired unexpectedly.");
    assert_eq!(payload["level"], "warn");
}

fn uuid_like(id: &str) -> bool {
    id.len() == 36 && id.chars().filter(|c| *c == '-').count() == 4
}
