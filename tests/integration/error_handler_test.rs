//! Integration tests for the terminal error-handling middleware.

mod helpers;

use axum::Router;
use axum::routing::get;
use http::StatusCode;
use serde_json::json;

use curricula_api::error::{ERROR_HANDLER_LOG_MESSAGE, INTERNAL_SERVER_ERROR_MESSAGE};
use curricula_api::{ApiError, AppState, Raised};
use curricula_core::error::AppError;
use curricula_core::traits::sink::{Channel, LogRecord};

async fn invalid_input() -> Result<&'static str, Raised> {
    Err(ApiError::bad_request("Invalid input data").into())
}

async fn database_down() -> Result<&'static str, Raised> {
    Err(std::io::Error::other("Database connection failed").into())
}

async fn misconfigured() -> Result<&'static str, Raised> {
    Err(AppError::configuration("reporting endpoint is not set").into())
}

async fn thrown_string() -> &'static str {
    panic!("A plain string was thrown!")
}

async fn thrown_null() -> Result<&'static str, Raised> {
    Err(Raised::value(serde_json::Value::Null))
}

async fn fine() -> &'static str {
    "ok"
}

fn app() -> helpers::TestApp {
    helpers::TestApp::with_routes(
        Router::<AppState>::new()
            .route("/api/v1/invalid", get(invalid_input))
            .route("/api/v1/database", get(database_down))
            .route("/api/v1/config", get(misconfigured))
            .route("/api/v1/panic", get(thrown_string))
            .route("/api/v1/null", get(thrown_null))
            .route("/api/v1/fine", get(fine)),
    )
}

fn only_error_record(app: &helpers::TestApp) -> LogRecord {
    let errors = app.sink.on(Channel::Error);
    assert_eq!(errors.len(), 1, "exactly one error record: {:?}", errors);
    assert_eq!(app.sink.count(Channel::Warn), 0);
    errors[0].clone()
}

#[tokio::test]
async fn test_api_error_status_and_message_reach_client() {
    let app = app();

    let response = app.request("GET", "/api/v1/invalid", None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, json!({ "message": "Invalid input data" }));

    let record = only_error_record(&app);
    assert_eq!(record.message, ERROR_HANDLER_LOG_MESSAGE);
    let log = record.payload.expect("payload");
    assert_eq!(log["statusCode"], 400);
    assert_eq!(log["isOperational"], true);
    assert_eq!(log["request"]["method"], "GET");
    assert_eq!(log["request"]["url"], "/api/v1/invalid");
    assert_eq!(log["request"]["ip"], "127.0.0.1");
    assert_eq!(log["request"]["userAgent"], helpers::TEST_USER_AGENT);
}

#[tokio::test]
async fn test_generic_error_is_masked() {
    let app = app();

    let response = app.request("GET", "/api/v1/database", None).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.body,
        json!({ "message": INTERNAL_SERVER_ERROR_MESSAGE })
    );

    let log = only_error_record(&app).payload.expect("payload");
    assert_eq!(log["message"], "Database connection failed");
    assert!(log.get("statusCode").is_none());
}

#[tokio::test]
async fn test_app_error_is_masked() {
    let app = app();

    let response = app.request("GET", "/api/v1/config", None).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["message"], INTERNAL_SERVER_ERROR_MESSAGE);
    let record = only_error_record(&app);
    assert!(
        record
            .subject
            .as_deref()
            .is_some_and(|s| s.contains("reporting endpoint is not set"))
    );
}

#[tokio::test]
async fn test_panic_is_reported_as_thrown_value() {
    let app = app();

    let response = app.request("GET", "/api/v1/panic", None).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.body,
        json!({ "message": INTERNAL_SERVER_ERROR_MESSAGE })
    );

    let record = only_error_record(&app);
    assert_eq!(
        record.subject.as_deref(),
        Some("Non-Error value thrown: A plain string was thrown!")
    );
    let log = record.payload.expect("payload");
    assert_eq!(log["request"]["url"], "/api/v1/panic");
}

#[tokio::test]
async fn test_null_value_is_described() {
    let app = app();

    let response = app.request("GET", "/api/v1/null", None).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        only_error_record(&app).subject.as_deref(),
        Some("Non-Error value thrown: null")
    );
}

#[tokio::test]
async fn test_successful_request_logs_nothing() {
    let app = app();

    let response = app.request("GET", "/api/v1/fine", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(app.sink.is_empty());
}

#[tokio::test]
async fn test_each_failure_is_logged_once() {
    let app = app();

    app.request("GET", "/api/v1/invalid", None).await;
    app.request("GET", "/api/v1/database", None).await;

    assert_eq!(app.sink.count(Channel::Error), 2);
}
