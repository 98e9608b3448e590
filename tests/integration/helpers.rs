//! Shared test helpers for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::extract::ConnectInfo;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use curricula_api::AppState;
use curricula_api::middleware::error_handler::with_error_handling;
use curricula_core::config::AppConfig;
use curricula_telemetry::logger::Logger;
use curricula_telemetry::sink::MemorySink;

/// User agent sent with every test request
pub const TEST_USER_AGENT: &str = "curricula-integration";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Records emitted by the application logger
    pub sink: MemorySink,
    /// Shared application state
    pub state: AppState,
}

impl TestApp {
    /// The full application, as served by `curricula-server`.
    pub fn new() -> Self {
        let (state, sink) = Self::state();
        let router = curricula_api::build_app(state.clone());
        Self {
            router,
            sink,
            state,
        }
    }

    /// Only `routes`, behind the error-handling middleware.
    pub fn with_routes(routes: Router<AppState>) -> Self {
        let (state, sink) = Self::state();
        let router = with_error_handling(routes, state.clone()).with_state(state.clone());
        Self {
            router,
            sink,
            state,
        }
    }

    fn state() -> (AppState, MemorySink) {
        let sink = MemorySink::new();
        let logger = Logger::new(Arc::new(sink.clone()));
        (AppState::new(AppConfig::default(), logger), sink)
    }

    /// Make an HTTP request to the test app
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        self.send(method, path, body_str).await
    }

    /// Make an HTTP request with a raw JSON body
    pub async fn send(&self, method: &str, path: &str, body: String) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .header("User-Agent", TEST_USER_AGENT)
            .body(Body::from(body))
            .expect("Failed to build request");
        req.extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 52000))));

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
