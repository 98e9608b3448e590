//! Classification of handler failures into HTTP responses.
//!
//! Handlers fail with a [`Raised`] value. [`error_handler`] is the terminal
//! step: it picks the status and client message, emits exactly one log
//! record, and produces exactly one response.
//!
//! | raised                 | status            | client message            |
//! |------------------------|-------------------|---------------------------|
//! | [`Raised::Api`]        | `err.status_code` | `err.message`             |
//! | [`Raised::Error`]      | 500               | `"Internal Server Error"` |
//! | [`Raised::Value`]      | 500               | `"Internal Server Error"` |

use std::any::Any;
use std::sync::Arc;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use curricula_core::error::{AppError, render_chain};
use curricula_core::traits::sink::{Channel, LogRecord, LogSink};
use curricula_telemetry::boundary::panic_payload_text;

use crate::extractors::request_info::RequestInfo;

/// Message returned for every non-operational failure.
pub const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Internal Server Error";
/// Leading message of every record emitted by [`error_handler`].
pub const ERROR_HANDLER_LOG_MESSAGE: &str = "Error caught by errorHandler:";
/// Name tag carried by [`ApiError`].
pub const API_ERROR_NAME: &str = "APIError";

/// Operational error with an HTTP status, shown to the client verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    message: String,
    status_code: StatusCode,
    is_operational: bool,
}

impl ApiError {
    /// Create an operational API error.
    pub fn new(status_code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code,
            is_operational: true,
        }
    }

    /// Marks the error as unexpected.
    pub fn non_operational(mut self) -> Self {
        self.is_operational = false;
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Always [`API_ERROR_NAME`].
    pub fn name(&self) -> &'static str {
        API_ERROR_NAME
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    pub fn is_operational(&self) -> bool {
        self.is_operational
    }
}

/// Anything a request handler can fail with.
#[derive(Debug)]
pub enum Raised {
    /// An operational API error.
    Api(ApiError),
    /// Any other error value.
    Error(Box<dyn std::error::Error + Send + Sync>),
    /// A value that is not an error, e.g. a panic payload.
    Value(serde_json::Value),
}

impl Raised {
    /// Wraps a generic error.
    pub fn error(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Error(Box::new(err))
    }

    /// Wraps a non-error value.
    pub fn value(value: impl Into<serde_json::Value>) -> Self {
        Self::Value(value.into())
    }

    /// Converts a caught panic payload.
    pub fn from_panic(payload: Box<dyn Any + Send + 'static>) -> Self {
        Self::Value(serde_json::Value::String(panic_payload_text(payload.as_ref())))
    }
}

impl From<ApiError> for Raised {
    fn from(err: ApiError) -> Self {
        Self::Api(err)
    }
}

impl From<AppError> for Raised {
    fn from(err: AppError) -> Self {
        Self::error(err)
    }
}

impl From<std::io::Error> for Raised {
    fn from(err: std::io::Error) -> Self {
        Self::error(err)
    }
}

impl From<serde_json::Error> for Raised {
    fn from(err: serde_json::Error) -> Self {
        Self::error(err)
    }
}

/// Marker placed in a handler's response so the error middleware can
/// classify and log the failure with the request metadata.
#[derive(Debug, Clone)]
pub struct RaisedResponse(pub Arc<Raised>);

impl IntoResponse for Raised {
    fn into_response(self) -> Response {
        let mut response = classify(&self).into_response();
        response.extensions_mut().insert(RaisedResponse(Arc::new(self)));
        response
    }
}

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

/// Details written to the diagnostic log for one failure.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorLog {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_operational: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<RequestInfo>,
}

struct Classified {
    status: StatusCode,
    client_message: String,
    log: ErrorLog,
    non_error: bool,
}

impl Classified {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                message: self.client_message,
            }),
        )
            .into_response()
    }
}

fn classify(raised: &Raised) -> Classified {
    match raised {
        Raised::Api(err) => Classified {
            status: err.status_code(),
            client_message: err.message().to_string(),
            log: ErrorLog {
                message: err.message().to_string(),
                stack: Some(render_chain(err)),
                status_code: Some(err.status_code().as_u16()),
                is_operational: Some(err.is_operational()),
                request: None,
            },
            non_error: false,
        },
        Raised::Error(err) => Classified {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            client_message: INTERNAL_SERVER_ERROR_MESSAGE.to_string(),
            log: ErrorLog {
                message: err.to_string(),
                stack: Some(render_chain(&**err)),
                status_code: None,
                is_operational: None,
                request: None,
            },
            non_error: false,
        },
        Raised::Value(value) => Classified {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            client_message: INTERNAL_SERVER_ERROR_MESSAGE.to_string(),
            log: ErrorLog {
                message: format!("Non-Error value thrown: {}", describe_value(value)),
                stack: None,
                status_code: None,
                is_operational: None,
                request: None,
            },
            non_error: true,
        },
    }
}

/// `null` for null, raw text for strings, compact JSON otherwise.
fn describe_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Classifies `raised`, logs it once on the error channel, and builds the
/// response. Never forwards to another handler.
pub fn error_handler(raised: &Raised, request: &RequestInfo, sink: &dyn LogSink) -> Response {
    let mut classified = classify(raised);
    classified.log.request = Some(request.clone());

    let summary = if classified.non_error {
        classified.log.message.clone()
    } else {
        classified
            .log
            .stack
            .clone()
            .unwrap_or_else(|| classified.log.message.clone())
    };
    let record = LogRecord {
        payload: serde_json::to_value(&classified.log).ok(),
        ..LogRecord::new(ERROR_HANDLER_LOG_MESSAGE).with_subject(summary)
    };
    sink.emit(Channel::Error, record);

    classified.into_response()
}
