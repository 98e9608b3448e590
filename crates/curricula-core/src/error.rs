//! Structured application error value.
//!
//! [`AppError`] describes one error occurrence. It is created where the
//! failure is detected, handed by value to a reporter or logger, and dropped
//! once logged. Consumers branch on [`AppError::code`] rather than on the
//! concrete Rust type that produced it.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name used when an error is constructed with an empty name.
pub const DEFAULT_ERROR_NAME: &str = "AppError";
/// Message used when an error is constructed with an empty message.
pub const DEFAULT_ERROR_MESSAGE: &str = "Unknown error";
/// Code used when an error is constructed with an empty code.
pub const DEFAULT_ERROR_CODE: &str = "UNKNOWN";

/// Error categories raised by the Curricula crates themselves.
///
/// Each kind carries a canonical `name`/`code` pair and an operational flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Input validation failed.
    Validation,
    /// An API was used incorrectly by the integrating code.
    Usage,
    /// A configuration error occurred.
    Configuration,
    /// Delivering an error report to the remote endpoint failed.
    Dispatch,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An I/O error occurred.
    Io,
    /// An internal error occurred.
    Internal,
}

impl ErrorKind {
    /// Category label used as [`AppError::name`].
    pub fn error_name(self) -> &'static str {
        match self {
            Self::Validation => "ValidationError",
            Self::Usage => "UsageError",
            Self::Configuration => "ConfigurationError",
            Self::Dispatch => "DispatchError",
            Self::Serialization => "SerializationError",
            Self::Io => "IoError",
            Self::Internal => "InternalError",
        }
    }

    /// Whether errors of this kind are expected business conditions.
    pub fn is_operational(self) -> bool {
        matches!(self, Self::Validation | Self::Dispatch)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation => write!(f, "VALIDATION"),
            Self::Usage => write!(f, "USAGE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Dispatch => write!(f, "DISPATCH"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Io => write!(f, "IO"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// Severity attached to an error's details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorLevel {
    Critical,
    Error,
    Warning,
    Info,
    Debug,
}

/// Optional open-ended details attached to an [`AppError`].
///
/// The well-known keys (`component`, `action`, `level`) are typed; anything
/// else lands in `extra`, which never holds a well-known key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Component where the error was detected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    /// Action being performed when the error occurred.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// Severity level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<ErrorLevel>,
    #[serde(flatten)]
    extra: serde_json::Map<String, serde_json::Value>,
}

impl ErrorDetails {
    /// Details naming the component and action.
    pub fn new(component: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            component: Some(component.into()),
            action: Some(action.into()),
            ..Self::default()
        }
    }

    /// Sets the severity level.
    pub fn with_level(mut self, level: ErrorLevel) -> Self {
        self.level = Some(level);
        self
    }

    /// Adds a key.
    ///
    /// Well-known keys are written to their typed field: `component` and
    /// `action` take string values, `level` one of the [`ErrorLevel`] names.
    /// A value that does not fit the typed field is a validation error.
    pub fn with_extra(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Result<Self, AppError> {
        let key = key.into();
        let value = value.into();
        match key.as_str() {
            "component" => self.component = Some(typed_value(&key, value)?),
            "action" => self.action = Some(typed_value(&key, value)?),
            "level" => self.level = Some(typed_value(&key, value)?),
            _ => {
                self.extra.insert(key, value);
            }
        }
        Ok(self)
    }

    /// Keys other than the well-known ones.
    pub fn extra(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.extra
    }
}

fn typed_value<T: serde::de::DeserializeOwned>(
    key: &str,
    value: serde_json::Value,
) -> Result<T, AppError> {
    serde_json::from_value(value)
        .map_err(|e| AppError::validation(format!("Invalid value for details key '{key}': {e}")))
}

/// One structured application error.
///
/// `name` and `message` are never empty and `code` is always present: the
/// constructor (and deserialization) substitute defaults for empty input.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "AppErrorRepr")]
#[error("{name}: {message}")]
pub struct AppError {
    name: String,
    message: String,
    is_operational: bool,
    code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<ErrorDetails>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(
        name: impl Into<String>,
        message: impl Into<String>,
        is_operational: bool,
        code: impl Into<String>,
        details: Option<ErrorDetails>,
    ) -> Self {
        Self {
            name: non_empty(name.into(), DEFAULT_ERROR_NAME),
            message: non_empty(message.into(), DEFAULT_ERROR_MESSAGE),
            is_operational,
            code: non_empty(code.into(), DEFAULT_ERROR_CODE),
            details,
        }
    }

    /// Create an error of one of the workspace's own kinds.
    pub fn from_kind(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::new(
            kind.error_name(),
            message,
            kind.is_operational(),
            kind.to_string(),
            None,
        )
    }

    /// Returns a copy of this error carrying the given details.
    pub fn with_details(mut self, details: ErrorDetails) -> Self {
        self.details = Some(details);
        self
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::from_kind(ErrorKind::Validation, message)
    }

    /// Create a usage error.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::from_kind(ErrorKind::Usage, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::from_kind(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::from_kind(ErrorKind::Internal, message)
    }

    /// Category label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable description.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether this is an expected, recoverable condition.
    pub fn is_operational(&self) -> bool {
        self.is_operational
    }

    /// Stable machine-readable identifier.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Optional details.
    pub fn details(&self) -> Option<&ErrorDetails> {
        self.details.as_ref()
    }

    /// Whether this error has the given kind's code.
    pub fn is_kind(&self, kind: ErrorKind) -> bool {
        self.code == kind.to_string()
    }
}

fn non_empty(value: String, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppErrorRepr {
    #[serde(default)]
    name: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    is_operational: bool,
    #[serde(default)]
    code: String,
    #[serde(default)]
    details: Option<ErrorDetails>,
}

impl From<AppErrorRepr> for AppError {
    fn from(repr: AppErrorRepr) -> Self {
        Self::new(
            repr.name,
            repr.message,
            repr.is_operational,
            repr.code,
            repr.details,
        )
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::from_kind(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::from_kind(ErrorKind::Io, format!("I/O error: {err}"))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::configuration(format!("Configuration error: {err}"))
    }
}

/// Renders an error and its `source()` chain as trace text.
///
/// The first line is the error itself; each cause follows on its own
/// indented `caused by:` line.
pub fn render_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        text.push_str("\n    caused by: ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simulated() -> AppError {
        AppError::new(
            "SimulatedAppError",
            "An error occurred during test execution.",
            true,
            "APP-TEST-001",
            Some(ErrorDetails::new("TestComponent", "buttonClick").with_level(ErrorLevel::Critical)),
        )
    }

    #[test]
    fn test_accessors() {
        let err = simulated();
        assert_eq!(err.name(), "SimulatedAppError");
        assert_eq!(err.message(), "An error occurred during test execution.");
        assert!(err.is_operational());
        assert_eq!(err.code(), "APP-TEST-001");
        let details = err.details().expect("details");
        assert_eq!(details.component.as_deref(), Some("TestComponent"));
        assert_eq!(details.level, Some(ErrorLevel::Critical));
    }

    #[test]
    fn test_empty_fields_are_normalized() {
        let err = AppError::new("", "  ", false, "", None);
        assert_eq!(err.name(), DEFAULT_ERROR_NAME);
        assert_eq!(err.message(), DEFAULT_ERROR_MESSAGE);
        assert_eq!(err.code(), DEFAULT_ERROR_CODE);
    }

    #[test]
    fn test_json_shape_is_camel_case() {
        let json = serde_json::to_value(simulated()).expect("serialize");
        assert_eq!(json["isOperational"], true);
        assert_eq!(json["details"]["level"], "critical");
        assert_eq!(json["details"]["action"], "buttonClick");
    }

    #[test]
    fn test_deserialize_normalizes_missing_fields() {
        let err: AppError = serde_json::from_str(r#"{"message":"boom"}"#).expect("deserialize");
        assert_eq!(err.name(), DEFAULT_ERROR_NAME);
        assert_eq!(err.code(), DEFAULT_ERROR_CODE);
        assert!(err.details().is_none());
    }

    #[test]
    fn test_extra_details_survive_serialization() {
        let details = ErrorDetails::default()
            .with_extra("courseId", 42)
            .expect("extra key");
        let err = simulated().with_details(details);
        let json = serde_json::to_string(&err).expect("serialize");
        let parsed: AppError = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, err);
        assert_eq!(
            parsed.details().and_then(|d| d.extra().get("courseId")),
            Some(&serde_json::json!(42))
        );
    }

    #[test]
    fn test_well_known_extra_keys_fill_typed_fields() {
        let details = ErrorDetails::new("CourseEditor", "save")
            .with_extra("component", "TopicEditor")
            .and_then(|d| d.with_extra("level", "warning"))
            .expect("typed keys");

        assert_eq!(details.component.as_deref(), Some("TopicEditor"));
        assert_eq!(details.action.as_deref(), Some("save"));
        assert_eq!(details.level, Some(ErrorLevel::Warning));
        assert!(details.extra().is_empty());
    }

    #[test]
    fn test_ill_typed_well_known_keys_are_refused() {
        let bad_level = ErrorDetails::default()
            .with_extra("level", "fatal")
            .expect_err("unknown level");
        assert!(bad_level.is_kind(ErrorKind::Validation));
        assert!(bad_level.message().contains("'level'"));

        let bad_action = ErrorDetails::default()
            .with_extra("action", 3)
            .expect_err("non-string action");
        assert!(bad_action.is_kind(ErrorKind::Validation));
    }

    #[test]
    fn test_kind_constructors() {
        let err = AppError::configuration("bad port");
        assert_eq!(err.name(), "ConfigurationError");
        assert!(err.is_kind(ErrorKind::Configuration));
        assert!(!err.is_operational());
        assert_eq!(err.to_string(), "ConfigurationError: bad port");
    }

    #[test]
    fn test_render_chain_lists_causes() {
        let io = std::io::Error::other("disk unplugged");
        let err = AppError::from(io);
        assert_eq!(render_chain(&err), "IoError: I/O error: disk unplugged");

        #[derive(Debug, Error)]
        #[error("saving course failed")]
        struct Outer(#[source] std::io::Error);

        let outer = Outer(std::io::Error::other("disk unplugged"));
        assert_eq!(
            render_chain(&outer),
            "saving course failed\n    caused by: disk unplugged"
        );
    }
}
