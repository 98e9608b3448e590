//! Payload exchanged with the centralized logging endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Severity of a system error report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemLevel {
    Info,
    Warn,
    Error,
    Debug,
}

/// Details of one system error, as displayed to the user and POSTed to
/// `/api/system/log-error`.
///
/// Absent optional fields are omitted from the JSON encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SystemErrorDetails {
    /// Message shown to the user.
    #[validate(length(min = 1, message = "message must not be empty"))]
    pub message: String,
    /// Trace text, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    /// Epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<SystemLevel>,
    /// Component that raised the error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    /// Free-form context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Map<String, serde_json::Value>>,
}

impl SystemErrorDetails {
    /// Details with only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack: None,
            timestamp: None,
            level: None,
            component: None,
            context: None,
        }
    }

    /// Stamps the details with the current time.
    pub fn stamped_now(mut self) -> Self {
        self.timestamp = Some(chrono::Utc::now().timestamp_millis());
        self
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    pub fn with_level(mut self, level: SystemLevel) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    pub fn with_context(mut self, context: serde_json::Map<String, serde_json::Value>) -> Self {
        self.context = Some(context);
        self
    }
}
