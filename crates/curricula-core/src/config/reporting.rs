//! Remote error reporting configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Path of the centralized logging endpoint.
pub const LOG_ERROR_PATH: &str = "/api/system/log-error";

/// Settings for the remote error dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReportingConfig {
    /// Base URL of the server hosting the logging endpoint.
    #[serde(default = "default_endpoint_base_url")]
    pub endpoint_base_url: String,
    /// Upper bound on one delivery attempt, in seconds. Must be positive.
    #[serde(default = "default_timeout")]
    #[validate(range(min = 1, message = "timeout_seconds must be at least 1"))]
    pub timeout_seconds: u64,
}

impl ReportingConfig {
    /// Full URL of the logging endpoint.
    pub fn endpoint_url(&self) -> String {
        format!(
            "{}{}",
            self.endpoint_base_url.trim_end_matches('/'),
            LOG_ERROR_PATH
        )
    }

    /// Delivery timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            endpoint_base_url: default_endpoint_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_endpoint_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_timeout() -> u64 {
    10
}
