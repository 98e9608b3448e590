//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use curricula_core::config::AppConfig;
use curricula_telemetry::logger::Logger;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Diagnostic logger used by the error middleware and handlers
    pub logger: Logger,
    /// Process start, for uptime reporting
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: AppConfig, logger: Logger) -> Self {
        Self {
            config: Arc::new(config),
            logger,
            started_at: Instant::now(),
        }
    }
}
