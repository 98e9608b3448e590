//! Remote error dispatcher.
//!
//! [`SystemErrorLogger::display`] returns the notice to show right away and
//! spawns one best-effort POST of the error details to the centralized
//! logging endpoint. The delivery outcome is only logged: it is never
//! retried and never reported back to the caller. Each attempt is bounded
//! by the configured timeout.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use curricula_core::config::reporting::ReportingConfig;
use curricula_core::error::{AppError, render_chain};
use curricula_core::result::AppResult;
use curricula_core::traits::sink::{Channel, LogRecord};
use curricula_core::types::SystemErrorDetails;

use crate::logger::Logger;

/// How one delivery attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The endpoint answered with a success status.
    Delivered,
    /// The endpoint answered with a non-success status.
    Rejected { status: u16 },
    /// The request could not be completed (connection, timeout, ...).
    Failed { reason: String },
}

/// Error notice shown to the user, with its pending delivery.
#[derive(Debug)]
pub struct ErrorNotice {
    message: String,
    delivery: JoinHandle<DispatchOutcome>,
}

impl ErrorNotice {
    /// Message to display.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Waits for the delivery attempt. Callers are free to drop the notice
    /// instead; the attempt still runs to completion.
    pub async fn delivery(self) -> DispatchOutcome {
        match self.delivery.await {
            Ok(outcome) => outcome,
            Err(e) => DispatchOutcome::Failed {
                reason: format!("delivery task aborted: {e}"),
            },
        }
    }
}

/// Displays system errors and forwards them to `/api/system/log-error`.
#[derive(Debug, Clone)]
pub struct SystemErrorLogger {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
    logger: Logger,
    runtime: Handle,
}

impl SystemErrorLogger {
    /// Creates a dispatcher bound to the current tokio runtime.
    pub fn new(config: &ReportingConfig, logger: Logger) -> AppResult<Self> {
        let runtime = Handle::try_current().map_err(|e| {
            AppError::usage(format!("SystemErrorLogger requires a tokio runtime: {e}"))
        })?;

        Ok(Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint_url(),
            timeout: config.timeout(),
            logger,
            runtime,
        })
    }

    /// Endpoint receiving the reports.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Shows `error` and dispatches it; `None` shows nothing and sends nothing.
    pub fn display(&self, error: Option<SystemErrorDetails>) -> Option<ErrorNotice> {
        let details = error?;
        let message = details.message.clone();

        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        let timeout = self.timeout;
        let logger = self.logger.clone();
        let delivery = self
            .runtime
            .spawn(async move { deliver(&client, &endpoint, timeout, &details, &logger).await });

        Some(ErrorNotice { message, delivery })
    }
}

async fn deliver(
    client: &reqwest::Client,
    endpoint: &str,
    timeout: Duration,
    details: &SystemErrorDetails,
    logger: &Logger,
) -> DispatchOutcome {
    let response = client
        .post(endpoint)
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .json(details)
        .timeout(timeout)
        .send()
        .await;

    match response {
        Ok(resp) if resp.status().is_success() => {
            tracing::debug!(endpoint, "System error delivered to centralized log");
            DispatchOutcome::Delivered
        }
        Ok(resp) => {
            let status = resp.status();
            logger.emit(
                Channel::Warn,
                LogRecord::new("SystemErrorLogger: Failed to submit error to centralized log. Status:")
                    .with_subject(format!(
                        "{} {}",
                        status.as_u16(),
                        status.canonical_reason().unwrap_or_default()
                    )),
            );
            DispatchOutcome::Rejected {
                status: status.as_u16(),
            }
        }
        Err(e) => {
            let reason = render_chain(&e);
            logger.emit(
                Channel::Error,
                LogRecord::new(
                    "SystemErrorLogger: Network error when attempting to log system error:",
                )
                .with_subject(reason.clone()),
            );
            DispatchOutcome::Failed { reason }
        }
    }
}
