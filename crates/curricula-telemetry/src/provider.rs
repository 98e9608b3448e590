//! Scoped error reporting.
//!
//! An [`ErrorProvider`] makes one reporter available to all code running
//! inside its scope. [`use_error`] looks the active reporter up and fails
//! fast outside a scope. Components that prefer explicit wiring can take an
//! `Arc<dyn ErrorReporter>` (or an [`ErrorHandle`]) directly instead.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use curricula_core::error::AppError;
use curricula_core::result::AppResult;
use curricula_core::traits::reporter::ErrorReporter;
use curricula_core::traits::sink::{Channel, LogRecord, LogSink};

/// Failure message of [`use_error`] outside an active provider scope.
pub const OUTSIDE_PROVIDER_MESSAGE: &str = "useError must be used within an ErrorProvider.";

tokio::task_local! {
    static ACTIVE_PROVIDER: ErrorHandle;
}

/// Reporter forwarding each error, unchanged, to a sink's error channel.
pub struct SinkReporter {
    sink: Arc<dyn LogSink>,
}

impl SinkReporter {
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self { sink }
    }
}

impl ErrorReporter for SinkReporter {
    fn report_error(&self, error: AppError) {
        let record = LogRecord {
            payload: serde_json::to_value(&error).ok(),
            ..LogRecord::new(error.to_string()).with_subject(error.code())
        };
        self.sink.emit(Channel::Error, record);
    }
}

/// Handle to the reporter of a provider.
///
/// All handles obtained from one provider share a single reporter.
#[derive(Clone)]
pub struct ErrorHandle {
    reporter: Arc<dyn ErrorReporter>,
}

impl ErrorHandle {
    /// Report one error.
    pub fn report_error(&self, error: AppError) {
        self.reporter.report_error(error);
    }

    /// Whether both handles point at the same reporter.
    pub fn same_as(&self, other: &ErrorHandle) -> bool {
        Arc::ptr_eq(&self.reporter, &other.reporter)
    }

    /// The shared reporter, for explicit dependency passing.
    pub fn reporter(&self) -> Arc<dyn ErrorReporter> {
        Arc::clone(&self.reporter)
    }
}

impl fmt::Debug for ErrorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorHandle").finish_non_exhaustive()
    }
}

/// Owner of the reporter made available by [`ErrorProvider::scope`].
#[derive(Debug, Clone)]
pub struct ErrorProvider {
    handle: ErrorHandle,
}

impl ErrorProvider {
    /// Provider reporting to the given sink.
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self::with_reporter(Arc::new(SinkReporter::new(sink)))
    }

    /// Provider around an existing reporter.
    pub fn with_reporter(reporter: Arc<dyn ErrorReporter>) -> Self {
        Self {
            handle: ErrorHandle { reporter },
        }
    }

    /// Handle to this provider's reporter.
    pub fn handle(&self) -> ErrorHandle {
        self.handle.clone()
    }

    /// Runs `fut` with this provider active.
    pub async fn scope<F: Future>(&self, fut: F) -> F::Output {
        ACTIVE_PROVIDER.scope(self.handle(), fut).await
    }

    /// Runs `f` with this provider active.
    pub fn sync_scope<R>(&self, f: impl FnOnce() -> R) -> R {
        ACTIVE_PROVIDER.sync_scope(self.handle(), f)
    }
}

/// Looks up the active provider's handle.
pub fn try_use_error() -> AppResult<ErrorHandle> {
    ACTIVE_PROVIDER
        .try_with(ErrorHandle::clone)
        .map_err(|_| AppError::usage(OUTSIDE_PROVIDER_MESSAGE))
}

/// Looks up the active provider's handle.
///
/// # Panics
///
/// Panics with [`OUTSIDE_PROVIDER_MESSAGE`] when called outside
/// [`ErrorProvider::scope`] or [`ErrorProvider::sync_scope`]. This is an
/// integration mistake, not a runtime condition.
pub fn use_error() -> ErrorHandle {
    match try_use_error() {
        Ok(handle) => handle,
        Err(err) => panic!("{}", err.message()),
    }
}
