//! Severity-channel logger.
//!
//! Every call produces exactly one synchronous emission on its own channel.
//! Context is serialized once to compact JSON and attached to the record.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;
use std::sync::Arc;

use curricula_core::error::render_chain;
use curricula_core::traits::sink::{Channel, LogRecord, LogSink};
use curricula_core::types::LogContext;

use crate::sink::TracingSink;

/// Message returned to users by [`handle_error`], whatever the input.
pub const GENERIC_USER_MESSAGE: &str = "An unexpected error occurred. Please try again later.";

/// Logger writing to a [`LogSink`]. Cheap to clone.
#[derive(Clone)]
pub struct Logger {
    sink: Arc<dyn LogSink>,
}

impl Logger {
    /// Creates a logger over the given sink.
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self { sink }
    }

    /// The underlying sink.
    pub fn sink(&self) -> &Arc<dyn LogSink> {
        &self.sink
    }

    /// Emits a preformatted record.
    pub fn emit(&self, channel: Channel, record: LogRecord) {
        self.sink.emit(channel, record);
    }

    /// Logs an error with its trace text and optional context.
    pub fn log_error(&self, error: &(dyn std::error::Error + 'static), context: Option<&LogContext>) {
        let record = LogRecord::new(error.to_string())
            .with_context(context.map(LogContext::to_compact_json))
            .with_stack(trace_text(error));
        self.sink.emit(Channel::Error, record);
    }

    /// Logs an informational message.
    pub fn log_info(&self, message: &str, context: Option<&LogContext>) {
        let record = LogRecord::new(message).with_context(context.map(LogContext::to_compact_json));
        self.sink.emit(Channel::Info, record);
    }

    /// Logs a warning.
    pub fn log_warn(&self, message: &str, context: Option<&LogContext>) {
        let record = LogRecord::new(message).with_context(context.map(LogContext::to_compact_json));
        self.sink.emit(Channel::Warn, record);
    }

    /// Logs `("Error handled:", <input>)` and returns [`GENERIC_USER_MESSAGE`].
    ///
    /// The input is rendered with its `Debug` representation, so error
    /// values, strings and structured values are all accepted.
    pub fn handle_error<E: fmt::Debug + ?Sized>(&self, error: &E) -> &'static str {
        self.sink.emit(
            Channel::Error,
            LogRecord::new("Error handled:").with_subject(format!("{error:?}")),
        );
        GENERIC_USER_MESSAGE
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(Arc::new(TracingSink))
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").finish_non_exhaustive()
    }
}

/// [`Logger::handle_error`] on the default tracing sink.
pub fn handle_error<E: fmt::Debug + ?Sized>(error: &E) -> &'static str {
    Logger::default().handle_error(error)
}

/// Source chain of `error`, followed by a backtrace when the process
/// captures them (`RUST_BACKTRACE`).
pub(crate) fn trace_text(error: &(dyn std::error::Error + 'static)) -> String {
    let mut text = render_chain(error);
    let backtrace = Backtrace::capture();
    if backtrace.status() == BacktraceStatus::Captured {
        text.push_str("\nstack backtrace:\n");
        text.push_str(&backtrace.to_string());
    }
    text
}
