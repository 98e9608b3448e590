//! Sink that forwards records to `tracing`.

use curricula_core::traits::sink::{Channel, LogRecord, LogSink};

/// Target attached to every event emitted by [`TracingSink`].
pub const DIAGNOSTICS_TARGET: &str = "curricula::diagnostics";

/// Routes each channel to the matching `tracing` macro.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn emit(&self, channel: Channel, record: LogRecord) {
        let payload = record.payload.as_ref().map(ToString::to_string);
        let subject = record.subject.as_deref();
        let context = record.context.as_deref();
        let stack = record.stack.as_deref();
        let payload = payload.as_deref();

        match channel {
            Channel::Error => tracing::error!(
                target: DIAGNOSTICS_TARGET,
                subject,
                context,
                stack,
                payload,
                "{}",
                record.message
            ),
            Channel::Warn => tracing::warn!(
                target: DIAGNOSTICS_TARGET,
                subject,
                context,
                stack,
                payload,
                "{}",
                record.message
            ),
            Channel::Info => tracing::info!(
                target: DIAGNOSTICS_TARGET,
                subject,
                context,
                stack,
                payload,
                "{}",
                record.message
            ),
        }
    }
}
