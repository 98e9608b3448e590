//! # curricula-telemetry
//!
//! Error reporting and logging for the Curricula admin interface:
//!
//! - [`sink`]: diagnostic sinks (tracing-backed and in-memory),
//! - [`logger`]: the severity-channel [`Logger`] and [`handle_error`],
//! - [`provider`]: the scoped [`ErrorProvider`] and [`use_error`] accessor,
//! - [`boundary`]: the [`ErrorBoundary`] render supervisor,
//! - [`dispatcher`]: the [`SystemErrorLogger`] remote dispatcher.

pub mod boundary;
pub mod dispatcher;
pub mod logger;
pub mod provider;
pub mod sink;

pub use boundary::{ErrorBoundary, FallbackView, Rendered};
pub use dispatcher::{DispatchOutcome, ErrorNotice, SystemErrorLogger};
pub use logger::{GENERIC_USER_MESSAGE, Logger, handle_error};
pub use provider::{ErrorHandle, ErrorProvider, try_use_error, use_error};
pub use sink::{MemorySink, TracingSink};
