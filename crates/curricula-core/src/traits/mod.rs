//! Core traits defined in `curricula-core` and implemented by other crates.

pub mod reporter;
pub mod sink;

pub use reporter::ErrorReporter;
pub use sink::{Channel, LogRecord, LogSink};
