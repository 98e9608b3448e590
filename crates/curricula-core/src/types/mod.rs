//! Core type definitions used across the Curricula workspace.

pub mod log_context;
pub mod system_error;

pub use log_context::LogContext;
pub use system_error::{SystemErrorDetails, SystemLevel};
