//! Axum middleware stack.

pub mod error_handler;
pub mod logging;
