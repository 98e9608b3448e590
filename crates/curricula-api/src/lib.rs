//! # curricula-api
//!
//! HTTP API layer for Curricula built on Axum.
//!
//! Provides the terminal error-handling middleware that classifies every
//! failure raised by a handler, the centralized logging endpoint, request
//! logging, and the router.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::{ApiError, Raised, error_handler};
pub use state::AppState;
