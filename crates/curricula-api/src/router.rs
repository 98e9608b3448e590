//! Route definitions for the Curricula HTTP API.
//!
//! All routes are mounted under `/api`. Every route runs behind the error
//! middleware, so handler failures and panics are answered by
//! [`crate::error::error_handler`].

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware::error_handler::with_error_handling;
use crate::state::AppState;

/// Build the API router with error handling, threading `AppState` through
/// every route.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(system_routes())
        .merge(health_routes());

    with_error_handling(Router::new().nest("/api", api_routes), state.clone()).with_state(state)
}

/// Centralized client error logging
fn system_routes() -> Router<AppState> {
    Router::new().route("/system/log-error", post(handlers::system::log_error))
}

/// Liveness
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
