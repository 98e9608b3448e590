//! Terminal error-handling middleware.
//!
//! Handler failures reach [`catch_errors`] as [`RaisedResponse`] markers,
//! panics via [`panic_response`] installed in a catch-panic layer below it.
//! Each failure is classified and logged exactly once by
//! [`error_handler`].
//!
//! The once-only guarantee covers the diagnostic sink. The process panic
//! hook runs before [`CatchPanicLayer`] sees the payload, so a caught panic
//! still prints the hook's `panicked at` line to stderr unless the binary
//! installs its own hook.

use std::any::Any;

use axum::Router;
use axum::extract::{Request, State};
use axum::middleware::{self as axum_middleware, Next};
use axum::response::{IntoResponse, Response};
use tower_http::catch_panic::CatchPanicLayer;

use crate::error::{Raised, RaisedResponse, error_handler};
use crate::extractors::request_info::RequestInfo;
use crate::state::AppState;

/// Replaces a failed handler response with the classified one.
pub async fn catch_errors(
    State(state): State<AppState>,
    info: RequestInfo,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    match response.extensions_mut().remove::<RaisedResponse>() {
        Some(RaisedResponse(raised)) => error_handler(&raised, &info, state.logger.sink().as_ref()),
        None => response,
    }
}

/// Turns a caught panic payload into a raised non-error value.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    Raised::from_panic(payload).into_response()
}

/// Installs panic catching and the error middleware around `router`.
pub fn with_error_handling<S>(router: Router<S>, state: AppState) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(axum_middleware::from_fn_with_state(state, catch_errors))
}
