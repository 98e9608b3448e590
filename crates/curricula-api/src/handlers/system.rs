//! Centralized logging endpoint for client-side system errors.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use uuid::Uuid;
use validator::Validate;

use curricula_core::traits::sink::{Channel, LogRecord};
use curricula_core::types::SystemErrorDetails;

use crate::dto::response::{ApiResponse, LogErrorAccepted};
use crate::error::{ApiError, Raised};
use crate::state::AppState;

/// POST /api/system/log-error
pub async fn log_error(
    State(state): State<AppState>,
    body: Result<Json<SystemErrorDetails>, JsonRejection>,
) -> Result<Json<ApiResponse<LogErrorAccepted>>, Raised> {
    let Json(details) =
        body.map_err(|rejection| ApiError::new(rejection.status(), rejection.body_text()))?;
    details
        .validate()
        .map_err(|e| ApiError::bad_request(format!("Invalid error report: {e}")))?;

    let incident_id = Uuid::new_v4();
    let mut record = LogRecord::new("Client reported system error")
        .with_subject(format!("incident {incident_id}"))
        .with_payload(serde_json::to_value(&details)?);
    if let Some(stack) = &details.stack {
        record = record.with_stack(stack.clone());
    }
    state.logger.emit(Channel::Error, record);

    Ok(Json(ApiResponse::ok(LogErrorAccepted { incident_id })))
}
