//! Payment instruction routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;

use tahsis_core::payment::{CreateInstructionInput, InstructionStatus, PaymentError};
use tahsis_shared::types::InstructionId;

use crate::AppState;
use crate::routes::core_error_mapper;

core_error_mapper!(payment_error, PaymentError);

/// Creates the payment routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/payments", post(create_instruction))
        .route("/payments/{instruction_id}", get(get_instruction))
        .route("/payments/{instruction_id}/status", post(change_status))
}

/// POST `/payments` - Create a payment instruction.
async fn create_instruction(
    State(state): State<AppState>,
    Json(payload): Json<CreateInstructionInput>,
) -> impl IntoResponse {
    let directory = state.directory.clone();
    match state
        .payments
        .create_instruction(payload, |person| directory.iban_of(person))
    {
        Ok(instruction) => (StatusCode::CREATED, Json(instruction)).into_response(),
        Err(e) => payment_error(e),
    }
}

/// GET `/payments/{instruction_id}` - Fetch an instruction.
async fn get_instruction(
    State(state): State<AppState>,
    Path(instruction_id): Path<InstructionId>,
) -> impl IntoResponse {
    match state.payments.get(instruction_id) {
        Ok(instruction) => (StatusCode::OK, Json(instruction)).into_response(),
        Err(e) => payment_error(e),
    }
}

/// Request body for a status change.
#[derive(Debug, Deserialize)]
pub struct ChangeStatusRequest {
    /// The target status.
    pub status: InstructionStatus,
    /// Reason, recorded on rejection.
    pub reason: Option<String>,
}

/// POST `/payments/{instruction_id}/status` - Drive the lifecycle.
async fn change_status(
    State(state): State<AppState>,
    Path(instruction_id): Path<InstructionId>,
    Json(payload): Json<ChangeStatusRequest>,
) -> impl IntoResponse {
    match state
        .payments
        .transition(instruction_id, payload.status, payload.reason)
    {
        Ok(instruction) => (StatusCode::OK, Json(instruction)).into_response(),
        Err(e) => payment_error(e),
    }
}
