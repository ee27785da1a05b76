//! Income registration, collection, and distribution routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use tahsis_core::distribution::{DistributionError, Representative};
use tahsis_core::income::{IncomeError, RegisterIncomeInput};
use tahsis_shared::types::IncomeId;

use crate::AppState;
use crate::routes::core_error_mapper;

core_error_mapper!(income_error, IncomeError);
core_error_mapper!(distribution_error, DistributionError);

/// Creates the income routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/incomes", post(register_income))
        .route("/incomes/{income_id}", get(get_income))
        .route("/incomes/{income_id}/collections", post(record_collection))
        .route("/incomes/{income_id}/distributions", post(distribute_income))
        .route("/incomes/{income_id}/distributions", get(get_distributions))
}

/// POST `/incomes` - Register an income and derive its amounts.
async fn register_income(
    State(state): State<AppState>,
    Json(payload): Json<RegisterIncomeInput>,
) -> impl IntoResponse {
    let project = match state.projects.get(payload.project_id) {
        Ok(project) => project,
        Err(e) => return super::projects::project_error(e),
    };

    match state.incomes.register(&project, payload) {
        Ok(income) => (StatusCode::CREATED, Json(income)).into_response(),
        Err(e) => income_error(e),
    }
}

/// GET `/incomes/{income_id}` - Fetch an income entry.
async fn get_income(
    State(state): State<AppState>,
    Path(income_id): Path<IncomeId>,
) -> impl IntoResponse {
    match state.incomes.get(income_id) {
        Ok(income) => (StatusCode::OK, Json(income)).into_response(),
        Err(e) => income_error(e),
    }
}

/// Request body for recording a collection.
#[derive(Debug, Deserialize)]
pub struct RecordCollectionRequest {
    /// Collected amount.
    pub amount: Decimal,
}

/// POST `/incomes/{income_id}/collections` - Record a collection.
async fn record_collection(
    State(state): State<AppState>,
    Path(income_id): Path<IncomeId>,
    Json(payload): Json<RecordCollectionRequest>,
) -> impl IntoResponse {
    match state.incomes.record_collection(income_id, payload.amount) {
        Ok(income) => (StatusCode::OK, Json(income)).into_response(),
        Err(e) => income_error(e),
    }
}

/// Request body for distributing an income.
#[derive(Debug, Deserialize)]
pub struct DistributeIncomeRequest {
    /// The representatives sharing the distributable amount.
    pub representatives: Vec<Representative>,
}

/// POST `/incomes/{income_id}/distributions` - Allocate the
/// distributable amount and credit recipient balances.
async fn distribute_income(
    State(state): State<AppState>,
    Path(income_id): Path<IncomeId>,
    Json(payload): Json<DistributeIncomeRequest>,
) -> impl IntoResponse {
    let income = match state.incomes.get(income_id) {
        Ok(income) => income,
        Err(e) => return income_error(e),
    };

    match state
        .distributions
        .allocate_and_post(&income, &payload.representatives)
    {
        Ok(distributions) => (
            StatusCode::CREATED,
            Json(json!({ "distributions": distributions })),
        )
            .into_response(),
        Err(e) => distribution_error(e),
    }
}

/// GET `/incomes/{income_id}/distributions` - Recorded distributions.
async fn get_distributions(
    State(state): State<AppState>,
    Path(income_id): Path<IncomeId>,
) -> impl IntoResponse {
    match state.distributions.for_income(income_id) {
        Some(distributions) => {
            (StatusCode::OK, Json(json!({ "distributions": distributions }))).into_response()
        }
        None => super::error_response(
            404,
            "DISTRIBUTIONS_NOT_FOUND",
            format!("Income not distributed: {income_id}"),
        ),
    }
}
