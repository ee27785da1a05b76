//! Project routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

use tahsis_core::project::{Project, ProjectError, ProjectFinancials, ProjectStatus};
use tahsis_shared::types::ProjectId;

use crate::AppState;
use crate::routes::core_error_mapper;

core_error_mapper!(project_error, ProjectError);

/// Creates the project routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/projects", post(create_project))
        .route("/projects/{project_id}", get(get_project))
        .route("/projects/{project_id}/financials", get(get_financials))
}

/// Request body for creating a project.
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    /// Unique project code.
    pub code: String,
    /// Contracted budget.
    pub budget: Decimal,
    /// TTO commission rate in percent.
    pub company_rate: Decimal,
    /// VAT rate in percent.
    pub vat_rate: Decimal,
    /// Whether VAT withholding applies.
    #[serde(default)]
    pub has_withholding_tax: bool,
    /// Withholding rate in percent.
    #[serde(default)]
    pub withholding_tax_rate: Decimal,
}

/// POST `/projects` - Register a new project.
async fn create_project(
    State(state): State<AppState>,
    Json(payload): Json<CreateProjectRequest>,
) -> impl IntoResponse {
    let project = Project {
        id: ProjectId::new(),
        code: payload.code,
        budget: payload.budget,
        company_rate: payload.company_rate,
        vat_rate: payload.vat_rate,
        has_withholding_tax: payload.has_withholding_tax,
        withholding_tax_rate: payload.withholding_tax_rate,
        status: ProjectStatus::Active,
    };

    match state.projects.register(project) {
        Ok(project) => {
            info!(project_id = %project.id, code = %project.code, "Project registered");
            (StatusCode::CREATED, Json(project)).into_response()
        }
        Err(e) => project_error(e),
    }
}

/// GET `/projects/{project_id}` - Fetch a project.
async fn get_project(
    State(state): State<AppState>,
    Path(project_id): Path<ProjectId>,
) -> impl IntoResponse {
    match state.projects.get(project_id) {
        Ok(project) => (StatusCode::OK, Json(project)).into_response(),
        Err(e) => project_error(e),
    }
}

/// GET `/projects/{project_id}/financials` - Derived financial summary.
async fn get_financials(
    State(state): State<AppState>,
    Path(project_id): Path<ProjectId>,
) -> impl IntoResponse {
    match state.projects.get(project_id) {
        Ok(project) => {
            let incomes = state.incomes.list_by_project(project_id);
            let financials = ProjectFinancials::compute(&project, &incomes);
            (StatusCode::OK, Json(financials)).into_response()
        }
        Err(e) => project_error(e),
    }
}
