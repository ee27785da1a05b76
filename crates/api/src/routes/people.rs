//! Person directory routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use serde::Deserialize;
use tracing::info;

use tahsis_shared::AppError;
use tahsis_shared::types::{Person, PersonnelId, UserId};

use crate::AppState;
use crate::routes::app_error;

/// Creates the person directory routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/people", post(register_person))
}

/// Request body for registering a person.
#[derive(Debug, Deserialize)]
pub struct RegisterPersonRequest {
    /// `"user"` for administrative staff, `"personnel"` for academics.
    pub kind: String,
    /// Display name.
    pub name: String,
    /// Bank account for payouts.
    pub iban: Option<String>,
}

/// POST `/people` - Register a person and mint their typed ID.
async fn register_person(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPersonRequest>,
) -> impl IntoResponse {
    let person = match payload.kind.as_str() {
        "user" => Person::User(UserId::new()),
        "personnel" => Person::Personnel(PersonnelId::new()),
        other => {
            return app_error(&AppError::Validation(format!(
                "Person kind must be 'user' or 'personnel', got '{other}'"
            )));
        }
    };

    let record = state.directory.upsert(person, payload.name, payload.iban);
    info!(person = %person, name = %record.name, "Person registered");
    (StatusCode::CREATED, Json(record)).into_response()
}
