//! API route definitions.

pub mod balances;
pub mod health;
pub mod incomes;
pub mod payments;
pub mod people;
pub mod projects;

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tahsis_shared::AppError;
use tracing::error;

use crate::AppState;

/// Combines all API routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(projects::routes())
        .merge(people::routes())
        .merge(incomes::routes())
        .merge(payments::routes())
        .merge(balances::routes())
}

/// Builds the standard error body from a status, code, and message.
pub(crate) fn error_response(status: u16, code: &str, message: String) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!(error_code = code, message = %message, "Request failed");
    }
    (status, Json(json!({ "error": code, "message": message }))).into_response()
}

/// Maps a cross-cutting [`AppError`] into a response.
pub(crate) fn app_error(err: &AppError) -> Response {
    error_response(err.status_code(), err.error_code(), err.to_string())
}

/// Maps any core error exposing `error_code`/`http_status_code` into a
/// response.
macro_rules! core_error_mapper {
    ($name:ident, $err:ty) => {
        pub(crate) fn $name(err: $err) -> axum::response::Response {
            crate::routes::error_response(
                err.http_status_code(),
                err.error_code(),
                err.to_string(),
            )
        }
    };
}

pub(crate) use core_error_mapper;
