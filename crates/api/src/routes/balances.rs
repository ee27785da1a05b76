//! Balance and transaction history routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use uuid::Uuid;

use tahsis_core::ledger::{BalanceKey, LedgerError};
use tahsis_shared::AppError;
use tahsis_shared::types::{BalanceId, PageRequest, Person, PersonnelId, ProjectId, UserId};

use crate::AppState;
use crate::routes::{app_error, core_error_mapper};

core_error_mapper!(ledger_error, LedgerError);

/// Creates the balance routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/balances", get(get_balance))
        .route("/balances/{balance_id}/transactions", get(get_transactions))
}

/// Query parameters identifying a person, optionally scoped to a
/// project.
#[derive(Debug, Deserialize)]
pub struct BalanceQuery {
    /// `"user"` or `"personnel"`.
    pub kind: String,
    /// The person's ID.
    pub id: Uuid,
    /// Project scope; omitted for the cross-project aggregate.
    pub project_id: Option<ProjectId>,
}

impl BalanceQuery {
    fn person(&self) -> Option<Person> {
        match self.kind.as_str() {
            "user" => Some(Person::User(UserId::from_uuid(self.id))),
            "personnel" => Some(Person::Personnel(PersonnelId::from_uuid(self.id))),
            _ => None,
        }
    }
}

/// GET `/balances` - One balance, or the person's aggregate across
/// projects when `project_id` is omitted.
async fn get_balance(
    State(state): State<AppState>,
    Query(query): Query<BalanceQuery>,
) -> impl IntoResponse {
    let Some(person) = query.person() else {
        return app_error(&AppError::Validation(format!(
            "Person kind must be 'user' or 'personnel', got '{}'",
            query.kind
        )));
    };

    match query.project_id {
        Some(project_id) => {
            let key = BalanceKey::project_scoped(person, project_id);
            match state.ledger.balance(key) {
                Some(balance) => (StatusCode::OK, Json(balance)).into_response(),
                None => app_error(&AppError::NotFound(format!(
                    "No balance for {person} in project {project_id}"
                ))),
            }
        }
        None => {
            let totals = state.ledger.aggregate(person);
            (StatusCode::OK, Json(totals)).into_response()
        }
    }
}

/// GET `/balances/{balance_id}/transactions` - Paged history in commit
/// order.
async fn get_transactions(
    State(state): State<AppState>,
    Path(balance_id): Path<BalanceId>,
    Query(page): Query<PageRequest>,
) -> impl IntoResponse {
    match state.ledger.history(balance_id, page) {
        Ok(history) => (StatusCode::OK, Json(history)).into_response(),
        Err(e) => ledger_error(e),
    }
}
