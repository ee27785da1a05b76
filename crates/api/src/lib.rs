//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes under `/api/v1`
//! - The shared application state wiring the core services
//! - A person directory resolving payee IBANs

pub mod directory;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use tahsis_core::distribution::DistributionService;
use tahsis_core::income::IncomeStore;
use tahsis_core::ledger::BalanceLedger;
use tahsis_core::payment::PaymentService;
use tahsis_core::project::ProjectRegistry;
use tahsis_shared::AppConfig;

use directory::PersonDirectory;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Project registry.
    pub projects: Arc<ProjectRegistry>,
    /// Income entries and collections.
    pub incomes: Arc<IncomeStore>,
    /// The balance ledger.
    pub ledger: Arc<BalanceLedger>,
    /// Income distribution service.
    pub distributions: Arc<DistributionService>,
    /// Payment instruction service.
    pub payments: Arc<PaymentService>,
    /// Person directory (names and IBANs).
    pub directory: Arc<PersonDirectory>,
}

impl AppState {
    /// Builds the state from configuration, wiring every service to
    /// the single shared ledger.
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        let ledger = Arc::new(BalanceLedger::with_max_attempts(
            config.ledger.max_post_attempts,
        ));
        Self {
            projects: Arc::new(ProjectRegistry::new()),
            incomes: Arc::new(IncomeStore::new()),
            distributions: Arc::new(DistributionService::new(Arc::clone(&ledger))),
            payments: Arc::new(PaymentService::new(
                Arc::clone(&ledger),
                config.payment.instruction_prefix.clone(),
            )),
            ledger,
            directory: Arc::new(PersonDirectory::new()),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
