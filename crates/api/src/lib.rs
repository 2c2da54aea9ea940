//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST routes for the catalog, budgets, drafts, options and dashboard
//! - The in-process draft registry behind the budget composer endpoints
//! - Error to HTTP response mapping

pub mod drafts;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use gridbudget_core::document::{DocumentRenderer, TextRenderer};
use gridbudget_core::store::{BudgetStore, CatalogStore, HardwareStore, MemoryStore, OptionStore};
use gridbudget_db::{
    BudgetRepository, CatalogRepository, DropdownOptionRepository, HardwareRepository,
};
use gridbudget_shared::CorsConfig;
use sea_orm::DatabaseConnection;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::drafts::DraftRegistry;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Poles, structures, conductors and equipment.
    pub catalog: Arc<dyn CatalogStore>,
    /// Hardware records.
    pub hardware: Arc<dyn HardwareStore>,
    /// Dropdown options.
    pub options: Arc<dyn OptionStore>,
    /// Persisted budgets.
    pub budgets: Arc<dyn BudgetStore>,
    /// Drafts being composed.
    pub drafts: Arc<DraftRegistry>,
    /// Renderer used by the export endpoint.
    pub renderer: Arc<dyn DocumentRenderer>,
}

impl AppState {
    /// State backed by the Postgres repositories.
    #[must_use]
    pub fn from_database(db: DatabaseConnection) -> Self {
        Self {
            catalog: Arc::new(CatalogRepository::new(db.clone())),
            hardware: Arc::new(HardwareRepository::new(db.clone())),
            options: Arc::new(DropdownOptionRepository::new(db.clone())),
            budgets: Arc::new(BudgetRepository::new(db)),
            drafts: Arc::new(DraftRegistry::new()),
            renderer: Arc::new(TextRenderer),
        }
    }

    /// State backed by a single in-memory store.
    #[must_use]
    pub fn in_memory(store: Arc<MemoryStore>) -> Self {
        Self {
            catalog: store.clone(),
            hardware: store.clone(),
            options: store.clone(),
            budgets: store,
            drafts: Arc::new(DraftRegistry::new()),
            renderer: Arc::new(TextRenderer),
        }
    }
}

fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if cors.allows_any() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = cors
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

/// Creates the main application router.
pub fn create_router(state: AppState, cors: &CorsConfig) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors))
        .with_state(state)
}
