//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod budget_drafts;
pub mod budgets;
pub mod catalog;
pub mod dashboard;
pub mod hardware;
pub mod health;
pub mod options;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(catalog::routes())
        .merge(hardware::routes())
        .merge(options::routes())
        .merge(budgets::routes())
        .merge(budget_drafts::routes())
        .merge(dashboard::routes())
}
