//! Dashboard routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use gridbudget_core::dashboard::DashboardStats;

use crate::{AppState, error::error_response};

/// Creates the dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(get_dashboard))
}

/// GET `/dashboard` - Catalog counts, budget totals and the latest budgets.
async fn get_dashboard(State(state): State<AppState>) -> Response {
    let stats = DashboardStats::collect(
        state.catalog.as_ref(),
        state.hardware.as_ref(),
        state.budgets.as_ref(),
    )
    .await;

    match stats {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(e) => error_response(e),
    }
}
