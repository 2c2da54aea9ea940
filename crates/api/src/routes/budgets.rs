//! Budget routes.
//!
//! A budget posted here goes through the same checks as a draft submit:
//! repeated catalog items, missing items and blank names are rejected, and
//! line totals are recomputed on the server.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use gridbudget_core::budget::{
    BudgetDraft, BudgetError, BudgetSubmission, BudgetTotals, NewBudget, compute_totals,
};
use gridbudget_core::document::export_file_name;
use serde::Serialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::{AppState, error::error_response};

/// Creates the budget routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/budgets", get(list_budgets).post(create_budget))
        .route("/budgets/preview", post(preview_budget))
        .route("/budgets/{id}", get(get_budget).delete(delete_budget))
        .route("/budgets/{id}/export", get(export_budget))
}

/// Response for a totals preview.
#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    /// Draft as the server understood it.
    #[serde(flatten)]
    pub draft: BudgetDraft,
    /// Totals of the draft.
    pub totals: BudgetTotals,
}

/// GET `/budgets` - List budgets, newest first.
async fn list_budgets(State(state): State<AppState>) -> Response {
    match state.budgets.list().await {
        Ok(budgets) => (StatusCode::OK, Json(json!({ "budgets": budgets }))).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST `/budgets` - Persist a whole draft in one request.
async fn create_budget(
    State(state): State<AppState>,
    Json(payload): Json<BudgetSubmission>,
) -> Response {
    let new_budget = match payload
        .into_draft()
        .and_then(|draft| NewBudget::from_draft(&draft))
    {
        Ok(budget) => budget,
        Err(e) => return error_response(e),
    };

    match state.budgets.create(new_budget).await {
        Ok(budget) => {
            info!(budget_id = %budget.id, total = %budget.totals().total, "Budget created");
            (StatusCode::CREATED, Json(budget)).into_response()
        }
        Err(e) => error_response(BudgetError::Store(e)),
    }
}

/// POST `/budgets/preview` - Compute totals without saving anything.
async fn preview_budget(Json(payload): Json<BudgetSubmission>) -> Response {
    let draft = match payload.into_draft() {
        Ok(draft) => draft,
        Err(e) => return error_response(e),
    };
    match compute_totals(&draft) {
        Ok(totals) => (StatusCode::OK, Json(PreviewResponse { draft, totals })).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET `/budgets/{id}` - Get a budget with its items and totals.
async fn get_budget(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    match state.budgets.get(id).await {
        Ok(budget) => (StatusCode::OK, Json(budget)).into_response(),
        Err(e) => error_response(BudgetError::from(e)),
    }
}

/// DELETE `/budgets/{id}` - Delete a budget.
async fn delete_budget(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    match state.budgets.delete(id).await {
        Ok(()) => {
            info!(budget_id = %id, "Budget deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => error_response(BudgetError::from(e)),
    }
}

/// GET `/budgets/{id}/export` - Download the budget as a document.
async fn export_budget(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    let budget = match state.budgets.get(id).await {
        Ok(budget) => budget,
        Err(e) => return error_response(BudgetError::from(e)),
    };

    let body = match state.renderer.render(&budget) {
        Ok(body) => body,
        Err(e) => return error_response(e),
    };

    let file_name = export_file_name(&budget, state.renderer.extension()).replace('"', "");
    let disposition = HeaderValue::from_bytes(format!("attachment; filename=\"{file_name}\"").as_bytes())
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    (
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static(state.renderer.content_type()),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}
