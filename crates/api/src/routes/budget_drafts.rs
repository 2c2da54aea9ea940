//! Budget draft routes.
//!
//! Exposes the budget composer: open a draft, pick catalog items, edit
//! quantities and costs, then submit. Drafts live in process memory until
//! they are submitted, discarded or left idle for a day.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use gridbudget_core::budget::{BudgetComposer, BudgetDraft, BudgetTotals, DraftPatch};
use gridbudget_core::catalog::ItemType;
use gridbudget_core::numeric::RawInput;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::drafts::DraftError;
use crate::{AppState, error::error_response};

/// Creates the draft routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/budget-drafts", post(create_draft))
        .route(
            "/budget-drafts/{id}",
            get(get_draft)
                .patch(update_draft)
                .delete(delete_draft),
        )
        .route("/budget-drafts/{id}/items", post(add_item))
        .route(
            "/budget-drafts/{id}/items/{index}",
            put(update_quantity).delete(remove_item),
        )
        .route("/budget-drafts/{id}/submit", post(submit_draft))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for adding a catalog item.
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    /// Catalog kind.
    pub item_type: ItemType,
    /// Catalog item ID.
    pub item_id: Uuid,
}

/// Request body for changing a line's quantity.
#[derive(Debug, Deserialize)]
pub struct QuantityRequest {
    /// Raw quantity; unparseable input counts as zero.
    #[serde(default)]
    pub quantity: RawInput,
}

/// A draft with its current totals.
#[derive(Debug, Serialize)]
pub struct DraftResponse<'a> {
    /// Draft ID.
    pub id: Uuid,
    /// Draft contents.
    #[serde(flatten)]
    pub draft: &'a BudgetDraft,
    /// Totals of the draft.
    pub totals: BudgetTotals,
}

fn draft_view(status: StatusCode, id: Uuid, composer: &BudgetComposer) -> Response {
    let totals = match composer.totals() {
        Ok(totals) => totals,
        Err(e) => return error_response(e),
    };
    let view = DraftResponse {
        id,
        draft: composer.draft(),
        totals,
    };
    (status, Json(view)).into_response()
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/budget-drafts` - Open an empty draft.
async fn create_draft(State(state): State<AppState>) -> Response {
    let entry = state.drafts.create();
    let composer = entry.lock().await;
    draft_view(StatusCode::CREATED, entry.id(), &composer)
}

/// GET `/budget-drafts/{id}` - Get a draft with its totals.
async fn get_draft(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    let entry = match state.drafts.get(id) {
        Ok(entry) => entry,
        Err(e) => return error_response(e),
    };
    let composer = entry.lock().await;
    draft_view(StatusCode::OK, id, &composer)
}

/// PATCH `/budget-drafts/{id}` - Update names, costs, BDI or notes.
async fn update_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<DraftPatch>,
) -> Response {
    let entry = match state.drafts.get(id) {
        Ok(entry) => entry,
        Err(e) => return error_response(e),
    };
    let mut composer = entry.lock().await;
    if let Err(e) = composer.update_details(patch) {
        return error_response(e);
    }
    draft_view(StatusCode::OK, id, &composer)
}

/// DELETE `/budget-drafts/{id}` - Discard a draft.
async fn delete_draft(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    match state.drafts.remove(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}

/// POST `/budget-drafts/{id}/items` - Add a catalog item with quantity 1.
async fn add_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddItemRequest>,
) -> Response {
    let entry = match state.drafts.get(id) {
        Ok(entry) => entry,
        Err(e) => return error_response(e),
    };
    let mut composer = entry.lock().await;
    if let Err(e) = composer
        .add_from_catalog(state.catalog.as_ref(), payload.item_type, payload.item_id)
        .await
    {
        return error_response(DraftError::from(e));
    }
    draft_view(StatusCode::CREATED, id, &composer)
}

/// PUT `/budget-drafts/{id}/items/{index}` - Set a line's quantity.
async fn update_quantity(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
    Json(payload): Json<QuantityRequest>,
) -> Response {
    let entry = match state.drafts.get(id) {
        Ok(entry) => entry,
        Err(e) => return error_response(e),
    };
    let mut composer = entry.lock().await;
    if let Err(e) = composer.update_quantity(index, payload.quantity.as_str()) {
        return error_response(e);
    }
    draft_view(StatusCode::OK, id, &composer)
}

/// DELETE `/budget-drafts/{id}/items/{index}` - Remove a line.
async fn remove_item(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> Response {
    let entry = match state.drafts.get(id) {
        Ok(entry) => entry,
        Err(e) => return error_response(e),
    };
    let mut composer = entry.lock().await;
    if let Err(e) = composer.remove_item(index) {
        return error_response(e);
    }
    draft_view(StatusCode::OK, id, &composer)
}

/// POST `/budget-drafts/{id}/submit` - Persist the draft and close it.
///
/// Returns 409 while an earlier submit of the same draft is in flight.
async fn submit_draft(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    match state.drafts.submit(id, state.budgets.as_ref()).await {
        Ok(budget) => (StatusCode::CREATED, Json(budget)).into_response(),
        Err(e) => error_response(e),
    }
}
