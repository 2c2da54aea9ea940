//! Hardware routes.
//!
//! Hardware is priced like the other catalog kinds but cannot be added to a
//! budget.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use gridbudget_core::catalog::{CatalogError, HardwareInput, filter};
use serde_json::json;
use uuid::Uuid;

use super::catalog::SearchQuery;
use crate::{AppState, error::error_response};

const KIND: &str = "Hardware";

/// Creates the hardware routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/hardware", get(list_hardware).post(create_hardware))
        .route(
            "/hardware/{id}",
            get(get_hardware).put(update_hardware).delete(delete_hardware),
        )
}

/// GET `/hardware` - List hardware, optionally filtered by `q`.
async fn list_hardware(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Response {
    match state.hardware.list().await {
        Ok(records) => {
            let items: Vec<_> = filter(&records, &query.q).collect();
            (StatusCode::OK, Json(json!({ "items": items }))).into_response()
        }
        Err(e) => error_response(CatalogError::from_store(KIND, e)),
    }
}

/// GET `/hardware/{id}` - Get one record.
async fn get_hardware(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    match state.hardware.find(id).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => error_response(CatalogError::from_store(KIND, e)),
    }
}

/// POST `/hardware` - Create a record.
async fn create_hardware(
    State(state): State<AppState>,
    Json(input): Json<HardwareInput>,
) -> Response {
    if let Err(e) = input.validate() {
        return error_response(e);
    }
    match state.hardware.create(input).await {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(e) => error_response(CatalogError::from_store(KIND, e)),
    }
}

/// PUT `/hardware/{id}` - Replace a record.
async fn update_hardware(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<HardwareInput>,
) -> Response {
    if let Err(e) = input.validate() {
        return error_response(e);
    }
    match state.hardware.update(id, input).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => error_response(CatalogError::from_store(KIND, e)),
    }
}

/// DELETE `/hardware/{id}` - Delete a record.
async fn delete_hardware(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    match state.hardware.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(CatalogError::from_store(KIND, e)),
    }
}
