//! Catalog routes for poles, structures, conductors and equipment.
//!
//! Every kind gets the same five endpoints under its own path segment.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use gridbudget_core::catalog::{CatalogError, CatalogItemInput, CatalogSnapshot, ItemType};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::{AppState, error::error_response};

/// Query string for list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    /// Case-insensitive search over code, description and type.
    #[serde(default)]
    pub q: String,
}

/// Creates the catalog routes.
pub fn routes() -> Router<AppState> {
    ItemType::ALL.into_iter().fold(Router::new(), |router, kind| {
        let collection = format!("/{}", kind.route_segment());
        let member = format!("/{}/{{id}}", kind.route_segment());
        router
            .route(
                &collection,
                get(move |state: State<AppState>, query: Query<SearchQuery>| {
                    list_items(state, kind, query)
                })
                .post(move |state: State<AppState>, body: Json<serde_json::Value>| {
                    create_item(state, kind, body)
                }),
            )
            .route(
                &member,
                get(move |state: State<AppState>, id: Path<Uuid>| get_item(state, kind, id))
                    .put(
                        move |state: State<AppState>,
                              id: Path<Uuid>,
                              body: Json<serde_json::Value>| {
                            update_item(state, kind, id, body)
                        },
                    )
                    .delete(move |state: State<AppState>, id: Path<Uuid>| {
                        delete_item(state, kind, id)
                    }),
            )
    })
}

fn parse_input(kind: ItemType, body: serde_json::Value) -> Result<CatalogItemInput, CatalogError> {
    let input = CatalogItemInput::from_json(kind, body)?;
    input.validate()?;
    Ok(input)
}

/// GET `/{kind}` - List items of a kind, optionally filtered by `q`.
async fn list_items(
    State(state): State<AppState>,
    kind: ItemType,
    Query(query): Query<SearchQuery>,
) -> Response {
    match state.catalog.list(kind).await {
        Ok(items) => {
            let snapshot = CatalogSnapshot::new(kind, items);
            let items: Vec<_> = snapshot.search(&query.q).collect();
            (StatusCode::OK, Json(json!({ "items": items }))).into_response()
        }
        Err(e) => error_response(CatalogError::from_store(kind.label(), e)),
    }
}

/// GET `/{kind}/{id}` - Get one item.
async fn get_item(
    State(state): State<AppState>,
    kind: ItemType,
    Path(id): Path<Uuid>,
) -> Response {
    match state.catalog.find(kind, id).await {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => error_response(CatalogError::from_store(kind.label(), e)),
    }
}

/// POST `/{kind}` - Create an item.
async fn create_item(
    State(state): State<AppState>,
    kind: ItemType,
    Json(body): Json<serde_json::Value>,
) -> Response {
    let input = match parse_input(kind, body) {
        Ok(input) => input,
        Err(e) => return error_response(e),
    };

    match state.catalog.create(input).await {
        Ok(item) => (StatusCode::CREATED, Json(item)).into_response(),
        Err(e) => error_response(CatalogError::from_store(kind.label(), e)),
    }
}

/// PUT `/{kind}/{id}` - Replace an item.
async fn update_item(
    State(state): State<AppState>,
    kind: ItemType,
    Path(id): Path<Uuid>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    let input = match parse_input(kind, body) {
        Ok(input) => input,
        Err(e) => return error_response(e),
    };

    match state.catalog.update(id, input).await {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => error_response(CatalogError::from_store(kind.label(), e)),
    }
}

/// DELETE `/{kind}/{id}` - Delete an item. Budgets keep their copies.
async fn delete_item(
    State(state): State<AppState>,
    kind: ItemType,
    Path(id): Path<Uuid>,
) -> Response {
    match state.catalog.delete(kind, id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(CatalogError::from_store(kind.label(), e)),
    }
}
