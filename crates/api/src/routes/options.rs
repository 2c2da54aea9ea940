//! Dropdown option routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use gridbudget_core::options::{NewDropdownOption, OptionCategory};
use gridbudget_shared::AppError;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::{AppState, error::error_response};

/// Creates the dropdown option routes.
///
/// `GET` takes a category name and `DELETE` an option ID in the same slot.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dropdown-options", post(create_option))
        .route(
            "/dropdown-options/{key}",
            get(list_options).delete(delete_option),
        )
}

/// GET `/dropdown-options/{category}` - List options of a category.
async fn list_options(State(state): State<AppState>, Path(category): Path<String>) -> Response {
    let category = match category.parse::<OptionCategory>() {
        Ok(category) => category,
        Err(e) => return error_response(e),
    };

    match state.options.list(category).await {
        Ok(options) => (StatusCode::OK, Json(json!({ "options": options }))).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST `/dropdown-options` - Add an option.
async fn create_option(
    State(state): State<AppState>,
    Json(input): Json<NewDropdownOption>,
) -> Response {
    let input = match input.normalized() {
        Ok(input) => input,
        Err(e) => return error_response(e),
    };

    match state.options.create(input).await {
        Ok(option) => {
            info!(option_id = %option.id, category = %option.category, "Dropdown option created");
            (StatusCode::CREATED, Json(option)).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// DELETE `/dropdown-options/{id}` - Remove an option.
async fn delete_option(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Ok(id) = id.parse::<Uuid>() else {
        return error_response(AppError::Validation(format!("Invalid option id: {id}")));
    };

    match state.options.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}
