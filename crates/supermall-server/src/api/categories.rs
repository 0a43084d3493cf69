// ABOUTME: Category API handlers: the active listing used by the filter
// ABOUTME: select and admin-side creation.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use supermall_app::{CategoryDraft, Toast};

use crate::api::error_response;
use crate::app_state::SharedState;

/// GET /api/categories - Active categories.
pub async fn list_categories(State(state): State<SharedState>) -> impl IntoResponse {
    match state.app.storefront.list_categories().await {
        Ok(categories) => Json(json!({ "categories": categories })).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/categories - Create a category.
pub async fn create_category(
    State(state): State<SharedState>,
    Json(draft): Json<CategoryDraft>,
) -> impl IntoResponse {
    match state.app.admin.create_category(draft).await {
        Ok(category_id) => (
            StatusCode::CREATED,
            Json(json!({
                "categoryId": category_id,
                "toast": Toast::success("Category created successfully!"),
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
