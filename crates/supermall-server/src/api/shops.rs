// ABOUTME: Shop API handlers: public listing with filters, floors, owner listing,
// ABOUTME: creation, detail, partial update, and deactivation standing in for delete.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use supermall_app::{ShopDraft, ShopFilter, ShopPatch, Toast};

use crate::api::error_response;
use crate::app_state::SharedState;

/// GET /api/shops - Active shops, optionally filtered by ?category= and ?floor=.
pub async fn list_shops(
    State(state): State<SharedState>,
    Query(filter): Query<ShopFilter>,
) -> impl IntoResponse {
    match state.app.storefront.list_shops(&filter).await {
        Ok(shops) => Json(json!({ "shops": shops })).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/admin/shops - The signed-in owner's shops, newest first.
pub async fn list_my_shops(State(state): State<SharedState>) -> impl IntoResponse {
    match state.app.admin.list_shops().await {
        Ok(shops) => Json(json!({ "shops": shops })).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/shops - Create a shop owned by the signed-in user.
pub async fn create_shop(
    State(state): State<SharedState>,
    Json(draft): Json<ShopDraft>,
) -> impl IntoResponse {
    match state.app.admin.create_shop(draft).await {
        Ok(shop_id) => (
            StatusCode::CREATED,
            Json(json!({
                "shopId": shop_id,
                "toast": Toast::success("Shop created successfully!"),
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/shops/{id} - One shop, for the detail and edit views.
pub async fn get_shop(
    State(state): State<SharedState>,
    Path(shop_id): Path<String>,
) -> impl IntoResponse {
    match state.app.admin.shop(&shop_id).await {
        Ok(Some(shop)) => Json(shop).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("shop not found: {shop_id}") })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// PATCH /api/shops/{id} - Apply a partial update.
pub async fn update_shop(
    State(state): State<SharedState>,
    Path(shop_id): Path<String>,
    Json(patch): Json<ShopPatch>,
) -> impl IntoResponse {
    match state.app.admin.update_shop(&shop_id, patch).await {
        Ok(()) => Json(json!({
            "toast": Toast::success("Shop updated successfully!"),
        }))
        .into_response(),
        Err(e) => error_response(e),
    }
}

/// DELETE /api/shops/{id} - Deactivate the shop; the record stays stored.
pub async fn delete_shop(
    State(state): State<SharedState>,
    Path(shop_id): Path<String>,
) -> impl IntoResponse {
    match state.app.admin.deactivate_shop(&shop_id).await {
        Ok(()) => Json(json!({
            "toast": Toast::success("Shop deleted successfully"),
        }))
        .into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/floors - Distinct floors with at least one active shop.
pub async fn list_floors(State(state): State<SharedState>) -> impl IntoResponse {
    match state.app.storefront.list_floors().await {
        Ok(floors) => Json(json!({ "floors": floors })).into_response(),
        Err(e) => error_response(e),
    }
}
