// ABOUTME: Product API handlers: side-by-side comparison of selected products.
// ABOUTME: Ids that resolve to nothing are skipped, matching the storefront semantics.

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use serde::Deserialize;
use serde_json::json;

use crate::api::error_response;
use crate::app_state::SharedState;

/// Request body for POST /api/products/compare.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequest {
    pub product_ids: Vec<String>,
}

/// POST /api/products/compare - Fetch the selected products for comparison.
pub async fn compare(
    State(state): State<SharedState>,
    Json(req): Json<CompareRequest>,
) -> impl IntoResponse {
    match state.app.storefront.compare_products(&req.product_ids).await {
        Ok(products) => Json(json!({ "products": products })).into_response(),
        Err(e) => error_response(e),
    }
}
