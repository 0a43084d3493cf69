// ABOUTME: Offer API handlers: creation by the signed-in owner and the
// ABOUTME: per-shop listing of active offers, newest first.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use supermall_app::{OfferDraft, Toast};

use crate::api::error_response;
use crate::app_state::SharedState;

/// POST /api/offers - Create an offer for one of the owner's shops.
pub async fn create_offer(
    State(state): State<SharedState>,
    Json(draft): Json<OfferDraft>,
) -> impl IntoResponse {
    match state.app.admin.create_offer(draft).await {
        Ok(offer_id) => (
            StatusCode::CREATED,
            Json(json!({
                "offerId": offer_id,
                "toast": Toast::success("Offer created successfully!"),
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/shops/{id}/offers - Active offers for one shop, newest first.
pub async fn list_shop_offers(
    State(state): State<SharedState>,
    Path(shop_id): Path<String>,
) -> impl IntoResponse {
    match state.app.storefront.list_shop_offers(&shop_id).await {
        Ok(offers) => Json(json!({ "offers": offers })).into_response(),
        Err(e) => error_response(e),
    }
}
