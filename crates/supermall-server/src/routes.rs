// ABOUTME: Route definitions for the supermall HTTP API.
// ABOUTME: Assembles all API routes into a single Axum Router with shared state.

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::SharedState;

/// Build the complete Axum router with all routes and shared state.
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/auth/register", post(api::auth::register))
        .route("/api/auth/login", post(api::auth::login))
        .route("/api/auth/logout", post(api::auth::logout))
        .route("/api/auth/session", get(api::auth::session))
        .route(
            "/api/shops",
            get(api::shops::list_shops).post(api::shops::create_shop),
        )
        .route(
            "/api/shops/{id}",
            get(api::shops::get_shop)
                .patch(api::shops::update_shop)
                .delete(api::shops::delete_shop),
        )
        .route("/api/shops/{id}/offers", get(api::offers::list_shop_offers))
        .route("/api/admin/shops", get(api::shops::list_my_shops))
        .route("/api/offers", post(api::offers::create_offer))
        .route(
            "/api/categories",
            get(api::categories::list_categories).post(api::categories::create_category),
        )
        .route("/api/floors", get(api::shops::list_floors))
        .route("/api/products/compare", post(api::products::compare))
        .route("/api/actions", post(api::actions::dispatch))
        .route("/api/logs", get(api::logs::list_logs))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check handler. Returns 200 OK with a simple JSON body.
async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}
