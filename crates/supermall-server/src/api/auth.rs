// ABOUTME: Auth API handlers: register, login, logout, and the current session.
// ABOUTME: Responses carry the session user, a toast, and the page the UI should load next.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;
use serde_json::json;
use supermall_app::AuthOutcome;
use supermall_core::Role;
use supermall_store::SignUpProfile;

use crate::api::error_response;
use crate::app_state::SharedState;

/// Request body for POST /api/auth/register.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub shop_number: String,
    pub name: String,
    #[serde(default)]
    pub role: Role,
}

/// Request body for POST /api/auth/login. The identifier is an email or a
/// shop number; which one is detected server-side.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

fn outcome_body(outcome: &AuthOutcome) -> serde_json::Value {
    json!({
        "user": &outcome.user,
        "toast": &outcome.toast,
        "redirect": outcome.redirect.page(),
    })
}

/// POST /api/auth/register - Create an account and sign it in.
pub async fn register(
    State(state): State<SharedState>,
    Json(req): Json<RegisterRequest>,
) -> impl IntoResponse {
    let profile = SignUpProfile {
        shop_number: req.shop_number,
        name: req.name,
        role: req.role,
    };
    match state.app.auth.register(&req.email, &req.password, profile).await {
        Ok(outcome) => (StatusCode::CREATED, Json(outcome_body(&outcome))).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/auth/login - Sign in by email or shop number.
pub async fn login(
    State(state): State<SharedState>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    match state.app.auth.login(&req.identifier, &req.password).await {
        Ok(outcome) => Json(outcome_body(&outcome)).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/auth/logout - End the session and point the UI home.
pub async fn logout(State(state): State<SharedState>) -> impl IntoResponse {
    match state.app.auth.logout().await {
        Ok((toast, redirect)) => {
            Json(json!({ "toast": toast, "redirect": redirect.page() })).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// GET /api/auth/session - The signed-in user, or null.
pub async fn session(State(state): State<SharedState>) -> impl IntoResponse {
    let user = state.ctx.auth.current_user().await;
    Json(json!({ "user": user }))
}
