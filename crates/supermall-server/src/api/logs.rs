// ABOUTME: Log API handler: exposes the store-backed action log for the
// ABOUTME: admin log viewer page.

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use serde_json::json;

use crate::app_state::SharedState;

/// GET /api/logs - Every persisted log entry, oldest first.
pub async fn list_logs(State(state): State<SharedState>) -> impl IntoResponse {
    let entries = state.ctx.logger.entries();
    Json(json!({ "logs": entries }))
}
