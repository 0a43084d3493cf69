// ABOUTME: Action dispatch handler: accepts a UI action plus the page
// ABOUTME: selections and returns the outcome the UI should render.

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use serde::Deserialize;
use supermall_app::{Selections, ShopFilter};
use supermall_core::UiAction;

use crate::api::error_response;
use crate::app_state::SharedState;

/// Request body for POST /api/actions. The action is the tagged enum the
/// UI dispatches; filters and compare mirror the page selections.
#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    pub action: UiAction,
    #[serde(default)]
    pub filters: ShopFilter,
    #[serde(default)]
    pub compare: Vec<String>,
}

/// POST /api/actions - Dispatch one UI action through the app manager.
pub async fn dispatch(
    State(state): State<SharedState>,
    Json(req): Json<ActionRequest>,
) -> impl IntoResponse {
    let selections = Selections {
        filters: req.filters,
        compare: req.compare,
    };
    match state.app.handle(req.action, &selections).await {
        Ok(outcome) => Json(outcome).into_response(),
        Err(e) => error_response(e),
    }
}
