// ABOUTME: API module containing all HTTP handler functions for the supermall REST API.
// ABOUTME: Organized into sub-modules per resource, with shared error-to-status mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use supermall_app::AppError;
use supermall_store::{AuthError, StoreError};

pub mod actions;
pub mod auth;
pub mod categories;
pub mod logs;
pub mod offers;
pub mod products;
pub mod shops;

/// Map an application error onto an HTTP status plus a JSON error body.
/// Auth failures keep their user-facing messages; everything unexpected
/// collapses to a 500 without leaking internals.
pub(crate) fn error_response(err: AppError) -> Response {
    let status = match &err {
        AppError::Auth(AuthError::InvalidCredentials) | AppError::NotSignedIn => {
            StatusCode::UNAUTHORIZED
        }
        AppError::Auth(AuthError::EmailAlreadyRegistered)
        | AppError::Auth(AuthError::ShopNumberAlreadyRegistered) => StatusCode::CONFLICT,
        AppError::Auth(AuthError::MissingFields) => StatusCode::UNPROCESSABLE_ENTITY,
        AppError::ShopNotFound(_) | AppError::Store(StoreError::NotFound { .. }) => {
            StatusCode::NOT_FOUND
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!("request failed: {err}");
        return (
            status,
            Json(serde_json::json!({ "error": "internal error" })),
        )
            .into_response();
    }

    (status, Json(serde_json::json!({ "error": err.to_string() }))).into_response()
}
