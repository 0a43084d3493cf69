// ABOUTME: HTTP surface for supermall: config, shared state, routes, and JSON API handlers.
// ABOUTME: The server is the stand-in for the original's page scripts; the managers do the work.

pub mod api;
pub mod app_state;
pub mod config;
pub mod routes;

pub use app_state::{AppState, SharedState};
pub use config::{ConfigError, ServerConfig};
pub use routes::create_router;
