// ABOUTME: Shared application state for the supermall HTTP server.
// ABOUTME: Bundles the mall context with its managers; one instance serves all handlers.

use std::sync::Arc;

use supermall_app::{AppError, AppManager, MallContext};

/// Shared state accessible by all Axum handlers. The context and managers
/// are already cheap to clone internally; this wrapper just names the pair.
pub struct AppState {
    pub ctx: MallContext,
    pub app: AppManager,
}

/// Type alias for the Arc-wrapped state used with Axum's State extractor.
pub type SharedState = Arc<AppState>;

impl AppState {
    /// Wrap a context built by the caller, for production use.
    pub fn new(ctx: MallContext) -> Self {
        let app = AppManager::new(ctx.clone());
        Self { ctx, app }
    }

    /// In-memory state with no artificial latency. Test constructor.
    pub fn in_memory() -> Result<SharedState, AppError> {
        Ok(Arc::new(Self::new(MallContext::in_memory()?)))
    }
}
