// ABOUTME: The explicitly constructed store-and-session context shared by all managers.
// ABOUTME: Replaces the ambient globals of the system this reimplements with injected handles.

use supermall_store::{AuthEmulator, AuthError, Latency, LocalStorage, LocalStorageError, Logger, MockDb, StoreError};
use thiserror::Error;

/// Errors surfaced by the application layer. Store and auth failures pass
/// through; the rest are conditions the managers detect themselves.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("storage error: {0}")]
    Storage(#[from] LocalStorageError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no user is signed in")]
    NotSignedIn,

    #[error("shop not found: {0}")]
    ShopNotFound(String),
}

/// Everything the managers need, built once at startup and cloned into each
/// of them: the storage area, the mock document store over it, the mock
/// auth emulator, and the store-backed logger. Lifecycle is scoped to the
/// process; there are no ambient singletons.
#[derive(Clone)]
pub struct MallContext {
    pub storage: LocalStorage,
    pub db: MockDb,
    pub auth: AuthEmulator,
    pub logger: Logger,
}

impl MallContext {
    /// Build the full context over a storage area with the given latency
    /// profile. Loads all collections and stored credentials.
    pub fn open(storage: LocalStorage, latency: Latency) -> Result<Self, AppError> {
        let logger = Logger::new(storage.clone());
        let db = MockDb::open(storage.clone(), latency, logger.clone())?;
        let auth = AuthEmulator::open(storage.clone(), latency, logger.clone())?;
        logger.info("mock backend initialized", serde_json::json!({}));

        Ok(Self {
            storage,
            db,
            auth,
            logger,
        })
    }

    /// An in-memory context with no artificial latency. Test constructor.
    pub fn in_memory() -> Result<Self, AppError> {
        Self::open(LocalStorage::in_memory(), Latency::none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use supermall_core::Collection;

    #[test]
    fn open_initializes_every_piece() {
        let ctx = MallContext::in_memory().unwrap();
        // The context logs its own startup through the store-backed logger
        let entries = ctx.logger.entries();
        assert!(entries.iter().any(|e| e.message == "mock backend initialized"));
        // Collections load empty on a fresh storage area
        let _ = ctx.db.collection(Collection::Shops);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let ctx = MallContext::in_memory().unwrap();
        let other = ctx.clone();

        ctx.db
            .collection(Collection::Categories)
            .doc("cat1")
            .set(serde_json::json!({ "name": "Clothing" }))
            .await
            .unwrap();

        let snap = other
            .db
            .collection(Collection::Categories)
            .doc("cat1")
            .get()
            .await
            .unwrap();
        assert!(snap.exists);
    }
}
