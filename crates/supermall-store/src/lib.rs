// ABOUTME: Persistence layer for supermall: local-storage emulation, mock document store,
// ABOUTME: mock authentication, artificial latency, and the store-backed side-effect logger.

pub mod auth;
pub mod db;
pub mod latency;
pub mod local;
pub mod logger;

pub use auth::{AuthEmulator, AuthError, SessionUser, SignUpProfile};
pub use db::{CollectionRef, Direction, DocSnapshot, DocumentRef, MockDb, Query, StoreError};
pub use latency::Latency;
pub use local::{LocalStorage, LocalStorageError};
pub use logger::Logger;
