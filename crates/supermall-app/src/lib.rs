// ABOUTME: Application layer for supermall: the dependency-injected context and the managers
// ABOUTME: (auth, admin, storefront), UI action dispatch, and sample-data seeding.

pub mod admin;
pub mod auth_manager;
pub mod context;
pub mod dispatch;
pub mod seed;
pub mod storefront;

pub use admin::{AdminManager, CategoryDraft, OfferDraft, ShopDraft, ShopPatch};
pub use auth_manager::{AuthManager, AuthOutcome, Redirect};
pub use context::{AppError, MallContext};
pub use dispatch::{ActionOutcome, AppManager, Selections, Toast, ToastKind};
pub use seed::initialize_sample_data;
pub use storefront::{ShopFilter, StorefrontManager};
