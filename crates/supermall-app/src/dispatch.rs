// ABOUTME: The application manager: toasts and exhaustive dispatch of UI actions.
// ABOUTME: Every UiAction variant maps to exactly one outcome; unknown strings cannot reach here.

use serde::Serialize;
use supermall_core::{Category, Offer, Product, Shop, UiAction};

use crate::admin::AdminManager;
use crate::auth_manager::AuthManager;
use crate::context::{AppError, MallContext};
use crate::storefront::{ShopFilter, StorefrontManager};

/// Severity of a toast notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastKind {
    /// The icon the original UI rendered next to the message.
    pub fn icon(&self) -> &'static str {
        match self {
            ToastKind::Success => "\u{2705}",
            ToastKind::Error => "\u{274c}",
            ToastKind::Warning => "\u{26a0}\u{fe0f}",
            ToastKind::Info => "\u{2139}\u{fe0f}",
        }
    }
}

/// A user-facing notification. Failures degrade to one of these; nothing
/// is fatal and nothing is retried.
#[derive(Debug, Clone, Serialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, message)
    }
}

/// What the UI reads off the page when an action fires: the filter selects
/// and the products ticked for comparison.
#[derive(Debug, Clone, Default)]
pub struct Selections {
    pub filters: ShopFilter,
    pub compare: Vec<String>,
}

/// The data an action resolves to. The UI renders these; nothing here
/// touches the DOM.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum ActionOutcome {
    /// Open the create-shop modal with the category select populated.
    OpenCreateShop { categories: Vec<Category> },
    /// Open the create-offer modal with the owner's active shops.
    OpenCreateOffer { shops: Vec<Shop> },
    OpenCreateCategory,
    /// A (re)filtered shop listing.
    Shops {
        shops: Vec<Shop>,
        toast: Option<Toast>,
    },
    Comparison { products: Vec<Product> },
    Offers { offers: Vec<Offer> },
    ShopDetails { shop: Shop },
    EditShop { shop: Shop },
    Deleted { toast: Toast },
}

/// Ties the managers together and dispatches UI actions. Owns nothing of
/// its own; all state lives in the shared context.
#[derive(Clone)]
pub struct AppManager {
    pub auth: AuthManager,
    pub admin: AdminManager,
    pub storefront: StorefrontManager,
}

impl AppManager {
    pub fn new(ctx: MallContext) -> Self {
        Self {
            auth: AuthManager::new(ctx.clone()),
            admin: AdminManager::new(ctx.clone()),
            storefront: StorefrontManager::new(ctx),
        }
    }

    /// Dispatch one UI action. The match is exhaustive: adding a UiAction
    /// variant without handling it here is a compile error.
    pub async fn handle(
        &self,
        action: UiAction,
        selections: &Selections,
    ) -> Result<ActionOutcome, AppError> {
        match action {
            UiAction::CreateShop => Ok(ActionOutcome::OpenCreateShop {
                categories: self.admin.list_active_categories().await?,
            }),
            UiAction::CreateOffer => Ok(ActionOutcome::OpenCreateOffer {
                shops: self.admin.list_owner_active_shops().await?,
            }),
            UiAction::CreateCategory => Ok(ActionOutcome::OpenCreateCategory),
            UiAction::FilterShops => Ok(ActionOutcome::Shops {
                shops: self.storefront.list_shops(&selections.filters).await?,
                toast: Some(Toast::success("Filters applied")),
            }),
            UiAction::CompareProducts => Ok(ActionOutcome::Comparison {
                products: self.storefront.compare_products(&selections.compare).await?,
            }),
            UiAction::ViewOffers { shop_id } => Ok(ActionOutcome::Offers {
                offers: self.storefront.list_shop_offers(&shop_id).await?,
            }),
            UiAction::ViewShop { shop_id } => {
                let shop = self
                    .admin
                    .shop(&shop_id)
                    .await?
                    .ok_or(AppError::ShopNotFound(shop_id))?;
                Ok(ActionOutcome::ShopDetails { shop })
            }
            UiAction::EditShop { shop_id } => {
                let shop = self
                    .admin
                    .shop(&shop_id)
                    .await?
                    .ok_or(AppError::ShopNotFound(shop_id))?;
                Ok(ActionOutcome::EditShop { shop })
            }
            UiAction::DeleteShop { shop_id } => {
                self.admin.deactivate_shop(&shop_id).await?;
                Ok(ActionOutcome::Deleted {
                    toast: Toast::success("Shop deleted successfully"),
                })
            }
        }
    }
}
