// ABOUTME: Defines the UiAction enum, the closed set of actions the UI can dispatch.
// ABOUTME: Replaces a string-keyed handler table so unknown action strings cannot go unhandled.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when an action string does not name a known action,
/// or names one without the shop id it requires.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionParseError {
    #[error("unknown action: {0}")]
    Unknown(String),

    #[error("action {0} requires a shop id")]
    MissingShopId(&'static str),
}

/// An action dispatched from the UI. The original markup carried these as
/// `data-action` attribute strings with an optional `data-shop-id`; parsing
/// them into a closed enum means every variant is matched exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum UiAction {
    CreateShop,
    CreateOffer,
    CreateCategory,
    FilterShops,
    CompareProducts,
    ViewOffers { shop_id: String },
    ViewShop { shop_id: String },
    EditShop { shop_id: String },
    DeleteShop { shop_id: String },
}

impl UiAction {
    /// Parse an action attribute plus its optional shop id attribute.
    pub fn parse(action: &str, shop_id: Option<&str>) -> Result<Self, ActionParseError> {
        let require_shop = |name: &'static str| {
            shop_id
                .map(str::to_string)
                .ok_or(ActionParseError::MissingShopId(name))
        };

        match action {
            "create-shop" => Ok(UiAction::CreateShop),
            "create-offer" => Ok(UiAction::CreateOffer),
            "create-category" => Ok(UiAction::CreateCategory),
            "filter-shops" => Ok(UiAction::FilterShops),
            "compare-products" => Ok(UiAction::CompareProducts),
            "view-offers" => Ok(UiAction::ViewOffers {
                shop_id: require_shop("view-offers")?,
            }),
            "view-shop" => Ok(UiAction::ViewShop {
                shop_id: require_shop("view-shop")?,
            }),
            "edit-shop" => Ok(UiAction::EditShop {
                shop_id: require_shop("edit-shop")?,
            }),
            "delete-shop" => Ok(UiAction::DeleteShop {
                shop_id: require_shop("delete-shop")?,
            }),
            other => Err(ActionParseError::Unknown(other.to_string())),
        }
    }

    /// The attribute string this action is carried as in markup.
    pub fn name(&self) -> &'static str {
        match self {
            UiAction::CreateShop => "create-shop",
            UiAction::CreateOffer => "create-offer",
            UiAction::CreateCategory => "create-category",
            UiAction::FilterShops => "filter-shops",
            UiAction::CompareProducts => "compare-products",
            UiAction::ViewOffers { .. } => "view-offers",
            UiAction::ViewShop { .. } => "view-shop",
            UiAction::EditShop { .. } => "edit-shop",
            UiAction::DeleteShop { .. } => "delete-shop",
        }
    }
}

impl std::fmt::Display for UiAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
