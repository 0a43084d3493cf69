// ABOUTME: Admin-side operations: create and update shops, offers and categories,
// ABOUTME: owner-scoped listings, and deactivation standing in for delete.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use supermall_core::{Category, Collection, Shop, Status};

use crate::context::{AppError, MallContext};

/// Fields supplied when creating a shop. Owner and status are stamped by
/// the manager, id and createdAt by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopDraft {
    pub name: String,
    pub description: String,
    pub category: String,
    pub floor: String,
    pub contact: String,
}

/// Partial update for a shop. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

/// Fields supplied when creating an offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub shop_id: String,
}

/// Fields supplied when creating a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Admin operations over the mock store. Creation requires a signed-in
/// user; the session uid becomes the owner reference.
#[derive(Clone)]
pub struct AdminManager {
    ctx: MallContext,
}

impl AdminManager {
    pub fn new(ctx: MallContext) -> Self {
        Self { ctx }
    }

    async fn current_uid(&self) -> Result<String, AppError> {
        self.ctx
            .auth
            .current_user()
            .await
            .map(|u| u.uid)
            .ok_or(AppError::NotSignedIn)
    }

    /// Create a shop owned by the current user, status active.
    pub async fn create_shop(&self, draft: ShopDraft) -> Result<String, AppError> {
        let uid = self.current_uid().await?;
        let mut payload = serde_json::to_value(&draft)?;
        if let Some(fields) = payload.as_object_mut() {
            fields.insert("createdBy".to_string(), json!(uid));
            fields.insert("status".to_string(), json!(Status::Active));
        }

        let shop_id = self.ctx.db.collection(Collection::Shops).add(payload).await?;
        self.ctx.logger.info(
            "shop created successfully",
            json!({ "shopId": shop_id, "shopName": draft.name }),
        );
        Ok(shop_id)
    }

    /// Apply a partial update to a shop and stamp updatedAt.
    pub async fn update_shop(&self, shop_id: &str, patch: ShopPatch) -> Result<(), AppError> {
        let mut payload = serde_json::to_value(&patch)?;
        if let Some(fields) = payload.as_object_mut() {
            fields.insert("updatedAt".to_string(), serde_json::to_value(Utc::now())?);
        }

        self.ctx
            .db
            .collection(Collection::Shops)
            .doc(shop_id)
            .update(payload)
            .await?;
        self.ctx
            .logger
            .info("shop updated successfully", json!({ "shopId": shop_id }));
        Ok(())
    }

    /// Create an offer owned by the current user, status active.
    pub async fn create_offer(&self, draft: OfferDraft) -> Result<String, AppError> {
        let uid = self.current_uid().await?;
        let mut payload = serde_json::to_value(&draft)?;
        if let Some(fields) = payload.as_object_mut() {
            fields.insert("createdBy".to_string(), json!(uid));
            fields.insert("status".to_string(), json!(Status::Active));
        }

        let offer_id = self.ctx.db.collection(Collection::Offers).add(payload).await?;
        self.ctx.logger.info(
            "offer created successfully",
            json!({ "offerId": offer_id, "offerTitle": draft.title }),
        );
        Ok(offer_id)
    }

    /// Create a category, status active.
    pub async fn create_category(&self, draft: CategoryDraft) -> Result<String, AppError> {
        let mut payload = serde_json::to_value(&draft)?;
        if let Some(fields) = payload.as_object_mut() {
            fields.insert("status".to_string(), json!(Status::Active));
        }

        let category_id = self
            .ctx
            .db
            .collection(Collection::Categories)
            .add(payload)
            .await?;
        self.ctx.logger.info(
            "category created successfully",
            json!({ "categoryId": category_id, "categoryName": draft.name }),
        );
        Ok(category_id)
    }

    /// The current user's shops, newest first.
    pub async fn list_shops(&self) -> Result<Vec<Shop>, AppError> {
        let uid = self.current_uid().await?;
        let snaps = self
            .ctx
            .db
            .collection(Collection::Shops)
            .where_eq("createdBy", uid)
            .order_by("createdAt", supermall_store::Direction::Desc)
            .get()
            .await?;

        let mut shops = Vec::with_capacity(snaps.len());
        for snap in &snaps {
            if let Some(shop) = snap.deserialize::<Shop>()? {
                shops.push(shop);
            }
        }
        Ok(shops)
    }

    /// Fetch one shop for the edit form. None if it does not exist.
    pub async fn shop(&self, shop_id: &str) -> Result<Option<Shop>, AppError> {
        let snap = self
            .ctx
            .db
            .collection(Collection::Shops)
            .doc(shop_id)
            .get()
            .await?;
        Ok(snap.deserialize()?)
    }

    /// The "delete" operation: flip the shop's status to inactive. The
    /// record stays; offers referencing it are untouched.
    pub async fn deactivate_shop(&self, shop_id: &str) -> Result<(), AppError> {
        self.ctx
            .db
            .collection(Collection::Shops)
            .doc(shop_id)
            .update(json!({ "status": Status::Inactive }))
            .await?;
        self.ctx
            .logger
            .info("shop deactivated", json!({ "shopId": shop_id }));
        Ok(())
    }

    /// Active categories, for populating the shop form's select.
    pub async fn list_active_categories(&self) -> Result<Vec<Category>, AppError> {
        let snaps = self
            .ctx
            .db
            .collection(Collection::Categories)
            .where_eq("status", Status::Active.as_str())
            .get()
            .await?;

        let mut categories = Vec::with_capacity(snaps.len());
        for snap in &snaps {
            if let Some(category) = snap.deserialize::<Category>()? {
                categories.push(category);
            }
        }
        Ok(categories)
    }

    /// The current user's active shops, for the offer form's select.
    pub async fn list_owner_active_shops(&self) -> Result<Vec<Shop>, AppError> {
        let uid = self.current_uid().await?;
        let snaps = self
            .ctx
            .db
            .collection(Collection::Shops)
            .where_eq("createdBy", uid)
            .where_eq("status", Status::Active.as_str())
            .get()
            .await?;

        let mut shops = Vec::with_capacity(snaps.len());
        for snap in &snaps {
            if let Some(shop) = snap.deserialize::<Shop>()? {
                shops.push(shop);
            }
        }
        Ok(shops)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth_manager::AuthManager;
    use supermall_core::Role;
    use supermall_store::SignUpProfile;

    async fn signed_in_admin() -> (MallContext, AdminManager) {
        let ctx = MallContext::in_memory().unwrap();
        let auth = AuthManager::new(ctx.clone());
        auth.ensure_admin_user().await.unwrap();
        auth.login("admin@supermall.com", "admin123").await.unwrap();
        (ctx.clone(), AdminManager::new(ctx))
    }

    fn tech_world() -> ShopDraft {
        ShopDraft {
            name: "Tech World".to_string(),
            description: "Latest gadgets and electronics".to_string(),
            category: "Electronics".to_string(),
            floor: "2".to_string(),
            contact: "info@techworld.com".to_string(),
        }
    }

    #[tokio::test]
    async fn create_shop_requires_a_session() {
        let ctx = MallContext::in_memory().unwrap();
        let admin = AdminManager::new(ctx);
        let err = admin.create_shop(tech_world()).await.unwrap_err();
        assert!(matches!(err, AppError::NotSignedIn));
    }

    #[tokio::test]
    async fn create_shop_stamps_owner_and_status() {
        let (_ctx, admin) = signed_in_admin().await;
        let shop_id = admin.create_shop(tech_world()).await.unwrap();

        let shop = admin.shop(&shop_id).await.unwrap().expect("shop exists");
        assert_eq!(shop.name, "Tech World");
        assert_eq!(shop.created_by, "admin_001");
        assert_eq!(shop.status, Status::Active);
        assert!(shop.updated_at.is_none());
    }

    #[tokio::test]
    async fn update_shop_merges_and_stamps_updated_at() {
        let (_ctx, admin) = signed_in_admin().await;
        let shop_id = admin.create_shop(tech_world()).await.unwrap();

        admin
            .update_shop(
                &shop_id,
                ShopPatch {
                    floor: Some("3".to_string()),
                    ..ShopPatch::default()
                },
            )
            .await
            .unwrap();

        let shop = admin.shop(&shop_id).await.unwrap().unwrap();
        assert_eq!(shop.floor, "3");
        assert_eq!(shop.name, "Tech World");
        assert!(shop.updated_at.is_some());
    }

    #[tokio::test]
    async fn list_shops_is_owner_scoped_and_newest_first() {
        let (ctx, admin) = signed_in_admin().await;
        let first = admin.create_shop(tech_world()).await.unwrap();
        let second = admin
            .create_shop(ShopDraft {
                name: "Fashion Hub".to_string(),
                description: "Latest fashion trends".to_string(),
                category: "Clothing".to_string(),
                floor: "1".to_string(),
                contact: "contact@fashionhub.com".to_string(),
            })
            .await
            .unwrap();

        // A shop owned by somebody else must not appear
        ctx.db
            .collection(Collection::Shops)
            .doc("foreign")
            .set(json!({ "name": "Other", "createdBy": "someone_else", "status": "active", "createdAt": "2024-01-01T00:00:00Z" }))
            .await
            .unwrap();

        let shops = admin.list_shops().await.unwrap();
        let ids: Vec<_> = shops.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[0], second, "newest first");
        assert_eq!(ids[1], first);
    }

    #[tokio::test]
    async fn deactivate_keeps_the_record() {
        let (_ctx, admin) = signed_in_admin().await;
        let shop_id = admin.create_shop(tech_world()).await.unwrap();

        admin.deactivate_shop(&shop_id).await.unwrap();

        let shop = admin.shop(&shop_id).await.unwrap().expect("still stored");
        assert_eq!(shop.status, Status::Inactive);
    }

    #[tokio::test]
    async fn deactivating_a_missing_shop_fails() {
        let (_ctx, admin) = signed_in_admin().await;
        let err = admin.deactivate_shop("ghost").await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Store(supermall_store::StoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn offer_and_category_creation() {
        let (_ctx, admin) = signed_in_admin().await;
        let shop_id = admin.create_shop(tech_world()).await.unwrap();

        let category_id = admin
            .create_category(CategoryDraft {
                name: "Electronics".to_string(),
                description: "Gadgets and devices".to_string(),
            })
            .await
            .unwrap();
        assert!(!category_id.is_empty());

        let offer_id = admin
            .create_offer(OfferDraft {
                title: "20% off headphones".to_string(),
                description: String::new(),
                shop_id: shop_id.clone(),
            })
            .await
            .unwrap();
        assert!(!offer_id.is_empty());

        let categories = admin.list_active_categories().await.unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "Electronics");
    }

    #[tokio::test]
    async fn owner_active_shops_excludes_deactivated() {
        let (_ctx, admin) = signed_in_admin().await;
        let keep = admin.create_shop(tech_world()).await.unwrap();
        let gone = admin
            .create_shop(ShopDraft {
                name: "Closing Down".to_string(),
                description: String::new(),
                category: "Clothing".to_string(),
                floor: "1".to_string(),
                contact: String::new(),
            })
            .await
            .unwrap();
        admin.deactivate_shop(&gone).await.unwrap();

        let shops = admin.list_owner_active_shops().await.unwrap();
        assert_eq!(shops.len(), 1);
        assert_eq!(shops[0].id, keep);
    }

    #[tokio::test]
    async fn sign_up_persists_profile_for_shop_owner_flow() {
        let ctx = MallContext::in_memory().unwrap();
        let auth = AuthManager::new(ctx.clone());
        auth.register(
            "owner@mall.com",
            "pw",
            SignUpProfile {
                shop_number: "101".to_string(),
                name: "Owner".to_string(),
                role: Role::User,
            },
        )
        .await
        .unwrap();

        let admin = AdminManager::new(ctx);
        let shop_id = admin.create_shop(tech_world()).await.unwrap();
        let shop = admin.shop(&shop_id).await.unwrap().unwrap();
        assert!(shop.created_by.starts_with("user_"));
    }
}
