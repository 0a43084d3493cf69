// ABOUTME: Shopper-facing reads: active shops with category/floor filtering, categories,
// ABOUTME: floors, per-shop offers, and product comparison.

use serde::{Deserialize, Serialize};
use supermall_core::{Category, Collection, Offer, Product, Shop, Status};
use supermall_store::Direction;

use crate::context::{AppError, MallContext};

/// Optional equality filters for the shop listing. An absent or empty
/// value means no filter on that field, so the empty filter lists every
/// active shop. Empty strings arrive from unselected filter controls and
/// bare query params.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShopFilter {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub floor: Option<String>,
}

/// Read-side manager for the shopper views. Everything here is scoped to
/// active records; inactive ones stay stored but invisible.
#[derive(Clone)]
pub struct StorefrontManager {
    ctx: MallContext,
}

impl StorefrontManager {
    pub fn new(ctx: MallContext) -> Self {
        Self { ctx }
    }

    /// Active categories for the filter select.
    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
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

    /// Active shops, optionally narrowed by category and floor.
    pub async fn list_shops(&self, filter: &ShopFilter) -> Result<Vec<Shop>, AppError> {
        let mut query = self
            .ctx
            .db
            .collection(Collection::Shops)
            .where_eq("status", Status::Active.as_str());

        if let Some(category) = filter.category.as_deref().filter(|c| !c.is_empty()) {
            query = query.where_eq("category", category);
        }
        if let Some(floor) = filter.floor.as_deref().filter(|f| !f.is_empty()) {
            query = query.where_eq("floor", floor);
        }

        let snaps = query.get().await?;
        let mut shops = Vec::with_capacity(snaps.len());
        for snap in &snaps {
            if let Some(shop) = snap.deserialize::<Shop>()? {
                shops.push(shop);
            }
        }
        Ok(shops)
    }

    /// Distinct floors that have at least one active shop, sorted.
    pub async fn list_floors(&self) -> Result<Vec<String>, AppError> {
        let shops = self.list_shops(&ShopFilter::default()).await?;
        let mut floors: Vec<String> = shops.into_iter().map(|s| s.floor).collect();
        floors.sort();
        floors.dedup();
        Ok(floors)
    }

    /// Active offers for one shop, newest first.
    pub async fn list_shop_offers(&self, shop_id: &str) -> Result<Vec<Offer>, AppError> {
        let snaps = self
            .ctx
            .db
            .collection(Collection::Offers)
            .where_eq("shopId", shop_id)
            .where_eq("status", Status::Active.as_str())
            .order_by("createdAt", Direction::Desc)
            .get()
            .await?;

        let mut offers = Vec::with_capacity(snaps.len());
        for snap in &snaps {
            if let Some(offer) = snap.deserialize::<Offer>()? {
                offers.push(offer);
            }
        }
        Ok(offers)
    }

    /// Fetch the named products for side-by-side comparison. Ids that do
    /// not resolve to a document are skipped, not errors.
    pub async fn compare_products(&self, product_ids: &[String]) -> Result<Vec<Product>, AppError> {
        let collection = self.ctx.db.collection(Collection::Products);
        let mut products = Vec::with_capacity(product_ids.len());
        for id in product_ids {
            let snap = collection.doc(id).get().await?;
            if !snap.exists {
                continue;
            }
            if let Some(product) = snap.deserialize::<Product>()? {
                products.push(product);
            }
        }
        self.ctx.logger.info(
            "products comparison",
            serde_json::json!({ "productIds": product_ids, "count": products.len() }),
        );
        Ok(products)
    }
}
