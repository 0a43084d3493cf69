// ABOUTME: One-shot sample data for fresh storage areas: categories, shops and products.
// ABOUTME: Guarded by a storage flag so reopening the same area never duplicates records.

use serde_json::json;
use supermall_core::Collection;

use crate::context::{AppError, MallContext};

const SAMPLE_FLAG: &str = "sampleDataInitialized";

/// Seed the demo records unless this storage area has been seeded before.
/// Returns whether anything was written. Fixed document ids keep the seed
/// idempotent even if the flag is lost.
pub async fn initialize_sample_data(ctx: &MallContext) -> Result<bool, AppError> {
    if ctx.storage.get_item(SAMPLE_FLAG).is_some() {
        return Ok(false);
    }

    let categories = ctx.db.collection(Collection::Categories);
    categories
        .doc("cat1")
        .set(json!({
            "name": "Clothing",
            "description": "Fashion and apparel",
            "status": "active",
            "createdAt": "2024-01-01T00:00:00Z"
        }))
        .await?;
    categories
        .doc("cat2")
        .set(json!({
            "name": "Electronics",
            "description": "Gadgets and devices",
            "status": "active",
            "createdAt": "2024-01-01T00:00:00Z"
        }))
        .await?;
    categories
        .doc("cat3")
        .set(json!({
            "name": "Food & Beverages",
            "description": "Restaurants and cafes",
            "status": "active",
            "createdAt": "2024-01-01T00:00:00Z"
        }))
        .await?;

    let shops = ctx.db.collection(Collection::Shops);
    shops
        .doc("shop1")
        .set(json!({
            "name": "Fashion Hub",
            "description": "Latest fashion trends",
            "category": "Clothing",
            "floor": "1",
            "contact": "contact@fashionhub.com",
            "createdBy": "admin",
            "status": "active",
            "createdAt": "2024-01-01T00:00:00Z"
        }))
        .await?;
    shops
        .doc("shop2")
        .set(json!({
            "name": "Tech World",
            "description": "Latest gadgets and electronics",
            "category": "Electronics",
            "floor": "2",
            "contact": "info@techworld.com",
            "createdBy": "admin",
            "status": "active",
            "createdAt": "2024-01-01T00:00:00Z"
        }))
        .await?;

    let products = ctx.db.collection(Collection::Products);
    products
        .doc("prod1")
        .set(json!({
            "name": "Wireless Earbuds",
            "description": "Noise cancelling, 24h battery",
            "price": 49.99,
            "shopId": "shop2",
            "status": "active",
            "createdAt": "2024-01-01T00:00:00Z"
        }))
        .await?;
    products
        .doc("prod2")
        .set(json!({
            "name": "Smartwatch",
            "description": "Fitness tracking and notifications",
            "price": 129.99,
            "shopId": "shop2",
            "status": "active",
            "createdAt": "2024-01-01T00:00:00Z"
        }))
        .await?;
    products
        .doc("prod3")
        .set(json!({
            "name": "Denim Jacket",
            "description": "Classic fit",
            "price": 59.99,
            "shopId": "shop1",
            "status": "active",
            "createdAt": "2024-01-01T00:00:00Z"
        }))
        .await?;

    ctx.storage.set_item(SAMPLE_FLAG, "true")?;
    ctx.logger.info("sample data initialized", json!({}));
    Ok(true)
}
