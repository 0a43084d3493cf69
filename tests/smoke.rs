// ABOUTME: End-to-end smoke test for the full supermall lifecycle.
// ABOUTME: Registers an owner, builds out a shop with offers, filters, then deactivates it.

use std::sync::Arc;

use axum::body::Body;
use http::Request;
use supermall_app::MallContext;
use supermall_server::{AppState, create_router};
use supermall_store::{Latency, LocalStorage};
use tower::ServiceExt;

/// Helper to create a test AppState over a directory-backed storage area.
fn test_app_state(home: &std::path::Path) -> Arc<AppState> {
    let storage = LocalStorage::open(home).unwrap();
    let ctx = MallContext::open(storage, Latency::none()).unwrap();
    Arc::new(AppState::new(ctx))
}

/// Helper to extract JSON body from a response.
async fn json_body(resp: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn json_post(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn smoke_test_full_lifecycle() {
    let dir = tempfile::TempDir::new().unwrap();
    let state = test_app_state(dir.path());

    // 1. Register a shop owner
    let resp = create_router(Arc::clone(&state))
        .oneshot(json_post(
            "/api/auth/register",
            &serde_json::json!({
                "email": "owner@mall.com",
                "password": "hunter2",
                "shopNumber": "101",
                "name": "Smoke Owner"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), 201, "register should return 201");
    let json = json_body(resp).await;
    assert_eq!(json["user"]["email"], "owner@mall.com");
    assert_eq!(json["redirect"], "user-dashboard.html");

    // 2. Create a category for the shop form
    let resp = create_router(Arc::clone(&state))
        .oneshot(json_post(
            "/api/categories",
            &serde_json::json!({ "name": "Electronics", "description": "Gadgets" }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), 201, "create category should return 201");

    // 3. Create a shop
    let resp = create_router(Arc::clone(&state))
        .oneshot(json_post(
            "/api/shops",
            &serde_json::json!({
                "name": "Tech World",
                "description": "Latest gadgets",
                "category": "Electronics",
                "floor": "2",
                "contact": "info@techworld.com"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), 201, "create shop should return 201");
    let json = json_body(resp).await;
    let shop_id = json["shopId"].as_str().unwrap().to_string();
    assert!(!shop_id.is_empty(), "shopId should be present");

    // 4. Create an offer for the shop
    let resp = create_router(Arc::clone(&state))
        .oneshot(json_post(
            "/api/offers",
            &serde_json::json!({
                "title": "20% off headphones",
                "description": "This week only",
                "shopId": shop_id
            }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), 201, "create offer should return 201");

    // 5. The public listing finds the shop through its filters
    let resp = create_router(Arc::clone(&state))
        .oneshot(
            Request::get("/api/shops?category=Electronics&floor=2")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 200, "filtered listing should return 200");
    let json = json_body(resp).await;
    let shops = json["shops"].as_array().unwrap();
    assert_eq!(shops.len(), 1, "filters should match the one shop");
    assert_eq!(shops[0]["name"], "Tech World");
    assert_eq!(shops[0]["createdBy"], state.ctx.auth.current_user().await.unwrap().uid);

    // 6. The shop's offers come back newest first
    let resp = create_router(Arc::clone(&state))
        .oneshot(
            Request::get(format!("/api/shops/{shop_id}/offers"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let json = json_body(resp).await;
    let offers = json["offers"].as_array().unwrap();
    assert_eq!(offers.len(), 1);
    assert_eq!(offers[0]["title"], "20% off headphones");

    // 7. Edit the shop via a partial update
    let resp = create_router(Arc::clone(&state))
        .oneshot(
            Request::patch(format!("/api/shops/{shop_id}"))
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::json!({ "floor": "3" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 200, "update should return 200");

    let resp = create_router(Arc::clone(&state))
        .oneshot(
            Request::get(format!("/api/shops/{shop_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let json = json_body(resp).await;
    assert_eq!(json["floor"], "3", "patched field should change");
    assert_eq!(json["name"], "Tech World", "other fields should survive");

    // 8. "Delete" the shop and verify it leaves the active listing
    let resp = create_router(Arc::clone(&state))
        .oneshot(
            Request::delete(format!("/api/shops/{shop_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 200, "delete should return 200");

    let resp = create_router(Arc::clone(&state))
        .oneshot(Request::get("/api/shops").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let json = json_body(resp).await;
    assert!(
        json["shops"].as_array().unwrap().is_empty(),
        "deactivated shop should not be listed"
    );

    // The record itself is still stored
    let resp = create_router(Arc::clone(&state))
        .oneshot(
            Request::get(format!("/api/shops/{shop_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 200, "record should remain readable");
    let json = json_body(resp).await;
    assert_eq!(json["status"], "inactive");

    // 9. The action log captured the session
    let resp = create_router(Arc::clone(&state))
        .oneshot(Request::get("/api/logs").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let json = json_body(resp).await;
    let logs = json["logs"].as_array().unwrap();
    assert!(
        logs.iter().any(|e| e["message"] == "shop created successfully"),
        "log should record the shop creation"
    );

    // 10. Logout clears the session
    let resp = create_router(Arc::clone(&state))
        .oneshot(json_post("/api/auth/logout", &serde_json::json!({})))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200, "logout should return 200");

    let resp = create_router(Arc::clone(&state))
        .oneshot(Request::get("/api/auth/session").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let json = json_body(resp).await;
    assert!(json["user"].is_null(), "session should be gone");

    // 11. Everything above survived to disk
    let reopened = test_app_state(dir.path());
    let resp = create_router(reopened)
        .oneshot(
            Request::get(format!("/api/shops/{shop_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 200, "shop should survive a restart");
}
