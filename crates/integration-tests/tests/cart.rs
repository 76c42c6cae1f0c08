//! Cart and wishlist flows, including persistence across restarts.

use redcart_integration_tests::{TestApp, body, catalog, product};
use reqwest::StatusCode;
use serde_json::{Value, json};

async fn add(app: &TestApp, product_id: u32) -> Value {
    let response = app.post("/cart/items", &json!({"product_id": product_id})).await;
    assert_eq!(response.status(), StatusCode::OK);
    body(response).await
}

// ============================================================================
// Cart
// ============================================================================

#[tokio::test]
async fn test_empty_cart() {
    let app = TestApp::spawn().await;

    let cart = body(app.get("/cart").await).await;
    assert_eq!(cart["item_count"], 0);
    assert_eq!(cart["checkout"]["total_display"], "$0.00");
    assert!(app.persisted("cartItems").is_none());
}

#[tokio::test]
async fn test_add_merges_lines_and_persists() {
    let app = TestApp::spawn().await;
    app.mount_products(&catalog(3)).await;

    add(&app, 2).await;
    add(&app, 3).await;
    let cart = add(&app, 2).await;

    assert_eq!(cart["item_count"], 2);
    assert_eq!(cart["total_quantity"], 3);
    assert_eq!(cart["items"][0]["line"]["productId"], 2);
    assert_eq!(cart["items"][0]["line"]["quantity"], 2);
    assert_eq!(cart["items"][0]["line_total_display"], "$40.00");
    assert_eq!(cart["checkout"]["subtotal_display"], "$70.00");

    let saved = app.persisted("cartItems").expect("cart was persisted");
    let lines = saved.as_array().expect("cart persists as a flat array");
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["productId"], 2);
    assert_eq!(lines[0]["quantity"], 2);
    assert_eq!(lines[1]["title"], "Product 3");

    let view = body(app.get("/products/2").await).await;
    assert_eq!(view["in_cart"], true);
    assert_eq!(view["cart_quantity"], 2);
}

#[tokio::test]
async fn test_add_unknown_product() {
    let app = TestApp::spawn().await;
    app.mount_products(&catalog(3)).await;

    let response = app.post("/cart/items", &json!({"product_id": 77})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(app.persisted("cartItems").is_none());
}

#[tokio::test]
async fn test_update_quantity() {
    let app = TestApp::spawn().await;
    app.mount_products(&catalog(3)).await;
    add(&app, 1).await;

    let cart = body(app.patch("/cart/items/1", &json!({"quantity": 5})).await).await;
    assert_eq!(cart["items"][0]["line"]["quantity"], 5);
    assert_eq!(app.persisted("cartItems").expect("persisted")[0]["quantity"], 5);

    for rejected in [0, -3] {
        let cart = body(app.patch("/cart/items/1", &json!({"quantity": rejected})).await).await;
        assert_eq!(cart["items"][0]["line"]["quantity"], 5);
    }

    let cart = body(app.patch("/cart/items/2", &json!({"quantity": 4})).await).await;
    assert_eq!(cart["item_count"], 1);
}

#[tokio::test]
async fn test_remove_and_clear() {
    let app = TestApp::spawn().await;
    app.mount_products(&catalog(3)).await;
    add(&app, 1).await;
    add(&app, 2).await;

    let cart = body(app.delete("/cart/items/1").await).await;
    assert_eq!(cart["item_count"], 1);
    assert_eq!(cart["items"][0]["line"]["productId"], 2);

    let cart = body(app.delete("/cart").await).await;
    assert_eq!(cart["item_count"], 0);
    assert!(!app.data_file("cartItems").exists());
}

#[tokio::test]
async fn test_checkout_shipping() {
    let app = TestApp::spawn().await;
    app.mount_products(&[product(1, "Gold Watch", "mens-watches", 99.99)])
        .await;
    add(&app, 1).await;

    let pickup = body(app.get("/cart?shipping=pickup").await).await;
    assert_eq!(pickup["checkout"]["shipping_display"], "Free");
    assert_eq!(pickup["checkout"]["total_display"], "$99.99");

    let delivery = body(app.get("/cart?shipping=delivery").await).await;
    assert_eq!(delivery["checkout"]["shipping_display"], "$9.90");
    assert_eq!(delivery["checkout"]["total_display"], "$109.89");

    let response = app.get("/cart?shipping=drone").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cart_survives_restart() {
    let app = TestApp::spawn().await;
    app.mount_products(&catalog(3)).await;
    add(&app, 3).await;
    add(&app, 3).await;

    let app = app.restart().await;
    let cart = body(app.get("/cart").await).await;
    assert_eq!(cart["item_count"], 1);
    assert_eq!(cart["items"][0]["line"]["quantity"], 2);
}

#[tokio::test]
async fn test_corrupt_cart_file_starts_empty() {
    let app = TestApp::spawn().await;
    std::fs::write(app.data_file("cartItems"), "{not json").expect("write cart file");

    let app = app.restart().await;
    let cart = body(app.get("/cart").await).await;
    assert_eq!(cart["item_count"], 0);
}

// ============================================================================
// Wishlist
// ============================================================================

#[tokio::test]
async fn test_wishlist_toggle() {
    let app = TestApp::spawn().await;
    app.mount_products(&catalog(3)).await;

    let saved = body(app.post("/wishlist/toggle", &json!({"product_id": 2})).await).await;
    assert_eq!(saved["saved"], true);
    assert_eq!(saved["count"], 1);
    assert_eq!(saved["items"][0]["title"], "Product 2");

    let persisted = app.persisted("wishlist").expect("wishlist was persisted");
    assert_eq!(persisted[0]["id"], 2);

    let view = body(app.get("/products/2").await).await;
    assert_eq!(view["in_wishlist"], true);

    let unsaved = body(app.post("/wishlist/toggle", &json!({"product_id": 2})).await).await;
    assert_eq!(unsaved["saved"], false);
    assert_eq!(unsaved["count"], 0);
}

#[tokio::test]
async fn test_wishlist_remove_and_clear() {
    let app = TestApp::spawn().await;
    app.mount_products(&catalog(3)).await;
    for id in [1, 2, 3] {
        app.post("/wishlist/toggle", &json!({"product_id": id})).await;
    }

    let wishlist = body(app.delete("/wishlist/items/2").await).await;
    assert_eq!(wishlist["count"], 2);

    let wishlist = body(app.delete("/wishlist").await).await;
    assert_eq!(wishlist["count"], 0);
    assert!(!app.data_file("wishlist").exists());
}
