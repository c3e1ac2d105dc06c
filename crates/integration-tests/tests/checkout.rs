//! Checkout, bank details and inquiries.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::str::FromStr;

use axum::http::StatusCode;
use lumera_integration_tests::TestContext;
use rust_decimal::Decimal;
use serde_json::{Value, json};

fn customer() -> Value {
    json!({
        "name": "Asha Rao",
        "email": "asha@example.in",
        "mobile": "+91 98765 43210",
        "address": "12 MG Road",
        "city": "Bengaluru",
        "zipCode": "560001",
        "paymentReceiptUrl": "https://receipts.example/asha.png"
    })
}

#[tokio::test]
async fn test_checkout_without_cart_is_rejected() {
    let mut ctx = TestContext::new().await;

    let resp = ctx.post("/api/checkout", customer()).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["error"], "cart is empty");
}

#[tokio::test]
async fn test_checkout_places_order_and_empties_cart() {
    let mut ctx = TestContext::new().await;

    ctx.post(
        "/api/cart/items",
        json!({ "productId": 6, "selection": { "ringSize": 5 } }),
    )
    .await;
    ctx.post("/api/cart/items", json!({ "productId": 5 })).await;

    let resp = ctx.post("/api/checkout", customer()).await;
    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.body["status"], "pending");
    assert_eq!(resp.body["customer"]["email"], "asha@example.in");
    assert_eq!(resp.body["items"].as_array().unwrap().len(), 2);
    let total = Decimal::from_str(resp.body["totalAmount"].as_str().unwrap()).unwrap();
    assert_eq!(total, Decimal::from(4600));

    let cart = ctx.get("/api/cart").await;
    assert_eq!(cart.body["itemCount"], 0);

    let orders = ctx.state().orders().list().await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].total_amount, Decimal::from(4600));
    assert_eq!(
        orders[0].payment_receipt_url.as_deref(),
        Some("https://receipts.example/asha.png")
    );
}

#[tokio::test]
async fn test_checkout_rejects_invalid_customer() {
    let mut ctx = TestContext::new().await;
    ctx.post("/api/cart/items", json!({ "productId": 4 })).await;

    let mut bad_email = customer();
    bad_email["email"] = json!("asha-at-example");
    let resp = ctx.post("/api/checkout", bad_email).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let mut bad_mobile = customer();
    bad_mobile["mobile"] = json!("12345");
    let resp = ctx.post("/api/checkout", bad_mobile).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let mut no_address = customer();
    no_address["address"] = json!("  ");
    let resp = ctx.post("/api/checkout", no_address).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["error"], "missing required field: address");

    // A rejected checkout keeps the cart.
    let cart = ctx.get("/api/cart/count").await;
    assert_eq!(cart.body["count"], 1);
    assert!(ctx.state().orders().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_bank_details_unset_by_default() {
    let mut ctx = TestContext::new().await;

    let resp = ctx.get("/api/bank-details").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, Value::Null);
}

#[tokio::test]
async fn test_bank_details_from_environment() {
    let mut ctx = TestContext::with_env(&[
        ("LUMERA_BANK_ACCOUNT_HOLDER", "Lumera Jewels"),
        ("LUMERA_BANK_NAME", "Example Bank"),
        ("LUMERA_BANK_ACCOUNT_NUMBER", "000111222333"),
        ("LUMERA_BANK_IFSC", "EXMP0000001"),
        ("LUMERA_BANK_UPI_ID", "lumera@example"),
    ])
    .await;

    let resp = ctx.get("/api/bank-details").await;
    assert_eq!(resp.body["accountHolder"], "Lumera Jewels");
    assert_eq!(resp.body["ifscCode"], "EXMP0000001");
    assert_eq!(resp.body["upiId"], "lumera@example");
    assert!(resp.body.get("gstDetails").is_none());
}

#[tokio::test]
async fn test_product_inquiry_fills_product_name() {
    let mut ctx = TestContext::new().await;

    let resp = ctx
        .post(
            "/api/inquiries",
            json!({
                "name": "Vikram",
                "mobile": "9876543210",
                "message": "Is this stone certified?",
                "productId": 11
            }),
        )
        .await;

    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.body["productName"], "Yellow Sapphire (Pukhraj)");
    assert_eq!(resp.body["status"], "new");

    let inquiries = ctx.state().inquiries().list().await.unwrap();
    assert_eq!(inquiries.len(), 1);
}

#[tokio::test]
async fn test_inquiry_rejections() {
    let mut ctx = TestContext::new().await;

    let resp = ctx
        .post(
            "/api/inquiries",
            json!({ "name": "Vikram", "mobile": "9876543210", "message": "Hi", "productId": 500 }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);

    let resp = ctx
        .post(
            "/api/inquiries",
            json!({ "name": "Vikram", "mobile": "9876543210", "message": "   " }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["error"], "missing required field: message");
}
