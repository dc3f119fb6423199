//! Catalog API integration tests

use axum::http::StatusCode;
use ecom::backend::store::Store;
use pretty_assertions::assert_eq;

use crate::common::*;

#[tokio::test]
async fn test_create_and_read_product() {
    let app = TestApp::new();
    let user = create_test_user(&app, "alice").await;

    let response = app
        .server
        .post("/products")
        .authorization_bearer(&user.token)
        .json(&product_body("Desk lamp", "40.00", "30.00"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    let product = &body["data"];
    assert_eq!(product["name"], "Desk lamp");
    assert_eq!(product["percentage_discount"], 25);
    assert_eq!(product["product_image"], serde_json::Value::Null);

    let id = product["id"].as_i64().unwrap();
    let response = app.server.get(&format!("/products/{}", id)).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["data"]["name"], "Desk lamp");
    assert_eq!(body["data"]["offer_expiration_date"], "2030-06-01");
}

#[tokio::test]
async fn test_product_belongs_to_callers_business() {
    let app = TestApp::new();
    let user = create_test_user(&app, "alice").await;

    let business = app
        .server
        .get("/business/me")
        .authorization_bearer(&user.token)
        .await
        .json::<serde_json::Value>();

    let product = app
        .server
        .post("/products")
        .authorization_bearer(&user.token)
        .json(&product_body("Mug", "10.00", "10.00"))
        .await
        .json::<serde_json::Value>();

    assert_eq!(product["data"]["business_id"], business["data"]["id"]);
    assert_eq!(product["data"]["percentage_discount"], 0);
}

#[tokio::test]
async fn test_create_product_validation() {
    let app = TestApp::new();
    let user = create_test_user(&app, "alice").await;

    let cases = [
        product_body("", "10.00", "5.00"),
        product_body(&"x".repeat(101), "10.00", "5.00"),
        product_body("Mug", "10.00", "12.00"),
        product_body("Mug", "-1.00", "-2.00"),
    ];

    for body in cases {
        let response = app
            .server
            .post("/products")
            .authorization_bearer(&user.token)
            .json(&body)
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{}", body);
    }
}

#[tokio::test]
async fn test_create_product_requires_token() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/products")
        .json(&product_body("Mug", "10.00", "5.00"))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    crate::assert_detail!(response, "Not authenticated");
}

#[tokio::test]
async fn test_unknown_product() {
    let app = TestApp::new();

    let response = app.server.get("/products/42").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    crate::assert_detail!(response, "Product not found");
}

#[tokio::test]
async fn test_my_business() {
    let app = TestApp::new();
    let user = create_test_user(&app, "alice").await;

    let response = app
        .server
        .get("/business/me")
        .authorization_bearer(&user.token)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["data"]["business_name"], "alice");
    assert_eq!(body["data"]["owner_id"], user.id);
}

#[tokio::test]
async fn test_non_numeric_product_id_is_json_400() {
    let app = TestApp::new();

    let response = app.server.get("/products/abc").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn test_product_fields_are_stored_trimmed() {
    let app = TestApp::new();
    let user = create_test_user(&app, "alice").await;

    let response = app
        .server
        .post("/products")
        .authorization_bearer(&user.token)
        .json(&product_body("  Desk lamp  ", "40.00", "30.00"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["data"]["name"], "Desk lamp");
}

#[tokio::test]
async fn test_price_above_column_capacity_is_rejected() {
    let app = TestApp::new();
    let user = create_test_user(&app, "alice").await;

    let response = app
        .server
        .post("/products")
        .authorization_bearer(&user.token)
        .json(&product_body("Mug", "10000000000.00", "5.00"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(app.store.get_product(1).await.unwrap().is_none());
}
