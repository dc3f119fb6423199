//! Upload API integration tests
//!
//! Logo and product image uploads, including the ownership rules.

use axum::http::StatusCode;
use axum_test::multipart::MultipartForm;
use ecom::backend::store::Store;
use pretty_assertions::assert_eq;

use crate::common::*;

/// Create a product through the API and return its id
async fn create_product(app: &TestApp, user: &TestUser) -> i64 {
    let response = app
        .server
        .post("/products")
        .authorization_bearer(&user.token)
        .json(&product_body("Desk lamp", "40.00", "30.00"))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK, "{}", response.text());
    let body: serde_json::Value = response.json();
    body["data"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_logo_upload_resizes_and_serves() {
    let app = TestApp::new();
    let user = create_test_user(&app, "alice").await;

    let response = app
        .server
        .post("/upload/profile")
        .authorization_bearer(&user.token)
        .multipart(file_form("logo.png", png_bytes(64, 32)))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
    let url = body["filename"].as_str().unwrap();
    assert!(url.starts_with("http://localhost:8000/static/images/"), "{}", url);

    let name = url.rsplit('/').next().unwrap();
    assert_eq!(name.len(), 24);
    assert!(name.ends_with(".png"));
    assert!(name[..20].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));

    let business = app.store.get_business_by_owner(user.id).await.unwrap().unwrap();
    assert_eq!(business.logo.as_deref(), Some(name));

    let stored = image::open(app.images_dir().join(name)).unwrap();
    assert_eq!((stored.width(), stored.height()), (200, 200));

    let served = app.server.get(&format!("/static/images/{}", name)).await;
    assert_eq!(served.status_code(), StatusCode::OK);
    assert!(!served.as_bytes().is_empty());
}

#[tokio::test]
async fn test_logo_upload_replaces_previous_logo() {
    let app = TestApp::new();
    let user = create_test_user(&app, "alice").await;

    for _ in 0..2 {
        let response = app
            .server
            .post("/upload/profile")
            .authorization_bearer(&user.token)
            .multipart(file_form("logo.png", png_bytes(10, 10)))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }

    let business = app.store.get_business_by_owner(user.id).await.unwrap().unwrap();
    let logo = business.logo.unwrap();
    assert!(app.stored_images().contains(&logo));
}

#[tokio::test]
async fn test_logo_upload_accepts_jpg() {
    let app = TestApp::new();
    let user = create_test_user(&app, "alice").await;

    let response = app
        .server
        .post("/upload/profile")
        .authorization_bearer(&user.token)
        .multipart(file_form("photo.JPG", png_bytes(30, 30)))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert!(body["filename"].as_str().unwrap().ends_with(".jpg"));
}

#[tokio::test]
async fn test_logo_upload_rejects_extension() {
    let app = TestApp::new();
    let user = create_test_user(&app, "alice").await;

    let response = app
        .server
        .post("/upload/profile")
        .authorization_bearer(&user.token)
        .multipart(file_form("logo.gif", png_bytes(10, 10)))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<serde_json::Value>(),
        serde_json::json!({"status": "error", "details": "file extension not allowed"})
    );
    assert!(app.stored_images().is_empty());

    let business = app.store.get_business_by_owner(user.id).await.unwrap().unwrap();
    assert_eq!(business.logo, None);
}

#[tokio::test]
async fn test_logo_upload_rejects_undecodable_file() {
    let app = TestApp::new();
    let user = create_test_user(&app, "alice").await;

    let response = app
        .server
        .post("/upload/profile")
        .authorization_bearer(&user.token)
        .multipart(file_form("logo.png", b"definitely not a png".to_vec()))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    crate::assert_detail!(response, "Invalid image file");
    assert!(app.stored_images().is_empty());
}

#[tokio::test]
async fn test_logo_upload_requires_file_field() {
    let app = TestApp::new();
    let user = create_test_user(&app, "alice").await;

    let response = app
        .server
        .post("/upload/profile")
        .authorization_bearer(&user.token)
        .multipart(MultipartForm::new().add_text("note", "no file here"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_logo_upload_requires_token() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/upload/profile")
        .multipart(file_form("logo.png", png_bytes(10, 10)))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert!(app.stored_images().is_empty());
}

#[tokio::test]
async fn test_product_image_upload() {
    let app = TestApp::new();
    let user = create_test_user(&app, "alice").await;
    let product_id = create_product(&app, &user).await;

    let response = app
        .server
        .post(&format!("/uploadfile/product/{}", product_id))
        .authorization_bearer(&user.token)
        .multipart(file_form("lamp.png", png_bytes(300, 120)))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    let name = body["filename"].as_str().unwrap().rsplit('/').next().unwrap().to_string();

    let product = app.store.get_product(product_id).await.unwrap().unwrap();
    assert_eq!(product.product_image, Some(name.clone()));

    let stored = image::open(app.images_dir().join(&name)).unwrap();
    assert_eq!((stored.width(), stored.height()), (200, 200));
}

#[tokio::test]
async fn test_product_image_upload_by_non_owner() {
    let app = TestApp::new();
    let alice = create_test_user(&app, "alice").await;
    let mallory = create_test_user(&app, "mallory").await;
    let product_id = create_product(&app, &alice).await;

    let response = app
        .server
        .post(&format!("/uploadfile/product/{}", product_id))
        .authorization_bearer(&mallory.token)
        .multipart(file_form("evil.png", png_bytes(10, 10)))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    crate::assert_detail!(response, "Invalid token or expired token");
    assert!(app.stored_images().is_empty());

    let product = app.store.get_product(product_id).await.unwrap().unwrap();
    assert_eq!(product.product_image, None);
}

#[tokio::test]
async fn test_product_image_upload_unknown_product() {
    let app = TestApp::new();
    let user = create_test_user(&app, "alice").await;

    let response = app
        .server
        .post("/uploadfile/product/9999")
        .authorization_bearer(&user.token)
        .multipart(file_form("lamp.png", png_bytes(10, 10)))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    crate::assert_detail!(response, "Product not found");
    assert!(app.stored_images().is_empty());
}

#[tokio::test]
async fn test_product_image_upload_rejects_extension() {
    let app = TestApp::new();
    let user = create_test_user(&app, "alice").await;
    let product_id = create_product(&app, &user).await;

    let response = app
        .server
        .post(&format!("/uploadfile/product/{}", product_id))
        .authorization_bearer(&user.token)
        .multipart(file_form("lamp.webp", png_bytes(10, 10)))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "error");
    assert!(app.stored_images().is_empty());
}

#[tokio::test]
async fn test_product_image_upload_non_numeric_id_is_json_400() {
    let app = TestApp::new();
    let user = create_test_user(&app, "alice").await;

    let response = app
        .server
        .post("/uploadfile/product/abc")
        .authorization_bearer(&user.token)
        .multipart(file_form("lamp.png", png_bytes(10, 10)))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], 400);
    assert!(body["detail"].is_string());
    assert!(app.stored_images().is_empty());
}

#[tokio::test]
async fn test_logo_removed_when_record_update_fails() {
    let app = TestApp::with_failing_image_updates();
    let user = create_test_user(&app, "alice").await;

    let response = app
        .server
        .post("/upload/profile")
        .authorization_bearer(&user.token)
        .multipart(file_form("logo.png", png_bytes(10, 10)))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    crate::assert_detail!(response, "Internal server error");
    assert!(app.stored_images().is_empty(), "{:?}", app.stored_images());

    let business = app.store.get_business_by_owner(user.id).await.unwrap().unwrap();
    assert_eq!(business.logo, None);
}

#[tokio::test]
async fn test_product_image_removed_when_record_update_fails() {
    let app = TestApp::with_failing_image_updates();
    let user = create_test_user(&app, "alice").await;
    let product_id = create_product(&app, &user).await;

    let response = app
        .server
        .post(&format!("/uploadfile/product/{}", product_id))
        .authorization_bearer(&user.token)
        .multipart(file_form("lamp.png", png_bytes(10, 10)))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(app.stored_images().is_empty(), "{:?}", app.stored_images());

    let product = app.store.get_product(product_id).await.unwrap().unwrap();
    assert_eq!(product.product_image, None);
}
