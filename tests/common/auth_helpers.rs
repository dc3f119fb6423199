//! Authentication test helpers
//!
//! Provides utilities for registering test users, obtaining tokens,
//! and crafting tokens the server should refuse.

use axum::http::StatusCode;
use axum_test::{TestResponse, TestServer};
use ecom::backend::auth::sessions::{AccessClaims, VerificationClaims, VERIFY_EMAIL_PURPOSE};
use jsonwebtoken::{encode, get_current_timestamp, EncodingKey, Header};

use super::app::{TestApp, TEST_SECRET};

/// Password every helper-registered user gets
pub const TEST_PASSWORD: &str = "test_password_123";

/// Test user credentials
pub struct TestUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub token: String,
}

/// Email address derived from a username
pub fn email_for(username: &str) -> String {
    format!("{}@example.com", username)
}

/// POST /registration
pub async fn register(server: &TestServer, username: &str, email: &str, password: &str) -> TestResponse {
    server
        .post("/registration")
        .json(&serde_json::json!({
            "username": username,
            "email": email,
            "password": password,
        }))
        .await
}

/// POST /token
pub async fn request_token(server: &TestServer, username: &str, password: &str) -> TestResponse {
    server
        .post("/token")
        .form(&[("username", username), ("password", password)])
        .await
}

/// Register a user and log them in
pub async fn create_test_user(app: &TestApp, username: &str) -> TestUser {
    let email = email_for(username);

    let response = register(&app.server, username, &email, TEST_PASSWORD).await;
    assert_eq!(response.status_code(), StatusCode::OK, "registration failed: {}", response.text());

    let response = request_token(&app.server, username, TEST_PASSWORD).await;
    assert_eq!(response.status_code(), StatusCode::OK, "login failed: {}", response.text());
    let body: serde_json::Value = response.json();
    let token = body["access_token"]
        .as_str()
        .expect("access_token missing")
        .to_string();

    let claims = app
        .state
        .tokens
        .verify_access_token(&token)
        .expect("server issued an invalid token");

    TestUser {
        id: claims.id,
        username: username.to_string(),
        email,
        token,
    }
}

/// An access token that expired a minute ago
pub fn expired_access_token(user_id: i64, username: &str) -> String {
    let now = get_current_timestamp();
    let claims = AccessClaims {
        id: user_id,
        username: username.to_string(),
        exp: now - 60,
        iat: now - 120,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(TEST_SECRET.as_bytes()))
        .expect("Failed to encode test token")
}

/// A verification token that expired a minute ago
pub fn expired_verification_token(email: &str) -> String {
    let now = get_current_timestamp();
    let claims = VerificationClaims {
        email: email.to_string(),
        purpose: VERIFY_EMAIL_PURPOSE.to_string(),
        exp: now - 60,
        iat: now - 120,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(TEST_SECRET.as_bytes()))
        .expect("Failed to encode test token")
}

/// Create authorization header value
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}
