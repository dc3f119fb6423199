/**
 * API Route Handlers
 *
 * This module wires the API endpoints onto the router.
 *
 * # Routes
 *
 * ## Authentication
 * - `POST /token` - Exchange username and password for an access token
 * - `POST /registration` - User registration
 * - `GET /verification` - Email confirmation link
 * - `POST /user/me` - Get current user info (requires authentication)
 *
 * ## Uploads
 * - `POST /upload/profile` - Business logo (requires authentication)
 * - `POST /uploadfile/product/{id}` - Product image (requires authentication)
 *
 * ## Catalog
 * - `POST /products` - Create a product (requires authentication)
 * - `GET /products/{id}` - Read a product
 * - `GET /business/me` - Caller's business (requires authentication)
 */

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::backend::auth::{get_me, issue_token, register, verify_email};
use crate::backend::catalog::{create_product, get_my_business, get_product};
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;
use crate::backend::upload::{upload_business_logo, upload_product_image};

/// Configure API routes
///
/// Public routes are added directly. Protected routes are collected on their
/// own router behind `auth_middleware` and merged in, so the middleware never
/// runs for public paths.
///
/// # Arguments
///
/// * `router` - The router to add routes to
/// * `app_state` - State handed to the auth middleware
///
/// # Returns
///
/// Router with API routes configured
pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/user/me", post(get_me))
        .route("/business/me", get(get_my_business))
        .route("/products", post(create_product))
        .route(
            "/upload/profile",
            post(upload_business_logo)
                .layer(DefaultBodyLimit::max(app_state.config.max_upload_bytes)),
        )
        .route(
            "/uploadfile/product/{id}",
            post(upload_product_image)
                .layer(DefaultBodyLimit::max(app_state.config.max_upload_bytes)),
        )
        .route_layer(from_fn_with_state(app_state.clone(), auth_middleware));

    router
        .route("/token", post(issue_token))
        .route("/registration", post(register))
        .route("/verification", get(verify_email))
        .route("/products/{id}", get(get_product))
        .merge(protected)
}
