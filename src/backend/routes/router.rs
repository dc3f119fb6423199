/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. Index route
 * 2. API routes (auth, uploads, catalog)
 * 3. Static files under `/static`
 * 4. Fallback handler (404)
 */

use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// `GET /`
pub async fn index() -> Json<Value> {
    Json(json!({ "Message": "Hello World" }))
}

async fn not_found() -> BackendError {
    BackendError::not_found("Not Found")
}

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state containing the store and services
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
///
/// ## Static Files
///
/// Files are served from the configured static directory; uploaded images end
/// up under `/static/images/`.
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new().route("/", get(index));

    // Add API routes
    let router = configure_api_routes(router, &app_state);

    // Add static file serving
    let router = router.nest_service("/static", ServeDir::new(&app_state.config.static_dir));

    router
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
