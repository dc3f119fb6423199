/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including state creation, store loading, and route configuration.
 *
 * # Initialization Process
 *
 * 1. Make sure the upload directory exists
 * 2. Load the store (PostgreSQL or in-memory) and the optional mailer
 * 3. Build the application state
 * 4. Create and configure the router
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_mailer, load_store};
use crate::backend::server::state::AppState;
use crate::shared::AppConfig;

/// Create and configure the Axum application
///
/// # Arguments
///
/// * `config` - Loaded configuration
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
///
/// # Error Handling
///
/// The function is designed to be resilient:
/// - Missing database: server starts, store-backed routes answer 503
/// - Migration failures: logged but don't prevent startup
/// - Missing SMTP: confirmation links are logged
pub async fn create_app(config: AppConfig) -> Router<()> {
    tracing::info!("Initializing ECOM API backend server");

    let images_dir = config.images_dir();
    if let Err(e) = tokio::fs::create_dir_all(&images_dir).await {
        tracing::error!("Failed to create image directory {}: {}", images_dir.display(), e);
    }

    let store = load_store(&config).await;
    let mailer = load_mailer(&config);

    let mut app_state = AppState::new(config, store);
    if let Some(mailer) = mailer {
        app_state = app_state.with_mailer(mailer);
    }

    let app = create_router(app_state);
    tracing::info!("Router configured");

    app
}
