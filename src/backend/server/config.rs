/**
 * Server Configuration
 *
 * This module turns the loaded `AppConfig` into the services the server
 * needs: the store and the optional mailer.
 *
 * # Error Handling
 *
 * Failures are logged but do not prevent server startup. A store that cannot
 * be reached is left as `None` (handlers answer 503), and a mailer that cannot
 * be built is left as `None` (confirmation links are logged instead).
 */

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::str::FromStr;
use std::sync::Arc;

use crate::backend::email::Mailer;
use crate::backend::store::{MemoryStore, PgStore, Store};
use crate::shared::{AppConfig, DatabaseSettings, StoreBackend};

/// Store configuration result
///
/// `None` if the database is not available.
pub type StoreConfig = Option<Arc<dyn Store>>;

/// Load and initialize the configured store
///
/// For PostgreSQL this function:
/// 1. Builds connect options from `DATABASE_URL` or the `DB_*` parts
/// 2. Creates a connection pool
/// 3. Runs database migrations
///
/// # Returns
///
/// - `Some(store)` if the store is ready
/// - `None` if no URL is configured or the connection fails
pub async fn load_store(config: &AppConfig) -> StoreConfig {
    if config.store_backend == StoreBackend::Memory {
        tracing::warn!("Using in-memory store; data is lost on restart");
        return Some(Arc::new(MemoryStore::new()));
    }

    if !config.database.is_configured() {
        tracing::warn!("DATABASE_URL (or DB_HOST/DB_USER/DB_NAME) not set. Database features will be disabled.");
        return None;
    }

    let options = match connect_options(&config.database) {
        Ok(options) => options,
        Err(e) => {
            tracing::error!("Invalid DATABASE_URL: {}", e);
            tracing::warn!("Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("Database connection pool created successfully");

    let store = PgStore::new(pool);

    tracing::info!("Running database migrations...");
    match store.migrate().await {
        Ok(()) => tracing::info!("Database migrations completed successfully"),
        Err(e) => {
            tracing::error!("Failed to run database migrations: {}", e);
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Some(Arc::new(store))
}

/// Postgres connect options for the configured database
///
/// `DATABASE_URL` is parsed as-is. The `DB_*` parts are passed as separate
/// fields, so passwords containing `@`, `/`, `#` or `:` need no escaping.
pub fn connect_options(settings: &DatabaseSettings) -> Result<PgConnectOptions, sqlx::Error> {
    if let Some(url) = &settings.url {
        return PgConnectOptions::from_str(url);
    }

    let mut options = PgConnectOptions::new().port(settings.port);
    if let Some(host) = &settings.host {
        options = options.host(host);
    }
    if let Some(user) = &settings.user {
        options = options.username(user);
    }
    if let Some(password) = &settings.password {
        options = options.password(password);
    }
    if let Some(name) = &settings.name {
        options = options.database(name);
    }
    Ok(options)
}

/// Build the SMTP mailer if SMTP is configured
pub fn load_mailer(config: &AppConfig) -> Option<Mailer> {
    let settings = config.smtp.as_ref()?;

    match Mailer::new(settings) {
        Ok(mailer) => {
            tracing::info!("SMTP mailer configured for {}:{}", settings.host, settings.port);
            Some(mailer)
        }
        Err(e) => {
            tracing::error!("Failed to configure SMTP mailer: {}", e);
            None
        }
    }
}
