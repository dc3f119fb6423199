/**
 * Application State Management
 *
 * This module defines the application state shared by every handler.
 *
 * # Architecture
 *
 * The `AppState` struct serves as the central state container for the
 * application, holding:
 * - The store (`None` when no database could be reached)
 * - Token service and password hasher
 * - Image store and optional mailer
 * - The loaded configuration
 *
 * # Thread Safety
 *
 * Every field is either immutable after start-up or an `Arc` around a
 * `Send + Sync` service, so cloning the state per request is cheap.
 */

use std::sync::Arc;

use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::sessions::TokenService;
use crate::backend::email::Mailer;
use crate::backend::error::BackendError;
use crate::backend::store::Store;
use crate::backend::upload::ImageStore;
use crate::shared::AppConfig;

/// Application state shared by every handler
///
/// # Usage
///
/// ```rust,no_run
/// use ecom::backend::server::state::AppState;
/// use ecom::backend::error::BackendError;
/// use axum::extract::State;
///
/// async fn handler(State(state): State<AppState>) -> Result<(), BackendError> {
///     let store = state.store()?;
///     let _user = store.get_user_by_id(1).await?;
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct AppState {
    /// Persistence backend
    ///
    /// This is `None` if the database is not configured or unreachable.
    /// Handlers go through `store()` which turns that into a 503.
    pub store: Option<Arc<dyn Store>>,

    /// Access and verification tokens
    pub tokens: TokenService,

    /// bcrypt hasher at the configured cost
    pub passwords: PasswordHasher,

    /// Where uploaded images are written
    pub images: ImageStore,

    /// SMTP mailer, `None` when SMTP is not configured
    pub mailer: Option<Mailer>,

    /// Loaded configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Build the state from configuration and an optional store
    ///
    /// The mailer is left unset; see `with_mailer`.
    pub fn new(config: AppConfig, store: Option<Arc<dyn Store>>) -> Self {
        let tokens = TokenService::new(
            &config.secret,
            config.access_token_ttl,
            config.verification_token_ttl,
        );
        let passwords = PasswordHasher::new(config.bcrypt_cost);
        let images = ImageStore::new(
            config.images_dir(),
            config.image_size,
            config.public_base_url.clone(),
        );

        Self {
            store,
            tokens,
            passwords,
            images,
            mailer: None,
            config: Arc::new(config),
        }
    }

    pub fn with_mailer(mut self, mailer: Mailer) -> Self {
        self.mailer = Some(mailer);
        self
    }

    /// The configured store
    ///
    /// # Errors
    ///
    /// `BackendError::ServiceUnavailable` when no store is configured
    pub fn store(&self) -> Result<Arc<dyn Store>, BackendError> {
        self.store.clone().ok_or_else(|| {
            tracing::error!("Database not configured");
            BackendError::ServiceUnavailable
        })
    }
}
