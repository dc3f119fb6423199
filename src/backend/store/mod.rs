//! Store Module
//!
//! Persistence for users, businesses and products. Handlers only see the
//! `Store` trait; the server picks an implementation at start-up.
//!
//! # Implementations
//!
//! - **`PgStore`** - PostgreSQL via sqlx, schema in `migrations/`
//! - **`MemoryStore`** - Process-local maps for development and tests
//!
//! # Business provisioning
//!
//! `create_user_with_business` inserts the user and its business as one unit:
//! either both rows exist afterwards or neither does. This is the only way to
//! create a user, so every user owns exactly one business.

use async_trait::async_trait;
use thiserror::Error;

/// Row types and insert payloads
pub mod models;

/// PostgreSQL implementation
pub mod postgres;

/// In-memory implementation
pub mod memory;

pub use memory::MemoryStore;
pub use models::{Business, NewProduct, NewUser, Product, User};
pub use postgres::PgStore;

/// Persistence errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique column already holds this value
    #[error("{field} already exists")]
    Conflict {
        /// Column that collided (`username`, `email`, ...)
        field: String,
    },

    /// The row to update does not exist
    #[error("{entity} {id} not found")]
    NotFound {
        entity: &'static str,
        id: i64,
    },

    /// Any other database failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence operations used by the HTTP layer
#[async_trait]
pub trait Store: Send + Sync {
    /// Insert a user and its business (named after the username) atomically
    async fn create_user_with_business(
        &self,
        new_user: NewUser,
    ) -> Result<(User, Business), StoreError>;

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Set `is_verified = true` if it is currently false
    ///
    /// `None` when the user does not exist or was already verified, so of two
    /// concurrent calls only one gets the user back.
    async fn mark_user_verified(&self, user_id: i64) -> Result<Option<User>, StoreError>;

    async fn get_business_by_owner(&self, owner_id: i64) -> Result<Option<Business>, StoreError>;

    async fn get_business_by_id(&self, id: i64) -> Result<Option<Business>, StoreError>;

    async fn set_business_logo(&self, business_id: i64, logo: &str)
        -> Result<Business, StoreError>;

    async fn create_product(
        &self,
        business_id: i64,
        new_product: NewProduct,
    ) -> Result<Product, StoreError>;

    async fn get_product(&self, id: i64) -> Result<Option<Product>, StoreError>;

    async fn set_product_image(&self, product_id: i64, image: &str)
        -> Result<Product, StoreError>;
}
