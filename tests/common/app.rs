//! In-process application for HTTP tests
//!
//! Builds the real router on top of the in-memory store, with a temporary
//! static directory and the minimum bcrypt cost.

use async_trait::async_trait;
use axum_test::TestServer;
use ecom::backend::routes::create_router;
use ecom::backend::server::state::AppState;
use ecom::backend::store::{
    Business, MemoryStore, NewProduct, NewUser, Product, Store, StoreError, User,
};
use ecom::shared::AppConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Signing secret used by every test app
pub const TEST_SECRET: &str = "test-secret";

/// Base URL every test app advertises
pub const TEST_BASE_URL: &str = "http://localhost:8000";

/// A running test application
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    static_dir: TempDir,
}

impl TestApp {
    /// Create a new test application with an empty store
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::with_store(store.clone(), store)
    }

    /// A test application whose logo and product image updates always fail
    pub fn with_failing_image_updates() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::with_store(Arc::new(FailingImageStore(store.clone())), store)
    }

    /// Serve `store`, inspecting data through `tables`
    fn with_store(store: Arc<dyn Store>, tables: Arc<MemoryStore>) -> Self {
        let static_dir = tempfile::tempdir().expect("Failed to create static dir");
        let config = AppConfig::builder()
            .secret(TEST_SECRET)
            .bcrypt_cost(4)
            .static_dir(static_dir.path())
            .public_base_url(TEST_BASE_URL)
            .build()
            .expect("Invalid test configuration");

        let state = AppState::new(config, Some(store));
        let server = TestServer::new(create_router(state.clone())).expect("Failed to start test server");

        Self {
            server,
            state,
            store: tables,
            static_dir,
        }
    }

    /// Directory uploaded images are written to
    pub fn images_dir(&self) -> PathBuf {
        self.static_dir.path().join("images")
    }

    /// Names of all files in the images directory
    pub fn stored_images(&self) -> Vec<String> {
        match std::fs::read_dir(self.images_dir()) {
            Ok(entries) => entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// A test server with no store configured
pub fn server_without_store() -> TestServer {
    let config = AppConfig::builder()
        .secret(TEST_SECRET)
        .bcrypt_cost(4)
        .build()
        .expect("Invalid test configuration");
    TestServer::new(create_router(AppState::new(config, None))).expect("Failed to start test server")
}

/// Memory store whose image attach operations fail like a lost connection
pub struct FailingImageStore(pub Arc<MemoryStore>);

#[async_trait]
impl Store for FailingImageStore {
    async fn create_user_with_business(
        &self,
        new_user: NewUser,
    ) -> Result<(User, Business), StoreError> {
        self.0.create_user_with_business(new_user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        self.0.get_user_by_id(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        self.0.get_user_by_username(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.0.get_user_by_email(email).await
    }

    async fn mark_user_verified(&self, user_id: i64) -> Result<Option<User>, StoreError> {
        self.0.mark_user_verified(user_id).await
    }

    async fn get_business_by_owner(&self, owner_id: i64) -> Result<Option<Business>, StoreError> {
        self.0.get_business_by_owner(owner_id).await
    }

    async fn get_business_by_id(&self, id: i64) -> Result<Option<Business>, StoreError> {
        self.0.get_business_by_id(id).await
    }

    async fn set_business_logo(&self, _business_id: i64, _logo: &str) -> Result<Business, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn create_product(
        &self,
        business_id: i64,
        new_product: NewProduct,
    ) -> Result<Product, StoreError> {
        self.0.create_product(business_id, new_product).await
    }

    async fn get_product(&self, id: i64) -> Result<Option<Product>, StoreError> {
        self.0.get_product(id).await
    }

    async fn set_product_image(&self, _product_id: i64, _image: &str) -> Result<Product, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
}
