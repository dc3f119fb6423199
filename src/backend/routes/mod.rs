//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Architecture
//!
//! - **`router`** - Main router creation, index, static files and fallback
//! - **`api_routes`** - API endpoints, split into public and protected sets
//!
//! # Route Types
//!
//! ## Public
//!
//! - `GET /` - Liveness message
//! - `POST /token` - Access token
//! - `POST /registration` - User registration
//! - `GET /verification` - Email confirmation link
//! - `GET /products/{id}` - Product details
//! - `GET /static/*` - Static files and uploaded images
//!
//! ## Protected (bearer token)
//!
//! - `POST /user/me` - Current user
//! - `GET /business/me` - Current user's business
//! - `POST /products` - Create a product
//! - `POST /upload/profile` - Business logo
//! - `POST /uploadfile/product/{id}` - Product image
//!
//! # Example
//!
//! ```rust,no_run
//! use ecom::backend::routes::create_router;
//! use ecom::backend::server::state::AppState;
//! use ecom::shared::AppConfig;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let router = create_router(AppState::new(config, None));
//! # Ok(())
//! # }
//! ```

/// Main router creation
pub mod router;

/// API endpoint handlers
pub mod api_routes;

// Re-export commonly used functions
pub use router::create_router;
