//! ECOM API - Main Library
//!
//! A small e-commerce backend built on Axum and PostgreSQL. Users register,
//! confirm their email address through a signed link, and authenticate with
//! short-lived bearer tokens. Every user owns exactly one business, and the
//! owner can upload a logo for it and photos for its products.
//!
//! # Module Structure
//!
//! The library is organized into two main modules:
//!
//! - **`shared`** - Types with no server dependencies
//!   - Application configuration (`AppConfig`)
//!   - Validation error types
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server, routes and bearer-token middleware
//!   - Password hashing and JWT issuance/verification
//!   - User, business and product persistence
//!   - Image upload pipeline and verification email delivery
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - Enables the backend modules and the server binary
//!
//! # Usage
//!
//! ```rust,no_run
//! use ecom::backend::server::init::create_app;
//! use ecom::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(config).await;
//! // Use app with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::SharedError` for request validation failures
//! - `backend::BackendError` at the HTTP boundary, converted into JSON responses
//! - `backend::store::StoreError` for persistence failures

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
