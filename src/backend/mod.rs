//! Backend Module
//!
//! This module contains all server-side code for the ECOM API. It provides an
//! Axum HTTP server with bearer-token authentication, PostgreSQL persistence
//! and an image upload pipeline.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Password hashing, JWT tokens, registration and login
//! - **`store`** - Users, businesses and products (PostgreSQL or in-memory)
//! - **`catalog`** - Business and product endpoints
//! - **`upload`** - Image validation, resize and attachment
//! - **`email`** - Verification email delivery
//! - **`middleware`** - Bearer-token middleware
//! - **`error`** - Backend-specific error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── store/          - Persistence
//! ├── catalog/        - Business and product handlers
//! ├── upload/         - Image uploads
//! ├── email/          - Verification mail
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! The backend uses shared state (`AppState`) that contains:
//! - The store handle (`None` when no database is configured)
//! - The token service and password hasher
//! - The image store and optional mailer
//! - The loaded configuration
//!
//! Every field is cheap to clone; the store is the only shared mutable
//! resource and serializes writes itself.
//!
//! # Error Handling
//!
//! Handlers return `Result<_, BackendError>`. `BackendError` implements
//! `IntoResponse`, so failures are converted to JSON bodies with the right
//! status code at the boundary.

/// Server setup and configuration
#[cfg(feature = "ssr")]
pub mod server;

/// Route configuration
#[cfg(feature = "ssr")]
pub mod routes;

/// Backend error types
#[cfg(feature = "ssr")]
pub mod error;

/// Authentication and user management
#[cfg(feature = "ssr")]
pub mod auth;

/// Persistence for users, businesses and products
#[cfg(feature = "ssr")]
pub mod store;

/// Business and product endpoints
#[cfg(feature = "ssr")]
pub mod catalog;

/// Image upload pipeline
#[cfg(feature = "ssr")]
pub mod upload;

/// Verification email delivery
#[cfg(feature = "ssr")]
pub mod email;

/// Middleware for request processing
#[cfg(feature = "ssr")]
pub mod middleware;

/// Re-export commonly used types
#[cfg(feature = "ssr")]
pub use server::{create_app, AppState};
#[cfg(feature = "ssr")]
pub use error::BackendError;
#[cfg(feature = "ssr")]
pub use store::{MemoryStore, PgStore, Store, StoreError};
