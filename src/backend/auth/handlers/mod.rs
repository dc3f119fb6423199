//! Authentication Handlers Module
//!
//! This module contains all HTTP handlers for authentication endpoints.
//! Handlers are organized into focused submodules for maintainability.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs           - Module exports and documentation
//! ├── types.rs         - Request and response types
//! ├── token.rs         - Password grant
//! ├── registration.rs  - User registration
//! ├── verification.rs  - Email confirmation link
//! └── me.rs            - Current user profile
//! ```
//!
//! # Handlers
//!
//! - **`issue_token`** - POST /token - Exchange username and password for an access token
//! - **`register`** - POST /registration - Create a user and its business
//! - **`verify_email`** - GET /verification - Confirm an email address
//! - **`get_me`** - POST /user/me - Current user info
//!
//! # Example
//!
//! ```rust,no_run
//! use ecom::backend::auth::handlers::{issue_token, register, verify_email};
//! use ecom::backend::server::state::AppState;
//! use axum::{routing::get, routing::post, Router};
//!
//! # fn example() -> Router<AppState> {
//! Router::new()
//!     .route("/token", post(issue_token))
//!     .route("/registration", post(register))
//!     .route("/verification", get(verify_email))
//! # }
//! ```

/// Request and response types
pub mod types;

/// Token handler
pub mod token;

/// Registration handler
pub mod registration;

/// Email verification handler
pub mod verification;

/// Get current user handler
pub mod me;

// Re-export commonly used types
pub use types::{
    ProfileData, RegistrationRequest, StatusResponse, TokenRequest, TokenResponse,
    VerificationQuery,
};

// Re-export handlers
pub use me::get_me;
pub use registration::register;
pub use token::issue_token;
pub use verification::verify_email;
