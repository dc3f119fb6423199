//! Middleware Module
//!
//! This module contains all HTTP middleware for the backend server.
//!
//! # Architecture
//!
//! - **`auth`** - Bearer-token middleware for protecting routes, plus the
//!   `AuthUser` extractor handlers use to read the authenticated user
//! - **`extract`** - `Json`/`Form`/`Query`/`Path`/`Multipart` wrappers that
//!   reject with `BackendError`
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::{middleware::from_fn_with_state, routing::post, Router};
//! use ecom::backend::middleware::{auth_middleware, AuthUser};
//! use ecom::backend::server::state::AppState;
//!
//! async fn handler(AuthUser(user): AuthUser) -> String {
//!     user.username
//! }
//!
//! fn protected(state: AppState) -> Router<AppState> {
//!     Router::new()
//!         .route("/user/me", post(handler))
//!         .route_layer(from_fn_with_state(state, auth_middleware))
//! }
//! ```

pub mod auth;
pub mod extract;

pub use auth::{auth_middleware, AuthUser, CurrentUser};
pub use extract::{ApiForm, ApiJson, ApiMultipart, ApiPath, ApiQuery};
