//! Backend Error Module
//!
//! This module defines error types specific to the backend server.
//! These errors are used in HTTP handlers and can be converted to HTTP responses.
//!
//! # Architecture
//!
//! - **`types`** - Error type definitions and constructors
//! - **`conversion`** - `IntoResponse` implementation
//!
//! # Error Types
//!
//! - `HandlerError` - Errors with an explicit status code
//! - `Unauthorized` - Failed authentication or ownership checks
//! - `ServiceUnavailable` - No store configured
//! - `StoreError` - Persistence failures
//! - `SharedError` - Request validation failures
//! - `UploadError` - Image pipeline failures
//!
//! Extractor rejections (`Json`, `Form`, `Query`, `Path`, `Multipart`) convert
//! into `HandlerError` so they share the JSON error body.
//!
//! # Example
//!
//! ```rust,no_run
//! use ecom::backend::error::BackendError;
//! use axum::response::Response;
//!
//! # async fn example() -> Result<Response, BackendError> {
//! // Handler can return BackendError directly
//! Err(BackendError::unauthorized("Could not validate credentials"))
//! # }
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::{BackendError, INTERNAL_MESSAGE};
