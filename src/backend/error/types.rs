/**
 * Backend Error Types
 *
 * This module defines error types specific to the backend server.
 * These errors are used in HTTP handlers and can be converted to HTTP responses.
 *
 * # Error Categories
 *
 * ## Client errors
 *
 * - Invalid request fields (`SharedError`) map to 400
 * - Failed authentication or ownership checks map to 401
 * - Unknown records map to 404, duplicates to 409
 *
 * ## Server errors
 *
 * Database, disk, token and template failures map to 500. The cause is logged
 * when the response is built; the client only sees a generic message.
 */

use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::store::StoreError;
use crate::backend::upload::UploadError;
use crate::shared::SharedError;

/// Message returned to clients for every 500
pub const INTERNAL_MESSAGE: &str = "Internal server error";

/// Backend-specific error types
///
/// This enum represents all possible errors that can occur in the backend.
/// Each variant includes relevant context and can be converted to an HTTP response.
///
/// # Usage
///
/// ```rust
/// use ecom::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// // Create a handler error
/// let err = BackendError::handler(StatusCode::NOT_FOUND, "Product not found");
///
/// // Reject a request without valid credentials
/// let err = BackendError::unauthorized("Could not validate credentials");
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error with an explicit status code
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Missing or invalid credentials, or a caller acting on a record it does not own
    ///
    /// Rendered with a `WWW-Authenticate: Bearer` header.
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Human-readable error message
        message: String,
    },

    /// No store is configured
    #[error("Database not configured")]
    ServiceUnavailable,

    /// Internal failure with a logged cause
    #[error("Internal error: {message}")]
    Internal {
        /// Cause, logged but never sent to the client
        message: String,
    },

    /// Persistence error
    #[error(transparent)]
    StoreError(#[from] StoreError),

    /// Shared error (from shared module)
    ///
    /// This error wraps validation errors raised while checking request fields.
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Image pipeline error
    #[error(transparent)]
    UploadError(#[from] UploadError),
}

impl BackendError {
    /// Create a new handler error with a status code
    ///
    /// # Arguments
    ///
    /// * `status` - HTTP status code
    /// * `message` - Error message
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Create a new 401 error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create a new 404 error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::NOT_FOUND, message)
    }

    /// Create a new internal error
    ///
    /// # Arguments
    ///
    /// * `message` - Cause, for the logs only
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `Unauthorized` - 401 Unauthorized
    /// - `ServiceUnavailable` - 503 Service Unavailable
    /// - `StoreError` - 409 for conflicts, 404 for missing rows, else 500
    /// - `SharedError` - 400 Bad Request
    /// - `UploadError` - 400 for undecodable images, else 500
    /// - `Internal` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::StoreError(err) => match err {
                StoreError::Conflict { .. } => StatusCode::CONFLICT,
                StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
                StoreError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::SharedError(_) => StatusCode::BAD_REQUEST,
            Self::UploadError(err) => {
                if err.is_client_error() {
                    StatusCode::BAD_REQUEST
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            }
        }
    }

    /// Get the message sent to the client
    ///
    /// Server errors all share `INTERNAL_MESSAGE`.
    pub fn message(&self) -> String {
        if self.status_code().is_server_error() && !matches!(self, Self::ServiceUnavailable) {
            return INTERNAL_MESSAGE.to_string();
        }

        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::Unauthorized { message } => message.clone(),
            Self::StoreError(StoreError::Conflict { field }) => match field.as_str() {
                "username" => "Username already taken".to_string(),
                "email" => "Email already registered".to_string(),
                other => format!("{other} already exists"),
            },
            Self::StoreError(StoreError::NotFound { entity, .. }) => {
                let mut chars = entity.chars();
                match chars.next() {
                    Some(first) => format!("{}{} not found", first.to_uppercase(), chars.as_str()),
                    None => "Not found".to_string(),
                }
            }
            Self::UploadError(UploadError::Decode(_)) => "Invalid image file".to_string(),
            other => other.to_string(),
        }
    }
}

/// Turn an axum extractor rejection into a 400 carrying axum's explanation
///
/// Rejections axum itself classes as server errors stay 500.
fn from_rejection(status: StatusCode, body: String) -> BackendError {
    if status.is_server_error() {
        BackendError::internal(body)
    } else {
        BackendError::handler(StatusCode::BAD_REQUEST, body)
    }
}

impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        from_rejection(rejection.status(), rejection.body_text())
    }
}

impl From<FormRejection> for BackendError {
    fn from(rejection: FormRejection) -> Self {
        from_rejection(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for BackendError {
    fn from(rejection: QueryRejection) -> Self {
        from_rejection(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for BackendError {
    fn from(rejection: PathRejection) -> Self {
        from_rejection(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartRejection> for BackendError {
    fn from(rejection: MultipartRejection) -> Self {
        from_rejection(rejection.status(), rejection.body_text())
    }
}
