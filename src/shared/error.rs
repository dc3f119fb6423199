//! Shared Error Types
//!
//! This module defines the error raised when client-supplied data fails
//! validation. It carries no HTTP knowledge; the backend maps it to
//! `400 Bad Request`.
//!
//! # Usage
//!
//! ```rust
//! use ecom::shared::error::SharedError;
//!
//! let error = SharedError::validation("username", "Username cannot be empty");
//! assert_eq!(error.field(), "username");
//! ```
use thiserror::Error;

/// Validation errors for client input
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// A field is present but its value is not acceptable
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// A required field is missing or empty
    #[error("Missing required field '{field}'")]
    MissingField {
        /// The missing field
        field: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new missing-field error
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Name of the offending field
    pub fn field(&self) -> &str {
        match self {
            Self::ValidationError { field, .. } | Self::MissingField { field } => field,
        }
    }
}
