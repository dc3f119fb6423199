//! Shared Module
//!
//! This module contains types that do not depend on the server stack:
//! application configuration and the validation error used when checking
//! client input.

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError, DatabaseSettings, SmtpSettings, StoreBackend};
