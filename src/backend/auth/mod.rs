//! Authentication Module
//!
//! This module handles user authentication, registration, and session management.
//!
//! # Architecture
//!
//! The auth module is organized into focused submodules:
//!
//! - **`password`** - bcrypt hashing and verification
//! - **`sessions`** - JWT generation and validation
//! - **`handlers`** - HTTP handlers for authentication endpoints
//!
//! # Authentication Flow
//!
//! 1. **Registration**: username, email and password → user and business created → confirmation link mailed
//! 2. **Verification**: link followed → account marked verified
//! 3. **Token**: username and password → credentials verified → access token returned
//! 4. **Me**: access token → user info returned
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Access tokens expire after 30 minutes, verification tokens after 24 hours
//! - The two token kinds are not interchangeable
//! - Invalid credentials return 401 (no information leakage)

/// Password hashing
pub mod password;

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use handlers::{get_me, issue_token, register, verify_email};
pub use password::PasswordHasher;
pub use sessions::{AccessClaims, TokenService, VerificationClaims};
