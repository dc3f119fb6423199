/**
 * Authentication Handler Types
 *
 * This module defines the request and response types used by the
 * authentication handlers, and the validation applied to registrations.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::backend::store::User;
use crate::shared::SharedError;

/// Longest accepted username
pub const MAX_USERNAME_LEN: usize = 20;

/// Longest accepted email address
pub const MAX_EMAIL_LEN: usize = 200;

/// Form body of `POST /token`
///
/// Other OAuth2 password-grant fields (`grant_type`, `scope`, ...) are
/// accepted and ignored.
#[derive(Deserialize, Serialize, Debug)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

/// Response of `POST /token`
#[derive(Serialize, Deserialize, Debug)]
pub struct TokenResponse {
    pub access_token: String,
    /// Always `bearer`
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Registration request
///
/// Only these three fields are read; anything else in the body is dropped.
/// Absent fields deserialize as empty so `validate` reports them.
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct RegistrationRequest {
    /// 1-20 letters, digits or underscores
    pub username: String,
    /// User's email address
    pub email: String,
    /// User's password (will be hashed before storage)
    pub password: String,
}

impl RegistrationRequest {
    /// Check the fields before anything is hashed or stored
    ///
    /// # Errors
    /// The first offending field, as a `SharedError`
    pub fn validate(&self) -> Result<(), SharedError> {
        if self.username.is_empty() {
            return Err(SharedError::missing("username"));
        }
        if self.username.chars().count() > MAX_USERNAME_LEN {
            return Err(SharedError::validation(
                "username",
                format!("Username must be at most {} characters", MAX_USERNAME_LEN),
            ));
        }
        if !self
            .username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(SharedError::validation(
                "username",
                "Username may only contain letters, numbers, and underscores",
            ));
        }

        if self.email.is_empty() {
            return Err(SharedError::missing("email"));
        }
        if !self.email.contains('@') {
            return Err(SharedError::validation("email", "Invalid email format"));
        }
        if self.email.chars().count() > MAX_EMAIL_LEN {
            return Err(SharedError::validation(
                "email",
                format!("Email must be at most {} characters", MAX_EMAIL_LEN),
            ));
        }

        if self.password.is_empty() {
            return Err(SharedError::missing("password"));
        }

        Ok(())
    }
}

/// `{"status": "ok", "data": ...}` envelope
#[derive(Serialize, Deserialize, Debug)]
pub struct StatusResponse<T> {
    pub status: String,
    pub data: T,
}

impl<T> StatusResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: "ok".to_string(),
            data,
        }
    }
}

/// Profile returned by `POST /user/me`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ProfileData {
    pub username: String,
    pub email: String,
    pub verified: bool,
    pub joined_date: DateTime<Utc>,
}

impl From<User> for ProfileData {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            email: user.email,
            verified: user.is_verified,
            joined_date: user.join_date,
        }
    }
}

/// Query string of `GET /verification`
#[derive(Deserialize, Debug)]
pub struct VerificationQuery {
    pub token: String,
}
