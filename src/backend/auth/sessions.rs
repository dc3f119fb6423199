/**
 * Session Management and JWT Tokens
 *
 * This module handles JWT generation and validation. Two token kinds share the
 * signing secret: access tokens for the API and verification tokens for the
 * emailed confirmation link. Their claim sets differ, so one never decodes as
 * the other.
 */

use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{
    decode, encode, get_current_timestamp, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::backend::store::User;

/// `purpose` claim carried by verification tokens
pub const VERIFY_EMAIL_PURPOSE: &str = "verify_email";

/// Claims of an access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// User ID
    pub id: i64,
    /// Username at the time of issue
    pub username: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

/// Claims of an email verification token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationClaims {
    pub email: String,
    /// Always `verify_email`
    pub purpose: String,
    pub exp: u64,
    pub iat: u64,
}

/// Issues and verifies HS256 tokens
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    access_ttl: Duration,
    verification_ttl: Duration,
}

impl TokenService {
    /// Create a token service
    ///
    /// # Arguments
    /// * `secret` - HS256 signing secret
    /// * `access_ttl` - Lifetime of access tokens
    /// * `verification_ttl` - Lifetime of verification tokens
    pub fn new(secret: &str, access_ttl: Duration, verification_ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            access_ttl,
            verification_ttl,
        }
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    /// Create an access token for a user
    ///
    /// # Returns
    /// Signed JWT string
    pub fn issue_access_token(&self, user: &User) -> Result<String, JwtError> {
        let now = get_current_timestamp();
        let claims = AccessClaims {
            id: user.id,
            username: user.username.clone(),
            exp: now.saturating_add(self.access_ttl.as_secs()),
            iat: now,
        };
        self.sign(&claims)
    }

    /// Verify and decode an access token
    ///
    /// # Errors
    /// Fails on a bad signature, an expired token, or a token of another kind.
    pub fn verify_access_token(&self, token: &str) -> Result<AccessClaims, JwtError> {
        let data = decode::<AccessClaims>(token, &self.decoding, &self.validation)?;
        Ok(data.claims)
    }

    /// Create the token embedded in the confirmation link
    pub fn issue_verification_token(&self, email: &str) -> Result<String, JwtError> {
        let now = get_current_timestamp();
        let claims = VerificationClaims {
            email: email.to_string(),
            purpose: VERIFY_EMAIL_PURPOSE.to_string(),
            exp: now.saturating_add(self.verification_ttl.as_secs()),
            iat: now,
        };
        self.sign(&claims)
    }

    /// Verify a confirmation-link token and return its claims
    pub fn verify_verification_token(&self, token: &str) -> Result<VerificationClaims, JwtError> {
        let data = decode::<VerificationClaims>(token, &self.decoding, &self.validation)?;
        if data.claims.purpose != VERIFY_EMAIL_PURPOSE {
            return Err(ErrorKind::InvalidToken.into());
        }
        Ok(data.claims)
    }

    fn sign<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
    }
}
