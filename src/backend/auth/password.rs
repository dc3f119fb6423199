/**
 * Password Hashing
 *
 * bcrypt hashing and verification. The work factor comes from configuration
 * so tests can run at the minimum cost.
 */

use std::sync::{Arc, OnceLock};

/// Plaintext hashed for the dummy digest used when a login names an unknown user
const DUMMY_PASSWORD: &str = "not-a-real-password";

/// bcrypt hasher with a fixed cost
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
    dummy: Arc<OnceLock<String>>,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self {
            cost,
            dummy: Arc::new(OnceLock::new()),
        }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password with a fresh salt
    ///
    /// # Errors
    /// Returns the bcrypt error if hashing fails (invalid cost).
    pub fn hash(&self, password: &str) -> Result<String, bcrypt::BcryptError> {
        bcrypt::hash(password, self.cost)
    }

    /// Check a plaintext password against a stored digest
    ///
    /// A malformed digest is treated as a mismatch.
    pub fn verify(&self, password: &str, digest: &str) -> bool {
        match bcrypt::verify(password, digest) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::error!("Stored password hash could not be checked: {}", e);
                false
            }
        }
    }

    /// Spend the same time as a real verification, then fail
    ///
    /// Called when the username is unknown so that response timing does not
    /// reveal which usernames exist.
    pub fn dummy_verify(&self, password: &str) -> bool {
        let digest = self
            .dummy
            .get_or_init(|| bcrypt::hash(DUMMY_PASSWORD, self.cost).unwrap_or_default());
        let _ = bcrypt::verify(password, digest);
        false
    }
}
