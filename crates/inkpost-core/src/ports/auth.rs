//! Authentication ports.

use crate::error::RepoError;

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password with a fresh salt.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash in constant time.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Opaque session token issuing.
pub trait SessionTokenService: Send + Sync {
    /// Generate a new random token for the client cookie.
    fn generate(&self) -> String;

    /// Stable digest of a token, the only form that is persisted.
    fn digest(&self, token: &str) -> String;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Username and password are required")]
    MissingCredentials,

    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    #[error("Hashing error: {0}")]
    Hashing(String),

    #[error("Storage error: {0}")]
    Storage(#[from] RepoError),
}
