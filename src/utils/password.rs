//! Argon2id password hashing.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use std::sync::LazyLock;
use thiserror::Error;

/// Hash of a random throwaway password, checked when no account matches so
/// unknown emails pay the same Argon2 cost as wrong passwords.
static PLACEHOLDER_HASH: LazyLock<Result<String, String>> = LazyLock::new(|| {
    let throwaway: [u8; 32] = rand::random();
    hash_password(&hex::encode(throwaway)).map_err(|e| e.to_string())
});

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("failed to hash password: {0}")]
    Hash(String),
    #[error("stored password hash is malformed")]
    MalformedHash,
    #[error("password does not match")]
    Mismatch,
}

/// Hashes a password with Argon2id and a random 16-byte salt.
///
/// Returns a PHC string suitable for storage.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt_bytes: [u8; 16] = rand::random();
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| PasswordError::Hash(e.to_string()))?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Verifies a password against a stored PHC string.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<(), PasswordError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|_| PasswordError::MalformedHash)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| PasswordError::Mismatch)
}

/// Verifies a password against an account's stored hash, or against a
/// placeholder hash when there is no account.
///
/// Exactly one Argon2 verification runs either way. Without an account the
/// result is always [`PasswordError::Mismatch`].
pub fn verify_credentials(password: &str, stored_hash: Option<&str>) -> Result<(), PasswordError> {
    match stored_hash {
        Some(hash) => verify_password(password, hash),
        None => {
            let placeholder = PLACEHOLDER_HASH
                .as_deref()
                .map_err(|e| PasswordError::Hash(e.clone()))?;
            verify_password(password, placeholder).and(Err(PasswordError::Mismatch))
        }
    }
}
