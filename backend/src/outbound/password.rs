//! Argon2 password hashing shared by the identity adapters.
//!
//! Both the in-memory and Diesel identity services store PHC-format hash
//! strings and verify through the same functions, so swapping adapters
//! never changes credential semantics.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::domain::ports::IdentityError;

/// Hash a plain-text password into a PHC string for storage.
pub(crate) fn hash_password(plain: &str) -> Result<String, IdentityError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| IdentityError::query(format!("password hashing failed: {err}")))
}

/// Verify a plain-text password against a stored PHC string.
///
/// A malformed stored hash is an adapter fault, not a credential
/// mismatch, and surfaces as a query error.
pub(crate) fn verify_password(plain: &str, hash: &str) -> Result<bool, IdentityError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|err| IdentityError::query(format!("stored hash is malformed: {err}")))?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}
