// src/utils/hash.rs

use argon2::{
    Argon2,
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use crate::error::AppError;

fn credential_error(err: password_hash::Error) -> AppError {
    AppError::InternalServerError(err.to_string())
}

/// Hashes a password with Argon2 and a fresh random salt, returning the PHC
/// string stored in `users.password_hash`.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(credential_error)
}

/// Checks a password against a stored PHC string.
///
/// A mismatch is `Ok(false)`; an unreadable stored hash or any other hashing
/// failure is an internal error.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
    let stored = PasswordHash::new(password_hash).map_err(credential_error)?;

    match Argon2::default().verify_password(password.as_bytes(), &stored) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(credential_error(e)),
    }
}
