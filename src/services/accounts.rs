// src/services/accounts.rs

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::{
    error::{AppError, is_unique_violation},
    models::user::User,
    repository::users,
    utils::hash::{hash_password, verify_password},
};

/// Creates a user with an Argon2-hashed password.
pub async fn register(
    pool: &SqlitePool,
    username: &str,
    password: &str,
    now: DateTime<Utc>,
) -> Result<User, AppError> {
    let hashed_password = hash_password(password)?;

    users::insert(pool, username, &hashed_password, now)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict(format!("Username '{}' already exists", username))
            } else {
                tracing::error!("Failed to register user: {:?}", e);
                AppError::from(e)
            }
        })
}

/// Checks a username/password pair and returns the user id.
///
/// Unknown user and wrong password produce the same error.
pub async fn authenticate(pool: &SqlitePool, username: &str, password: &str) -> Result<i64, AppError> {
    let invalid = || AppError::AuthError("Invalid credentials".to_string());

    let user = users::find_by_username(pool, username)
        .await?
        .ok_or_else(invalid)?;

    if !verify_password(password, &user.password_hash)? {
        return Err(invalid());
    }

    Ok(user.id)
}
