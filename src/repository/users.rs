// src/repository/users.rs

use chrono::{DateTime, Utc};
use sqlx::SqliteExecutor;

use crate::models::user::User;

/// Inserts a user. Fails with a unique violation when the username is taken.
pub async fn insert(
    db: impl SqliteExecutor<'_>,
    username: &str,
    password_hash: &str,
    created_at: DateTime<Utc>,
) -> sqlx::Result<User> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, password_hash, created_at)
        VALUES (?, ?, ?)
        RETURNING id, username, password_hash, created_at
        "#,
    )
    .bind(username)
    .bind(password_hash)
    .bind(created_at)
    .fetch_one(db)
    .await
}

pub async fn find_by_username(
    db: impl SqliteExecutor<'_>,
    username: &str,
) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>(
        "SELECT id, username, password_hash, created_at FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(db)
    .await
}
