// src/handlers/auth.rs

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    extractors::AppJson,
    models::user::{CreateUserRequest, LoginRequest},
    services::accounts,
    utils::jwt::TokenService,
};

/// Registers a new user.
///
/// Returns 201 Created with the new user (password hash excluded).
pub async fn register(
    State(pool): State<SqlitePool>,
    AppJson(payload): AppJson<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let user = accounts::register(&pool, &payload.username, &payload.password, Utc::now()).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User created successfully",
            "user": user,
        })),
    ))
}

/// Authenticates a user and returns an access token.
pub async fn login(
    State(pool): State<SqlitePool>,
    State(tokens): State<Arc<TokenService>>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let user_id = accounts::authenticate(&pool, &payload.username, &payload.password).await?;
    let token = tokens.issue(user_id)?;

    Ok(Json(json!({
        "access_token": token,
        "token_type": "Bearer",
    })))
}
