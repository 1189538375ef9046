// src/handlers/results.rs

use axum::{Extension, Json, extract::State, response::IntoResponse};
use sqlx::SqlitePool;

use crate::{error::AppError, services::results, utils::jwt::CurrentUser};

/// Lists the caller's completed attempts.
pub async fn get_results(
    State(pool): State<SqlitePool>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(results::list_results(&pool, user_id).await?))
}
