// src/handlers/seed.rs

use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;
use sqlx::SqlitePool;

use crate::{error::AppError, services::seed};

/// Inserts the demo exam. Every call adds another copy.
pub async fn seed_database(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let exam_id = seed::seed_demo_exam(&pool).await?;

    Ok(Json(json!({
        "message": "Database seeded successfully",
        "exam_id": exam_id,
    })))
}
