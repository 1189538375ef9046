// src/services/exams.rs

use sqlx::SqlitePool;

use crate::{error::AppError, models::exam::ExamSummary, repository::exams};

/// Lists every exam with its duration.
pub async fn list_exams(pool: &SqlitePool) -> Result<Vec<ExamSummary>, AppError> {
    let exams = exams::list_all(pool).await?;
    Ok(exams.into_iter().map(ExamSummary::from).collect())
}
