// src/repository/exams.rs

use sqlx::SqliteExecutor;

use crate::models::exam::Exam;

pub async fn insert(
    db: impl SqliteExecutor<'_>,
    title: &str,
    duration_minutes: i64,
) -> sqlx::Result<i64> {
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO exams (title, duration_minutes) VALUES (?, ?) RETURNING id",
    )
    .bind(title)
    .bind(duration_minutes)
    .fetch_one(db)
    .await?;

    Ok(id)
}

pub async fn find_by_id(db: impl SqliteExecutor<'_>, id: i64) -> sqlx::Result<Option<Exam>> {
    sqlx::query_as::<_, Exam>("SELECT id, title, duration_minutes FROM exams WHERE id = ?")
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn list_all(db: impl SqliteExecutor<'_>) -> sqlx::Result<Vec<Exam>> {
    sqlx::query_as::<_, Exam>("SELECT id, title, duration_minutes FROM exams ORDER BY id")
        .fetch_all(db)
        .await
}

pub async fn count(db: impl SqliteExecutor<'_>) -> sqlx::Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM exams")
        .fetch_one(db)
        .await?;

    Ok(count)
}
