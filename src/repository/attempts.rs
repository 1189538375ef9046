// src/repository/attempts.rs

use chrono::{DateTime, Utc};
use sqlx::SqliteExecutor;

use crate::models::attempt::{ExamAttempt, ResultView};

/// Inserts a new open attempt.
/// Fails with a unique violation if the (user, exam) pair already has one.
pub async fn insert_open(
    db: impl SqliteExecutor<'_>,
    user_id: i64,
    exam_id: i64,
    start_time: DateTime<Utc>,
) -> sqlx::Result<ExamAttempt> {
    sqlx::query_as::<_, ExamAttempt>(
        r#"
        INSERT INTO exam_attempts (user_id, exam_id, start_time)
        VALUES (?, ?, ?)
        RETURNING id, user_id, exam_id, start_time, end_time, score
        "#,
    )
    .bind(user_id)
    .bind(exam_id)
    .bind(start_time)
    .fetch_one(db)
    .await
}

pub async fn find_by_id(
    db: impl SqliteExecutor<'_>,
    id: i64,
) -> sqlx::Result<Option<ExamAttempt>> {
    sqlx::query_as::<_, ExamAttempt>(
        "SELECT id, user_id, exam_id, start_time, end_time, score FROM exam_attempts WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn find_open(
    db: impl SqliteExecutor<'_>,
    user_id: i64,
    exam_id: i64,
) -> sqlx::Result<Option<ExamAttempt>> {
    sqlx::query_as::<_, ExamAttempt>(
        r#"
        SELECT id, user_id, exam_id, start_time, end_time, score
        FROM exam_attempts
        WHERE user_id = ? AND exam_id = ? AND end_time IS NULL
        "#,
    )
    .bind(user_id)
    .bind(exam_id)
    .fetch_optional(db)
    .await
}

/// Sets `end_time` on an open attempt owned by `user_id`.
/// Returns false when no open attempt matched.
pub async fn close(
    db: impl SqliteExecutor<'_>,
    id: i64,
    user_id: i64,
    end_time: DateTime<Utc>,
) -> sqlx::Result<bool> {
    let result = sqlx::query(
        "UPDATE exam_attempts SET end_time = ? WHERE id = ? AND user_id = ? AND end_time IS NULL",
    )
    .bind(end_time)
    .bind(id)
    .bind(user_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() == 1)
}

pub async fn set_score(db: impl SqliteExecutor<'_>, id: i64, score: i64) -> sqlx::Result<()> {
    sqlx::query("UPDATE exam_attempts SET score = ? WHERE id = ?")
        .bind(score)
        .bind(id)
        .execute(db)
        .await?;

    Ok(())
}

/// Closed attempts of a user, oldest completion first.
pub async fn list_closed_results(
    db: impl SqliteExecutor<'_>,
    user_id: i64,
) -> sqlx::Result<Vec<ResultView>> {
    sqlx::query_as::<_, ResultView>(
        r#"
        SELECT
            a.id AS attempt_id,
            e.title AS exam_title,
            COALESCE(a.score, 0) AS score,
            (SELECT COUNT(*) FROM questions q WHERE q.exam_id = e.id) AS total_questions,
            a.end_time AS completion_date
        FROM exam_attempts a
        JOIN exams e ON e.id = a.exam_id
        WHERE a.user_id = ? AND a.end_time IS NOT NULL
        ORDER BY a.end_time, a.id
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}
