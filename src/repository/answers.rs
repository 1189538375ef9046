// src/repository/answers.rs

use sqlx::SqliteExecutor;

use crate::models::{answer::UserAnswer, question::OptionLabel};

/// Inserts or overwrites the answer for (attempt, question), but only while
/// the attempt is still open. Returns false when the attempt was closed.
pub async fn upsert_if_open(
    db: impl SqliteExecutor<'_>,
    attempt_id: i64,
    question_id: i64,
    selected: OptionLabel,
) -> sqlx::Result<bool> {
    let result = sqlx::query(
        r#"
        INSERT INTO user_answers (attempt_id, question_id, selected_answer)
        SELECT ?1, ?2, ?3
        WHERE EXISTS (
            SELECT 1 FROM exam_attempts WHERE id = ?1 AND end_time IS NULL
        )
        ON CONFLICT (attempt_id, question_id)
        DO UPDATE SET selected_answer = excluded.selected_answer
        "#,
    )
    .bind(attempt_id)
    .bind(question_id)
    .bind(selected.as_str())
    .execute(db)
    .await?;

    Ok(result.rows_affected() == 1)
}

pub async fn list_for_attempt(
    db: impl SqliteExecutor<'_>,
    attempt_id: i64,
) -> sqlx::Result<Vec<UserAnswer>> {
    sqlx::query_as::<_, UserAnswer>(
        r#"
        SELECT id, attempt_id, question_id, selected_answer
        FROM user_answers
        WHERE attempt_id = ?
        ORDER BY question_id
        "#,
    )
    .bind(attempt_id)
    .fetch_all(db)
    .await
}
