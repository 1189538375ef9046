// src/repository/questions.rs

use sqlx::SqliteExecutor;

use crate::models::question::{NewQuestion, Question};

const QUESTION_COLUMNS: &str =
    "id, exam_id, question_text, option_a, option_b, option_c, option_d, correct_answer";

pub async fn insert(
    db: impl SqliteExecutor<'_>,
    exam_id: i64,
    question: &NewQuestion<'_>,
) -> sqlx::Result<i64> {
    let [a, b, c, d] = question.options;
    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO questions
            (exam_id, question_text, option_a, option_b, option_c, option_d, correct_answer)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(exam_id)
    .bind(question.question_text)
    .bind(a)
    .bind(b)
    .bind(c)
    .bind(d)
    .bind(question.correct_answer.as_str())
    .fetch_one(db)
    .await?;

    Ok(id)
}

pub async fn find_by_id(db: impl SqliteExecutor<'_>, id: i64) -> sqlx::Result<Option<Question>> {
    sqlx::query_as::<_, Question>(&format!(
        "SELECT {QUESTION_COLUMNS} FROM questions WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(db)
    .await
}

/// All questions of an exam in stored order.
pub async fn list_for_exam(
    db: impl SqliteExecutor<'_>,
    exam_id: i64,
) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(&format!(
        "SELECT {QUESTION_COLUMNS} FROM questions WHERE exam_id = ? ORDER BY id"
    ))
    .bind(exam_id)
    .fetch_all(db)
    .await
}
