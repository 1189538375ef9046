// src/services/answers.rs

use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::question::OptionLabel,
    repository::{answers, attempts, questions},
};

/// Records the user's choice for one question of an open attempt.
///
/// Saving again for the same question overwrites the previous choice.
/// No deadline is enforced here; answers are accepted until the attempt
/// is submitted.
pub async fn save_answer(
    pool: &SqlitePool,
    user_id: i64,
    attempt_id: i64,
    question_id: i64,
    selected: OptionLabel,
) -> Result<(), AppError> {
    let attempt = attempts::find_by_id(pool, attempt_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Attempt {} not found", attempt_id)))?;

    if attempt.user_id != user_id {
        return Err(AppError::Forbidden(
            "Attempt belongs to another user".to_string(),
        ));
    }
    if !attempt.is_open() {
        return Err(AppError::Conflict("Attempt already submitted".to_string()));
    }

    questions::find_by_id(pool, question_id)
        .await?
        .filter(|q| q.exam_id == attempt.exam_id)
        .ok_or_else(|| {
            AppError::NotFound(format!("Question {} is not part of this exam", question_id))
        })?;

    // Re-checks that the attempt is open in the same statement as the write,
    // so a submit that lands in between is not overtaken.
    if !answers::upsert_if_open(pool, attempt_id, question_id, selected).await? {
        return Err(AppError::Conflict("Attempt already submitted".to_string()));
    }

    tracing::debug!(attempt_id, question_id, selected = %selected, "Answer saved");
    Ok(())
}
