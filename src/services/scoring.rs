// src/services/scoring.rs

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::{answer::UserAnswer, attempt::ScoreResult, question::Question},
    repository::{answers, attempts, questions},
};

/// Counts answers that match their question's correct label.
/// Answers to questions outside `questions` are ignored.
pub fn grade(questions: &[Question], answers: &[UserAnswer]) -> i64 {
    let key: HashMap<i64, &str> = questions
        .iter()
        .map(|q| (q.id, q.correct_answer.as_str()))
        .collect();

    answers
        .iter()
        .filter(|a| key.get(&a.question_id) == Some(&a.selected_answer.as_str()))
        .count() as i64
}

/// Grades an open attempt and closes it.
///
/// Claiming the attempt, grading and storing the score happen in one
/// transaction: either the attempt ends up closed with its score, or it
/// stays open. Submitting a closed attempt is a `Conflict` and leaves the
/// stored score untouched.
pub async fn submit(
    pool: &SqlitePool,
    user_id: i64,
    attempt_id: i64,
    now: DateTime<Utc>,
) -> Result<ScoreResult, AppError> {
    let mut tx = pool.begin().await?;

    // Writing first takes the write lock before anything is read.
    if !attempts::close(&mut *tx, attempt_id, user_id, now).await? {
        let err = match attempts::find_by_id(&mut *tx, attempt_id).await? {
            None => AppError::NotFound(format!("Attempt {} not found", attempt_id)),
            Some(a) if a.user_id != user_id => {
                AppError::Forbidden("Attempt belongs to another user".to_string())
            }
            Some(_) => AppError::Conflict("Attempt already submitted".to_string()),
        };
        return Err(err);
    }

    let attempt = attempts::find_by_id(&mut *tx, attempt_id)
        .await?
        .ok_or_else(|| AppError::InternalServerError("closed attempt disappeared".to_string()))?;

    let questions = questions::list_for_exam(&mut *tx, attempt.exam_id).await?;
    let answers = answers::list_for_attempt(&mut *tx, attempt_id).await?;
    let score = grade(&questions, &answers);

    attempts::set_score(&mut *tx, attempt_id, score).await?;
    tx.commit().await.map_err(|e| {
        tracing::error!("Failed to commit submission for attempt {}: {:?}", attempt_id, e);
        AppError::from(e)
    })?;

    tracing::info!(
        attempt_id,
        user_id,
        score,
        total = questions.len(),
        "Exam attempt submitted"
    );

    Ok(ScoreResult {
        score,
        total_questions: questions.len() as i64,
    })
}
