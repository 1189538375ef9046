// src/services/attempts.rs

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use sqlx::SqlitePool;

use crate::{
    error::{AppError, is_unique_violation},
    models::{
        attempt::{AttemptView, ExamAttempt},
        exam::Exam,
        question::PublicQuestion,
    },
    repository::{answers, attempts, exams, questions},
};

/// Seconds left on an attempt, clamped to `0..=duration_seconds`.
///
/// A clock that reads earlier than `start_time` counts as zero elapsed.
pub fn remaining_seconds(duration_seconds: i64, start_time: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let elapsed = (now - start_time).num_seconds().max(0);
    (duration_seconds - elapsed).max(0)
}

/// Starts a new attempt for (user, exam), or resumes the open one.
///
/// * New attempt: persisted with `start_time = now`, questions shuffled,
///   full duration remaining.
/// * Open attempt: nothing is written; questions come back in stored order
///   with the user's saved selections.
///
/// The shuffled order is not persisted, so a resumed attempt shows stored
/// order rather than the order first returned.
pub async fn start_or_resume(
    pool: &SqlitePool,
    user_id: i64,
    exam_id: i64,
    now: DateTime<Utc>,
) -> Result<AttemptView, AppError> {
    let exam = exams::find_by_id(pool, exam_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Exam {} not found", exam_id)))?;

    if let Some(attempt) = attempts::find_open(pool, user_id, exam_id).await? {
        return resume(pool, &exam, attempt, now).await;
    }

    let attempt = match attempts::insert_open(pool, user_id, exam_id, now).await {
        Ok(attempt) => attempt,
        // A concurrent request created the open attempt first.
        Err(e) if is_unique_violation(&e) => {
            tracing::debug!(user_id, exam_id, "Lost race creating attempt, resuming");
            let attempt = attempts::find_open(pool, user_id, exam_id)
                .await?
                .ok_or_else(|| {
                    AppError::Conflict("Attempt changed concurrently, please retry".to_string())
                })?;
            return resume(pool, &exam, attempt, now).await;
        }
        Err(e) => {
            tracing::error!("Failed to create exam attempt: {:?}", e);
            return Err(e.into());
        }
    };

    tracing::info!(attempt_id = attempt.id, user_id, exam_id, "Exam attempt started");

    let mut questions = questions::list_for_exam(pool, exam_id).await?;
    questions.shuffle(&mut rand::rng());

    Ok(AttemptView {
        attempt_id: attempt.id,
        remaining_time: exam.duration_seconds(),
        questions: questions
            .into_iter()
            .map(|q| PublicQuestion::from_question(q, None))
            .collect(),
    })
}

async fn resume(
    pool: &SqlitePool,
    exam: &Exam,
    attempt: ExamAttempt,
    now: DateTime<Utc>,
) -> Result<AttemptView, AppError> {
    let questions = questions::list_for_exam(pool, exam.id).await?;
    let mut saved: HashMap<i64, String> = answers::list_for_attempt(pool, attempt.id)
        .await?
        .into_iter()
        .map(|a| (a.question_id, a.selected_answer))
        .collect();

    Ok(AttemptView {
        attempt_id: attempt.id,
        remaining_time: remaining_seconds(exam.duration_seconds(), attempt.start_time, now),
        questions: questions
            .into_iter()
            .map(|q| {
                let selected = saved.remove(&q.id);
                PublicQuestion::from_question(q, selected)
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::{
        models::question::OptionLabel,
        services::{
            answers::save_answer,
            scoring::submit,
            testing::{fixture, t0},
        },
    };

    async fn attempt_count(pool: &SqlitePool) -> i64 {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM exam_attempts")
            .fetch_one(pool)
            .await
            .unwrap();
        count
    }

    #[test]
    fn remaining_time_is_clamped() {
        let start = t0();
        assert_eq!(remaining_seconds(1800, start, start), 1800);
        assert_eq!(remaining_seconds(1800, start, start + Duration::seconds(600)), 1200);
        assert_eq!(remaining_seconds(1800, start, start + Duration::seconds(1800)), 0);
        assert_eq!(remaining_seconds(1800, start, start + Duration::seconds(1810)), 0);
        // Clock behind the start time.
        assert_eq!(remaining_seconds(1800, start, start - Duration::seconds(30)), 1800);
    }

    #[tokio::test]
    async fn new_attempt_has_full_duration_and_no_selections() {
        let f = fixture().await;

        let view = start_or_resume(&f.pool, f.user_id, f.exam_id, t0()).await.unwrap();

        assert_eq!(view.remaining_time, 1800);
        assert!(view.questions.iter().all(|q| q.selected_answer.is_none()));

        let mut ids: Vec<i64> = view.questions.iter().map(|q| q.id).collect();
        ids.sort();
        assert_eq!(ids, f.question_ids);
        assert_eq!(attempt_count(&f.pool).await, 1);
    }

    #[tokio::test]
    async fn second_call_resumes_same_attempt_with_selections() {
        let f = fixture().await;
        let first = start_or_resume(&f.pool, f.user_id, f.exam_id, t0()).await.unwrap();

        save_answer(&f.pool, f.user_id, first.attempt_id, f.question_ids[0], OptionLabel::B)
            .await
            .unwrap();
        save_answer(&f.pool, f.user_id, first.attempt_id, f.question_ids[3], OptionLabel::A)
            .await
            .unwrap();

        let second = start_or_resume(&f.pool, f.user_id, f.exam_id, t0() + Duration::seconds(5))
            .await
            .unwrap();

        assert_eq!(second.attempt_id, first.attempt_id);
        assert_eq!(attempt_count(&f.pool).await, 1);

        let ids: Vec<i64> = second.questions.iter().map(|q| q.id).collect();
        assert_eq!(ids, f.question_ids, "resume uses stored order");

        let selections: Vec<Option<&str>> = second
            .questions
            .iter()
            .map(|q| q.selected_answer.as_deref())
            .collect();
        assert_eq!(selections, [Some("b"), None, None, Some("a"), None]);
    }

    #[tokio::test]
    async fn remaining_time_never_increases_and_bottoms_out_at_zero() {
        let f = fixture().await;
        let start = start_or_resume(&f.pool, f.user_id, f.exam_id, t0()).await.unwrap();
        assert_eq!(start.remaining_time, 1800);

        let mut last = start.remaining_time;
        for secs in [1, 60, 900, 1799, 1810, 5000] {
            let view = start_or_resume(&f.pool, f.user_id, f.exam_id, t0() + Duration::seconds(secs))
                .await
                .unwrap();
            assert_eq!(view.attempt_id, start.attempt_id);
            assert!(view.remaining_time <= last);
            assert!(view.remaining_time >= 0);
            last = view.remaining_time;
        }

        let expired = start_or_resume(&f.pool, f.user_id, f.exam_id, t0() + Duration::seconds(1810))
            .await
            .unwrap();
        assert_eq!(expired.remaining_time, 0);

        // Still open until submitted.
        let attempt = attempts::find_by_id(&f.pool, start.attempt_id).await.unwrap().unwrap();
        assert!(attempt.is_open());
    }

    #[tokio::test]
    async fn unknown_exam_is_not_found_and_writes_nothing() {
        let f = fixture().await;

        let err = start_or_resume(&f.pool, f.user_id, 9999, t0()).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(attempt_count(&f.pool).await, 0);
    }

    #[tokio::test]
    async fn attempts_are_per_user() {
        let f = fixture().await;
        let mine = start_or_resume(&f.pool, f.user_id, f.exam_id, t0()).await.unwrap();
        let theirs = start_or_resume(&f.pool, f.other_user_id, f.exam_id, t0()).await.unwrap();

        assert_ne!(mine.attempt_id, theirs.attempt_id);
    }

    #[tokio::test]
    async fn submitted_attempt_is_not_resumed() {
        let f = fixture().await;
        let first = start_or_resume(&f.pool, f.user_id, f.exam_id, t0()).await.unwrap();
        submit(&f.pool, f.user_id, first.attempt_id, t0() + Duration::seconds(60))
            .await
            .unwrap();

        let next = start_or_resume(&f.pool, f.user_id, f.exam_id, t0() + Duration::seconds(120))
            .await
            .unwrap();

        assert_ne!(next.attempt_id, first.attempt_id);
        assert_eq!(next.remaining_time, 1800);
        assert!(next.questions.iter().all(|q| q.selected_answer.is_none()));
    }

    #[tokio::test]
    async fn storage_rejects_a_second_open_attempt() {
        let f = fixture().await;
        attempts::insert_open(&f.pool, f.user_id, f.exam_id, t0()).await.unwrap();

        let err = attempts::insert_open(&f.pool, f.user_id, f.exam_id, t0())
            .await
            .unwrap_err();

        assert!(is_unique_violation(&err));
    }
}
