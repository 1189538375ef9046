// src/services/results.rs

use sqlx::SqlitePool;

use crate::{error::AppError, models::attempt::ResultView, repository::attempts};

/// Lists the user's closed attempts, oldest completion first.
/// Open attempts never appear.
pub async fn list_results(pool: &SqlitePool, user_id: i64) -> Result<Vec<ResultView>, AppError> {
    attempts::list_closed_results(pool, user_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch results for user {}: {:?}", user_id, e);
            AppError::from(e)
        })
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::services::{
        answers::save_answer,
        attempts::start_or_resume,
        scoring::submit,
        testing::{KEY, fixture, t0},
    };

    #[tokio::test]
    async fn only_closed_attempts_are_listed() {
        let f = fixture().await;

        let first = start_or_resume(&f.pool, f.user_id, f.exam_id, t0()).await.unwrap();
        save_answer(&f.pool, f.user_id, first.attempt_id, f.question_ids[1], KEY[1])
            .await
            .unwrap();
        submit(&f.pool, f.user_id, first.attempt_id, t0() + Duration::seconds(100))
            .await
            .unwrap();

        // A second, still open attempt.
        let second = start_or_resume(&f.pool, f.user_id, f.exam_id, t0() + Duration::seconds(200))
            .await
            .unwrap();

        let results = list_results(&f.pool, f.user_id).await.unwrap();
        assert_eq!(results.len(), 1);

        let r = &results[0];
        assert_eq!(r.attempt_id, first.attempt_id);
        assert_ne!(r.attempt_id, second.attempt_id);
        assert_eq!(r.exam_title, "Fixture Exam");
        assert_eq!(r.score, 1);
        assert_eq!(r.total_questions, 5);
        assert_eq!(r.completion_date, t0() + Duration::seconds(100));
    }

    #[tokio::test]
    async fn results_are_per_user_and_ordered_by_completion() {
        let f = fixture().await;

        for round in 0..2 {
            let base = t0() + Duration::seconds(1000 * round);
            let view = start_or_resume(&f.pool, f.user_id, f.exam_id, base).await.unwrap();
            submit(&f.pool, f.user_id, view.attempt_id, base + Duration::seconds(10))
                .await
                .unwrap();
        }

        let mine = list_results(&f.pool, f.user_id).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine[0].completion_date < mine[1].completion_date);

        assert!(list_results(&f.pool, f.other_user_id).await.unwrap().is_empty());
    }
}
