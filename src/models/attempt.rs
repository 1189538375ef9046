// src/models/attempt.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::question::PublicQuestion;

/// Represents the 'exam_attempts' table in the database.
/// One user's timed pass at one exam.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ExamAttempt {
    pub id: i64,
    pub user_id: i64,
    pub exam_id: i64,
    pub start_time: DateTime<Utc>,
    /// Unset while the attempt is open.
    pub end_time: Option<DateTime<Utc>>,
    /// Set together with `end_time` on submit.
    pub score: Option<i64>,
}

impl ExamAttempt {
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }
}

/// Returned by start/resume: the attempt plus its question sheet.
#[derive(Debug, Serialize, Deserialize)]
pub struct AttemptView {
    pub attempt_id: i64,
    /// Seconds left before the nominal deadline, never negative.
    pub remaining_time: i64,
    pub questions: Vec<PublicQuestion>,
}

/// DTO for submitting an attempt.
/// Fields are optional so a missing field is reported as a validation error.
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub attempt_id: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreResult {
    pub score: i64,
    /// Full question count of the exam, answered or not.
    pub total_questions: i64,
}

/// A closed attempt as shown on the results page.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct ResultView {
    pub attempt_id: i64,
    pub exam_title: String,
    pub score: i64,
    pub total_questions: i64,
    pub completion_date: DateTime<Utc>,
}
