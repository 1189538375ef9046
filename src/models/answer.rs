// src/models/answer.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'user_answers' table in the database.
/// Unique per (attempt_id, question_id).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UserAnswer {
    pub id: i64,
    pub attempt_id: i64,
    pub question_id: i64,
    pub selected_answer: String,
}

/// DTO for saving an answer.
/// Fields are optional so a missing field is reported as a validation error.
#[derive(Debug, Deserialize)]
pub struct SaveAnswerRequest {
    #[serde(default)]
    pub attempt_id: Option<i64>,
    #[serde(default)]
    pub question_id: Option<i64>,
    #[serde(default)]
    pub selected_answer: Option<String>,
}
