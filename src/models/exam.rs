// src/models/exam.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'exams' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Exam {
    pub id: i64,
    pub title: String,
    /// Fixed at creation.
    pub duration_minutes: i64,
}

impl Exam {
    pub fn duration_seconds(&self) -> i64 {
        self.duration_minutes * 60
    }
}

/// DTO for the exam catalog.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExamSummary {
    pub id: i64,
    pub title: String,
    /// Duration in minutes.
    pub duration: i64,
}

impl From<Exam> for ExamSummary {
    fn from(exam: Exam) -> Self {
        Self {
            id: exam.id,
            title: exam.title,
            duration: exam.duration_minutes,
        }
    }
}
