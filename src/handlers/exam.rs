// src/handlers/exam.rs

use axum::{Extension, Json, extract::State, response::IntoResponse};
use chrono::Utc;
use serde_json::json;
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    extractors::{AppJson, AppPath},
    models::{
        answer::SaveAnswerRequest,
        attempt::SubmitRequest,
        question::OptionLabel,
    },
    services::{answers, attempts, exams, scoring},
    utils::jwt::CurrentUser,
};

/// Lists all exams.
pub async fn list_exams(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(exams::list_exams(&pool).await?))
}

/// Starts or resumes the caller's attempt at an exam.
pub async fn start_exam(
    State(pool): State<SqlitePool>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    AppPath(exam_id): AppPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let view = attempts::start_or_resume(&pool, user_id, exam_id, Utc::now()).await?;
    Ok(Json(view))
}

/// Saves (or overwrites) the caller's answer to one question.
pub async fn save_answer(
    State(pool): State<SqlitePool>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    AppJson(req): AppJson<SaveAnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (Some(attempt_id), Some(question_id), Some(selected)) =
        (req.attempt_id, req.question_id, req.selected_answer.as_deref())
    else {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    };

    let selected = selected
        .parse::<OptionLabel>()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    answers::save_answer(&pool, user_id, attempt_id, question_id, selected).await?;

    Ok(Json(json!({ "message": "Answer saved successfully" })))
}

/// Grades and closes the caller's attempt.
pub async fn submit_exam(
    State(pool): State<SqlitePool>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    AppJson(req): AppJson<SubmitRequest>,
) -> Result<impl IntoResponse, AppError> {
    let attempt_id = req
        .attempt_id
        .ok_or_else(|| AppError::BadRequest("Attempt ID is required".to_string()))?;

    let result = scoring::submit(&pool, user_id, attempt_id, Utc::now()).await?;

    Ok(Json(json!({
        "score": result.score,
        "total_questions": result.total_questions,
        "message": "Exam submitted successfully"
    })))
}
