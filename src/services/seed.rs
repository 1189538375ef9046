// src/services/seed.rs

use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::question::{NewQuestion, OptionLabel},
    repository::{exams, questions},
};

pub const DEMO_EXAM_TITLE: &str = "Python Programming Test";
pub const DEMO_EXAM_DURATION_MINUTES: i64 = 30;

const DEMO_QUESTIONS: [NewQuestion<'static>; 5] = [
    NewQuestion {
        question_text: "Which keyword is used to define a function in Python?",
        options: ["function", "def", "define", "func"],
        correct_answer: OptionLabel::B,
    },
    NewQuestion {
        question_text: "Which data type is mutable in Python?",
        options: ["tuple", "string", "list", "integer"],
        correct_answer: OptionLabel::C,
    },
    NewQuestion {
        question_text: "What does the 'len()' function do?",
        options: [
            "Returns the length of an object",
            "Converts a value to integer",
            "Returns the largest item in an iterable",
            "Reads input from the user",
        ],
        correct_answer: OptionLabel::A,
    },
    NewQuestion {
        question_text: "Which operator is used for exponentiation in Python?",
        options: ["^", "**", "//", "%%"],
        correct_answer: OptionLabel::B,
    },
    NewQuestion {
        question_text: "What is the output of 'Hello'[1:]?",
        options: ["H", "He", "ello", "Hello"],
        correct_answer: OptionLabel::C,
    },
];

/// Inserts the demo exam and its five questions in one transaction.
///
/// Not idempotent: every call adds another copy of the exam.
pub async fn seed_demo_exam(pool: &SqlitePool) -> Result<i64, AppError> {
    let mut tx = pool.begin().await?;

    let exam_id = exams::insert(&mut *tx, DEMO_EXAM_TITLE, DEMO_EXAM_DURATION_MINUTES).await?;
    for question in &DEMO_QUESTIONS {
        questions::insert(&mut *tx, exam_id, question).await?;
    }

    tx.commit().await?;
    tracing::info!(exam_id, "Seeded demo exam");

    Ok(exam_id)
}
