// src/models/question.rs

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

/// Represents the 'questions' table in the database.
/// Questions are immutable once created.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,

    pub exam_id: i64,

    pub question_text: String,

    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,

    /// Label of the correct option, always lowercase ('a'..'d').
    pub correct_answer: String,
}

/// One of the four option labels of a multiple-choice question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    pub const ALL: [OptionLabel; 4] = [OptionLabel::A, OptionLabel::B, OptionLabel::C, OptionLabel::D];

    /// Storage form of the label.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionLabel::A => "a",
            OptionLabel::B => "b",
            OptionLabel::C => "c",
            OptionLabel::D => "d",
        }
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the four option labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidOptionLabel(pub String);

impl fmt::Display for InvalidOptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a valid option (expected a, b, c or d)", self.0)
    }
}

impl std::error::Error for InvalidOptionLabel {}

impl FromStr for OptionLabel {
    type Err = InvalidOptionLabel;

    /// Accepts 'a'..'d' in either case, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" => Ok(OptionLabel::A),
            "b" => Ok(OptionLabel::B),
            "c" => Ok(OptionLabel::C),
            "d" => Ok(OptionLabel::D),
            _ => Err(InvalidOptionLabel(s.to_string())),
        }
    }
}

/// DTO for sending a question to the client (excludes the correct answer).
/// `selected_answer` carries the user's saved choice when resuming an attempt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicQuestion {
    pub id: i64,
    pub question_text: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub selected_answer: Option<String>,
}

impl PublicQuestion {
    pub fn from_question(q: Question, selected_answer: Option<String>) -> Self {
        Self {
            id: q.id,
            question_text: q.question_text,
            option_a: q.option_a,
            option_b: q.option_b,
            option_c: q.option_c,
            option_d: q.option_d,
            selected_answer,
        }
    }
}

/// Input for inserting a question into an exam.
#[derive(Debug, Clone)]
pub struct NewQuestion<'a> {
    pub question_text: &'a str,
    pub options: [&'a str; 4],
    pub correct_answer: OptionLabel,
}
