// src/services/mod.rs

//! Exam session operations, independent of the HTTP layer.
//!
//! Operations that depend on the clock take `now` explicitly; handlers pass
//! `Utc::now()`.

pub mod accounts;
pub mod answers;
pub mod attempts;
pub mod exams;
pub mod results;
pub mod scoring;
pub mod seed;
