// src/repository/mod.rs

//! Data access functions, one module per table.
//!
//! Every function takes any `SqliteExecutor` so callers can run it against
//! the pool or inside a transaction (`&mut *tx`). Functions return plain
//! records; relationships are traversed with explicit calls.

pub mod answers;
pub mod attempts;
pub mod exams;
pub mod questions;
pub mod users;
