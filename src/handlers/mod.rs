// src/handlers/mod.rs

pub mod auth;
pub mod exam;
pub mod results;
pub mod seed;
