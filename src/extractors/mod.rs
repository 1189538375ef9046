// src/extractors/mod.rs

pub mod json;
pub mod path;

pub use json::AppJson;
pub use path::AppPath;
