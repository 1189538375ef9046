// src/lib.rs

pub mod config;
pub mod database;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_router;
