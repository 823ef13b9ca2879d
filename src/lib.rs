//! Library Console
//!
//! Terminal administration console for a library catalog REST API. Every
//! catalog resource (publishers, categories, authors, books, borrows and book
//! orders) gets the same CRUD panel: a fetched list, an editor with per-field
//! validation, and a single error notice.

pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod repository;
pub mod services;
pub mod theme;
pub mod validation;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
