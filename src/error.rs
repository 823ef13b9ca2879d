//! Error types for the library console

use thiserror::Error;

use crate::validation::ValidationResult;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Server rejected request ({status}){}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Rejected { status: u16, message: Option<String> },

    #[error("Validation error: {0}")]
    Validation(ValidationResult),

    #[error("Invalid field value: {0}")]
    Field(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("An editor is already open")]
    EditorBusy,

    #[error("No editor is open")]
    EditorClosed,

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Detail worth showing after a failure headline, if the error carries one
    pub fn detail(&self) -> Option<String> {
        match self {
            AppError::Rejected { message, .. } => message.clone(),
            AppError::NotFound(msg) | AppError::Field(msg) | AppError::BadRequest(msg) => Some(msg.clone()),
            AppError::Validation(errors) => Some(errors.to_string()),
            _ => None,
        }
    }

    /// Build the user-facing notice for a failed operation
    pub fn notice(&self, headline: &str) -> String {
        match self.detail() {
            Some(detail) if !detail.is_empty() => format!("{}: {}", headline, detail),
            _ => headline.to_string(),
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
