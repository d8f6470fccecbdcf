//! Error types for banklink-statement

use banklink_config::StatementFormat;
use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

/// Shown when the requested account is not in the cache
pub const ACCOUNT_NOT_FOUND_MESSAGE: &str = "Account not found.";

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatementErrorCode {
    AccountNotFound,
    RendererUnavailable,
    RenderFailed,
    CsvError,
    IoError,
}

impl std::fmt::Display for StatementErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatementErrorCode::AccountNotFound => write!(f, "ACCOUNT_NOT_FOUND"),
            StatementErrorCode::RendererUnavailable => write!(f, "RENDERER_UNAVAILABLE"),
            StatementErrorCode::RenderFailed => write!(f, "RENDER_FAILED"),
            StatementErrorCode::CsvError => write!(f, "CSV_ERROR"),
            StatementErrorCode::IoError => write!(f, "IO_ERROR"),
        }
    }
}

/// Detailed error information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementErrorDetails {
    pub code: StatementErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl StatementErrorDetails {
    pub fn new(code: StatementErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            suggestions: vec![],
        }
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for StatementErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        for suggestion in &self.suggestions {
            write!(f, "\n  - {}", suggestion)?;
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum StatementError {
    #[error("Account not found: {id}")]
    AccountNotFound { id: String },

    /// A loading stage of the PDF renderer failed
    #[error("Renderer unavailable ({stage}): {reason}")]
    RendererUnavailable { stage: String, reason: String },

    #[error("Failed to render {format} statement: {reason}")]
    RenderFailed {
        format: StatementFormat,
        reason: String,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

impl StatementError {
    pub fn code(&self) -> StatementErrorCode {
        match self {
            StatementError::AccountNotFound { .. } => StatementErrorCode::AccountNotFound,
            StatementError::RendererUnavailable { .. } => StatementErrorCode::RendererUnavailable,
            StatementError::RenderFailed { .. } => StatementErrorCode::RenderFailed,
            StatementError::Csv(_) => StatementErrorCode::CsvError,
            StatementError::IoError(_) => StatementErrorCode::IoError,
        }
    }

    /// Text suitable for a toast
    pub fn user_message(&self) -> String {
        match self {
            StatementError::AccountNotFound { .. } => ACCOUNT_NOT_FOUND_MESSAGE.to_string(),
            StatementError::IoError(e) => format!("Could not save statement: {}", e),
            _ => "Error generating statement. Please try again.".to_string(),
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> StatementErrorDetails {
        let details = StatementErrorDetails::new(self.code(), self.to_string());
        match self {
            StatementError::AccountNotFound { .. } => details.with_suggestion(
                "Run `banklink accounts` to list the accounts you can export.".to_string(),
            ),
            StatementError::RendererUnavailable { .. } | StatementError::RenderFailed { .. } => {
                details.with_suggestion("Retry with `--format csv`.".to_string())
            }
            StatementError::IoError(_) => details.with_suggestion(
                "Check that statement.output_dir exists and is writable.".to_string(),
            ),
            StatementError::Csv(_) => details,
        }
    }
}

impl From<banklink_core::CoreError> for StatementError {
    fn from(error: banklink_core::CoreError) -> Self {
        match error {
            banklink_core::CoreError::AccountNotFound { id } => StatementError::AccountNotFound { id },
            banklink_core::CoreError::IoError(e) => StatementError::IoError(e),
            other => StatementError::RenderFailed {
                format: StatementFormat::Csv,
                reason: other.to_string(),
            },
        }
    }
}

/// Result type with StatementError
pub type StatementResult<T> = Result<T, StatementError>;
