//! Error types for banklink-client

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Shown for connection failures and unreadable responses
pub const CONNECTION_ERROR_MESSAGE: &str = "Connection error. Please try again.";

/// Shown when the backend does not answer within the configured timeout
pub const TIMEOUT_MESSAGE: &str = "Request timed out. Please try again.";

/// Backend call being made; drives fallback messages and log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiOperation {
    Login,
    Register,
    FetchAccounts,
    Deposit,
    Withdraw,
    Transfer,
}

impl ApiOperation {
    /// Message used when the backend fails without saying why
    pub fn fallback_message(&self) -> String {
        match self {
            ApiOperation::FetchAccounts => "Failed to fetch accounts.".to_string(),
            other => format!("Failed to process {}.", other),
        }
    }
}

impl std::fmt::Display for ApiOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiOperation::Login => write!(f, "login"),
            ApiOperation::Register => write!(f, "registration"),
            ApiOperation::FetchAccounts => write!(f, "accounts list"),
            ApiOperation::Deposit => write!(f, "deposit"),
            ApiOperation::Withdraw => write!(f, "withdrawal"),
            ApiOperation::Transfer => write!(f, "transfer"),
        }
    }
}

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiErrorCode {
    Rejected,
    Transport,
    Timeout,
    InvalidResponse,
    InvalidUrl,
}

impl std::fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiErrorCode::Rejected => write!(f, "REJECTED"),
            ApiErrorCode::Transport => write!(f, "TRANSPORT"),
            ApiErrorCode::Timeout => write!(f, "TIMEOUT"),
            ApiErrorCode::InvalidResponse => write!(f, "INVALID_RESPONSE"),
            ApiErrorCode::InvalidUrl => write!(f, "INVALID_URL"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    /// The backend answered and refused the request
    #[error("{operation} rejected ({status}): {message}")]
    Rejected {
        operation: ApiOperation,
        status: u16,
        message: String,
    },

    #[error("{operation} failed in transport: {reason}")]
    Transport { operation: ApiOperation, reason: String },

    #[error("{operation} timed out after {timeout:?}")]
    Timeout {
        operation: ApiOperation,
        timeout: Duration,
    },

    #[error("Unexpected {operation} response: {reason}")]
    InvalidResponse { operation: ApiOperation, reason: String },

    #[error("Invalid API URL: {url}")]
    InvalidUrl { url: String },
}

impl ApiError {
    pub fn code(&self) -> ApiErrorCode {
        match self {
            ApiError::Rejected { .. } => ApiErrorCode::Rejected,
            ApiError::Transport { .. } => ApiErrorCode::Transport,
            ApiError::Timeout { .. } => ApiErrorCode::Timeout,
            ApiError::InvalidResponse { .. } => ApiErrorCode::InvalidResponse,
            ApiError::InvalidUrl { .. } => ApiErrorCode::InvalidUrl,
        }
    }

    /// Text suitable for a toast or an inline form error
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected { message, .. } => message.clone(),
            ApiError::Timeout { .. } => TIMEOUT_MESSAGE.to_string(),
            ApiError::Transport { .. }
            | ApiError::InvalidResponse { .. }
            | ApiError::InvalidUrl { .. } => CONNECTION_ERROR_MESSAGE.to_string(),
        }
    }

    /// True when the backend was reached and gave an answer
    pub fn is_rejection(&self) -> bool {
        matches!(self, ApiError::Rejected { .. })
    }
}

/// Result type with ApiError
pub type ApiResult<T> = Result<T, ApiError>;
