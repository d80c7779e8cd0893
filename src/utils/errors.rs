//! Error handling for Registon
//!
//! This module defines the main error types used throughout the client
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Fallback shown when no better message can be extracted from a failure
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong ⚠️";

/// Main error type for the Registon client
#[derive(Error, Debug)]
pub enum RegistonError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Token storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Client-side form and password policy errors.
///
/// These are raised before any request reaches the backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter your {0}")]
    MissingField(&'static str),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Password must be at least {min} characters long")]
    PasswordTooShort { min: usize },

    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// Backend API specific errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// Non-OK status. `message` is the `message` field of the JSON error body, if any.
    #[error("{}", status_message(.status, .message))]
    Status { status: u16, message: Option<String> },

    #[error("Request timed out")]
    Timeout,

    #[error("Backend is unreachable: {0}")]
    Unavailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    Decode(String),

    /// A successful response that lacks the payload the caller expected.
    #[error("{}", missing_payload_message(.field, .message))]
    MissingPayload { field: &'static str, message: Option<String> },
}

/// Result type alias for Registon operations
pub type Result<T> = std::result::Result<T, RegistonError>;

/// Result type alias for backend calls
pub type ApiResult<T> = std::result::Result<T, ApiError>;

fn status_message(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(message) => message.clone(),
        None => format!("HTTP error! status: {}", status),
    }
}

fn missing_payload_message(field: &&'static str, message: &Option<String>) -> String {
    match message {
        Some(message) => message.clone(),
        None => format!("Response has no `{}` field", field),
    }
}

impl ApiError {
    /// Build an `ApiError` from a transport-level `reqwest` failure
    pub fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else if e.is_connect() {
            ApiError::Unavailable(e.to_string())
        } else if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::RequestFailed(e.to_string())
        }
    }

    /// Fill in `fallback` as the message of a status error the backend sent
    /// without a message of its own.
    pub fn with_fallback_message(self, fallback: &str) -> Self {
        match self {
            ApiError::Status { status, message: None } => ApiError::Status {
                status,
                message: Some(fallback.to_string()),
            },
            other => other,
        }
    }

    /// HTTP status of the failure, if the backend answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl RegistonError {
    /// Check if the error is recoverable by simply trying again later
    pub fn is_recoverable(&self) -> bool {
        match self {
            RegistonError::Validation(_) => false,
            RegistonError::Api(ApiError::Status { status, .. }) => *status >= 500,
            RegistonError::Api(ApiError::Timeout) => true,
            RegistonError::Api(ApiError::Unavailable(_)) => true,
            RegistonError::Api(ApiError::RequestFailed(_)) => true,
            RegistonError::Api(ApiError::Decode(_)) => false,
            RegistonError::Api(ApiError::MissingPayload { .. }) => false,
            RegistonError::Config(_) => false,
            RegistonError::Storage(_) => true,
            RegistonError::Serialization(_) => false,
            RegistonError::Io(_) => true,
            RegistonError::UrlParse(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RegistonError::Validation(_) => ErrorSeverity::Info,
            RegistonError::Api(ApiError::Status { status, .. }) if *status < 500 => ErrorSeverity::Warning,
            RegistonError::Api(ApiError::MissingPayload { .. }) => ErrorSeverity::Warning,
            RegistonError::Config(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::Error,
        }
    }

    /// Human-readable message suitable for session state and toasts
    pub fn user_message(&self) -> String {
        match self {
            RegistonError::Validation(e) => e.to_string(),
            RegistonError::Api(e) => e.to_string(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
