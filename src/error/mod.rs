//! Error handling for staffdir.
//!
//! This module provides:
//! - [`DirError`]: The main error enum for all staffdir operations
//! - [`ErrorCode`]: Standardized error codes for machine parsing
//! - [`StructuredError`]: Rich error type with suggestions and context

mod codes;
mod suggestions;

use std::io;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use codes::ErrorCode;
pub use suggestions::suggest_for_error;

/// Main error type for staffdir operations.
#[derive(Error, Debug)]
pub enum DirError {
    #[error("Please fill all required fields")]
    MissingField,

    #[error("Invalid department selected")]
    InvalidDepartment(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Directory service error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl DirError {
    /// Get the error code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::MissingField => ErrorCode::FormMissingField,
            Self::InvalidDepartment(_) => ErrorCode::FormInvalidDepartment,
            Self::Http(_) => ErrorCode::NetworkUnreachable,
            Self::Api { .. } => ErrorCode::ApiError,
            Self::Json(_) => ErrorCode::SerializationError,
            Self::Io(_) => ErrorCode::IoError,
            Self::Config(_) => ErrorCode::ConfigInvalid,
            Self::ValidationFailed(_) => ErrorCode::ValidationFailed,
        }
    }

    /// Whether this error was raised locally by the form, before any request.
    #[must_use]
    pub const fn is_form_error(&self) -> bool {
        matches!(self, Self::MissingField | Self::InvalidDepartment(_))
    }

    /// Get context information for this error as JSON.
    #[must_use]
    pub fn context(&self) -> Option<Value> {
        match self {
            Self::InvalidDepartment(name) => Some(serde_json::json!({ "department": name })),
            Self::Api { status, .. } => Some(serde_json::json!({ "status": status })),
            _ => None,
        }
    }

    /// Convert this error to a structured error.
    #[must_use]
    pub fn to_structured(&self) -> StructuredError {
        StructuredError::from_dir_error(self)
    }
}

/// A structured error with machine-readable code, suggestion, and context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// The error code (e.g., "FORM_MISSING_FIELD")
    pub code: ErrorCode,

    /// The numeric error code (e.g., 101)
    pub numeric_code: u16,

    /// Human-readable error message
    pub message: String,

    /// Actionable suggestion for recovery
    pub suggestion: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,

    pub recoverable: bool,

    /// Error category (e.g., "form", "network")
    pub category: String,
}

impl StructuredError {
    /// Create a structured error from a [`DirError`].
    #[must_use]
    pub fn from_dir_error(err: &DirError) -> Self {
        let code = err.code();
        let context = err.context();
        let suggestion = suggest_for_error(code, context.as_ref());

        Self {
            code,
            numeric_code: code.numeric(),
            message: err.to_string(),
            suggestion,
            context,
            recoverable: code.is_recoverable(),
            category: code.category().to_string(),
        }
    }
}

impl std::fmt::Display for StructuredError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// Result type alias using [`DirError`].
pub type Result<T> = std::result::Result<T, DirError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dir_error_code_mapping() {
        assert_eq!(DirError::MissingField.code(), ErrorCode::FormMissingField);
        assert_eq!(
            DirError::InvalidDepartment("Ops".into()).code(),
            ErrorCode::FormInvalidDepartment
        );
        assert_eq!(
            DirError::Api {
                status: 500,
                body: String::new()
            }
            .code(),
            ErrorCode::ApiError
        );
        assert_eq!(DirError::Config("bad".into()).code(), ErrorCode::ConfigInvalid);
    }

    #[test]
    fn test_alert_messages() {
        assert_eq!(DirError::MissingField.to_string(), "Please fill all required fields");
        assert_eq!(
            DirError::InvalidDepartment("Nope".into()).to_string(),
            "Invalid department selected"
        );
    }

    #[test]
    fn test_form_errors() {
        assert!(DirError::MissingField.is_form_error());
        assert!(DirError::InvalidDepartment("x".into()).is_form_error());
        assert!(!DirError::Http("refused".into()).is_form_error());
    }

    #[test]
    fn test_structured_error_from_dir_error() {
        let err = DirError::InvalidDepartment("Finance".into());
        let structured = err.to_structured();

        assert_eq!(structured.code, ErrorCode::FormInvalidDepartment);
        assert_eq!(structured.numeric_code, 102);
        assert!(structured.suggestion.contains("Finance"));
        assert!(structured.recoverable);
        assert_eq!(structured.category, "form");
    }

    #[test]
    fn test_structured_error_serialization() {
        let err = DirError::Http("connection refused".into()).to_structured();
        let json = serde_json::to_string(&err).unwrap();

        assert!(json.contains("NETWORK_UNREACHABLE"));
        assert!(json.contains("\"numeric_code\":501"));
        assert!(!json.contains("context"));
    }

    #[test]
    fn test_structured_error_display() {
        let err = DirError::MissingField.to_structured();
        assert_eq!(err.to_string(), "[E101] Please fill all required fields");
    }
}
