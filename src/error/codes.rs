//! Standardized error codes for machine-parseable output.
//!
//! Error codes follow a numeric taxonomy:
//! - 1xx: Form errors
//! - 3xx: Config errors
//! - 5xx: Network errors
//! - 6xx: Data errors
//! - 8xx: Validation errors

use serde::{Deserialize, Serialize};

/// Standardized error codes for json output.
///
/// Each variant maps to a numeric code (e.g., `FormMissingField` -> E101).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ========================================
    // Form errors (1xx)
    // ========================================
    /// E101: A required staff field was left empty
    FormMissingField,
    /// E102: The typed department does not name a known department
    FormInvalidDepartment,

    // ========================================
    // Config errors (3xx)
    // ========================================
    /// E301: Config file or environment value is invalid
    ConfigInvalid,

    // ========================================
    // Network errors (5xx)
    // ========================================
    /// E501: Cannot reach the directory service
    NetworkUnreachable,
    /// E502: The directory service answered with a non-success status
    ApiError,

    // ========================================
    // Data errors (6xx)
    // ========================================
    /// E601: Payload could not be encoded or decoded
    SerializationError,
    /// E602: Terminal or file IO failed
    IoError,

    // ========================================
    // Validation errors (8xx)
    // ========================================
    /// E801: Invocation is not valid in this environment
    ValidationFailed,
}

impl ErrorCode {
    /// Get the numeric error code (e.g., `FormMissingField` -> 101).
    #[must_use]
    pub const fn numeric(&self) -> u16 {
        match self {
            Self::FormMissingField => 101,
            Self::FormInvalidDepartment => 102,
            Self::ConfigInvalid => 301,
            Self::NetworkUnreachable => 501,
            Self::ApiError => 502,
            Self::SerializationError => 601,
            Self::IoError => 602,
            Self::ValidationFailed => 801,
        }
    }

    /// Get the error code as a formatted string (e.g., "E101").
    #[must_use]
    pub fn code_string(&self) -> String {
        format!("E{}", self.numeric())
    }

    /// Get the default suggestion for this error code.
    #[must_use]
    pub const fn suggestion(&self) -> &'static str {
        match self {
            Self::FormMissingField => "Fill in name, phone, department, street, city, state, zip and country",
            Self::FormInvalidDepartment => "Run `staffdir departments` to see the exact department names (matching is case-sensitive)",
            Self::ConfigInvalid => "Run `staffdir config` to see current values. Check TOML syntax and STAFFDIR_* variables",
            Self::NetworkUnreachable => "Check your network connection and the [api].base_url setting",
            Self::ApiError => "The directory service rejected the request. Check the server logs for details",
            Self::SerializationError => "The directory service returned data in an unexpected shape",
            Self::IoError => "Terminal or file operation failed. Check permissions and that stdout is writable",
            Self::ValidationFailed => "Review the command arguments. The browse screen needs an interactive terminal",
        }
    }

    /// Check if this error is potentially recoverable by the user.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::FormMissingField
            | Self::FormInvalidDepartment
            | Self::ConfigInvalid
            | Self::NetworkUnreachable
            | Self::IoError
            | Self::ValidationFailed => true,

            Self::ApiError | Self::SerializationError => false,
        }
    }

    /// Get the error category name.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self.numeric() / 100 {
            1 => "form",
            3 => "config",
            5 => "network",
            6 => "data",
            8 => "validation",
            _ => "unknown",
        }
    }

    /// Iterate over all error codes.
    pub fn all() -> impl Iterator<Item = Self> {
        [
            Self::FormMissingField,
            Self::FormInvalidDepartment,
            Self::ConfigInvalid,
            Self::NetworkUnreachable,
            Self::ApiError,
            Self::SerializationError,
            Self::IoError,
            Self::ValidationFailed,
        ]
        .into_iter()
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_numeric() {
        assert_eq!(ErrorCode::FormMissingField.numeric(), 101);
        assert_eq!(ErrorCode::FormInvalidDepartment.numeric(), 102);
        assert_eq!(ErrorCode::NetworkUnreachable.numeric(), 501);
        assert_eq!(ErrorCode::ValidationFailed.numeric(), 801);
    }

    #[test]
    fn test_error_code_string() {
        assert_eq!(ErrorCode::FormMissingField.code_string(), "E101");
        assert_eq!(ErrorCode::ApiError.to_string(), "E502");
    }

    #[test]
    fn test_all_codes_have_suggestions_and_categories() {
        for code in ErrorCode::all() {
            assert!(!code.suggestion().is_empty(), "{code:?} has no suggestion");
            assert_ne!(code.category(), "unknown", "{code:?} has no category");
        }
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::FormInvalidDepartment).unwrap();
        assert_eq!(json, "\"FORM_INVALID_DEPARTMENT\"");
    }

    #[test]
    fn test_category_assignment() {
        assert_eq!(ErrorCode::FormMissingField.category(), "form");
        assert_eq!(ErrorCode::ConfigInvalid.category(), "config");
        assert_eq!(ErrorCode::ApiError.category(), "network");
        assert_eq!(ErrorCode::IoError.category(), "data");
    }

    #[test]
    fn test_recoverable_categorization() {
        assert!(ErrorCode::FormMissingField.is_recoverable());
        assert!(!ErrorCode::SerializationError.is_recoverable());
    }
}
