//! Application error type

use super::codes::ErrorCode;
use thiserror::Error;

/// Application error with a structured code
///
/// Returned by the storefront's account operations; transport and engine
/// errors convert into it at that boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a not authenticated error
    pub fn not_authenticated() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    /// Create a connectivity error (unreachable remote)
    pub fn unreachable(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::NetworkUnreachable, msg)
    }

    /// Create a connectivity error (timeout)
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::NetworkTimeout, msg)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::NotFound);
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Resource not found");
        assert_eq!(AppError::not_authenticated().code, ErrorCode::NotAuthenticated);
    }

    #[test]
    fn test_display_uses_message() {
        let err = AppError::timeout("catalog fetch timed out");
        assert_eq!(err.to_string(), "catalog fetch timed out");
        assert!(err.code.is_connectivity());
        assert_eq!(AppError::validation("Falta el email").code, ErrorCode::ValidationFailed);
    }
}
