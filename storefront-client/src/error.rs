//! Client error types

use http::StatusCode;
use shared::{AppError, ErrorCode};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// The service could not be reached
    #[error("Connection failed: {0}")]
    Connect(String),

    /// The request did not finish within its deadline
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The service answered with a failure envelope or a non-success status
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        /// Structured classification (`OUT_OF_STOCK`, `AUTH_ERROR`, ...)
        error_code: Option<String>,
    },

    /// A call that requires a session was made without a token
    #[error("Authentication required")]
    NotAuthenticated,

    /// Invalid input rejected before hitting the network
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Token store failure
    #[error("Token storage error: {0}")]
    Storage(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Network unreachable or timed out
    pub fn is_connectivity(&self) -> bool {
        matches!(self, ClientError::Connect(_) | ClientError::Timeout(_))
    }

    /// Rejected by the service as unauthenticated or forbidden
    pub fn is_auth(&self) -> bool {
        match self {
            ClientError::NotAuthenticated => true,
            ClientError::Api { status, .. } => *status == 401 || *status == 403,
            _ => false,
        }
    }

    /// HTTP status of an API failure
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Shared error code for this failure
    ///
    /// The envelope's `errorCode` wins over the HTTP status.
    pub fn code(&self) -> ErrorCode {
        match self {
            ClientError::Connect(_) => ErrorCode::NetworkUnreachable,
            ClientError::Timeout(_) => ErrorCode::NetworkTimeout,
            ClientError::Api { status, error_code, .. } => match error_code.as_deref() {
                Some("OUT_OF_STOCK") => ErrorCode::ProductOutOfStock,
                Some("INSUFFICIENT_STOCK") => ErrorCode::ProductInsufficientStock,
                Some("VALIDATION_ERROR") => ErrorCode::ValidationFailed,
                Some("AUTH_ERROR") => ErrorCode::NotAuthenticated,
                _ => StatusCode::from_u16(*status)
                    .map(ErrorCode::from_http_status)
                    .unwrap_or(ErrorCode::Unknown),
            },
            ClientError::NotAuthenticated => ErrorCode::NotAuthenticated,
            ClientError::Validation(_) => ErrorCode::ValidationFailed,
            ClientError::InvalidResponse(_) | ClientError::Serialization(_) => ErrorCode::InvalidResponse,
            ClientError::Storage(_) => ErrorCode::InternalError,
        }
    }

    /// Structured error code of an API failure
    pub fn error_code(&self) -> Option<&str> {
        match self {
            ClientError::Api { error_code, .. } => error_code.as_deref(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout(err.to_string())
        } else if err.is_connect() || err.is_request() {
            ClientError::Connect(err.to_string())
        } else if err.is_decode() {
            ClientError::InvalidResponse(err.to_string())
        } else if let Some(status) = err.status() {
            ClientError::Api {
                status: status.as_u16(),
                message: err.to_string(),
                error_code: None,
            }
        } else {
            ClientError::Connect(err.to_string())
        }
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        let code = err.code();
        match err {
            ClientError::Connect(msg) => AppError::unreachable(msg),
            ClientError::Timeout(msg) => AppError::timeout(msg),
            ClientError::Api { message, .. } => AppError::with_message(code, message),
            ClientError::NotAuthenticated => AppError::not_authenticated(),
            ClientError::Validation(msg) => AppError::validation(msg),
            ClientError::InvalidResponse(msg) => AppError::with_message(code, msg),
            ClientError::Storage(msg) => AppError::internal(msg),
            ClientError::Serialization(e) => AppError::with_message(code, e.to_string()),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
