//! Mapping from backend HTTP statuses to error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Best-effort code for a bare HTTP status coming back from a backend
    pub fn from_http_status(status: StatusCode) -> Self {
        match status {
            StatusCode::BAD_REQUEST => Self::ValidationFailed,
            StatusCode::UNAUTHORIZED => Self::NotAuthenticated,
            StatusCode::FORBIDDEN => Self::PermissionDenied,
            StatusCode::NOT_FOUND => Self::NotFound,
            StatusCode::GATEWAY_TIMEOUT | StatusCode::REQUEST_TIMEOUT => Self::NetworkTimeout,
            StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE => Self::NetworkUnreachable,
            _ => Self::InternalError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_http_status() {
        assert_eq!(
            ErrorCode::from_http_status(StatusCode::UNAUTHORIZED),
            ErrorCode::NotAuthenticated
        );
        assert_eq!(
            ErrorCode::from_http_status(StatusCode::FORBIDDEN),
            ErrorCode::PermissionDenied
        );
        assert_eq!(ErrorCode::from_http_status(StatusCode::NOT_FOUND), ErrorCode::NotFound);
        assert_eq!(
            ErrorCode::from_http_status(StatusCode::IM_A_TEAPOT),
            ErrorCode::InternalError
        );
    }
}
