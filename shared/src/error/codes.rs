//! Error codes for the storefront
//!
//! Codes are grouped by range:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Order errors
//! - 6xxx: Product and stock errors
//! - 9xxx: System and connectivity errors

use std::fmt;

/// Error code enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated or the session expired
    NotAuthenticated = 1001,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,

    // ==================== 4xxx: Order ====================
    /// Order has no items
    OrderEmpty = 4007,
    /// Order rejected by the order service
    OrderRejected = 4010,

    // ==================== 6xxx: Product ====================
    /// Product has no stock left
    ProductOutOfStock = 6003,
    /// Requested quantity is above the remaining stock
    ProductInsufficientStock = 6004,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Remote service unreachable
    NetworkUnreachable = 9101,
    /// Remote call timed out
    NetworkTimeout = 9102,
    /// Remote service answered with an unexpected payload
    InvalidResponse = 9103,
}

impl ErrorCode {
    /// Numeric value of this error code
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Whether the failure is a connectivity problem (recoverable by retrying)
    pub const fn is_connectivity(&self) -> bool {
        matches!(self, ErrorCode::NetworkUnreachable | ErrorCode::NetworkTimeout)
    }

    /// Developer-facing English message
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::RequiredField => "Required field is missing",

            ErrorCode::NotAuthenticated => "User is not authenticated",

            ErrorCode::PermissionDenied => "Permission denied",

            ErrorCode::OrderEmpty => "Order is empty",
            ErrorCode::OrderRejected => "Order was rejected",

            ErrorCode::ProductOutOfStock => "Product is out of stock",
            ErrorCode::ProductInsufficientStock => "Insufficient stock for product",

            ErrorCode::InternalError => "Internal error",
            ErrorCode::NetworkUnreachable => "Remote service is unreachable",
            ErrorCode::NetworkTimeout => "Remote service timed out",
            ErrorCode::InvalidResponse => "Remote service returned an invalid response",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::OrderRejected.code(), 4010);
        assert_eq!(ErrorCode::ProductOutOfStock.code(), 6003);
        assert_eq!(ErrorCode::NetworkTimeout.code(), 9102);
        assert_eq!(ErrorCode::OrderEmpty.to_string(), "4007");
    }

    #[test]
    fn test_connectivity() {
        assert!(ErrorCode::NetworkTimeout.is_connectivity());
        assert!(ErrorCode::NetworkUnreachable.is_connectivity());
        assert!(!ErrorCode::InvalidResponse.is_connectivity());
    }
}
