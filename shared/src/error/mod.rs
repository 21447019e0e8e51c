//! Error system for the storefront
//!
//! - [`ErrorCode`]: standardized numeric codes
//! - [`AppError`]: error value with code and message
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Order errors
//! - 6xxx: Product and stock errors
//! - 9xxx: System and connectivity errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::ProductOutOfStock);
//! assert_eq!(err.message, "Product is out of stock");
//!
//! let err = AppError::validation("Missing required field");
//! assert_eq!(err.code, ErrorCode::ValidationFailed);
//! ```

mod codes;
mod http;
mod types;

pub use codes::ErrorCode;
pub use types::{AppError, AppResult};
