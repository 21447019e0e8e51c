//! Shared types for the storefront
//!
//! Wire models, the response envelope and the error taxonomy used by the
//! HTTP gateways and by the cart/checkout engine.

pub mod error;
pub mod models;
pub mod response;
pub mod types;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode};
pub use response::ApiResponse;
pub use rust_decimal::Decimal;
pub use serde::{Deserialize, Serialize};
pub use types::EntityId;
