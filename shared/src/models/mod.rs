//! Data models
//!
//! Wire types exchanged with the auth, products, orders and reviews services,
//! plus the client-side cart line. Field names follow the services' camelCase
//! JSON; ids accept both string and numeric forms (see [`crate::EntityId`]).

pub mod cart;
pub mod order;
pub mod product;
pub mod report;
pub mod review;
pub mod user;

// Re-exports
pub use cart::*;
pub use order::*;
pub use product::*;
pub use report::*;
pub use review::*;
pub use user::*;
