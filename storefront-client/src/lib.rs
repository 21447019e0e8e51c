//! Storefront Client - HTTP gateways for the storefront microservices
//!
//! Talks to the auth, products, orders and reviews services over HTTP/JSON.
//! Catalog and session reads degrade to local data when the services are
//! unreachable; writes surface every failure as a [`ClientError`].

pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod http;
pub mod token;

pub use client::StorefrontClient;
pub use config::{ClientConfig, ServiceUrls};
pub use error::{ClientError, ClientResult};
pub use gateway::{
    CatalogGateway, OrderGateway, Registration, ReportGateway, ReviewGateway, Session, SessionGateway, SessionTrust,
};
pub use http::HttpClient;
pub use token::{FileTokenStore, MemoryTokenStore, TOKEN_KEY, TokenStore};

// Re-export shared types for convenience
pub use shared::ApiResponse;
