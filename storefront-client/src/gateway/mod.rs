//! Gateways to the remote storefront services

pub mod catalog;
pub mod fallback;
pub mod jwt;
pub mod orders;
pub mod reports;
pub mod reviews;
pub mod session;

pub use catalog::CatalogGateway;
pub use orders::OrderGateway;
pub use reports::ReportGateway;
pub use reviews::ReviewGateway;
pub use session::{Registration, Session, SessionGateway, SessionTrust};
