//! Storefront core
//!
//! Cart and stock reconciliation, order checkout and PC builder
//! compatibility checks for the hardware store, on top of the service
//! gateways in `storefront-client`.

pub mod app;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod compat;
pub mod config;
pub mod logger;
pub mod notify;
pub mod state;

pub use app::Storefront;
pub use cart::{CartEngine, CartError, QtyUpdate};
pub use catalog::{CatalogSnapshot, CatalogSource};
pub use checkout::{CheckoutError, CheckoutForm, CheckoutPipeline, CheckoutState, Navigator, OrderSubmitter};
pub use config::StorefrontConfig;
pub use notify::{Notification, NotificationLevel, Notifier};
pub use state::{AppState, CartAction, CartOutcome, StoreHandle};
