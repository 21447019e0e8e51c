//! Client configuration

use crate::token::{FileTokenStore, MemoryTokenStore, TokenStore};
use crate::{ClientResult, StorefrontClient};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Default read timeout (catalog, session validation, listings)
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 5_000;

/// Default write timeout (login, orders, reviews, reports)
pub const DEFAULT_WRITE_TIMEOUT_MS: u64 = 10_000;

/// Base URLs of the remote services
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceUrls {
    pub auth: String,
    pub products: String,
    /// Per-product report endpoints (`{product_reports}/:id/reports`)
    pub product_reports: String,
    /// Admin report listing
    pub reports: String,
    pub orders: String,
    pub reviews: String,
}

impl ServiceUrls {
    /// Every service behind one host, using the default path layout
    pub fn single_host(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            auth: format!("{base}/api/v1/auth"),
            products: format!("{base}/api/v1/products"),
            product_reports: format!("{base}/api/products"),
            reports: format!("{base}/api/v1/reports"),
            orders: format!("{base}/api/v1/orders"),
            reviews: format!("{base}/api/v1/reviews"),
        }
    }
}

impl Default for ServiceUrls {
    fn default() -> Self {
        Self {
            auth: "http://localhost:8081/api/v1/auth".to_string(),
            products: "http://localhost:8082/api/v1/products".to_string(),
            product_reports: "http://localhost:8082/api/products".to_string(),
            reports: "http://localhost:8082/api/v1/reports".to_string(),
            orders: "http://localhost:8083/api/v1/orders".to_string(),
            reviews: "http://localhost:8084/api/v1/reviews".to_string(),
        }
    }
}

/// Client configuration for the storefront services
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service base URLs
    pub urls: ServiceUrls,

    /// Timeout for GET requests
    pub read_timeout: Duration,

    /// Timeout for POST requests
    pub write_timeout: Duration,

    /// File backing the session token; in-memory when `None`
    pub token_path: Option<PathBuf>,
}

impl ClientConfig {
    /// Create a configuration with default timeouts
    pub fn new(urls: ServiceUrls) -> Self {
        Self {
            urls,
            read_timeout: Duration::from_millis(DEFAULT_READ_TIMEOUT_MS),
            write_timeout: Duration::from_millis(DEFAULT_WRITE_TIMEOUT_MS),
            token_path: None,
        }
    }

    /// Set the read timeout
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Set the write timeout
    pub fn with_write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = timeout;
        self
    }

    /// Persist the session token in a JSON file
    pub fn with_token_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_path = Some(path.into());
        self
    }

    /// Token store described by this configuration
    pub fn token_store(&self) -> Arc<dyn TokenStore> {
        match &self.token_path {
            Some(path) => Arc::new(FileTokenStore::new(path)),
            None => Arc::new(MemoryTokenStore::new()),
        }
    }

    /// Build the client facade with the configured token store
    pub fn build(&self) -> ClientResult<StorefrontClient> {
        StorefrontClient::new(self, self.token_store())
    }

    /// Build the client facade over an existing token store
    pub fn build_with_store(&self, store: Arc<dyn TokenStore>) -> ClientResult<StorefrontClient> {
        StorefrontClient::new(self, store)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(ServiceUrls::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_urls() {
        let urls = ServiceUrls::default();
        assert_eq!(urls.auth, "http://localhost:8081/api/v1/auth");
        assert_eq!(urls.orders, "http://localhost:8083/api/v1/orders");
        assert_eq!(urls.reviews, "http://localhost:8084/api/v1/reviews");
    }

    #[test]
    fn test_single_host_trims_slash() {
        let urls = ServiceUrls::single_host("http://127.0.0.1:9000/");
        assert_eq!(urls.products, "http://127.0.0.1:9000/api/v1/products");
        assert_eq!(urls.product_reports, "http://127.0.0.1:9000/api/products");
    }

    #[test]
    fn test_default_timeouts() {
        let config = ClientConfig::default();
        assert_eq!(config.read_timeout, Duration::from_secs(5));
        assert_eq!(config.write_timeout, Duration::from_secs(10));
        assert!(config.token_path.is_none());
    }
}
