use shared::models::DEFAULT_SELLER_ID;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use storefront_client::config::{DEFAULT_READ_TIMEOUT_MS, DEFAULT_WRITE_TIMEOUT_MS};
use storefront_client::{ClientConfig, ServiceUrls};

/// Delay before an auth failure at checkout sends the user to login
pub const DEFAULT_LOGIN_REDIRECT_DELAY_MS: u64 = 2_000;

/// Storefront configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | STOREFRONT_AUTH_URL | http://localhost:8081/api/v1/auth | Auth service |
/// | STOREFRONT_PRODUCTS_URL | http://localhost:8082/api/v1/products | Products service |
/// | STOREFRONT_PRODUCT_REPORTS_URL | http://localhost:8082/api/products | Per-product reports |
/// | STOREFRONT_REPORTS_URL | http://localhost:8082/api/v1/reports | Admin reports |
/// | STOREFRONT_ORDERS_URL | http://localhost:8083/api/v1/orders | Orders service |
/// | STOREFRONT_REVIEWS_URL | http://localhost:8084/api/v1/reviews | Reviews service |
/// | READ_TIMEOUT_MS | 5000 | Timeout for reads |
/// | WRITE_TIMEOUT_MS | 10000 | Timeout for writes |
/// | TOKEN_STORE_PATH | (unset, in-memory) | JSON file holding the session token |
/// | LOG_LEVEL | info | Log level when `RUST_LOG` is unset |
/// | LOG_JSON | false | JSON log lines |
/// | SELLER_ID | 1 | Seller attached to new orders |
/// | LOGIN_REDIRECT_DELAY_MS | 2000 | Delay of the post-auth-failure login redirect |
///
/// # Example
///
/// ```ignore
/// STOREFRONT_ORDERS_URL=http://orders:8083/api/v1/orders LOG_JSON=true cargo run
/// ```
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Service URLs, timeouts and token storage
    pub client: ClientConfig,
    pub log_level: String,
    pub log_json: bool,
    pub seller_id: i64,
    pub login_redirect_delay: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables
    ///
    /// Unset or unparseable values fall back to their defaults.
    pub fn from_env() -> Self {
        let defaults = ServiceUrls::default();
        let urls = ServiceUrls {
            auth: env_or("STOREFRONT_AUTH_URL", defaults.auth),
            products: env_or("STOREFRONT_PRODUCTS_URL", defaults.products),
            product_reports: env_or("STOREFRONT_PRODUCT_REPORTS_URL", defaults.product_reports),
            reports: env_or("STOREFRONT_REPORTS_URL", defaults.reports),
            orders: env_or("STOREFRONT_ORDERS_URL", defaults.orders),
            reviews: env_or("STOREFRONT_REVIEWS_URL", defaults.reviews),
        };

        let mut client = ClientConfig::new(urls)
            .with_read_timeout(Duration::from_millis(env_parse("READ_TIMEOUT_MS", DEFAULT_READ_TIMEOUT_MS)))
            .with_write_timeout(Duration::from_millis(env_parse(
                "WRITE_TIMEOUT_MS",
                DEFAULT_WRITE_TIMEOUT_MS,
            )));
        if let Ok(path) = std::env::var("TOKEN_STORE_PATH")
            && !path.is_empty()
        {
            client = client.with_token_path(PathBuf::from(path));
        }

        Self {
            client,
            log_level: env_or("LOG_LEVEL", "info".to_string()),
            log_json: env_parse("LOG_JSON", false),
            seller_id: env_parse("SELLER_ID", DEFAULT_SELLER_ID),
            login_redirect_delay: Duration::from_millis(env_parse(
                "LOGIN_REDIRECT_DELAY_MS",
                DEFAULT_LOGIN_REDIRECT_DELAY_MS,
            )),
        }
    }

    /// Configuration for a test backend listening at `base`
    pub fn for_single_host(base: &str) -> Self {
        Self {
            client: ClientConfig::new(ServiceUrls::single_host(base)),
            ..Self::default()
        }
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            log_level: "info".to_string(),
            log_json: false,
            seller_id: DEFAULT_SELLER_ID,
            login_redirect_delay: Duration::from_millis(DEFAULT_LOGIN_REDIRECT_DELAY_MS),
        }
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key).ok().filter(|v| !v.is_empty()).unwrap_or(default)
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::default();
        assert_eq!(config.seller_id, 1);
        assert_eq!(config.login_redirect_delay, Duration::from_secs(2));
        assert_eq!(config.client.read_timeout, Duration::from_secs(5));
        assert_eq!(config.client.urls.products, "http://localhost:8082/api/v1/products");
    }

    #[test]
    fn test_single_host() {
        let config = StorefrontConfig::for_single_host("http://127.0.0.1:4000");
        assert_eq!(config.client.urls.orders, "http://127.0.0.1:4000/api/v1/orders");
        assert_eq!(config.seller_id, 1);
    }

    #[test]
    fn test_env_parse_falls_back() {
        assert_eq!(env_parse("STOREFRONT_TEST_UNSET_VARIABLE", 42u64), 42);
    }
}
