//! Remote catalog gateway
//!
//! Catalog reads never fail from the caller's point of view: without a
//! session token, on auth rejection, on an empty remote catalog, and while
//! the products service is unreachable the bundled dataset is served
//! instead. Connectivity problems are logged once until a fetch succeeds
//! again.

use super::fallback;
use crate::{ClientError, ClientResult, HttpClient};
use shared::EntityId;
use shared::models::Product;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Log-once flags, shared by clones of the gateway
#[derive(Debug, Default)]
struct LogOnce {
    connection_error: AtomicBool,
    using_local_data: AtomicBool,
}

impl LogOnce {
    fn first(flag: &AtomicBool) -> bool {
        !flag.swap(true, Ordering::Relaxed)
    }

    fn reset(&self) {
        self.connection_error.store(false, Ordering::Relaxed);
        self.using_local_data.store(false, Ordering::Relaxed);
    }
}

/// Products service client with local fallback
#[derive(Debug, Clone)]
pub struct CatalogGateway {
    http: HttpClient,
    products_url: String,
    log_once: Arc<LogOnce>,
}

impl CatalogGateway {
    pub fn new(http: HttpClient, products_url: impl Into<String>) -> Self {
        Self {
            http,
            products_url: products_url.into(),
            log_once: Arc::new(LogOnce::default()),
        }
    }

    /// Full catalog, remote when possible, local otherwise
    pub async fn list_products(&self) -> Vec<Product> {
        if self.http.token().is_none() {
            if LogOnce::first(&self.log_once.using_local_data) {
                tracing::info!("No session token, serving local products");
            }
            return fallback::local_products();
        }

        match self.fetch_products().await {
            Ok(products) if products.is_empty() => {
                tracing::info!("Products service returned no products, serving local products");
                fallback::local_products()
            }
            Ok(products) => {
                self.log_once.reset();
                tracing::debug!(count = products.len(), "Catalog fetched");
                products
            }
            Err(e) => {
                self.absorb(&e);
                fallback::local_products()
            }
        }
    }

    /// Raw remote catalog, without fallback
    pub async fn fetch_products(&self) -> ClientResult<Vec<Product>> {
        let response = self.http.get::<Vec<Product>>(&self.products_url).await?;
        Ok(response.data.unwrap_or_default())
    }

    /// Single product; falls back to the local dataset when the remote
    /// lookup fails or finds nothing
    pub async fn product(&self, id: &EntityId) -> Option<Product> {
        let url = format!("{}/{}", self.products_url, id);
        match self.http.get_public::<Product>(&url).await {
            Ok(response) => match response.data {
                Some(product) => Some(product),
                None => fallback::local_product(id),
            },
            Err(e) => {
                if !e.is_connectivity() {
                    tracing::warn!(product_id = %id, error = %e, "Failed to fetch product");
                }
                fallback::local_product(id)
            }
        }
    }

    /// Products currently on sale; empty on 204 and on failure
    pub async fn offers(&self) -> Vec<Product> {
        let url = format!("{}/offers", self.products_url);
        match self.http.get_public::<Vec<Product>>(&url).await {
            Ok(response) => response.data.unwrap_or_default(),
            Err(e) => {
                if e.is_connectivity() {
                    if LogOnce::first(&self.log_once.connection_error) {
                        tracing::warn!(error = %e, "Products service unreachable, no offers available");
                    }
                } else {
                    tracing::warn!(error = %e, "Failed to fetch offers");
                }
                Vec::new()
            }
        }
    }

    fn absorb(&self, err: &ClientError) {
        if err.is_auth() {
            tracing::warn!("Session token rejected by products service, clearing it");
            if let Err(e) = self.http.tokens().clear() {
                tracing::error!(error = %e, "Failed to clear session token");
            }
        } else if err.is_connectivity() {
            if LogOnce::first(&self.log_once.connection_error) {
                tracing::warn!(error = %err, "Products service unreachable, serving local products");
            }
        } else {
            tracing::warn!(error = %err, "Failed to fetch products, serving local products");
        }
    }
}
