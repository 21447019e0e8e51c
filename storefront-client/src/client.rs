//! Facade bundling every gateway over one transport

use crate::gateway::{CatalogGateway, OrderGateway, ReportGateway, ReviewGateway, SessionGateway};
use crate::token::TokenStore;
use crate::{ClientConfig, ClientResult, HttpClient};
use std::sync::Arc;

/// All storefront service clients sharing one HTTP client and token store
#[derive(Debug, Clone)]
pub struct StorefrontClient {
    http: HttpClient,
    pub catalog: CatalogGateway,
    pub session: SessionGateway,
    pub orders: OrderGateway,
    pub reviews: ReviewGateway,
    pub reports: ReportGateway,
}

impl StorefrontClient {
    pub fn new(config: &ClientConfig, tokens: Arc<dyn TokenStore>) -> ClientResult<Self> {
        let http = HttpClient::new(config, tokens)?;
        let urls = &config.urls;

        Ok(Self {
            catalog: CatalogGateway::new(http.clone(), &urls.products),
            session: SessionGateway::new(http.clone(), &urls.auth),
            orders: OrderGateway::new(http.clone(), &urls.orders),
            reviews: ReviewGateway::new(http.clone(), &urls.reviews),
            reports: ReportGateway::new(http.clone(), &urls.product_reports, &urls.reports),
            http,
        })
    }

    /// Underlying transport
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Token store shared by every gateway
    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        self.http.tokens()
    }
}
