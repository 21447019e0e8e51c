//! Storefront wiring: client gateways, shared state and checkout

use crate::checkout::{CheckoutPipeline, Navigator};
use crate::config::StorefrontConfig;
use crate::notify::Notifier;
use crate::state::StoreHandle;
use shared::AppResult;
use shared::models::Product;
use std::sync::Arc;
use storefront_client::{ClientResult, Registration, Session, StorefrontClient, TokenStore};

/// A running storefront
#[derive(Debug, Clone)]
pub struct Storefront {
    config: StorefrontConfig,
    client: StorefrontClient,
    store: StoreHandle,
}

impl Storefront {
    /// Build with the token store described by the configuration
    pub fn new(config: StorefrontConfig, notifier: Notifier) -> ClientResult<Self> {
        let tokens = config.client.token_store();
        Self::with_token_store(config, tokens, notifier)
    }

    pub fn with_token_store(
        config: StorefrontConfig,
        tokens: Arc<dyn TokenStore>,
        notifier: Notifier,
    ) -> ClientResult<Self> {
        let client = config.client.build_with_store(tokens)?;
        let store = StoreHandle::new(Arc::new(client.catalog.clone()), notifier);
        Ok(Self { config, client, store })
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn client(&self) -> &StorefrontClient {
        &self.client
    }

    pub fn store(&self) -> &StoreHandle {
        &self.store
    }

    /// Restore the session, then load the catalog
    pub async fn start(&self) -> Option<Session> {
        self.store.bootstrap(&self.client.session).await
    }

    /// Log in and reload the catalog with the new token
    ///
    /// Failures carry a shared [`shared::ErrorCode`]; a rejected password
    /// reads as `NotAuthenticated`.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<Session> {
        let session = self.client.session.login(email, password).await?;
        self.store.set_session(session.clone()).await;
        self.store.reload_products().await;
        Ok(session)
    }

    pub async fn register(&self, registration: Registration) -> AppResult<Session> {
        let session = self.client.session.register(registration).await?;
        self.store.set_session(session.clone()).await;
        self.store.reload_products().await;
        Ok(session)
    }

    /// Drop the token and session; the catalog falls back to local data
    pub async fn logout(&self) -> AppResult<()> {
        self.client.session.logout()?;
        self.store.clear_session().await;
        self.store.reload_products().await;
        Ok(())
    }

    /// Current catalog in display order
    pub async fn products(&self) -> Vec<Product> {
        self.store.catalog().await.products().to_vec()
    }

    /// Checkout pipeline submitting through the orders service
    pub fn checkout(&self, navigator: Arc<dyn Navigator>) -> CheckoutPipeline {
        CheckoutPipeline::new(
            self.store.clone(),
            Arc::new(self.client.orders.clone()),
            navigator,
            self.config.seller_id,
            self.config.login_redirect_delay,
        )
    }
}
