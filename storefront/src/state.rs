//! Application state
//!
//! One [`AppState`] holds the session and the cart (which owns the current
//! catalog snapshot). [`StoreHandle`] is the cloneable entry point: readers
//! take snapshots, writers go through [`StoreHandle::dispatch`].
//!
//! Locks are only held for in-memory work. Network calls run with no lock
//! held and their results are applied in a separate short write section.

use crate::cart::{CartEngine, CartError, QtyUpdate};
use crate::catalog::{CatalogSnapshot, CatalogSource};
use crate::notify::Notifier;
use shared::models::{CartItem, User};
use shared::{Decimal, EntityId};
use std::sync::Arc;
use storefront_client::{Session, SessionGateway};
use tokio::sync::{RwLock, RwLockReadGuard};

/// Session plus cart
#[derive(Debug)]
pub struct AppState {
    pub session: Option<Session>,
    pub cart: CartEngine,
}

/// Cart mutations accepted by [`StoreHandle::dispatch`]
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    AddToCart(CartItem),
    RemoveFromCart(EntityId),
    UpdateQty(EntityId, i64),
    ClearCart,
    RemoveOutOfStock,
}

/// Result of a dispatched [`CartAction`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOutcome {
    /// New quantity of the added line
    Added(u32),
    /// Whether a line was actually removed
    Removed(bool),
    Updated(QtyUpdate),
    Cleared,
    /// Number of pruned lines
    Pruned(usize),
}

/// Shared handle to the application state
#[derive(Clone)]
pub struct StoreHandle {
    inner: Arc<RwLock<AppState>>,
    notifier: Notifier,
    source: Arc<dyn CatalogSource>,
}

impl std::fmt::Debug for StoreHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreHandle").finish_non_exhaustive()
    }
}

impl StoreHandle {
    /// Empty state: no session, empty catalog and cart
    pub fn new(source: Arc<dyn CatalogSource>, notifier: Notifier) -> Self {
        let cart = CartEngine::new(Arc::new(CatalogSnapshot::empty()), notifier.clone());
        Self {
            inner: Arc::new(RwLock::new(AppState { session: None, cart })),
            notifier,
            source,
        }
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Read access; keep the guard short-lived
    pub async fn read(&self) -> RwLockReadGuard<'_, AppState> {
        self.inner.read().await
    }

    pub async fn catalog(&self) -> Arc<CatalogSnapshot> {
        self.inner.read().await.cart.catalog().clone()
    }

    pub async fn cart_items(&self) -> Vec<CartItem> {
        self.inner.read().await.cart.items().to_vec()
    }

    pub async fn cart_total(&self) -> Decimal {
        self.inner.read().await.cart.cart_total()
    }

    pub async fn session(&self) -> Option<Session> {
        self.inner.read().await.session.clone()
    }

    pub async fn user(&self) -> Option<User> {
        self.inner.read().await.session.as_ref().map(|s| s.user.clone())
    }

    pub async fn set_session(&self, session: Session) {
        tracing::info!(user_id = %session.user.id, verified = session.is_verified(), "Session set");
        self.inner.write().await.session = Some(session);
    }

    pub async fn clear_session(&self) {
        self.inner.write().await.session = None;
    }

    /// Apply a cart action
    pub async fn dispatch(&self, action: CartAction) -> Result<CartOutcome, CartError> {
        let mut state = self.inner.write().await;
        let cart = &mut state.cart;
        match action {
            CartAction::AddToCart(item) => cart.add_to_cart(item).map(CartOutcome::Added),
            CartAction::RemoveFromCart(id) => Ok(CartOutcome::Removed(cart.remove_from_cart(&id))),
            CartAction::UpdateQty(id, qty) => cart.update_qty(&id, qty).map(CartOutcome::Updated),
            CartAction::ClearCart => {
                cart.clear_cart();
                Ok(CartOutcome::Cleared)
            }
            CartAction::RemoveOutOfStock => Ok(CartOutcome::Pruned(cart.remove_out_of_stock_items())),
        }
    }

    /// Empty the cart
    pub async fn clear_cart(&self) {
        self.inner.write().await.cart.clear_cart();
    }

    /// Drop lines whose product is missing or sold out; returns how many went
    pub async fn remove_out_of_stock(&self) -> usize {
        self.inner.write().await.cart.remove_out_of_stock_items()
    }

    /// Fetch a fresh catalog and reconcile the cart against it
    ///
    /// Returns the number of cart lines removed.
    pub async fn reload_products(&self) -> usize {
        let products = self.source.load_products().await;
        let snapshot = Arc::new(CatalogSnapshot::new(products));
        let count = snapshot.len();

        let removed = self.inner.write().await.cart.replace_catalog(snapshot);
        tracing::info!(products = count, removed, "Catalog reloaded");
        removed
    }

    /// Startup sequence: restore the session, then load the catalog
    ///
    /// A failed validation leaves the store without a session; the catalog
    /// is loaded regardless.
    pub async fn bootstrap(&self, sessions: &SessionGateway) -> Option<Session> {
        let session = match sessions.validate().await {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "Session validation failed");
                None
            }
        };

        match &session {
            Some(s) => self.set_session(s.clone()).await,
            None => self.clear_session().await,
        }
        self.reload_products().await;
        session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use shared::models::Product;
    use std::sync::Mutex;

    /// Serves the queued catalogs in order, repeating the last one
    struct QueuedSource(Mutex<Vec<Vec<Product>>>);

    #[async_trait]
    impl CatalogSource for QueuedSource {
        async fn load_products(&self) -> Vec<Product> {
            let mut queue = self.0.lock().unwrap();
            if queue.len() > 1 {
                queue.remove(0)
            } else {
                queue.first().cloned().unwrap_or_default()
            }
        }
    }

    fn product(id: &str, stock: u32) -> Product {
        serde_json::from_value(serde_json::json!({
            "id": id, "name": id, "price": 100, "stock": stock
        }))
        .unwrap()
    }

    fn store(catalogs: Vec<Vec<Product>>) -> StoreHandle {
        StoreHandle::new(Arc::new(QueuedSource(Mutex::new(catalogs))), Notifier::noop())
    }

    #[tokio::test]
    async fn test_dispatch_actions() {
        let store = store(vec![vec![product("p1", 3), product("p2", 1)]]);
        store.reload_products().await;

        let add = CartAction::AddToCart(CartItem::new("p1", "p1", Decimal::from(100), 2));
        assert_eq!(store.dispatch(add).await, Ok(CartOutcome::Added(2)));
        assert_eq!(
            store.dispatch(CartAction::UpdateQty(EntityId::from("p1"), 9)).await,
            Ok(CartOutcome::Updated(QtyUpdate::Clamped { requested: 9, applied: 3 }))
        );
        assert_eq!(store.cart_total().await, Decimal::from(300));

        assert_eq!(
            store.dispatch(CartAction::RemoveFromCart(EntityId::from("p1"))).await,
            Ok(CartOutcome::Removed(true))
        );
        assert!(store.cart_items().await.is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_error_keeps_state() {
        let store = store(vec![vec![product("p1", 0)]]);
        store.reload_products().await;

        let add = CartAction::AddToCart(CartItem::new("p1", "p1", Decimal::from(100), 1));
        assert!(matches!(store.dispatch(add).await, Err(CartError::OutOfStock { .. })));
        assert!(store.cart_items().await.is_empty());
    }

    #[tokio::test]
    async fn test_reload_reconciles_cart() {
        let store = store(vec![vec![product("p1", 3)], vec![product("p1", 0)]]);
        store.reload_products().await;
        store
            .dispatch(CartAction::AddToCart(CartItem::new("p1", "p1", Decimal::from(100), 1)))
            .await
            .unwrap();

        assert_eq!(store.reload_products().await, 1);
        assert!(store.cart_items().await.is_empty());
        assert_eq!(store.catalog().await.get(&EntityId::from("p1")).unwrap().stock, 0);
    }

    #[tokio::test]
    async fn test_clear_and_prune_helpers() {
        let store = store(vec![vec![product("p1", 3), product("p2", 2)]]);
        store.reload_products().await;
        for id in ["p1", "p2"] {
            store
                .dispatch(CartAction::AddToCart(CartItem::new(id, id, Decimal::from(100), 1)))
                .await
                .unwrap();
        }

        // Nothing to prune while everything is in stock
        assert_eq!(store.remove_out_of_stock().await, 0);
        assert_eq!(store.cart_items().await.len(), 2);

        store.clear_cart().await;
        assert!(store.cart_items().await.is_empty());
        assert_eq!(store.cart_total().await, Decimal::ZERO);
    }
}
