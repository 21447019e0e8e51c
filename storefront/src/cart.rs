//! Cart & stock reconciliation
//!
//! The cart is an ordered list of lines (insertion order is display order)
//! checked against the latest [`CatalogSnapshot`]. Every mutation either
//! applies fully or leaves the cart untouched, and every outcome is also
//! published through the [`Notifier`].
//!
//! Adding and updating treat excess quantity differently: an add that would
//! exceed stock is rejected, while an update is clamped to the available
//! stock.
//!
//! # Invariants
//!
//! - After a successful add every line satisfies `qty <= stock`.
//! - Reconciliation removes exactly the lines whose product is missing or
//!   has no stock.
//! - The total uses the prices captured when lines were added.

use crate::catalog::CatalogSnapshot;
use crate::notify::Notifier;
use shared::models::CartItem;
use shared::{Decimal, EntityId};
use std::sync::Arc;
use thiserror::Error;

/// Cart mutation failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("Producto no encontrado")]
    NotFound { product_id: EntityId },

    #[error("{name} está agotado")]
    OutOfStock { product_id: EntityId, name: String },

    #[error("Solo hay {available} unidades disponibles de {name}")]
    ExceedsStock {
        product_id: EntityId,
        name: String,
        available: u32,
        requested: u32,
    },

    #[error("La cantidad debe ser al menos 1")]
    InvalidQuantity,
}

/// Result of [`CartEngine::update_qty`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QtyUpdate {
    /// Quantity set as requested
    Updated(u32),
    /// Requested quantity exceeded stock and was reduced
    Clamped { requested: u32, applied: u32 },
    /// Line removed (quantity 0 or below, or clamped to 0)
    Removed,
    /// The product is known but not in the cart
    NotInCart,
}

/// In-memory cart bound to a catalog snapshot
#[derive(Debug, Clone)]
pub struct CartEngine {
    items: Vec<CartItem>,
    catalog: Arc<CatalogSnapshot>,
    notifier: Notifier,
}

impl CartEngine {
    pub fn new(catalog: Arc<CatalogSnapshot>, notifier: Notifier) -> Self {
        Self {
            items: Vec::new(),
            catalog,
            notifier,
        }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn item(&self, product_id: &EntityId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.product_id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Total units across all lines
    pub fn unit_count(&self) -> u32 {
        self.items.iter().map(|i| i.qty).sum()
    }

    pub fn catalog(&self) -> &Arc<CatalogSnapshot> {
        &self.catalog
    }

    /// Add `item.qty` units, merging with an existing line
    ///
    /// Checks, in order: the product exists, it has stock, and the merged
    /// quantity fits the stock. Any failure leaves the cart unchanged.
    /// Returns the line's new quantity.
    pub fn add_to_cart(&mut self, item: CartItem) -> Result<u32, CartError> {
        let result = self.try_add(item);
        if let Err(e) = &result {
            self.notifier.error(e.to_string());
        }
        result
    }

    fn try_add(&mut self, item: CartItem) -> Result<u32, CartError> {
        if item.qty == 0 {
            return Err(CartError::InvalidQuantity);
        }

        let product = self.catalog.get(&item.product_id).ok_or_else(|| CartError::NotFound {
            product_id: item.product_id.clone(),
        })?;

        if product.is_out_of_stock() {
            return Err(CartError::OutOfStock {
                product_id: item.product_id.clone(),
                name: item.name.clone(),
            });
        }

        let current = self.item(&item.product_id).map_or(0, |i| i.qty);
        let new_qty = current.saturating_add(item.qty);
        if new_qty > product.stock {
            tracing::debug!(product_id = %item.product_id, current, requested = item.qty, stock = product.stock, "Add rejected");
            return Err(CartError::ExceedsStock {
                product_id: item.product_id.clone(),
                name: item.name.clone(),
                available: product.stock,
                requested: new_qty,
            });
        }

        let name = item.name.clone();
        match self.items.iter_mut().find(|i| i.product_id == item.product_id) {
            Some(line) => line.qty = new_qty,
            None => self.items.push(item),
        }
        self.notifier.success(format!("{name} agregado al carrito"));
        Ok(new_qty)
    }

    /// Remove a line; no-op when absent. Returns whether a line was removed.
    pub fn remove_from_cart(&mut self, product_id: &EntityId) -> bool {
        let before = self.items.len();
        self.items.retain(|i| &i.product_id != product_id);
        self.items.len() != before
    }

    /// Set a line's quantity
    ///
    /// - unknown product: [`CartError::NotFound`], cart unchanged
    /// - `qty <= 0`: line removed
    /// - `qty > stock`: clamped to stock with a warning
    pub fn update_qty(&mut self, product_id: &EntityId, qty: i64) -> Result<QtyUpdate, CartError> {
        let Some(product) = self.catalog.get(product_id) else {
            let err = CartError::NotFound {
                product_id: product_id.clone(),
            };
            self.notifier.error(err.to_string());
            return Err(err);
        };

        if qty <= 0 {
            self.remove_from_cart(product_id);
            return Ok(QtyUpdate::Removed);
        }

        let requested = u32::try_from(qty).unwrap_or(u32::MAX);
        let stock = product.stock;
        let applied = requested.min(stock);
        if applied < requested {
            self.notifier
                .warning(format!("Solo hay {stock} unidades disponibles de {}", product.name));
        }

        let Some(pos) = self.items.iter().position(|i| &i.product_id == product_id) else {
            return Ok(QtyUpdate::NotInCart);
        };

        if applied == 0 {
            self.items.remove(pos);
            return Ok(QtyUpdate::Removed);
        }

        self.items[pos].qty = applied;
        if applied < requested {
            Ok(QtyUpdate::Clamped { requested, applied })
        } else {
            Ok(QtyUpdate::Updated(applied))
        }
    }

    /// Drop lines whose product is missing or has no stock
    ///
    /// Lines with stock below their quantity are kept. Emits one warning
    /// with the count when anything was removed. Returns the count.
    pub fn remove_out_of_stock_items(&mut self) -> usize {
        let before = self.items.len();
        let catalog = &self.catalog;
        self.items
            .retain(|item| catalog.get(&item.product_id).is_some_and(|p| !p.is_out_of_stock()));

        let removed = before - self.items.len();
        if removed > 0 {
            tracing::info!(removed, "Removed unavailable products from cart");
            self.notifier
                .warning(format!("{removed} producto(s) agotado(s) eliminado(s) del carrito"));
        }
        removed
    }

    pub fn clear_cart(&mut self) {
        self.items.clear();
    }

    /// Sum of `price * qty` with add-time prices
    pub fn cart_total(&self) -> Decimal {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    /// Swap in a new snapshot and reconcile a non-empty cart against it
    ///
    /// Returns the number of lines removed by reconciliation.
    pub fn replace_catalog(&mut self, catalog: Arc<CatalogSnapshot>) -> usize {
        self.catalog = catalog;
        if self.items.is_empty() {
            0
        } else {
            self.remove_out_of_stock_items()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{Notification, NotificationLevel};
    use shared::models::Product;
    use tokio::sync::mpsc::UnboundedReceiver;

    fn product(id: &str, name: &str, price: i64, stock: u32) -> Product {
        serde_json::from_value(serde_json::json!({
            "id": id, "name": name, "price": price, "stock": stock
        }))
        .unwrap()
    }

    fn snapshot(products: Vec<Product>) -> Arc<CatalogSnapshot> {
        Arc::new(CatalogSnapshot::new(products))
    }

    fn engine(products: Vec<Product>) -> (CartEngine, UnboundedReceiver<Notification>) {
        let (notifier, rx) = Notifier::channel();
        (CartEngine::new(snapshot(products), notifier), rx)
    }

    fn item(id: &str, price: i64, qty: u32) -> CartItem {
        CartItem::new(id, format!("Producto {id}"), Decimal::from(price), qty)
    }

    fn drain(rx: &mut UnboundedReceiver<Notification>) -> Vec<Notification> {
        let mut out = Vec::new();
        while let Ok(n) = rx.try_recv() {
            out.push(n);
        }
        out
    }

    fn p1() -> Product {
        product("p1", "Producto p1", 100, 3)
    }

    // ========== Scenarios ==========

    #[test]
    fn test_add_within_stock() {
        let (mut cart, mut rx) = engine(vec![p1()]);

        assert_eq!(cart.add_to_cart(item("p1", 100, 2)), Ok(2));
        assert_eq!(cart.items()[0].qty, 2);
        assert_eq!(cart.cart_total(), Decimal::from(200));

        let notes = drain(&mut rx);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].level, NotificationLevel::Success);
        assert_eq!(notes[0].message, "Producto p1 agregado al carrito");
    }

    #[test]
    fn test_add_beyond_stock_is_rejected_atomically() {
        let (mut cart, mut rx) = engine(vec![p1()]);
        cart.add_to_cart(item("p1", 100, 2)).unwrap();
        drain(&mut rx);

        let before = cart.items().to_vec();
        let err = cart.add_to_cart(item("p1", 100, 2)).unwrap_err();
        assert_eq!(
            err,
            CartError::ExceedsStock {
                product_id: EntityId::from("p1"),
                name: "Producto p1".to_string(),
                available: 3,
                requested: 4,
            }
        );
        assert_eq!(cart.items(), before.as_slice());

        let notes = drain(&mut rx);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].level, NotificationLevel::Error);
        assert_eq!(notes[0].message, "Solo hay 3 unidades disponibles de Producto p1");
    }

    #[test]
    fn test_prune_after_stock_drops_to_zero() {
        let (mut cart, mut rx) = engine(vec![p1()]);
        cart.add_to_cart(item("p1", 100, 2)).unwrap();
        drain(&mut rx);

        let removed = cart.replace_catalog(snapshot(vec![product("p1", "Producto p1", 100, 0)]));
        assert_eq!(removed, 1);
        assert!(cart.is_empty());

        let notes = drain(&mut rx);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].level, NotificationLevel::Warning);
        assert_eq!(notes[0].message, "1 producto(s) agotado(s) eliminado(s) del carrito");
    }

    #[test]
    fn test_update_clamps_to_stock() {
        let (mut cart, mut rx) = engine(vec![p1()]);
        cart.add_to_cart(item("p1", 100, 1)).unwrap();
        drain(&mut rx);

        let outcome = cart.update_qty(&EntityId::from("p1"), 10).unwrap();
        assert_eq!(outcome, QtyUpdate::Clamped { requested: 10, applied: 3 });
        assert_eq!(cart.items()[0].qty, 3);

        let notes = drain(&mut rx);
        assert_eq!(notes[0].level, NotificationLevel::Warning);
        assert!(notes[0].message.contains('3'));
    }

    // ========== Add ==========

    #[test]
    fn test_add_unknown_product() {
        let (mut cart, mut rx) = engine(vec![p1()]);
        let err = cart.add_to_cart(item("ghost", 100, 1)).unwrap_err();
        assert!(matches!(err, CartError::NotFound { .. }));
        assert!(cart.is_empty());
        assert_eq!(drain(&mut rx)[0].message, "Producto no encontrado");
    }

    #[test]
    fn test_add_out_of_stock_product() {
        let (mut cart, mut rx) = engine(vec![product("p2", "RTX", 500, 0)]);
        let err = cart.add_to_cart(CartItem::new("p2", "RTX", Decimal::from(500), 1)).unwrap_err();
        assert!(matches!(err, CartError::OutOfStock { .. }));
        assert!(cart.is_empty());
        assert_eq!(drain(&mut rx)[0].message, "RTX está agotado");
    }

    #[test]
    fn test_add_zero_quantity_rejected() {
        let (mut cart, _rx) = engine(vec![p1()]);
        assert_eq!(cart.add_to_cart(item("p1", 100, 0)), Err(CartError::InvalidQuantity));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_merges_lines_and_keeps_order() {
        let (mut cart, _rx) = engine(vec![p1(), product("p2", "B", 50, 10)]);
        cart.add_to_cart(item("p2", 50, 1)).unwrap();
        cart.add_to_cart(item("p1", 100, 1)).unwrap();
        cart.add_to_cart(item("p2", 50, 4)).unwrap();

        let ids: Vec<&str> = cart.items().iter().map(|i| i.product_id.as_str()).collect();
        assert_eq!(ids, ["p2", "p1"]);
        assert_eq!(cart.item(&EntityId::from("p2")).unwrap().qty, 5);
        assert_eq!(cart.unit_count(), 6);
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_repeated_adds_never_oversell() {
        let (mut cart, _rx) = engine(vec![p1()]);
        for _ in 0..10 {
            let _ = cart.add_to_cart(item("p1", 100, 1));
            let line = cart.item(&EntityId::from("p1")).unwrap();
            assert!(line.qty <= 3);
        }
        assert_eq!(cart.item(&EntityId::from("p1")).unwrap().qty, 3);
    }

    #[test]
    fn test_numeric_and_string_ids_match() {
        let (mut cart, _rx) = engine(vec![product("42", "CPU", 100, 2)]);
        cart.add_to_cart(CartItem::new(42i64, "CPU", Decimal::from(100), 1)).unwrap();
        assert_eq!(cart.item(&EntityId::from("42")).unwrap().qty, 1);
    }

    // ========== Remove / update ==========

    #[test]
    fn test_remove_is_idempotent() {
        let (mut cart, _rx) = engine(vec![p1()]);
        cart.add_to_cart(item("p1", 100, 1)).unwrap();

        assert!(cart.remove_from_cart(&EntityId::from("p1")));
        let after_once = cart.items().to_vec();
        assert!(!cart.remove_from_cart(&EntityId::from("p1")));
        assert_eq!(cart.items(), after_once.as_slice());
        assert!(!cart.remove_from_cart(&EntityId::from("never-added")));
    }

    #[test]
    fn test_update_unknown_product_leaves_cart() {
        let (mut cart, mut rx) = engine(vec![p1()]);
        cart.add_to_cart(item("p1", 100, 1)).unwrap();
        drain(&mut rx);

        // Checked before the quantity, so even a removal request fails
        let err = cart.update_qty(&EntityId::from("ghost"), 0).unwrap_err();
        assert!(matches!(err, CartError::NotFound { .. }));
        assert_eq!(cart.len(), 1);
        assert_eq!(drain(&mut rx)[0].level, NotificationLevel::Error);
    }

    #[test]
    fn test_update_to_zero_or_negative_removes() {
        let (mut cart, _rx) = engine(vec![p1()]);
        cart.add_to_cart(item("p1", 100, 2)).unwrap();
        assert_eq!(cart.update_qty(&EntityId::from("p1"), -1), Ok(QtyUpdate::Removed));
        assert!(cart.is_empty());

        cart.add_to_cart(item("p1", 100, 2)).unwrap();
        assert_eq!(cart.update_qty(&EntityId::from("p1"), 0), Ok(QtyUpdate::Removed));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_sets_exact_quantity() {
        let (mut cart, mut rx) = engine(vec![p1()]);
        cart.add_to_cart(item("p1", 100, 3)).unwrap();
        drain(&mut rx);

        assert_eq!(cart.update_qty(&EntityId::from("p1"), 1), Ok(QtyUpdate::Updated(1)));
        assert_eq!(cart.items()[0].qty, 1);
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn test_update_product_not_in_cart() {
        let (mut cart, _rx) = engine(vec![p1()]);
        assert_eq!(cart.update_qty(&EntityId::from("p1"), 2), Ok(QtyUpdate::NotInCart));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_with_zero_stock_removes_line() {
        let (mut cart, _rx) = engine(vec![p1()]);
        cart.add_to_cart(item("p1", 100, 2)).unwrap();
        cart.catalog = snapshot(vec![product("p1", "Producto p1", 100, 0)]);

        assert_eq!(cart.update_qty(&EntityId::from("p1"), 1), Ok(QtyUpdate::Removed));
        assert!(cart.is_empty());
    }

    // ========== Reconciliation ==========

    #[test]
    fn test_prune_removes_exactly_missing_and_empty_lines() {
        let (mut cart, mut rx) = engine(vec![
            product("a", "A", 10, 5),
            product("b", "B", 10, 5),
            product("c", "C", 10, 5),
            product("d", "D", 10, 5),
        ]);
        for id in ["a", "b", "c", "d"] {
            cart.add_to_cart(item(id, 10, 3)).unwrap();
        }
        drain(&mut rx);

        // a: fine, b: zero stock, c: gone, d: short but not empty
        cart.replace_catalog(snapshot(vec![
            product("a", "A", 10, 5),
            product("b", "B", 10, 0),
            product("d", "D", 10, 1),
        ]));

        let ids: Vec<&str> = cart.items().iter().map(|i| i.product_id.as_str()).collect();
        assert_eq!(ids, ["a", "d"]);
        assert_eq!(cart.item(&EntityId::from("d")).unwrap().qty, 3);

        let notes = drain(&mut rx);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].message, "2 producto(s) agotado(s) eliminado(s) del carrito");
    }

    #[test]
    fn test_prune_without_removals_is_silent() {
        let (mut cart, mut rx) = engine(vec![p1()]);
        cart.add_to_cart(item("p1", 100, 1)).unwrap();
        drain(&mut rx);

        assert_eq!(cart.remove_out_of_stock_items(), 0);
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn test_replace_catalog_on_empty_cart_skips_reconcile() {
        let (mut cart, mut rx) = engine(vec![p1()]);
        assert_eq!(cart.replace_catalog(snapshot(vec![])), 0);
        assert!(cart.catalog().is_empty());
        assert!(drain(&mut rx).is_empty());
    }

    // ========== Totals ==========

    #[test]
    fn test_total_uses_add_time_prices() {
        let (mut cart, _rx) = engine(vec![p1(), product("p2", "B", 999, 10)]);
        cart.add_to_cart(item("p1", 100, 2)).unwrap();
        // Line price comes from the item, not the catalog
        cart.add_to_cart(item("p2", 50, 3)).unwrap();

        cart.replace_catalog(snapshot(vec![
            product("p1", "Producto p1", 5000, 3),
            product("p2", "B", 1, 10),
        ]));
        assert_eq!(cart.cart_total(), Decimal::from(350));

        cart.clear_cart();
        assert!(cart.is_empty());
        assert_eq!(cart.cart_total(), Decimal::ZERO);
    }
}
