//! Catalog snapshot shared by the cart and checkout
//!
//! A snapshot is immutable; a refresh builds a new one and swaps the `Arc`.

use async_trait::async_trait;
use shared::EntityId;
use shared::models::Product;
use std::collections::HashMap;
use storefront_client::CatalogGateway;

/// Products known at the last refresh, indexed by id
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    products: Vec<Product>,
    index: HashMap<EntityId, usize>,
    fetched_at: i64,
}

impl CatalogSnapshot {
    pub fn new(products: Vec<Product>) -> Self {
        Self::at(products, shared::util::now_millis())
    }

    /// Snapshot stamped with an explicit fetch time (Unix millis)
    pub fn at(products: Vec<Product>, fetched_at: i64) -> Self {
        // Duplicate ids resolve to the first occurrence
        let mut index = HashMap::with_capacity(products.len());
        for (pos, product) in products.iter().enumerate() {
            index.entry(product.id.clone()).or_insert(pos);
        }
        Self {
            products,
            index,
            fetched_at,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &EntityId) -> Option<&Product> {
        self.index.get(id).map(|&pos| &self.products[pos])
    }

    /// Products in catalog order
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn fetched_at(&self) -> i64 {
        self.fetched_at
    }

    /// Products currently on sale
    pub fn on_sale(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.is_on_sale && p.offer.is_some())
    }
}

/// Source of catalog refreshes
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Load the full catalog; never fails, degraded sources return fallback data
    async fn load_products(&self) -> Vec<Product>;
}

#[async_trait]
impl CatalogSource for CatalogGateway {
    async fn load_products(&self) -> Vec<Product> {
        self.list_products().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Decimal;

    fn product(id: &str, stock: u32) -> Product {
        serde_json::from_value(serde_json::json!({
            "id": id, "name": id, "price": 1000, "stock": stock
        }))
        .unwrap()
    }

    #[test]
    fn test_lookup_by_textual_id() {
        let snapshot = CatalogSnapshot::new(vec![product("1", 3), product("gpu", 0)]);
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get(&EntityId::from(1)).unwrap().stock, 3);
        assert_eq!(snapshot.get(&EntityId::from("gpu")).unwrap().price, Decimal::from(1000));
        assert!(snapshot.get(&EntityId::from("nope")).is_none());
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let snapshot = CatalogSnapshot::at(vec![product("1", 3), product("1", 9)], 0);
        assert_eq!(snapshot.get(&EntityId::from("1")).unwrap().stock, 3);
        assert_eq!(snapshot.fetched_at(), 0);
    }

    #[test]
    fn test_empty() {
        assert!(CatalogSnapshot::empty().is_empty());
    }

    #[test]
    fn test_on_sale_needs_flag_and_offer() {
        let sale = |id: &str, flag: bool, offer: bool| -> Product {
            let mut json = serde_json::json!({
                "id": id, "name": id, "price": 1000, "stock": 1, "isOnSale": flag
            });
            if offer {
                json["offer"] = serde_json::json!({ "discount": 10 });
            }
            serde_json::from_value(json).unwrap()
        };
        let snapshot = CatalogSnapshot::new(vec![
            sale("a", true, true),
            sale("b", true, false),
            sale("c", false, true),
            product("d", 1),
        ]);
        let ids: Vec<&str> = snapshot.on_sale().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["a"]);
    }
}
