//! Cart line

use crate::types::EntityId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One line of the in-memory cart
///
/// `price` is captured when the line is added and is never re-derived from
/// the catalog, so later price changes do not affect the cart total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: EntityId,
    pub name: String,
    pub price: Decimal,
    pub qty: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl CartItem {
    pub fn new(product_id: impl Into<EntityId>, name: impl Into<String>, price: Decimal, qty: u32) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            price,
            qty,
            image: None,
        }
    }

    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.qty)
    }
}
