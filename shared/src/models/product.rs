//! Product Model

use crate::types::EntityId;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Products with this many units or fewer are flagged as low stock
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// Product entity as served by the products service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Regular price in CLP
    pub price: Decimal,
    /// Remaining units at the time of the last catalog fetch
    #[serde(default, deserialize_with = "non_negative_stock")]
    pub stock: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_on_sale: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer: Option<Offer>,
}

/// Promotional offer attached to a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    /// Discount percentage, 0-100
    pub discount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// Stock badge shown next to a product
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    OutOfStock,
    Low(u32),
    InStock,
}

impl StockStatus {
    pub fn from_stock(stock: u32) -> Self {
        match stock {
            0 => Self::OutOfStock,
            n if n <= LOW_STOCK_THRESHOLD => Self::Low(n),
            _ => Self::InStock,
        }
    }

    /// Customer-facing label
    pub fn label(&self) -> String {
        match self {
            Self::OutOfStock => "Agotado".to_string(),
            Self::Low(n) => format!("Últimas {n} unidades"),
            Self::InStock => "En stock".to_string(),
        }
    }
}

impl Product {
    /// Price after the sale discount, if the product is on sale
    pub fn effective_price(&self) -> Decimal {
        match (&self.offer, self.is_on_sale) {
            (Some(offer), true) => {
                let discount = offer.discount.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
                self.price * (Decimal::ONE - discount / Decimal::ONE_HUNDRED)
            }
            _ => self.price,
        }
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.stock == 0
    }

    pub fn stock_status(&self) -> StockStatus {
        StockStatus::from_stock(self.stock)
    }
}

/// Some backends send negative stock after overselling, or `null` for
/// untracked items; both read as zero.
fn non_negative_stock<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<i64>::deserialize(deserializer)?.unwrap_or(0);
    Ok(u32::try_from(raw.max(0)).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(json: serde_json::Value) -> Product {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_backend_product_with_numeric_id() {
        let p = product(serde_json::json!({
            "id": 12,
            "name": "AMD Ryzen 5 5600",
            "category": "CPU",
            "brand": "AMD",
            "model": "100-100000927BOX",
            "price": 129990,
            "stock": 20,
            "sellerId": 1
        }));
        assert_eq!(p.id, "12");
        assert_eq!(p.stock, 20);
        assert_eq!(p.seller_id, Some(1));
        assert!(!p.is_on_sale);
        assert_eq!(p.effective_price(), Decimal::from(129990));
    }

    #[test]
    fn test_effective_price_with_offer() {
        let p = product(serde_json::json!({
            "id": "mb-b550-asus",
            "name": "ASUS TUF Gaming B550-PLUS",
            "price": 100000,
            "stock": 15,
            "isOnSale": true,
            "offer": { "discount": 10 }
        }));
        assert_eq!(p.effective_price(), Decimal::from(90000));
    }

    #[test]
    fn test_offer_ignored_when_not_on_sale() {
        let p = product(serde_json::json!({
            "id": "x",
            "name": "X",
            "price": 500,
            "stock": 1,
            "isOnSale": false,
            "offer": { "discount": 50 }
        }));
        assert_eq!(p.effective_price(), Decimal::from(500));
    }

    #[test]
    fn test_negative_stock_is_zero() {
        let p = product(serde_json::json!({ "id": 1, "name": "X", "price": 1, "stock": -3 }));
        assert_eq!(p.stock, 0);
        assert!(p.is_out_of_stock());
    }

    #[test]
    fn test_null_stock_keeps_the_rest_of_the_list() {
        let products: Vec<Product> = serde_json::from_value(serde_json::json!([
            { "id": 1, "name": "A", "price": 1, "stock": 3 },
            { "id": 2, "name": "B", "price": 1, "stock": null },
            { "id": 3, "name": "C", "price": 1 }
        ]))
        .unwrap();
        let stocks: Vec<u32> = products.iter().map(|p| p.stock).collect();
        assert_eq!(stocks, [3, 0, 0]);
        assert!(products[1].is_out_of_stock());
    }

    #[test]
    fn test_stock_status_labels() {
        assert_eq!(StockStatus::from_stock(0).label(), "Agotado");
        assert_eq!(StockStatus::from_stock(5).label(), "Últimas 5 unidades");
        assert_eq!(StockStatus::from_stock(6).label(), "En stock");
    }
}
