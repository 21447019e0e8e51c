//! Order Model

use crate::models::CartItem;
use crate::types::EntityId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Status sent with every new order
pub const ORDER_STATUS_PENDING: &str = "PENDIENTE";

/// Seller id used when none is configured
pub const DEFAULT_SELLER_ID: i64 = 1;

/// Line of a submitted order (copy of a cart line)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: EntityId,
    pub name: String,
    pub price: Decimal,
    pub qty: u32,
}

impl From<&CartItem> for OrderItem {
    fn from(item: &CartItem) -> Self {
        Self {
            product_id: item.product_id.clone(),
            name: item.name.clone(),
            price: item.price,
            qty: item.qty,
        }
    }
}

/// Customer block of the checkout form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerInfo {
    #[serde(rename = "customerEmail")]
    pub email: String,
    #[serde(rename = "customerName")]
    pub name: String,
    #[serde(rename = "customerLastName")]
    pub last_name: String,
}

/// Shipping block of the checkout form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShippingInfo {
    #[serde(rename = "shippingStreet")]
    pub street: String,
    #[serde(rename = "shippingDepartment", default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(rename = "shippingRegion")]
    pub region: String,
    #[serde(rename = "shippingComuna")]
    pub comuna: String,
    #[serde(rename = "shippingIndications", default, skip_serializing_if = "Option::is_none")]
    pub indications: Option<String>,
}

/// Immutable order snapshot
///
/// Built right before submission; `total` always equals the sum of
/// `price * qty` over `items`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub items: Vec<OrderItem>,
    pub total: Decimal,
    /// RFC 3339 timestamp
    pub created_at: String,
    #[serde(flatten)]
    pub customer: CustomerInfo,
    #[serde(flatten)]
    pub shipping: ShippingInfo,
}

impl Order {
    /// Snapshot the given cart lines into a new order
    pub fn from_cart(
        id: impl Into<String>,
        created_at: impl Into<String>,
        cart: &[CartItem],
        customer: CustomerInfo,
        shipping: ShippingInfo,
    ) -> Self {
        let items: Vec<OrderItem> = cart.iter().map(OrderItem::from).collect();
        let total = items
            .iter()
            .map(|i| i.price * Decimal::from(i.qty))
            .sum();
        Self {
            id: id.into(),
            items,
            total,
            created_at: created_at.into(),
            customer,
            shipping,
        }
    }

    /// Apply the identity assigned by the order service
    pub fn confirmed_by(mut self, backend: &BackendOrder) -> Self {
        self.id = backend.id.to_string();
        self.total = backend.total_amount;
        if let Some(created_at) = &backend.created_at {
            self.created_at = created_at.clone();
        }
        self
    }
}

/// Line of the create-order request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendOrderItem {
    /// Numeric when the product id is numeric, string otherwise
    pub product_id: serde_json::Value,
    pub quantity: u32,
    pub price: Decimal,
}

/// Body of `POST /orders`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    pub total_amount: Decimal,
    pub status: String,
    pub items: Vec<BackendOrderItem>,
    /// Comma-separated product ids, kept for older order services
    pub product_ids: String,
    pub seller_id: i64,
}

impl CreateOrderRequest {
    pub fn from_order(order: &Order, user_id: Option<i64>, seller_id: i64) -> Self {
        Self {
            user_id,
            total_amount: order.total,
            status: ORDER_STATUS_PENDING.to_string(),
            items: order
                .items
                .iter()
                .map(|i| BackendOrderItem {
                    product_id: i.product_id.to_wire(),
                    quantity: i.qty,
                    price: i.price,
                })
                .collect(),
            product_ids: order
                .items
                .iter()
                .map(|i| i.product_id.as_str())
                .collect::<Vec<_>>()
                .join(","),
            seller_id,
        }
    }
}

/// Order as returned by the order service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendOrder {
    pub id: EntityId,
    #[serde(default)]
    pub user_id: Option<EntityId>,
    #[serde(default)]
    pub total_amount: Decimal,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub product_ids: Option<String>,
    #[serde(default)]
    pub seller_id: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
}
