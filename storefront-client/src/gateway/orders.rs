//! Orders service client

use crate::{ClientError, ClientResult, HttpClient};
use chrono::{DateTime, NaiveDateTime};
use shared::EntityId;
use shared::models::{BackendOrder, CreateOrderRequest};

#[derive(Debug, Clone)]
pub struct OrderGateway {
    http: HttpClient,
    orders_url: String,
}

impl OrderGateway {
    pub fn new(http: HttpClient, orders_url: impl Into<String>) -> Self {
        Self {
            http,
            orders_url: orders_url.into(),
        }
    }

    /// Submit a new order; requires a session token
    ///
    /// Rejections come back as [`ClientError::Api`] carrying the service
    /// message and, when provided, its structured error code.
    pub async fn create_order(&self, request: &CreateOrderRequest) -> ClientResult<BackendOrder> {
        if self.http.token().is_none() {
            return Err(ClientError::NotAuthenticated);
        }

        let order = self
            .http
            .post::<BackendOrder, _>(&self.orders_url, request)
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing order data".to_string()))?;

        tracing::info!(order_id = %order.id, total = %order.total_amount, "Order created");
        Ok(order)
    }

    /// All orders of a user, as returned by the service
    pub async fn orders_for_user(&self, user_id: &EntityId) -> ClientResult<Vec<BackendOrder>> {
        let url = format!("{}/user/{}", self.orders_url, user_id);
        Ok(self.http.get::<Vec<BackendOrder>>(&url).await?.data.unwrap_or_default())
    }

    /// Most recent order of a user, `None` when there is none or the lookup fails
    pub async fn latest_order_for_user(&self, user_id: &EntityId) -> Option<BackendOrder> {
        match self.orders_for_user(user_id).await {
            Ok(orders) => orders
                .into_iter()
                .max_by_key(|o| o.created_at.as_deref().map_or(0, created_at_millis)),
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "Failed to fetch user orders");
                None
            }
        }
    }
}

/// Milliseconds since epoch of an order timestamp; unparseable values sort first
fn created_at_millis(raw: &str) -> i64 {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.timestamp_millis();
    }
    // Zone-less timestamps as emitted by some order services
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or(0)
}
