//! Product report Model

use crate::types::EntityId;
use serde::{Deserialize, Serialize};

/// A customer report flagging a product listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductReport {
    #[serde(default)]
    pub id: Option<i64>,
    pub product_id: EntityId,
    pub user_id: EntityId,
    pub reason: String,
    #[serde(default)]
    pub date: Option<String>,
}

/// Body of `POST /products/:id/reports`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReport {
    pub user_id: i64,
    pub reason: String,
}
