//! Review Model

use crate::types::EntityId;
use serde::{Deserialize, Serialize};

/// Author shown when the reviews service does not return one
pub const DEFAULT_REVIEW_AUTHOR: &str = "Usuario";

/// Product review as shown in the storefront
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: EntityId,
    pub product_id: EntityId,
    pub user_id: Option<EntityId>,
    pub author: String,
    /// 1-5
    pub rating: u8,
    pub comment: String,
    pub date: String,
}

/// Review as stored by the reviews service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendReview {
    pub id: EntityId,
    pub product_id: EntityId,
    #[serde(default)]
    pub user_id: Option<EntityId>,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl BackendReview {
    /// Attach an author name; a missing `createdAt` falls back to `now`
    pub fn into_review(self, author: impl Into<String>, now: impl FnOnce() -> String) -> Review {
        Review {
            id: self.id,
            product_id: self.product_id,
            user_id: self.user_id,
            author: author.into(),
            rating: self.rating,
            comment: self.comment,
            date: self.created_at.unwrap_or_else(now),
        }
    }
}

/// Body of `POST /reviews`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub product_id: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    pub rating: u8,
    pub comment: String,
}

/// Whether a rating is on the 1-5 scale
pub fn is_valid_rating(rating: u8) -> bool {
    (1..=5).contains(&rating)
}
