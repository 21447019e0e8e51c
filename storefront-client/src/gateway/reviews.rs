//! Reviews service client

use crate::{ClientError, ClientResult, HttpClient};
use shared::EntityId;
use shared::models::{BackendReview, DEFAULT_REVIEW_AUTHOR, NewReview, Review, is_valid_rating};
use shared::util::now_rfc3339;

#[derive(Debug, Clone)]
pub struct ReviewGateway {
    http: HttpClient,
    reviews_url: String,
}

impl ReviewGateway {
    pub fn new(http: HttpClient, reviews_url: impl Into<String>) -> Self {
        Self {
            http,
            reviews_url: reviews_url.into(),
        }
    }

    /// Reviews of a product; empty on 204 and on failure
    ///
    /// The service does not return author names, every review is attributed
    /// to [`DEFAULT_REVIEW_AUTHOR`].
    pub async fn reviews_for_product(&self, product_id: &EntityId) -> Vec<Review> {
        let url = format!("{}/product/{}", self.reviews_url, product_id);
        match self.http.get_public::<Vec<BackendReview>>(&url).await {
            Ok(response) => response
                .data
                .unwrap_or_default()
                .into_iter()
                .map(|r| r.into_review(DEFAULT_REVIEW_AUTHOR, now_rfc3339))
                .collect(),
            Err(e) => {
                if !e.is_connectivity() {
                    tracing::warn!(product_id = %product_id, error = %e, "Failed to fetch reviews");
                }
                Vec::new()
            }
        }
    }

    /// Post a review written by `author`
    pub async fn add_review(
        &self,
        product_id: &EntityId,
        user_id: Option<i64>,
        author: &str,
        rating: u8,
        comment: &str,
    ) -> ClientResult<Review> {
        if !is_valid_rating(rating) {
            return Err(ClientError::Validation(format!("Calificación inválida: {rating}")));
        }
        if comment.trim().is_empty() {
            return Err(ClientError::Validation("El comentario no puede estar vacío".to_string()));
        }

        let request = NewReview {
            product_id: product_id.to_wire(),
            user_id,
            rating,
            comment: comment.trim().to_string(),
        };
        let review = self
            .http
            .post::<BackendReview, _>(&self.reviews_url, &request)
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing review data".to_string()))?;

        tracing::info!(product_id = %product_id, review_id = %review.id, "Review saved");
        Ok(review.into_review(author, now_rfc3339))
    }
}
