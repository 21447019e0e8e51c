//! Product report endpoints (customer reports and admin listing)

use crate::{ClientError, ClientResult, HttpClient};
use shared::EntityId;
use shared::models::{NewReport, ProductReport};

#[derive(Debug, Clone)]
pub struct ReportGateway {
    http: HttpClient,
    product_reports_url: String,
    reports_url: String,
}

impl ReportGateway {
    pub fn new(http: HttpClient, product_reports_url: impl Into<String>, reports_url: impl Into<String>) -> Self {
        Self {
            http,
            product_reports_url: product_reports_url.into(),
            reports_url: reports_url.into(),
        }
    }

    /// File a report against a product
    pub async fn report_product(&self, product_id: &EntityId, user_id: i64, reason: &str) -> ClientResult<ProductReport> {
        if reason.trim().is_empty() {
            return Err(ClientError::Validation("Debes indicar un motivo".to_string()));
        }

        let url = format!("{}/{}/reports", self.product_reports_url, product_id);
        let request = NewReport {
            user_id,
            reason: reason.trim().to_string(),
        };
        let report = self
            .http
            .post::<ProductReport, _>(&url, &request)
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing report data".to_string()))?;

        tracing::info!(product_id = %product_id, "Product reported");
        Ok(report)
    }

    /// Every report, admin only
    ///
    /// Auth rejections and connectivity failures are returned; other
    /// failures yield an empty list.
    pub async fn admin_reports(&self) -> ClientResult<Vec<ProductReport>> {
        match self.http.get::<Vec<ProductReport>>(&self.reports_url).await {
            Ok(response) => Ok(response.data.unwrap_or_default()),
            Err(e) if e.is_auth() || e.is_connectivity() => Err(e),
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch reports");
                Ok(Vec::new())
            }
        }
    }

    /// Number of reports filed against a product, 0 on failure
    pub async fn report_count(&self, product_id: &EntityId) -> u64 {
        let url = format!("{}/count/{}", self.reports_url, product_id);
        match self.http.get_public::<u64>(&url).await {
            Ok(response) => response.data.unwrap_or(0),
            Err(e) => {
                tracing::warn!(product_id = %product_id, error = %e, "Failed to fetch report count");
                0
            }
        }
    }
}
