//! Bundled catalog used when the products service cannot be used

use chrono::{Duration, Utc};
use shared::EntityId;
use shared::models::Product;
use std::sync::LazyLock;

const LOCAL_PRODUCTS_JSON: &str = include_str!("../../data/products.json");

/// Placeholder image for local products without one
pub const DEFAULT_PRODUCT_IMAGE: &str = "/logo.png";

/// Days a local offer stays open when the dataset gives no end date
const LOCAL_OFFER_DAYS: i64 = 30;

static LOCAL_PRODUCTS: LazyLock<Vec<Product>> = LazyLock::new(|| {
    serde_json::from_str(LOCAL_PRODUCTS_JSON).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to parse bundled product dataset");
        Vec::new()
    })
});

/// The local catalog, normalised for display
///
/// Offers are only kept on products flagged as on sale; missing offer dates
/// default to a window opening now.
pub fn local_products() -> Vec<Product> {
    let now = Utc::now();
    LOCAL_PRODUCTS
        .iter()
        .cloned()
        .map(|mut product| {
            if product.image.as_deref().is_none_or(str::is_empty) {
                product.image = Some(DEFAULT_PRODUCT_IMAGE.to_string());
            }
            if product.description.is_none() {
                product.description = Some(String::new());
            }
            if !product.is_on_sale {
                product.offer = None;
            }
            if let Some(offer) = product.offer.as_mut() {
                offer.start_date.get_or_insert_with(|| now.to_rfc3339());
                offer
                    .end_date
                    .get_or_insert_with(|| (now + Duration::days(LOCAL_OFFER_DAYS)).to_rfc3339());
            }
            product
        })
        .collect()
}

/// Look up one product of the local catalog
pub fn local_product(id: &EntityId) -> Option<Product> {
    local_products().into_iter().find(|p| &p.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_parses() {
        let products = local_products();
        assert_eq!(products.len(), 8);
        assert!(products.iter().all(|p| p.image.is_some()));
    }

    #[test]
    fn test_offers_only_on_sale_products() {
        for product in local_products() {
            if let Some(offer) = &product.offer {
                assert!(product.is_on_sale, "{} has an offer but is not on sale", product.id);
                assert!(offer.start_date.is_some());
                assert!(offer.end_date.is_some());
            }
        }
    }

    #[test]
    fn test_local_lookup() {
        let cpu = local_product(&EntityId::from("cpu-ryzen-5600")).unwrap();
        assert_eq!(cpu.brand, "AMD");
        assert!(local_product(&EntityId::from("missing")).is_none());
    }
}
