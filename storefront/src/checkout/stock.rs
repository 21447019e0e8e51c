//! Pre-submission stock check against the local catalog snapshot
//!
//! This is the optimistic half of stock checking; the order service does the
//! authoritative check on submit.

use crate::catalog::CatalogSnapshot;
use shared::models::CartItem;
use std::fmt;

/// One cart line that cannot be fulfilled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StockIssue {
    /// Product missing from the catalog
    Unavailable { name: String },
    /// Product has no stock left
    OutOfStock { name: String },
    /// Stock is below the requested quantity
    Insufficient {
        name: String,
        available: u32,
        requested: u32,
    },
}

impl StockIssue {
    /// Whether pruning the cart would remove this line
    pub fn is_removable(&self) -> bool {
        !matches!(self, StockIssue::Insufficient { .. })
    }
}

impl fmt::Display for StockIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockIssue::Unavailable { name } => write!(f, "{name} no está disponible"),
            StockIssue::OutOfStock { name } => write!(f, "{name} está agotado"),
            StockIssue::Insufficient {
                name,
                available,
                requested,
            } => write!(
                f,
                "{name}: solo hay {available} unidades disponibles (solicitaste {requested})"
            ),
        }
    }
}

/// Check every cart line; returns issues in cart order
///
/// Messages name products the way the cart shows them.
pub fn check_stock(items: &[CartItem], catalog: &CatalogSnapshot) -> Vec<StockIssue> {
    items
        .iter()
        .filter_map(|item| {
            let Some(product) = catalog.get(&item.product_id) else {
                return Some(StockIssue::Unavailable {
                    name: item.name.clone(),
                });
            };
            if product.stock == 0 {
                Some(StockIssue::OutOfStock {
                    name: item.name.clone(),
                })
            } else if product.stock < item.qty {
                Some(StockIssue::Insufficient {
                    name: item.name.clone(),
                    available: product.stock,
                    requested: item.qty,
                })
            } else {
                None
            }
        })
        .collect()
}
