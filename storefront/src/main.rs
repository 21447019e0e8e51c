//! Storefront console
//!
//! Restores the stored session, loads the catalog and prints it.

use shared::util::format_clp;
use storefront::logger::init_logger;
use storefront::{Notifier, Storefront, StorefrontConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = StorefrontConfig::from_env();
    init_logger(&config.log_level, config.log_json)?;

    tracing::info!(products_url = %config.client.urls.products, "Starting storefront");

    let (notifier, mut notifications) = Notifier::channel();
    let app = Storefront::new(config, notifier)?;

    match app.start().await {
        Some(session) => tracing::info!(
            user = %session.user.display_name(),
            verified = session.is_verified(),
            "Session restored"
        ),
        None => tracing::info!("No session, browsing as guest"),
    }

    let catalog = app.store().catalog().await;
    for product in catalog.products() {
        let price = if product.effective_price() < product.price {
            format!("{} (antes {})", format_clp(product.effective_price()), format_clp(product.price))
        } else {
            format_clp(product.price)
        };
        println!(
            "{:<24} {:<40} {:>22}  {}",
            product.id.as_str(),
            product.name,
            price,
            product.stock_status().label()
        );
    }

    println!("{} productos, {} en oferta", catalog.len(), catalog.on_sale().count());

    while let Ok(notification) = notifications.try_recv() {
        println!("[{:?}] {}", notification.level, notification.message);
    }

    Ok(())
}
