// Mock products REST API
//
// Serves the products contract from memory so the screen can be
// developed without the real backend:
// - GET    /products/list
// - GET    /products/filter?name=...
// - GET    /products/{id}
// - POST   /products
// - PUT    /products/{id}
// - DELETE /products/{id}

use actix_web::{web, App, HttpServer};
use product_admin::telemetry;
use product_admin::web_app::api::mock_server::{self, MockStore};
use product_admin::web_app::model::Product;
use rust_decimal::Decimal;
use std::env;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();

    dotenv::dotenv().ok();
    let addr = env::var("MOCK_API_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

    let store = web::Data::new(MockStore::seeded(seed_products()));
    tracing::info!("Seeded mock store with {} products", store.all().len());
    tracing::info!("Starting mock products API at http://{}/products", addr);

    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .configure(mock_server::configure)
    })
    .bind(&addr)?
    .run()
    .await?;

    Ok(())
}

fn seed_products() -> Vec<Product> {
    [
        ("Wireless Headphones", "Noise cancelling, 30-hour battery", Decimal::new(7999, 2), 12),
        ("USB-C Cable", "Braided fast charging cable", Decimal::new(1299, 2), 140),
        ("Desk Lamp", "LED lamp with adjustable arm", Decimal::new(3450, 2), 0),
    ]
    .into_iter()
    .map(|(name, description, price, quantity)| Product {
        id: None,
        name: name.to_string(),
        description: description.to_string(),
        price,
        quantity,
    })
    .collect()
}
