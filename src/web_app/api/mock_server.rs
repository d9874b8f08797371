// web_app/api/mock_server.rs - In-memory products REST backend
//
// Implements the REST contract the gateway talks to, backed by a Vec
// behind a mutex. Used by the integration tests and by the
// `mock_products_api` binary during development.

use std::sync::{Mutex, MutexGuard};

use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;

use crate::web_app::model::Product;

#[derive(Debug, Default)]
struct Inventory {
    next_id: i64,
    items: Vec<Product>,
}

/// Shared product store for the mock handlers
#[derive(Debug, Default)]
pub struct MockStore {
    inner: Mutex<Inventory>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with products; ids are assigned in order
    pub fn seeded(products: Vec<Product>) -> Self {
        let store = Self::new();
        for product in products {
            store.insert(product);
        }
        store
    }

    fn lock(&self) -> MutexGuard<'_, Inventory> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn insert(&self, mut product: Product) -> Product {
        let mut inv = self.lock();
        inv.next_id += 1;
        product.id = Some(inv.next_id);
        inv.items.push(product.clone());
        product
    }

    pub fn all(&self) -> Vec<Product> {
        self.lock().items.clone()
    }

    pub fn get(&self, id: i64) -> Option<Product> {
        self.lock().items.iter().find(|p| p.id == Some(id)).cloned()
    }

    /// Case-insensitive substring match on the name
    pub fn filter(&self, name: &str) -> Vec<Product> {
        let needle = name.to_lowercase();
        self.lock()
            .items
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    pub fn replace(&self, id: i64, mut product: Product) -> Option<Product> {
        let mut inv = self.lock();
        let slot = inv.items.iter_mut().find(|p| p.id == Some(id))?;
        product.id = Some(id);
        *slot = product.clone();
        Some(product)
    }

    pub fn remove(&self, id: i64) -> bool {
        let mut inv = self.lock();
        let before = inv.items.len();
        inv.items.retain(|p| p.id != Some(id));
        before != inv.items.len()
    }
}

#[derive(Debug, Deserialize)]
pub struct FilterQuery {
    #[serde(default)]
    pub name: String,
}

/// Register the products routes under `/products`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/products")
            .route("/list", web::get().to(list_products))
            .route("/filter", web::get().to(filter_products))
            .route("", web::post().to(create_product))
            .route("/{id}", web::get().to(get_product))
            .route("/{id}", web::put().to(update_product))
            .route("/{id}", web::delete().to(delete_product)),
    );
}

async fn list_products(store: web::Data<MockStore>) -> impl Responder {
    HttpResponse::Ok().json(store.all())
}

async fn filter_products(store: web::Data<MockStore>, query: web::Query<FilterQuery>) -> impl Responder {
    tracing::debug!("Filtering products by '{}'", query.name);
    HttpResponse::Ok().json(store.filter(&query.name))
}

async fn get_product(store: web::Data<MockStore>, id: web::Path<i64>) -> impl Responder {
    match store.get(id.into_inner()) {
        Some(product) => HttpResponse::Ok().json(product),
        None => HttpResponse::NotFound().finish(),
    }
}

async fn create_product(store: web::Data<MockStore>, body: web::Json<Product>) -> impl Responder {
    let created = store.insert(body.into_inner());
    tracing::info!("Created product {:?}", created.id);
    HttpResponse::Created().json(created)
}

async fn update_product(store: web::Data<MockStore>, id: web::Path<i64>, body: web::Json<Product>) -> impl Responder {
    match store.replace(id.into_inner(), body.into_inner()) {
        Some(product) => HttpResponse::Ok().json(product),
        None => HttpResponse::NotFound().finish(),
    }
}

async fn delete_product(store: web::Data<MockStore>, id: web::Path<i64>) -> impl Responder {
    if store.remove(id.into_inner()) {
        HttpResponse::NoContent().finish()
    } else {
        HttpResponse::NotFound().finish()
    }
}
