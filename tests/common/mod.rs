// common/mod.rs - Shared test doubles and fixtures
//
// Provides:
// 1. FakeGateway: in-memory ProductGateway that records every call, can be
//    told to fail, and can hold responses until a test releases them
// 2. FakeConfirmation: answers every prompt with a fixed choice
// 3. Product fixtures and controller builders

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use product_admin::web_app::api::{GatewayError, GatewayResult, ProductGateway};
use product_admin::web_app::components::ConfirmationService;
use product_admin::web_app::model::{Confirmation, Product};
use product_admin::{AppConfig, ProductsController};
use reqwest::{Method, StatusCode};
use rust_decimal::Decimal;
use tokio::sync::Notify;

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    List,
    Get(i64),
    Filter(String),
    Create(Product),
    Update(i64, Product),
    Delete(i64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    List,
    Get,
    Filter,
    Create,
    Update,
    Delete,
}

#[derive(Default)]
struct FakeState {
    products: Vec<Product>,
    next_id: i64,
    calls: Vec<Call>,
    failing: HashSet<Op>,
    gates: HashMap<String, Arc<Notify>>,
}

/// In-memory gateway double
pub struct FakeGateway {
    state: Mutex<FakeState>,
}

impl FakeGateway {
    pub fn new(products: Vec<Product>) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(FakeState {
                products,
                next_id: 99,
                ..FakeState::default()
            }),
        })
    }

    pub fn empty() -> Arc<Self> {
        Self::new(Vec::new())
    }

    pub fn fail_on(&self, op: Op) {
        self.state.lock().unwrap().failing.insert(op);
    }

    pub fn recover(&self, op: Op) {
        self.state.lock().unwrap().failing.remove(&op);
    }

    /// Hold responses for `key` until the returned handle is notified
    ///
    /// Keys: "list", "get", "create", "update", "delete" or "filter:<name>".
    pub fn gate(&self, key: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.state
            .lock()
            .unwrap()
            .gates
            .insert(key.to_string(), gate.clone());
        gate
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn mutating_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Create(_) | Call::Update(..) | Call::Delete(_)))
            .collect()
    }

    fn record(&self, call: Call) {
        self.state.lock().unwrap().calls.push(call);
    }

    async fn pass_gate(&self, key: &str) {
        let gate = self.state.lock().unwrap().gates.get(key).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }

    fn check(&self, op: Op, method: Method) -> GatewayResult<()> {
        if self.state.lock().unwrap().failing.contains(&op) {
            return Err(GatewayError::Status {
                method,
                url: "http://fake/products".to_string(),
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: "boom".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ProductGateway for FakeGateway {
    async fn list(&self) -> GatewayResult<Vec<Product>> {
        self.record(Call::List);
        self.pass_gate("list").await;
        self.check(Op::List, Method::GET)?;
        Ok(self.state.lock().unwrap().products.clone())
    }

    async fn get_by_id(&self, id: i64) -> GatewayResult<Product> {
        self.record(Call::Get(id));
        self.pass_gate("get").await;
        self.check(Op::Get, Method::GET)?;
        let found = self
            .state
            .lock()
            .unwrap()
            .products
            .iter()
            .find(|p| p.id == Some(id))
            .cloned();
        found.ok_or_else(|| GatewayError::Status {
            method: Method::GET,
            url: format!("http://fake/products/{}", id),
            status: StatusCode::NOT_FOUND,
            body: String::new(),
        })
    }

    async fn filter_by_name(&self, name: &str) -> GatewayResult<Vec<Product>> {
        self.record(Call::Filter(name.to_string()));
        self.pass_gate(&format!("filter:{}", name)).await;
        self.check(Op::Filter, Method::GET)?;
        let needle = name.to_lowercase();
        Ok(self
            .state
            .lock()
            .unwrap()
            .products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn create(&self, product: &Product) -> GatewayResult<Product> {
        self.record(Call::Create(product.clone()));
        self.pass_gate("create").await;
        self.check(Op::Create, Method::POST)?;
        let mut state = self.state.lock().unwrap();
        let mut created = product.clone();
        created.id = Some(state.next_id);
        state.next_id += 1;
        state.products.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: i64, product: &Product) -> GatewayResult<Product> {
        self.record(Call::Update(id, product.clone()));
        self.pass_gate("update").await;
        self.check(Op::Update, Method::PUT)?;
        let mut updated = product.clone();
        updated.id = Some(id);
        let mut state = self.state.lock().unwrap();
        if let Some(slot) = state.products.iter_mut().find(|p| p.id == Some(id)) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> GatewayResult<()> {
        self.record(Call::Delete(id));
        self.pass_gate("delete").await;
        self.check(Op::Delete, Method::DELETE)?;
        self.state.lock().unwrap().products.retain(|p| p.id != Some(id));
        Ok(())
    }
}

/// Confirmation double with a fixed answer
pub struct FakeConfirmation {
    answer: bool,
    prompts: Mutex<Vec<Confirmation>>,
}

impl FakeConfirmation {
    pub fn accepting() -> Arc<Self> {
        Arc::new(Self { answer: true, prompts: Mutex::new(Vec::new()) })
    }

    pub fn declining() -> Arc<Self> {
        Arc::new(Self { answer: false, prompts: Mutex::new(Vec::new()) })
    }

    pub fn prompts(&self) -> Vec<Confirmation> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConfirmationService for FakeConfirmation {
    async fn confirm(&self, prompt: &Confirmation) -> bool {
        self.prompts.lock().unwrap().push(prompt.clone());
        self.answer
    }
}

pub fn product(id: i64, name: &str, price: i64, quantity: i64) -> Product {
    Product {
        id: Some(id),
        name: name.to_string(),
        description: format!("{} description", name),
        price: Decimal::new(price, 0),
        quantity,
    }
}

pub fn catalog() -> Vec<Product> {
    vec![
        product(1, "Wireless Headphones", 80, 12),
        product(2, "USB-C Cable", 13, 140),
        product(3, "Desk Lamp", 35, 0),
    ]
}

pub fn controller(
    gateway: Arc<FakeGateway>,
    confirmations: Arc<FakeConfirmation>,
) -> ProductsController {
    ProductsController::new(gateway, confirmations, &AppConfig::default())
}

pub fn debounced_controller(gateway: Arc<FakeGateway>, debounce: Duration) -> ProductsController {
    let config = AppConfig::default().with_search_debounce(debounce);
    ProductsController::new(gateway, FakeConfirmation::accepting(), &config)
}

/// Start the in-memory REST backend on a random port
///
/// Returns the products base URL and a handle to stop the server.
#[cfg(feature = "mock-server")]
pub fn spawn_mock_api(products: Vec<Product>) -> anyhow::Result<(String, actix_web::dev::ServerHandle)> {
    use actix_web::{web, App, HttpServer};
    use product_admin::web_app::api::mock_server::{self, MockStore};

    let store = web::Data::new(MockStore::seeded(products));
    let server = HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .configure(mock_server::configure)
    })
    .workers(1)
    .bind(("127.0.0.1", 0))?;

    let addr = server
        .addrs()
        .first()
        .copied()
        .ok_or_else(|| anyhow::anyhow!("mock server has no bound address"))?;
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok((format!("http://{}/products", addr), handle))
}
