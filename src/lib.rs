// lib.rs - Root module for the product_admin library
//
// Client-side core of a product administration screen: a REST gateway
// for product CRUD and the controller that keeps the screen's state.

/// Environment-driven settings
pub mod config;
/// Logging setup
pub mod telemetry;
/// Models, gateway, components and page controllers
pub mod web_app;

pub use config::{AppConfig, ConfigError};
pub use web_app::ProductsController;
