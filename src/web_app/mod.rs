// web_app/mod.rs - Root module for the product management screen
//
// Architecture:
// - model/: Shared data types (products, drafts, view state)
// - api/: Remote data gateway, plus an in-memory backend behind `mock-server`
// - components/: Toasts and confirmation prompts
// - pages/: Page controllers that own view state and drive the gateway
//
// Rendering is left to the embedding UI: it reads `ViewState` snapshots
// and forwards user interactions to the controller.

pub mod model;
pub mod api;
pub mod components;
pub mod pages;

pub use pages::ProductsController;
