// web_app/pages/mod.rs - Page controllers
//
// - ProductsController: product management screen

pub mod products;

pub use products::{DeleteOutcome, ListOutcome, ProductsController, SaveOutcome};
