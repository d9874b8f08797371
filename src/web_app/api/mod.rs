// web_app/api/mod.rs - Remote access to the products backend
//
// gateway.rs is the client side used by the controller. mock_server.rs is
// an in-memory implementation of the same REST contract.

pub mod gateway;

#[cfg(feature = "mock-server")]
pub mod mock_server;

pub use gateway::{GatewayError, GatewayResult, HttpProductGateway, ProductGateway};
