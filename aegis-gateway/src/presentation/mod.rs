//! Gateway presentation layer

pub mod controllers;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod routes;

pub use controllers::GatewayState;
pub use errors::ScanError;
pub use models::*;
pub use routes::create_router;
