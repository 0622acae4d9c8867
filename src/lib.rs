//! Aegis - AI-assisted vulnerability scan gateway
//!
//! This is the main binary crate that wires together all modules

mod app;

pub use aegis_core::{Config, init_tracing};
pub use app::{AppHandle, create_app, create_app_with_resolver};

// Re-export for convenience
pub use aegis_core;
pub use aegis_gateway;
pub use aegis_llm;
