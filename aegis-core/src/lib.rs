//! Aegis Core - Foundation crate for the Aegis scan gateway
//!
//! This crate provides functionality shared by the LLM and gateway crates:
//!
//! # Modules
//!
//! - [`config`] - Strongly-typed configuration with TOML and environment variable support
//! - [`domain`] - Scan requests, findings, and request validation
//! - [`infrastructure`] - In-memory per-caller rate limiting
//! - [`logging`] - Structured logging with tracing
//!
//! # Configuration
//!
//! ```rust,ignore
//! use aegis_core::Config;
//!
//! let config = Config::load()?;
//! ```
//!
//! Environment variables use the `AEGIS__` prefix with double underscore separators:
//!
//! ```bash
//! AEGIS__SERVER__PORT=8080
//! AEGIS__RATE_LIMIT__MAX_REQUESTS=10
//! AEGIS__LLM__PROVIDER=openai
//! ```
//!
//! # Logging
//!
//! ```rust,ignore
//! use aegis_core::init_tracing;
//!
//! init_tracing(&config.logging)?;
//! ```

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;

pub use config::Config;
pub use logging::init_tracing;
