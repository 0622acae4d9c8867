//! Aegis Gateway - HTTP surface of the Aegis scan gateway
//!
//! This crate exposes the scan endpoint and wires the per-caller rate
//! limiter, the request validator and the scan use case into one request
//! pipeline.
//!
//! # Architecture
//!
//! ```text
//! aegis-gateway/
//! └── presentation/       # HTTP layer
//!     ├── controllers/    # Scan and health handlers
//!     ├── errors.rs       # Error taxonomy and response mapping
//!     ├── middleware.rs   # Caller identity, request logging
//!     ├── models.rs       # Response DTOs
//!     └── routes.rs       # Router, CORS, timeout and body limit
//! ```
//!
//! # API Endpoints
//!
//! | Endpoint | Method | Description |
//! |----------|--------|-------------|
//! | `/api/scan` | POST | Scan a code snippet, web application or network target |
//! | `/api/scan` | OPTIONS | Pre-flight, empty 200 |
//! | `/health` | GET | Health check |

pub mod presentation;

pub use presentation::{GatewayState, ScanError, create_router};
