//! Domain Layer - Core business logic and entities
//!
//! This module contains the entities, value objects and validation rules
//! of a security scan request and its findings.

pub mod scan;

pub use scan::*;
