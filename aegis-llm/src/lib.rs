//! LLM integration for the Aegis scan gateway
//!
//! Provider abstraction and the two upstream variants, the scan prompt
//! builder, response normalization and the scan use case that ties them
//! together.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::use_cases::ScanTargetUseCase;
pub use domain::*;
pub use infrastructure::prompts;
pub use infrastructure::providers::{GoogleAIProvider, OpenAIProvider};
pub use infrastructure::{
    FindingsNormalizer, ProviderRegistry, ProviderResolver, ProviderType, ResponseParser,
    ScanPromptBuilder,
};
