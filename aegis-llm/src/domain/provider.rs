//! LLM Provider trait and related types
//!
//! Defines the core abstraction over upstream model APIs. Callers inspect
//! [`ProviderCapabilities`] to decide which optional request features to
//! ask for, so nothing outside the provider branches on provider identity.

use async_trait::async_trait;

use crate::domain::error::LlmError;
use crate::domain::messages::{CompletionRequest, CompletionResponse};

/// Provider capability flags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderCapabilities {
    /// Enforces a JSON schema on the output
    pub structured_output: bool,
    /// Can ground answers in web search and report the sources
    pub search_grounding: bool,
    /// Accepts an extended reasoning / thinking budget
    pub extended_reasoning: bool,
    /// Maximum output tokens
    pub max_output_tokens: u32,
}

/// Metadata about a provider
#[derive(Debug, Clone)]
pub struct ProviderInfo {
    /// Provider identifier (e.g., "google_ai", "openai")
    pub id: &'static str,
    /// Human-readable name
    pub name: &'static str,
    /// Provider capabilities
    pub capabilities: ProviderCapabilities,
}

/// Core trait for LLM providers
///
/// All LLM backends must implement this trait. The trait is object-safe
/// and can be used with dynamic dispatch via `Arc<dyn LlmProvider>`.
///
/// # Example
///
/// ```rust,ignore
/// use aegis_llm::{CompletionRequest, LlmError, LlmProvider};
///
/// async fn ask(provider: &dyn LlmProvider) -> Result<String, LlmError> {
///     let request = CompletionRequest::new().with_user("Reply with {}");
///     let response = provider.complete(request).await?;
///     Ok(response.text().to_string())
/// }
/// ```
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get provider metadata
    fn info(&self) -> ProviderInfo;

    /// Generate a completion. Never retried by callers.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;

    /// Get the default model for this provider
    fn default_model(&self) -> &str;
}
