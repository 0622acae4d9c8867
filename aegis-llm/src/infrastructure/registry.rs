//! Provider Registry
//!
//! Builds the configured provider on demand. The API key is read from the
//! environment on every call, so rotating or adding it does not require a
//! restart, and a missing key fails the request rather than startup.
//!
//! The HTTP client is built once per registry and shared by every provider
//! it hands out, so connection pools survive across requests.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tracing::error;

use aegis_core::config::LlmConfig;

use crate::domain::{LlmError, LlmProvider};
use crate::infrastructure::providers::{GoogleAIProvider, OpenAIProvider, build_client};

/// Provider type identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderType {
    GoogleAI,
    OpenAI,
}

impl ProviderType {
    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GoogleAI => "google_ai",
            Self::OpenAI => "openai",
        }
    }
}

impl FromStr for ProviderType {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google_ai" | "gemini" | "google" => Ok(Self::GoogleAI),
            "openai" | "gpt" => Ok(Self::OpenAI),
            other => Err(LlmError::ProviderNotFound(format!(
                "Unknown provider: {}. Valid options: google_ai, openai",
                other
            ))),
        }
    }
}

/// Source of a ready-to-use provider for one request
pub trait ProviderResolver: Send + Sync {
    fn resolve(&self, config: &LlmConfig) -> Result<Arc<dyn LlmProvider>, LlmError>;
}

/// Resolves the provider named in [`LlmConfig`], with its key from the environment
#[derive(Debug, Clone)]
pub struct ProviderRegistry {
    client: Client,
    timeout: Duration,
}

impl ProviderRegistry {
    /// Build the shared HTTP client with the upstream timeout from `config`
    pub fn new(config: &LlmConfig) -> Self {
        let timeout = Duration::from_secs(config.timeout_seconds);
        Self {
            client: build_client(timeout),
            timeout,
        }
    }

    /// Name of the environment variable holding the key for `provider`
    pub fn api_key_env(config: &LlmConfig, provider: ProviderType) -> &str {
        match provider {
            ProviderType::GoogleAI => &config.google_ai.api_key_env,
            ProviderType::OpenAI => &config.openai.api_key_env,
        }
    }

    /// Build the configured provider with an explicit key.
    ///
    /// A `None` or blank key is a configuration error.
    pub fn resolve_with_key(
        &self,
        config: &LlmConfig,
        api_key: Option<String>,
    ) -> Result<Arc<dyn LlmProvider>, LlmError> {
        let provider_type = ProviderType::from_str(&config.provider)?;

        let api_key = api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                let env_var = Self::api_key_env(config, provider_type);
                // Names the variable, never its value
                error!(
                    provider = provider_type.as_str(),
                    env_var = env_var,
                    "Provider API key is not configured"
                );
                LlmError::Configuration(format!(
                    "{} API key not configured. Set the {} environment variable",
                    provider_type.as_str(),
                    env_var
                ))
            })?;

        let provider: Arc<dyn LlmProvider> = match provider_type {
            ProviderType::GoogleAI => {
                let mut provider = GoogleAIProvider::with_client(
                    self.client.clone(),
                    self.timeout,
                    api_key,
                    &config.google_ai.model,
                )
                .with_thinking_budget(config.thinking_budget_tokens);
                if !config.google_ai.base_url.is_empty() {
                    provider = provider.with_base_url(&config.google_ai.base_url);
                }
                Arc::new(provider)
            }
            ProviderType::OpenAI => {
                let mut provider = OpenAIProvider::with_client(
                    self.client.clone(),
                    self.timeout,
                    api_key,
                    &config.openai.model,
                )
                .with_reasoning_effort(&config.reasoning_effort);
                if !config.openai.base_url.is_empty() {
                    provider = provider.with_base_url(&config.openai.base_url);
                }
                if let Some(ref org) = config.openai.organization_id {
                    provider = provider.with_organization(org);
                }
                Arc::new(provider)
            }
        };

        Ok(provider)
    }
}

impl ProviderResolver for ProviderRegistry {
    fn resolve(&self, config: &LlmConfig) -> Result<Arc<dyn LlmProvider>, LlmError> {
        let provider_type = ProviderType::from_str(&config.provider)?;
        let api_key = std::env::var(Self::api_key_env(config, provider_type)).ok();
        self.resolve_with_key(config, api_key)
    }
}
