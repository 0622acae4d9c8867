//! Configuration management

pub mod validation;

pub use validation::{Validate, ValidationError};

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub rate_limit: RateLimitConfig,
    pub llm: LlmConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Global request timeout in seconds applied at the HTTP layer.
    /// Must leave room for the upstream model call.
    pub request_timeout_seconds: u64,
    /// Allowed CORS origins. Use ["*"] to allow any origin.
    pub allowed_origins: Vec<String>,
    /// Header set by the trusted reverse proxy carrying the caller address.
    pub trusted_proxy_header: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            request_timeout_seconds: 120,
            allowed_origins: vec!["*".to_string()],
            trusted_proxy_header: "x-forwarded-for".to_string(),
        }
    }
}

impl ServerConfig {
    /// Whether CORS should answer with a wildcard origin
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.len() == 1 && self.allowed_origins[0] == "*"
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// One of "json", "pretty", "compact"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "json".to_string(),
        }
    }
}

/// Per-caller request throttling
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub enabled: bool,
    /// Requests admitted per identity within one window
    pub max_requests: u32,
    /// Window length in seconds
    pub window_seconds: u64,
    /// Interval of the stale-entry sweep. 0 disables the sweep.
    pub cleanup_interval_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_requests: 10,
            window_seconds: 15 * 60,
            cleanup_interval_seconds: 300,
        }
    }
}

impl RateLimitConfig {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_seconds)
    }
}

/// LLM configuration with multi-provider support
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Active provider: "google_ai" or "openai"
    pub provider: String,

    /// Google AI (Gemini) configuration
    pub google_ai: GoogleAIConfig,

    /// OpenAI-compatible configuration
    pub openai: OpenAIConfig,

    /// Temperature for generation
    pub temperature: f64,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Upstream request timeout in seconds
    pub timeout_seconds: u64,
    /// Thinking budget sent to Google AI when extended reasoning is requested
    pub thinking_budget_tokens: u32,
    /// Reasoning effort sent to OpenAI-compatible APIs when extended reasoning is requested
    pub reasoning_effort: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "google_ai".to_string(),
            google_ai: GoogleAIConfig::default(),
            openai: OpenAIConfig::default(),
            temperature: 0.2,
            max_tokens: 8192,
            timeout_seconds: 110,
            thinking_budget_tokens: 8192,
            reasoning_effort: "high".to_string(),
        }
    }
}

/// Google AI (Gemini) provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleAIConfig {
    /// Name of the environment variable holding the API key.
    /// The key itself is read at request time and never stored here.
    pub api_key_env: String,
    /// Base URL for the API
    pub base_url: String,
    pub model: String,
}

impl Default for GoogleAIConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GEMINI_API_KEY".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.5-flash".to_string(),
        }
    }
}

/// OpenAI-compatible provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAIConfig {
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    /// Base URL for the API
    pub base_url: String,
    pub model: String,
    /// Organization ID (optional)
    pub organization_id: Option<String>,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENAI_API_KEY".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o".to_string(),
            organization_id: None,
        }
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigLoadError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false));

        // Add environment-specific config if ENV is set
        if let Ok(env) = std::env::var("ENV") {
            builder = builder
                .add_source(config::File::with_name(&format!("config/{}", env)).required(false));
        }

        // Local config and environment variables last (highest priority)
        builder = builder
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("AEGIS")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .try_parsing(true),
            );

        let config: Config = builder.build()?.try_deserialize()?;

        config.validate()?;

        Ok(config)
    }
}

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Configuration file error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Configuration validation error: {0}")]
    Validation(#[from] ValidationError),
}
