//! Configuration validation module

use crate::config::{Config, LlmConfig, LoggingConfig, RateLimitConfig, ServerConfig};

/// Provider identifiers the gateway knows how to build
pub const KNOWN_PROVIDERS: &[&str] = &["google_ai", "openai"];

const KNOWN_LOG_FORMATS: &[&str] = &["json", "pretty", "compact"];

/// Trait for validating configuration sections
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Server configuration error: {message}")]
    Server { message: String },

    #[error("Logging configuration error: {message}")]
    Logging { message: String },

    #[error("Rate limit configuration error: {message}")]
    RateLimit { message: String },

    #[error("LLM configuration error: {message}")]
    Llm { message: String },
}

impl ValidationError {
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server {
            message: message.into(),
        }
    }

    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }

    pub fn rate_limit(message: impl Into<String>) -> Self {
        Self::RateLimit {
            message: message.into(),
        }
    }

    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm {
            message: message.into(),
        }
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // u16 cannot exceed 65535, so only 0 is out of range
        if self.port == 0 {
            return Err(ValidationError::server(format!(
                "Port must be in range 1-65535, got {}",
                self.port
            )));
        }

        if self.host.is_empty() {
            return Err(ValidationError::server("Host cannot be empty"));
        }

        if self.request_timeout_seconds == 0 {
            return Err(ValidationError::server(
                "Request timeout must be greater than 0",
            ));
        }

        if self.trusted_proxy_header.trim().is_empty() {
            return Err(ValidationError::server(
                "Trusted proxy header cannot be empty",
            ));
        }

        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if !KNOWN_LOG_FORMATS.contains(&self.format.as_str()) {
            return Err(ValidationError::logging(format!(
                "Unknown log format '{}', expected one of {:?}",
                self.format, KNOWN_LOG_FORMATS
            )));
        }
        Ok(())
    }
}

impl Validate for RateLimitConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.max_requests == 0 {
            return Err(ValidationError::rate_limit(
                "max_requests must be greater than 0",
            ));
        }

        if self.window_seconds == 0 {
            return Err(ValidationError::rate_limit(
                "window_seconds must be greater than 0",
            ));
        }

        Ok(())
    }
}

impl Validate for LlmConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if !KNOWN_PROVIDERS.contains(&self.provider.as_str()) {
            return Err(ValidationError::llm(format!(
                "Unknown provider '{}', expected one of {:?}",
                self.provider, KNOWN_PROVIDERS
            )));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::llm(format!(
                "Temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }

        if self.max_tokens == 0 {
            return Err(ValidationError::llm("max_tokens must be greater than 0"));
        }

        if self.timeout_seconds == 0 {
            return Err(ValidationError::llm(
                "timeout_seconds must be greater than 0",
            ));
        }

        let key_env = match self.provider.as_str() {
            "openai" => &self.openai.api_key_env,
            _ => &self.google_ai.api_key_env,
        };
        if key_env.trim().is_empty() {
            return Err(ValidationError::llm(
                "api_key_env must name an environment variable",
            ));
        }

        Ok(())
    }
}

impl Validate for Config {
    fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.logging.validate()?;
        self.rate_limit.validate()?;
        self.llm.validate()?;

        // The HTTP deadline must outlive the upstream call so a slow provider
        // surfaces as a JSON 502 rather than a bare timeout
        if self.server.request_timeout_seconds <= self.llm.timeout_seconds {
            return Err(ValidationError::server(format!(
                "request_timeout_seconds ({}) must be greater than llm.timeout_seconds ({})",
                self.server.request_timeout_seconds, self.llm.timeout_seconds
            )));
        }

        Ok(())
    }
}
