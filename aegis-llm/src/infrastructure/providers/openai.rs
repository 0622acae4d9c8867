//! OpenAI-compatible provider implementation
//!
//! Works with OpenAI and any OpenAI-compatible chat completions API. Output
//! shape is enforced only by instructions plus JSON mode, so the text may
//! still arrive wrapped in code fences. No grounding sources are reported.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::{build_client, error_from_response, parse_body, transport_error};
use crate::domain::{
    CompletionRequest, CompletionResponse, LlmError, LlmProvider, ProviderCapabilities,
    ProviderInfo, ReasoningEffort, StopReason, Usage,
};

const PROVIDER_ID: &str = "openai";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_TIMEOUT_SECONDS: u64 = 120;

/// OpenAI-compatible provider
pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    organization_id: Option<String>,
    timeout: Duration,
    reasoning_effort: String,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider with its own HTTP client
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let timeout = Duration::from_secs(DEFAULT_TIMEOUT_SECONDS);
        Self::with_client(build_client(timeout), timeout, api_key, model)
    }

    /// Create a provider on an existing HTTP client, built with `timeout`
    pub fn with_client(
        client: Client,
        timeout: Duration,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.into(),
            organization_id: None,
            timeout,
            reasoning_effort: "high".to_string(),
        }
    }

    /// Set custom base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set organization ID
    pub fn with_organization(mut self, org_id: impl Into<String>) -> Self {
        self.organization_id = Some(org_id.into());
        self
    }

    /// Set the request timeout in seconds
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = Duration::from_secs(seconds);
        self.client = build_client(self.timeout);
        self
    }

    /// `reasoning_effort` value sent when extended reasoning is requested
    pub fn with_reasoning_effort(mut self, effort: impl Into<String>) -> Self {
        self.reasoning_effort = effort.into();
        self
    }

    /// Get the chat completions URL
    fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Reasoning models (o-series, gpt-5) accept `reasoning_effort` but reject
    /// a custom temperature.
    fn is_reasoning_model(model: &str) -> bool {
        let mut chars = model.chars();
        let o_series =
            chars.next() == Some('o') && chars.next().is_some_and(|c| c.is_ascii_digit());
        o_series || model.starts_with("gpt-5")
    }

    /// Convert to OpenAI request format
    fn to_openai_request(&self, request: &CompletionRequest) -> OpenAIRequest {
        let model = request.model.clone().unwrap_or_else(|| self.model.clone());
        let reasoning_model = Self::is_reasoning_model(&model);

        let messages = request
            .messages
            .iter()
            .map(|msg| OpenAIMessage {
                role: msg.role.as_str().to_string(),
                content: Some(msg.content.clone()),
            })
            .collect();

        let reasoning_effort = (reasoning_model
            && request.reasoning == ReasoningEffort::Extended)
            .then(|| self.reasoning_effort.clone());

        OpenAIRequest {
            model,
            messages,
            max_tokens: request.max_tokens,
            temperature: if reasoning_model {
                None
            } else {
                request.temperature
            },
            response_format: request
                .response_format
                .is_json()
                .then(|| OpenAIResponseFormat {
                    r#type: "json_object".to_string(),
                }),
            reasoning_effort,
        }
    }

    /// Convert from OpenAI response format
    fn parse_openai_response(
        &self,
        response: OpenAIResponse,
    ) -> Result<CompletionResponse, LlmError> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::malformed("No choices in response"))?;

        let content = choice
            .message
            .and_then(|m| m.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| LlmError::malformed("Choice has no message content"))?;

        let stop_reason = match choice.finish_reason.as_deref() {
            Some("stop") => StopReason::EndTurn,
            Some("length") => StopReason::MaxTokens,
            Some("content_filter") => StopReason::ContentFilter,
            _ => StopReason::Other,
        };

        let usage = response
            .usage
            .map(|u| Usage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            id: response.id,
            model: response.model,
            content,
            stop_reason,
            usage,
            grounding_urls: Vec::new(),
            created: response.created,
        })
    }
}

#[async_trait]
impl LlmProvider for OpenAIProvider {
    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            id: PROVIDER_ID,
            name: "OpenAI",
            capabilities: ProviderCapabilities {
                structured_output: false,
                search_grounding: false,
                extended_reasoning: Self::is_reasoning_model(&self.model),
                max_output_tokens: 16_384,
            },
        }
    }

    fn default_model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let url = self.chat_url();
        let openai_request = self.to_openai_request(&request);

        debug!(model = %openai_request.model, "Sending request to OpenAI-compatible API");

        let mut req = self.client.post(&url).bearer_auth(&self.api_key);
        if let Some(ref org) = self.organization_id {
            req = req.header("OpenAI-Organization", org);
        }

        let response = req
            .json(&openai_request)
            .send()
            .await
            .map_err(|e| transport_error(PROVIDER_ID, e, self.timeout))?;

        if !response.status().is_success() {
            return Err(error_from_response(PROVIDER_ID, response).await);
        }

        let body = response
            .text()
            .await
            .map_err(|e| transport_error(PROVIDER_ID, e, self.timeout))?;
        let openai_response: OpenAIResponse = parse_body(PROVIDER_ID, &body)?;
        self.parse_openai_response(openai_response)
    }
}

// === OpenAI API Types ===

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<OpenAIResponseFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reasoning_effort: Option<String>,
}

#[derive(Debug, Serialize)]
struct OpenAIResponseFormat {
    r#type: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    id: String,
    #[serde(default)]
    model: String,
    created: Option<u64>,
    #[serde(default)]
    choices: Vec<OpenAIChoice>,
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: Option<OpenAIMessage>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}
