//! Scan request builder
//!
//! The methodology text and toggle semantics are identical for every
//! provider. Only the output shape differs: schema-enforcing providers get
//! the findings schema, the rest get JSON mode plus a written contract.

use aegis_core::config::LlmConfig;
use aegis_core::domain::ScanRequest;

use super::schema::findings_schema;
use super::templates::{
    CODE_FIX_DISABLED_DIRECTIVE, CODE_FIX_ENABLED_DIRECTIVE, FINDINGS_OUTPUT_CONTRACT,
    SCAN_SYSTEM_PROMPT, SCAN_USER_PROMPT,
};
use crate::domain::{CompletionRequest, ProviderCapabilities, ReasoningEffort, ResponseFormat};

pub struct ScanPromptBuilder;

impl ScanPromptBuilder {
    /// Render the completion request for one scan
    pub fn build(
        request: &ScanRequest,
        capabilities: &ProviderCapabilities,
        config: &LlmConfig,
    ) -> CompletionRequest {
        let (system, response_format) = if capabilities.structured_output {
            (
                SCAN_SYSTEM_PROMPT.to_string(),
                ResponseFormat::JsonSchema(findings_schema()),
            )
        } else {
            (
                format!("{}{}", SCAN_SYSTEM_PROMPT, FINDINGS_OUTPUT_CONTRACT),
                ResponseFormat::JsonObject,
            )
        };

        let search_grounding =
            request.target_type.needs_external_intel() && capabilities.search_grounding;

        let reasoning = if request.settings.deep_thinking && capabilities.extended_reasoning {
            ReasoningEffort::Extended
        } else {
            ReasoningEffort::Standard
        };

        let max_tokens = if capabilities.max_output_tokens > 0 {
            config.max_tokens.min(capabilities.max_output_tokens)
        } else {
            config.max_tokens
        };

        CompletionRequest::new()
            .with_system(system)
            .with_user(Self::build_user_prompt(request))
            .with_temperature(config.temperature)
            .with_max_tokens(max_tokens)
            .with_response_format(response_format)
            .with_search_grounding(search_grounding)
            .with_reasoning(reasoning)
    }

    pub fn build_user_prompt(request: &ScanRequest) -> String {
        let (flag, directive) = if request.settings.auto_remediation {
            ("ENABLED", CODE_FIX_ENABLED_DIRECTIVE)
        } else {
            ("DISABLED", CODE_FIX_DISABLED_DIRECTIVE)
        };

        // Target goes last so placeholder-looking text inside it is never substituted
        SCAN_USER_PROMPT
            .replace("{target_type}", request.target_type.as_str())
            .replace("{auto_remediation}", flag)
            .replace("{code_fix_directive}", directive)
            .replace("{target}", &request.target)
    }
}
