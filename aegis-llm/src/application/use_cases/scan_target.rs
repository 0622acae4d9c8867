//! Use case for scanning one target with the configured AI provider

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info, instrument};

use aegis_core::config::LlmConfig;
use aegis_core::domain::{ScanRequest, ScanResponse};

use crate::domain::LlmError;
use crate::infrastructure::normalizer::FindingsNormalizer;
use crate::infrastructure::prompts::ScanPromptBuilder;
use crate::infrastructure::registry::ProviderResolver;

/// Resolve provider → build request → call upstream once → normalize
pub struct ScanTargetUseCase {
    resolver: Arc<dyn ProviderResolver>,
    config: LlmConfig,
}

impl ScanTargetUseCase {
    pub fn new(resolver: Arc<dyn ProviderResolver>, config: LlmConfig) -> Self {
        Self { resolver, config }
    }

    /// Run the scan. Any failure is terminal; nothing is retried.
    #[instrument(
        skip(self, request),
        fields(target_type = %request.target_type, target_len = request.target.len())
    )]
    pub async fn execute(&self, request: ScanRequest) -> Result<ScanResponse, LlmError> {
        let started = Instant::now();

        let provider = self.resolver.resolve(&self.config)?;
        let info = provider.info();

        let completion_request =
            ScanPromptBuilder::build(&request, &info.capabilities, &self.config);

        debug!(
            provider = info.id,
            model = provider.default_model(),
            grounding = completion_request.search_grounding,
            reasoning = ?completion_request.reasoning,
            auto_remediation = request.settings.auto_remediation,
            "Dispatching scan to provider"
        );

        let response = provider.complete(completion_request).await.map_err(|e| {
            error!(
                provider = info.id,
                error = %e,
                transport = e.is_transport(),
                rate_limited = e.is_rate_limited(),
                retry_after_secs = e.retry_after().map(|d| d.as_secs()),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Scan failed at provider"
            );
            e
        })?;

        if response.is_truncated() {
            debug!(provider = info.id, "Provider stopped at the output token limit");
        }

        let grounding_urls = info
            .capabilities
            .search_grounding
            .then_some(response.grounding_urls.as_slice());

        let findings = FindingsNormalizer::normalize(response.text(), grounding_urls)?;

        info!(
            provider = info.id,
            findings = findings.len(),
            sources = response.grounding_urls.len(),
            total_tokens = response.usage.total_tokens,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Scan completed"
        );

        Ok(ScanResponse::new(findings))
    }
}
