//! Unit tests for scan prompt templates and ScanPromptBuilder

use rstest::rstest;

use aegis_core::domain::{ScanRequest, ScanSettings, TargetType};
use aegis_llm::domain::{ReasoningEffort, ResponseFormat, Role};
use aegis_llm::infrastructure::prompts::{
    CODE_FIX_DISABLED_DIRECTIVE, CODE_FIX_ENABLED_DIRECTIVE, FINDINGS_OUTPUT_CONTRACT,
    SCAN_SYSTEM_PROMPT, ScanPromptBuilder, findings_schema,
};

#[allow(dead_code)]
mod common {
    include!("../common/mod.rs");
}

use common::{create_test_config, instructed_json_capabilities, schema_enforced_capabilities};

fn scan_request(target_type: TargetType, deep_thinking: bool, auto_remediation: bool) -> ScanRequest {
    ScanRequest {
        target: "SELECT * FROM users WHERE id = ' + id".to_string(),
        target_type,
        settings: ScanSettings {
            deep_thinking,
            auto_remediation,
        },
    }
}

/// The system prompt carries methodology for both target families
#[test]
fn test_system_prompt_structure() {
    assert!(SCAN_SYSTEM_PROMPT.contains("SAST"));
    assert!(SCAN_SYSTEM_PROMPT.contains("DAST"));
    assert!(SCAN_SYSTEM_PROMPT.contains("OSINT"));
    assert!(SCAN_SYSTEM_PROMPT.contains("CRITICAL > HIGH > MEDIUM > LOW > INFO"));
    assert!(SCAN_SYSTEM_PROMPT.contains("Injection"));
}

#[test]
fn test_output_contract_names_every_field() {
    for field in [
        "\"findings\"",
        "\"title\"",
        "\"severity\"",
        "\"category\"",
        "\"description\"",
        "\"location\"",
        "\"remediation\"",
        "\"codeFix\"",
        "\"references\"",
        "\"cweId\"",
    ] {
        assert!(FINDINGS_OUTPUT_CONTRACT.contains(field), "missing {field}");
    }
}

#[test]
fn test_schema_enforced_output_shape() {
    let request = ScanPromptBuilder::build(
        &scan_request(TargetType::Code, true, true),
        &schema_enforced_capabilities(),
        &create_test_config(),
    );

    assert_eq!(
        request.response_format,
        ResponseFormat::JsonSchema(findings_schema())
    );
    assert_eq!(request.system_text().as_deref(), Some(SCAN_SYSTEM_PROMPT));
}

#[test]
fn test_instructed_json_output_shape() {
    let request = ScanPromptBuilder::build(
        &scan_request(TargetType::Code, true, true),
        &instructed_json_capabilities(),
        &create_test_config(),
    );

    assert_eq!(request.response_format, ResponseFormat::JsonObject);
    let system = request.system_text().unwrap();
    assert!(system.starts_with(SCAN_SYSTEM_PROMPT));
    assert!(system.ends_with(FINDINGS_OUTPUT_CONTRACT));
}

/// Methodology and user message do not depend on the provider
#[test]
fn test_methodology_is_provider_independent() {
    let scan = scan_request(TargetType::WebApp, false, false);
    let config = create_test_config();
    let enforced = ScanPromptBuilder::build(&scan, &schema_enforced_capabilities(), &config);
    let instructed = ScanPromptBuilder::build(&scan, &instructed_json_capabilities(), &config);

    let user = |messages: &[aegis_llm::Message]| {
        messages
            .iter()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.clone())
    };
    assert_eq!(
        user(enforced.messages.as_slice()),
        user(instructed.messages.as_slice())
    );
    assert!(
        instructed
            .system_text()
            .unwrap()
            .contains(&enforced.system_text().unwrap())
    );
}

#[rstest]
#[case(TargetType::Code, false)]
#[case(TargetType::WebApp, true)]
#[case(TargetType::Network, true)]
fn test_search_grounding_only_for_external_targets(
    #[case] target_type: TargetType,
    #[case] expected: bool,
) {
    let request = ScanPromptBuilder::build(
        &scan_request(target_type, true, true),
        &schema_enforced_capabilities(),
        &create_test_config(),
    );
    assert_eq!(request.search_grounding, expected);

    // Never requested from a provider that cannot ground
    let request = ScanPromptBuilder::build(
        &scan_request(target_type, true, true),
        &instructed_json_capabilities(),
        &create_test_config(),
    );
    assert!(!request.search_grounding);
}

#[rstest]
#[case(true, true, ReasoningEffort::Extended)]
#[case(false, true, ReasoningEffort::Standard)]
#[case(true, false, ReasoningEffort::Standard)]
fn test_deep_thinking_toggle(
    #[case] deep_thinking: bool,
    #[case] supported: bool,
    #[case] expected: ReasoningEffort,
) {
    let mut capabilities = schema_enforced_capabilities();
    capabilities.extended_reasoning = supported;

    let request = ScanPromptBuilder::build(
        &scan_request(TargetType::Code, deep_thinking, true),
        &capabilities,
        &create_test_config(),
    );
    assert_eq!(request.reasoning, expected);
}

#[test]
fn test_user_prompt_auto_remediation_enabled() {
    let prompt = ScanPromptBuilder::build_user_prompt(&scan_request(TargetType::Code, true, true));

    assert!(prompt.contains("Target type: CODE"));
    assert!(prompt.contains("Auto-remediation: ENABLED"));
    assert!(prompt.contains(CODE_FIX_ENABLED_DIRECTIVE));
    assert!(prompt.contains("SELECT * FROM users WHERE id = ' + id"));
}

#[test]
fn test_user_prompt_auto_remediation_disabled() {
    let prompt =
        ScanPromptBuilder::build_user_prompt(&scan_request(TargetType::Network, true, false));

    assert!(prompt.contains("Target type: NETWORK"));
    assert!(prompt.contains("Auto-remediation: DISABLED"));
    assert!(prompt.contains(CODE_FIX_DISABLED_DIRECTIVE));
    assert!(!prompt.contains(CODE_FIX_ENABLED_DIRECTIVE));
}

#[test]
fn test_target_placeholders_are_not_expanded() {
    let scan = ScanRequest {
        target: "let s = \"{target_type} {auto_remediation}\";".to_string(),
        target_type: TargetType::Code,
        settings: ScanSettings::default(),
    };
    let prompt = ScanPromptBuilder::build_user_prompt(&scan);

    assert!(prompt.contains("let s = \"{target_type} {auto_remediation}\";"));
}

#[test]
fn test_generation_settings_from_config() {
    let mut config = create_test_config();
    config.temperature = 0.4;
    config.max_tokens = 100_000;

    let request = ScanPromptBuilder::build(
        &scan_request(TargetType::Code, true, true),
        &instructed_json_capabilities(),
        &config,
    );

    assert_eq!(request.temperature, Some(0.4));
    // Clamped to what the provider can produce
    assert_eq!(request.max_tokens, Some(16_384));
    assert!(request.model.is_none());
}
