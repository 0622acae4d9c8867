pub mod builder;
pub mod schema;
pub mod templates;

pub use builder::ScanPromptBuilder;
pub use schema::{REQUIRED_FINDING_FIELDS, findings_schema};
pub use templates::{
    CODE_FIX_DISABLED_DIRECTIVE, CODE_FIX_ENABLED_DIRECTIVE, FINDINGS_OUTPUT_CONTRACT,
    SCAN_SYSTEM_PROMPT, SCAN_USER_PROMPT,
};
