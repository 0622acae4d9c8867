pub mod normalizer;
pub mod prompts;
pub mod providers;
pub mod registry;
pub mod response_parser;

pub use normalizer::FindingsNormalizer;
pub use prompts::ScanPromptBuilder;
pub use providers::{GoogleAIProvider, OpenAIProvider};
pub use registry::{ProviderRegistry, ProviderResolver, ProviderType};
pub use response_parser::ResponseParser;
