//! Response sanitizing for LLM outputs
//!
//! Models in JSON mode still occasionally wrap their answer in markdown code
//! fences. Stripping is the only repair applied: whatever remains is handed
//! to a strict JSON parse.

const FENCE: &str = "```";

/// Utilities for cleaning model output before parsing.
pub struct ResponseParser;

impl ResponseParser {
    /// Remove a leading ```` ``` ```` / ```` ```json ```` marker and a
    /// trailing ```` ``` ```` from trimmed text.
    ///
    /// Repeats until nothing changes, so stripping already-clean text (or
    /// text stripped once before) returns it unchanged.
    pub fn strip_code_fences(content: &str) -> &str {
        let mut text = content.trim();

        loop {
            let before = text.len();

            if let Some(rest) = text.strip_prefix(FENCE) {
                // Language tag, e.g. `json`
                let tag_len = rest
                    .find(|c: char| !c.is_ascii_alphanumeric())
                    .unwrap_or(rest.len());
                text = rest[tag_len..].trim_start();
            }

            if let Some(rest) = text.strip_suffix(FENCE) {
                text = rest.trim_end();
            }

            if text.len() == before {
                return text;
            }
        }
    }
}
