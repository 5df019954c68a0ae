use async_trait::async_trait;

use super::TextExtractor;
use crate::ExtractError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Plain-text "extractor": decodes UTF-8, replacing invalid sequences.
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlainTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, content: &[u8]) -> Result<String, ExtractError> {
        let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);
        Ok(String::from_utf8_lossy(content).into_owned())
    }

    fn name(&self) -> &'static str {
        "plaintext"
    }
}
