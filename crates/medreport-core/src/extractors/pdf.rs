use async_trait::async_trait;

use super::{DocumentKind, TextExtractor};
use crate::ExtractError;

/// The `%PDF-` header may be preceded by junk, but only within the first KiB.
const HEADER_SEARCH_WINDOW: usize = 1024;

/// PDF text extractor backed by `pdf-extract`.
///
/// Decoding runs on the blocking pool. A decoder panic surfaces as a
/// `CorruptDocument` error instead of tearing down the request task.
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn has_pdf_header(content: &[u8]) -> bool {
    let window = &content[..content.len().min(HEADER_SEARCH_WINDOW)];
    window.windows(5).any(|w| w == b"%PDF-")
}

#[async_trait]
impl TextExtractor for PdfExtractor {
    async fn extract(&self, content: &[u8]) -> Result<String, ExtractError> {
        if !has_pdf_header(content) {
            return Err(ExtractError::corrupt(
                DocumentKind::Pdf,
                "missing %PDF header",
            ));
        }

        let bytes = content.to_vec();
        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|e| ExtractError::corrupt(DocumentKind::Pdf, format!("decoder aborted: {}", e)))?
            .map_err(|e| ExtractError::corrupt(DocumentKind::Pdf, e))?;

        Ok(text)
    }

    fn name(&self) -> &'static str {
        "pdf"
    }
}
