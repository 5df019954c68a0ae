use crate::extractors::DocumentKind;

/// Errors that can occur while turning a document into plain text.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ExtractError {
    /// The declared kind is not one of pdf, doc, docx, txt.
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// The decoder could not parse the bytes.
    #[error("Corrupt {kind} document: {reason}")]
    CorruptDocument { kind: DocumentKind, reason: String },

    /// Reading the document failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtractError {
    pub(crate) fn corrupt(kind: DocumentKind, reason: impl ToString) -> Self {
        ExtractError::CorruptDocument {
            kind,
            reason: reason.to_string(),
        }
    }

    /// Returns true if the caller supplied bad input, as opposed to an
    /// environment failure.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ExtractError::UnsupportedFormat(_) | ExtractError::CorruptDocument { .. }
        )
    }
}
