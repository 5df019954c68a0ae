mod docx;
mod pdf;
mod plaintext;

pub use docx::DocxExtractor;
pub use pdf::PdfExtractor;
pub use plaintext::PlainTextExtractor;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::ExtractError;

/// Document formats accepted for extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Doc,
    Docx,
    Txt,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 4] = [
        DocumentKind::Pdf,
        DocumentKind::Doc,
        DocumentKind::Docx,
        DocumentKind::Txt,
    ];

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Doc => "doc",
            DocumentKind::Docx => "docx",
            DocumentKind::Txt => "txt",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for DocumentKind {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().trim_start_matches('.').to_lowercase();
        DocumentKind::ALL
            .into_iter()
            .find(|kind| kind.extension() == lower)
            .ok_or_else(|| ExtractError::UnsupportedFormat(s.to_string()))
    }
}

/// Lower-cased extension after the last dot, if the name has one.
///
/// `"report.PDF"` gives `"pdf"`; `"report"` and `"report."` give `None`.
pub fn file_extension(name: &str) -> Option<String> {
    let (_, ext) = name.rsplit_once('.')?;
    if ext.is_empty() {
        None
    } else {
        Some(ext.to_lowercase())
    }
}

/// Trait for extracting text from documents.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extract text from raw bytes.
    async fn extract(&self, content: &[u8]) -> Result<String, ExtractError>;

    /// Get the extractor name.
    fn name(&self) -> &'static str;
}

/// Pick the extractor for a document kind.
pub fn extractor_for(kind: DocumentKind) -> Box<dyn TextExtractor> {
    match kind {
        DocumentKind::Pdf => Box::new(PdfExtractor::new()),
        DocumentKind::Doc | DocumentKind::Docx => Box::new(DocxExtractor::for_kind(kind)),
        DocumentKind::Txt => Box::new(PlainTextExtractor::new()),
    }
}

/// Extract text from `content`, declared as `kind` (`pdf`, `doc`, `docx`, `txt`).
pub async fn extract(content: &[u8], kind: &str) -> Result<String, ExtractError> {
    let kind: DocumentKind = kind.parse()?;
    extract_kind(content, kind).await
}

/// Extract text from `content` of a known kind.
pub async fn extract_kind(content: &[u8], kind: DocumentKind) -> Result<String, ExtractError> {
    let extractor = extractor_for(kind);
    tracing::debug!(
        extractor = extractor.name(),
        size = content.len(),
        "Extracting document text"
    );
    extractor.extract(content).await
}

/// Read a file and extract its text as `kind`.
pub async fn extract_path(path: &Path, kind: DocumentKind) -> Result<String, ExtractError> {
    let content = tokio::fs::read(path).await?;
    extract_kind(&content, kind).await
}

/// Read a file and extract its text, taking the kind from its extension.
pub async fn extract_file(path: &Path) -> Result<String, ExtractError> {
    let kind: DocumentKind = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| ExtractError::UnsupportedFormat(path.display().to_string()))?
        .parse()?;
    extract_path(path, kind).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_kind_from_str() {
        assert_eq!("pdf".parse::<DocumentKind>().unwrap(), DocumentKind::Pdf);
        assert_eq!("DOCX".parse::<DocumentKind>().unwrap(), DocumentKind::Docx);
        assert_eq!(".txt".parse::<DocumentKind>().unwrap(), DocumentKind::Txt);
        assert!(matches!(
            "exe".parse::<DocumentKind>(),
            Err(ExtractError::UnsupportedFormat(s)) if s == "exe"
        ));
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("a.TXT"), Some("txt".to_string()));
        assert_eq!(file_extension("archive.tar.gz"), Some("gz".to_string()));
        assert_eq!(file_extension("noext"), None);
        assert_eq!(file_extension("trailing."), None);
    }

    #[test]
    fn test_extractor_selection() {
        assert_eq!(extractor_for(DocumentKind::Pdf).name(), "pdf");
        assert_eq!(extractor_for(DocumentKind::Doc).name(), "docx");
        assert_eq!(extractor_for(DocumentKind::Docx).name(), "docx");
        assert_eq!(extractor_for(DocumentKind::Txt).name(), "plaintext");
    }

    #[tokio::test]
    async fn test_extract_unsupported_kind() {
        let result = extract(b"MZ\x90\x00", "exe").await;
        assert!(matches!(result, Err(ExtractError::UnsupportedFormat(_))));
    }

    #[tokio::test]
    async fn test_extract_txt() {
        let text = extract(b"mild headache", "TXT").await.unwrap();
        assert_eq!(text, "mild headache");
    }

    #[tokio::test]
    async fn test_extract_file() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "Patient reports fatigue.").unwrap();

        let text = extract_file(file.path()).await.unwrap();
        assert_eq!(text, "Patient reports fatigue.");
    }

    #[tokio::test]
    async fn test_extract_missing_file() {
        let result = extract_path(Path::new("/nonexistent/report.txt"), DocumentKind::Txt).await;
        assert!(matches!(result, Err(ExtractError::Io(_))));
    }
}
