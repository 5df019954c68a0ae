use std::io::{Cursor, Read};

use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use super::{DocumentKind, TextExtractor};
use crate::ExtractError;

/// Main body part of a WordprocessingML package.
const DOCUMENT_PART: &str = "word/document.xml";

/// Upper bound on the inflated size of `word/document.xml` (64 MB).
const DEFAULT_MAX_DOCUMENT_XML: u64 = 64 * 1024 * 1024;

/// Word document extractor.
///
/// Reads `word/document.xml` from the zip package and keeps the text runs,
/// one line per paragraph. A legacy binary `.doc` is not a zip package and is
/// reported as corrupt, as is a package whose body part inflates past the
/// size limit.
pub struct DocxExtractor {
    kind: DocumentKind,
    max_document_xml: u64,
}

impl DocxExtractor {
    pub fn new() -> Self {
        Self::for_kind(DocumentKind::Docx)
    }

    /// Extractor that reports errors against the declared `kind`.
    pub fn for_kind(kind: DocumentKind) -> Self {
        Self {
            kind,
            max_document_xml: DEFAULT_MAX_DOCUMENT_XML,
        }
    }

    /// Override the inflated size limit for `word/document.xml`.
    pub fn with_max_document_xml(mut self, bytes: u64) -> Self {
        self.max_document_xml = bytes;
        self
    }
}

impl Default for DocxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextExtractor for DocxExtractor {
    async fn extract(&self, content: &[u8]) -> Result<String, ExtractError> {
        let kind = self.kind;
        let limit = self.max_document_xml;
        let bytes = content.to_vec();
        tokio::task::spawn_blocking(move || read_package(&bytes, kind, limit))
            .await
            .map_err(|e| ExtractError::corrupt(kind, format!("decoder aborted: {}", e)))?
    }

    fn name(&self) -> &'static str {
        "docx"
    }
}

fn read_package(bytes: &[u8], kind: DocumentKind, limit: u64) -> Result<String, ExtractError> {
    let too_large = || {
        ExtractError::corrupt(
            kind,
            format!("{} inflates past the {} byte limit", DOCUMENT_PART, limit),
        )
    };

    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| ExtractError::corrupt(kind, e))?;
    let part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractError::corrupt(kind, format!("{}: {}", DOCUMENT_PART, e)))?;

    // The declared size can lie, so the read itself is capped as well.
    if part.size() > limit {
        return Err(too_large());
    }
    let mut xml = String::new();
    part.take(limit.saturating_add(1))
        .read_to_string(&mut xml)
        .map_err(|e| ExtractError::corrupt(kind, e))?;
    if xml.len() as u64 > limit {
        return Err(too_large());
    }

    document_text(&xml).map_err(|reason| ExtractError::corrupt(kind, reason))
}

/// Plain text of a `document.xml` body.
///
/// `w:t` runs are concatenated, `w:p` ends a line, `w:tab` and `w:br` map to
/// a tab and a newline. Tab stops declared in paragraph properties
/// (`w:tabs/w:tab`) are ignored.
fn document_text(xml: &str) -> Result<String, String> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_run_text = false;
    let mut in_tab_stops = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"t" => in_run_text = true,
                b"tabs" => in_tab_stops = true,
                _ => {}
            },
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_run_text = false,
                b"tabs" => in_tab_stops = false,
                b"p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"tab" if !in_tab_stops => text.push('\t'),
                b"br" | b"cr" | b"p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Text(t)) if in_run_text => {
                let unescaped = t.unescape().map_err(|e| e.to_string())?;
                text.push_str(&unescaped);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(format!(
                    "XML error at position {}: {}",
                    reader.buffer_position(),
                    e
                ))
            }
            _ => {}
        }
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn document_xml(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
            body
        )
    }

    fn docx_package(document: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        writer.start_file("[Content_Types].xml", options).unwrap();
        writer.write_all(b"<Types/>").unwrap();
        writer.start_file(DOCUMENT_PART, options).unwrap();
        writer.write_all(document.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_paragraphs_become_lines() {
        let xml = document_xml(
            r#"<w:p><w:r><w:t>Patient has </w:t></w:r><w:r><w:t>severe fever</w:t></w:r></w:p>
<w:p><w:r><w:t>History: asthma</w:t></w:r></w:p>"#,
        );
        assert_eq!(
            document_text(&xml).unwrap(),
            "Patient has severe fever\nHistory: asthma\n"
        );
    }

    #[test]
    fn test_tabs_breaks_and_entities() {
        let xml = document_xml(
            r#"<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr><w:r><w:t>BP</w:t><w:tab/><w:t>140/90 &amp; rising</w:t><w:br/><w:t xml:space="preserve"> mild</w:t></w:r></w:p><w:p/>"#,
        );
        assert_eq!(
            document_text(&xml).unwrap(),
            "BP\t140/90 & rising\n mild\n\n"
        );
    }

    #[test]
    fn test_malformed_xml() {
        assert!(document_text("<w:document><w:body></w:document>").is_err());
    }

    #[tokio::test]
    async fn test_extract_docx_package() {
        let package = docx_package(&document_xml(
            "<w:p><w:r><w:t>Stable condition, mild headache</w:t></w:r></w:p>",
        ));
        let text = DocxExtractor::new().extract(&package).await.unwrap();
        assert_eq!(text, "Stable condition, mild headache\n");
    }

    #[tokio::test]
    async fn test_inflated_document_over_limit() {
        let filler = "a".repeat(1024 * 1024);
        let xml = document_xml(&format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", filler));

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        writer.start_file(DOCUMENT_PART, options).unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        let package = writer.finish().unwrap().into_inner();
        assert!(package.len() < 64 * 1024, "package should compress well");

        let result = DocxExtractor::new()
            .with_max_document_xml(64 * 1024)
            .extract(&package)
            .await;
        match result {
            Err(ExtractError::CorruptDocument { reason, .. }) => {
                assert!(reason.contains("limit"), "got: {}", reason);
            }
            other => panic!("expected CorruptDocument, got {:?}", other),
        }

        let text = DocxExtractor::new().extract(&package).await.unwrap();
        assert_eq!(text.len(), filler.len() + 1);
    }

    #[test]
    fn test_read_is_capped_at_limit() {
        let xml = document_xml("<w:p><w:r><w:t>fever</w:t></w:r></w:p>");
        let package = docx_package(&xml);
        let limit = xml.len() as u64;

        assert!(read_package(&package, DocumentKind::Docx, limit).is_ok());
        assert!(matches!(
            read_package(&package, DocumentKind::Docx, limit - 1),
            Err(ExtractError::CorruptDocument { .. })
        ));
    }

    #[tokio::test]
    async fn test_not_a_zip() {
        let result = DocxExtractor::for_kind(DocumentKind::Doc)
            .extract(b"\xD0\xCF\x11\xE0\xA1\xB1\x1A\xE1legacy")
            .await;
        assert!(matches!(
            result,
            Err(ExtractError::CorruptDocument {
                kind: DocumentKind::Doc,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_zip_without_document_part() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("hello.txt", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"hi").unwrap();
        let package = writer.finish().unwrap().into_inner();

        let result = DocxExtractor::new().extract(&package).await;
        match result {
            Err(ExtractError::CorruptDocument { reason, .. }) => {
                assert!(reason.contains(DOCUMENT_PART));
            }
            other => panic!("expected CorruptDocument, got {:?}", other),
        }
    }
}
