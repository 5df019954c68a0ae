//! Medical report analysis.
//!
//! Turns an uploaded document (pdf, doc, docx, txt) into plain text and
//! classifies it against keyword tables: an overall severity, the symptoms
//! and conditions mentioned, and a fixed set of recommendations for that
//! severity.

mod classify;
mod error;
mod extractors;
mod keywords;
mod severity;
mod tokenize;

pub use classify::{classify, AnalysisResult, Recommendations, ReportClassifier};
pub use error::ExtractError;
pub use extractors::{
    extract, extract_file, extract_kind, extract_path, extractor_for, file_extension,
    DocumentKind, DocxExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
pub use keywords::KeywordTable;
pub use severity::Severity;
pub use tokenize::{content_tokens, is_stop_word, tokenize};
