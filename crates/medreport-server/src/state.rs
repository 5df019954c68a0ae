//! Shared application state for the Axum server.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use medreport_config::{AppConfig, DEFAULT_ALLOWED_EXTENSIONS};
use medreport_core::{file_extension, DocumentKind, ReportClassifier};

/// Default request timeout (60 seconds).
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
/// Default maximum request body size (16 MB).
const DEFAULT_BODY_LIMIT: usize = 16 * 1024 * 1024;
/// Default max concurrent requests.
const DEFAULT_CONCURRENCY_LIMIT: usize = 256;

/// Middleware limits applied by the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub request_timeout: Duration,
    pub max_body_size: usize,
    pub concurrency_limit: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_body_size: DEFAULT_BODY_LIMIT,
            concurrency_limit: DEFAULT_CONCURRENCY_LIMIT,
        }
    }
}

/// Shared state accessible to all route handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

struct Inner {
    classifier: ReportClassifier,
    allowed_extensions: Vec<String>,
    upload_dir: PathBuf,
    limits: Limits,
    started_at: Instant,
}

impl AppState {
    /// State with the given classifier, upload directory and default limits.
    pub fn new(classifier: ReportClassifier, upload_dir: impl Into<PathBuf>) -> Self {
        Self::build(
            classifier,
            DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            upload_dir.into(),
            Limits::default(),
        )
    }

    /// State from an application configuration. Lists are normalized first.
    pub fn from_config(config: &AppConfig) -> Self {
        let config = config.effective();
        Self::build(
            ReportClassifier::from_config(&config.keywords),
            config.upload.allowed_extensions.clone(),
            PathBuf::from(&config.upload.dir),
            Limits {
                request_timeout: config.server.request_timeout.as_duration(),
                max_body_size: config.upload.max_size.as_usize(),
                concurrency_limit: config.server.concurrency_limit,
            },
        )
    }

    fn build(
        classifier: ReportClassifier,
        allowed_extensions: Vec<String>,
        upload_dir: PathBuf,
        limits: Limits,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                classifier,
                allowed_extensions,
                upload_dir,
                limits,
                started_at: Instant::now(),
            }),
        }
    }

    pub fn classifier(&self) -> &ReportClassifier {
        &self.inner.classifier
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.inner.allowed_extensions
    }

    /// Directory that holds in-flight upload files.
    pub fn upload_dir(&self) -> &Path {
        &self.inner.upload_dir
    }

    pub fn limits(&self) -> Limits {
        self.inner.limits
    }

    /// Document kind of `filename` if its extension is allowed for upload.
    pub fn allowed_kind(&self, filename: &str) -> Option<DocumentKind> {
        let ext = file_extension(filename)?;
        if !self.inner.allowed_extensions.iter().any(|a| *a == ext) {
            return None;
        }
        ext.parse().ok()
    }

    /// Get server uptime in seconds.
    pub fn uptime_secs(&self) -> u64 {
        self.inner.started_at.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_allow_list() {
        let state = AppState::new(ReportClassifier::default(), "uploads");
        assert_eq!(state.allowed_kind("report.pdf"), Some(DocumentKind::Pdf));
        assert_eq!(state.allowed_kind("Report.DOCX"), Some(DocumentKind::Docx));
        assert_eq!(state.allowed_kind("notes.doc"), Some(DocumentKind::Doc));
        assert_eq!(state.allowed_kind("notes.txt"), Some(DocumentKind::Txt));
        assert_eq!(state.allowed_kind("report.exe"), None);
        assert_eq!(state.allowed_kind("report"), None);
        assert_eq!(state.limits(), Limits::default());
    }

    #[test]
    fn test_from_config() {
        let config = AppConfig::from_yaml(
            r#"
server:
  request_timeout: 5s
  concurrency_limit: 8
upload:
  dir: /tmp/medreport-test
  max_size: 1mb
  allowed_extensions: [".TXT"]
keywords:
  severe: [grave]
"#,
        )
        .unwrap();
        let state = AppState::from_config(&config);

        assert_eq!(state.allowed_extensions(), ["txt".to_string()]);
        assert_eq!(state.allowed_kind("a.txt"), Some(DocumentKind::Txt));
        assert_eq!(state.allowed_kind("a.pdf"), None);
        assert_eq!(state.upload_dir(), Path::new("/tmp/medreport-test"));
        assert_eq!(
            state.limits(),
            Limits {
                request_timeout: Duration::from_secs(5),
                max_body_size: 1024 * 1024,
                concurrency_limit: 8,
            }
        );
        assert_eq!(
            state.classifier().classify("grave fever").severity,
            medreport_core::Severity::High
        );
    }

    #[test]
    fn test_uptime() {
        let state = AppState::new(ReportClassifier::default(), "uploads");
        assert!(state.uptime_secs() < 2);
    }
}
