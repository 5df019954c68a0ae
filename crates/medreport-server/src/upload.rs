//! Scoped temporary files for in-flight uploads.

use std::io::{self, Write};
use std::path::Path;

use axum::body::Bytes;
use medreport_core::DocumentKind;
use tempfile::NamedTempFile;

/// Reduce a client-supplied file name to a safe ASCII name.
///
/// Directory components are dropped, whitespace runs become `_`, and only
/// ASCII alphanumerics, `.`, `-` and `_` are kept. Leading and trailing dots
/// and underscores are trimmed, so the result never names a hidden file or a
/// parent directory. The result may be empty.
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let joined = base.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();
    kept.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// An uploaded document written to the upload directory.
///
/// The file is removed when the value is dropped, whether or not the request
/// that created it succeeded.
pub struct ScopedUpload {
    file: NamedTempFile,
    kind: DocumentKind,
}

impl ScopedUpload {
    /// Write `content` to a fresh file in `dir`. `safe_name` (already
    /// sanitized) becomes part of the file name.
    pub async fn create(
        dir: &Path,
        safe_name: &str,
        kind: DocumentKind,
        content: Bytes,
    ) -> io::Result<Self> {
        let dir = dir.to_path_buf();
        let suffix = if safe_name.is_empty() {
            format!(".{}", kind.extension())
        } else {
            format!("-{}", safe_name)
        };

        let file = tokio::task::spawn_blocking(move || -> io::Result<NamedTempFile> {
            let mut file = tempfile::Builder::new()
                .prefix("upload-")
                .suffix(&suffix)
                .tempfile_in(&dir)?;
            file.write_all(&content)?;
            file.flush()?;
            Ok(file)
        })
        .await
        .map_err(io::Error::other)??;

        Ok(Self { file, kind })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Remove the file now, logging instead of failing if that does not work.
    pub fn close(self) {
        let path = self.file.path().to_path_buf();
        if let Err(e) = self.file.close() {
            tracing::warn!(path = %path.display(), error = %e, "Failed to remove upload file");
        }
    }
}
