//! API errors and their HTTP responses.

use std::any::Any;

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use medreport_core::ExtractError;
use serde::{Deserialize, Serialize};

/// JSON error body: `{"error": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Errors returned by the upload and analyze-text handlers.
///
/// Validation variants carry their public message verbatim. Extraction and
/// unexpected failures keep their detail for the log only.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("No file part")]
    NoFilePart,

    #[error("No selected file")]
    NoSelectedFile,

    #[error("Invalid file type")]
    InvalidFileType,

    #[error("No text provided")]
    NoTextProvided,

    #[error("File too large")]
    PayloadTooLarge,

    #[error("Text extraction failed: {0}")]
    Extraction(#[source] ExtractError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NoFilePart
            | ApiError::NoSelectedFile
            | ApiError::InvalidFileType
            | ApiError::NoTextProvided => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the response body.
    pub fn public_message(&self) -> &'static str {
        match self {
            ApiError::NoFilePart => "No file part",
            ApiError::NoSelectedFile => "No selected file",
            ApiError::InvalidFileType => "Invalid file type",
            ApiError::NoTextProvided => "No text provided",
            ApiError::PayloadTooLarge => "File too large",
            ApiError::Extraction(_) => "Unable to extract text from the document",
            ApiError::Unexpected(_) => "An unexpected error occurred",
        }
    }
}

impl From<ExtractError> for ApiError {
    fn from(err: ExtractError) -> Self {
        if err.is_client_error() {
            ApiError::Extraction(err)
        } else {
            ApiError::Unexpected(err.to_string())
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge
        } else {
            tracing::debug!(error = %err.body_text(), "Unreadable multipart body");
            ApiError::NoFilePart
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Extraction(err) => tracing::warn!(error = %err, "Text extraction failed"),
            ApiError::Unexpected(detail) => tracing::error!(error = %detail, "Request failed"),
            other => tracing::debug!(error = %other, "Rejected request"),
        }

        (
            self.status(),
            Json(ErrorResponse {
                error: self.public_message().to_string(),
            }),
        )
            .into_response()
    }
}

/// Response for a panicking handler, used by `CatchPanicLayer`.
pub(crate) fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    ApiError::Unexpected(format!("handler panicked: {}", detail)).into_response()
}

/// Replace the plain-text 413 produced by the body limit layer with the JSON
/// error body.
pub(crate) async fn json_payload_too_large(response: Response) -> Response {
    if response.status() != StatusCode::PAYLOAD_TOO_LARGE {
        return response;
    }
    let is_json = response
        .headers()
        .get(axum::http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));
    if is_json {
        response
    } else {
        ApiError::PayloadTooLarge.into_response()
    }
}
