//! Request handlers for the REST API.

use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{Html, Json};
use medreport_core::{extract_path, AnalysisResult};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;
use crate::upload::{sanitize_filename, ScopedUpload};

/// Multipart field carrying the uploaded document.
const FILE_FIELD: &str = "file";

// --- Request / response types ---

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    #[serde(default)]
    pub text: Option<String>,
}

// --- Handlers ---

pub async fn index() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.uptime_secs(),
    })
}

/// Lightweight liveness check.
pub async fn health_live() -> StatusCode {
    StatusCode::OK
}

/// Analyze an uploaded document.
///
/// The request must be `multipart/form-data` with a `file` part whose name
/// has an allowed extension. The document is written to the upload
/// directory for extraction and removed before the response is sent.
pub async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let mut multipart = multipart.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Upload is not multipart");
        ApiError::NoFilePart
    })?;

    let (filename, kind, content) = loop {
        let field = multipart.next_field().await?.ok_or(ApiError::NoFilePart)?;
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if filename.is_empty() {
            return Err(ApiError::NoSelectedFile);
        }
        let kind = state
            .allowed_kind(&filename)
            .ok_or(ApiError::InvalidFileType)?;
        let content = field.bytes().await?;
        break (filename, kind, content);
    };

    let safe_name = sanitize_filename(&filename);
    tracing::info!(filename = %safe_name, %kind, size = content.len(), "Received upload");

    let upload = ScopedUpload::create(state.upload_dir(), &safe_name, kind, content)
        .await
        .map_err(|e| ApiError::Unexpected(format!("failed to store upload: {}", e)))?;
    let text = extract_path(upload.path(), upload.kind()).await?;
    upload.close();

    let result = state.classifier().classify(&text);
    log_analysis(&result);
    Ok(Json(result))
}

/// Analyze text sent as JSON `{"text": "..."}`.
pub async fn analyze_text(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeTextRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge
        } else {
            tracing::debug!(error = %rejection, "Unreadable analyze-text body");
            ApiError::NoTextProvided
        }
    })?;

    let text = request
        .text
        .filter(|text| !text.trim().is_empty())
        .ok_or(ApiError::NoTextProvided)?;

    let result = state.classifier().classify(&text);
    log_analysis(&result);
    Ok(Json(result))
}

fn log_analysis(result: &AnalysisResult) {
    tracing::info!(
        severity = %result.severity,
        symptoms = result.symptoms.len(),
        conditions = result.conditions.len(),
        "Analysis complete"
    );
}
