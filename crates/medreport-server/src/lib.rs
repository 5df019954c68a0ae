//! medreport REST API server.
//!
//! Serves the analyzer over HTTP using Axum.
//! Endpoints: /, /health, /health/live, /upload, /analyze-text

mod error;
mod handlers;
mod routes;
mod state;
mod upload;

use medreport_config::AppConfig;

pub use error::{ApiError, ErrorResponse};
pub use routes::build_router;
pub use state::{AppState, Limits};
pub use upload::{sanitize_filename, ScopedUpload};

/// Start the medreport server with graceful shutdown on SIGTERM/SIGINT.
///
/// The configuration is normalized and validated first. The upload
/// directory is created if it does not exist.
pub async fn serve(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let config = config.effective();
    config.validate_or_err()?;

    tokio::fs::create_dir_all(&config.upload.dir).await?;
    let state = AppState::from_config(&config);
    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        upload_dir = %config.upload.dir,
        max_upload = %config.upload.max_size,
        "medreport server listening on http://{}",
        addr
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("medreport server shut down gracefully");
    Ok(())
}

/// Wait for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => { tracing::info!("Received SIGINT, shutting down..."); }
        _ = terminate => { tracing::info!("Received SIGTERM, shutting down..."); }
    }
}
