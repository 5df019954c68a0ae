//! Route definitions for the medreport REST API.

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::error::{json_payload_too_large, panic_response};
use crate::handlers;
use crate::state::AppState;

/// Build the Axum router with all medreport routes.
///
/// Timeout, body size and concurrency limits come from [`AppState::limits`].
pub fn build_router(state: AppState) -> Router {
    let limits = state.limits();

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/health/live", get(handlers::health_live))
        .route("/upload", post(handlers::upload))
        .route("/analyze-text", post(handlers::analyze_text))
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(DefaultBodyLimit::max(limits.max_body_size))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(limits.request_timeout))
        .layer(RequestBodyLimitLayer::new(limits.max_body_size))
        .layer(middleware::map_response(json_payload_too_large))
        .layer(ConcurrencyLimitLayer::new(limits.concurrency_limit))
}
