//! API version 1 endpoints.

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::{OpenApi, ToSchema};

use super::AppState;
use crate::report::{self, CombinedReport, HashrateLine, ShareLine, StatusLine};

/// OpenAPI description of the widget API.
#[derive(OpenApi)]
#[openapi(
    info(title = "gopool-widget", description = "goPool dashboard widget feed"),
    paths(super::widgets::widget_stats, get_stats, health),
    components(schemas(CombinedReport, StatusLine, HashrateLine, ShareLine, ErrorResponse)),
    tags(
        (name = "widgets", description = "Legacy dashboard feed"),
        (name = "stats", description = "Structured pool statistics"),
        (name = "health", description = "Liveness"),
    ),
)]
pub struct ApiDoc;

/// API error response.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Health check endpoint handler.
///
/// Returns OK without touching the upstream.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "health",
    responses(
        (status = OK, description = "Server is running", body = String),
    ),
)]
async fn health() -> &'static str {
    "OK"
}

/// Structured widget statistics.
///
/// Same data as the legacy endpoint as a single object. Upstream failures
/// map to 502 rather than an in-band string.
///
/// # Example
/// ```bash
/// curl http://localhost:23000/api/v1/stats
/// ```
#[utoipa::path(
    get,
    path = "/api/v1/stats",
    tag = "stats",
    responses(
        (status = OK, description = "Current pool statistics", body = CombinedReport),
        (status = BAD_GATEWAY, description = "Upstream fetch or parse failed", body = ErrorResponse),
    ),
)]
async fn get_stats(State(state): State<AppState>) -> Response {
    match report::collect(state.source.as_ref(), OffsetDateTime::now_utc()).await {
        Ok(report) => Json(report).into_response(),
        Err(e) => {
            let error = ErrorResponse {
                error: e.to_string(),
            };
            (StatusCode::BAD_GATEWAY, Json(error)).into_response()
        }
    }
}

/// Build the v1 API routes.
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stats", get(get_stats))
        .with_state(state)
}
