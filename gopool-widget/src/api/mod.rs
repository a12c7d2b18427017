//! HTTP API server.
//!
//! Serves the widget feed over axum. Two surfaces share one [`AppState`]:
//!
//! - `GET /widgets/stats`: the legacy three-line body, always 200.
//! - `/api/v1`: a structured report with proper error statuses, plus its
//!   OpenAPI document and Swagger UI.

mod v1;
mod widgets;

use axum::Router;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::error::Result;
use crate::tracing::prelude::*;
use crate::upstream::StatusSource;

pub use v1::{ApiDoc, ErrorResponse};

/// Shared application state for API endpoints.
#[derive(Clone)]
pub struct AppState {
    /// Where upstream status documents come from
    pub source: Arc<dyn StatusSource>,
}

impl AppState {
    /// Create state backed by `source`.
    pub fn new(source: Arc<dyn StatusSource>) -> Self {
        Self { source }
    }
}

/// Build the complete router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(widgets::routes(state.clone()))
        .nest("/api/v1", v1::routes(state))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
}

/// Serve the API on `listen` until `running` is cancelled.
pub async fn serve(listen: SocketAddr, state: AppState, running: CancellationToken) -> Result<()> {
    let listener = TcpListener::bind(listen).await?;
    info!(addr = %listener.local_addr()?, "API listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { running.cancelled().await })
        .await?;

    debug!("API stopped");
    Ok(())
}
