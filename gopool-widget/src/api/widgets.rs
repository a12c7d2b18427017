//! Legacy widget endpoint.
//!
//! The dashboard polls this and splits the body on newlines, so the
//! response is 200 with `application/json` even when the upstream failed;
//! the failure is reported in-band as "ETL Error: ...".

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use time::OffsetDateTime;

use super::AppState;
use crate::report;

/// Build the legacy widget routes.
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/widgets/stats", get(widget_stats))
        .with_state(state)
}

/// Widget statistics in the legacy three-line format.
#[utoipa::path(
    get,
    path = "/widgets/stats",
    tag = "widgets",
    responses(
        (status = OK, description = "Three newline-separated JSON objects, or \"ETL Error: <message>\"",
         body = String, content_type = "application/json"),
    ),
)]
pub(super) async fn widget_stats(State(state): State<AppState>) -> Response {
    let body = report::combined_data(state.source.as_ref(), OffsetDateTime::now_utc()).await;
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}
