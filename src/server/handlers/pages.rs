//! Static page and liveness handlers.

use axum::response::{Html, IntoResponse};
use axum::Json;

use super::super::types::ServiceStatus;

const INDEX_HTML: &str = include_str!("../../../static/index.html");

/// Serves the bundled audit page.
pub async fn index_handler() -> impl IntoResponse {
    Html(INDEX_HTML)
}

/// Liveness check.
pub async fn test_handler() -> Json<ServiceStatus> {
    Json(ServiceStatus::operational())
}
