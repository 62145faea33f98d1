pub mod api_routes;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::routes::api_routes::{analyze_handler, generate_handler, list_modes_handler};
use crate::service::assistant_service::AssistantService;

/// Large enough for an inline image encoded as a data URL.
const MAX_REQUEST_BYTES: usize = 25 * 1024 * 1024;

/// JSON API routes. Static hosting and tracing layers are added by `main`.
pub fn router(svc: AssistantService) -> Router {
    Router::new()
        .route("/api/modes", get(list_modes_handler))
        .route("/api/generate", post(generate_handler))
        .route("/api/analyze", post(analyze_handler))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
        .with_state(svc)
}
