use axum::{Router, routing::get};

use crate::state::SharedState;

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Process is up", body = String, content_type = "text/plain"))
)]
/// Liveness check; never touches the store.
pub async fn health() -> &'static str {
    "ok"
}

/// Configure the health routes subtree.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new().route("/health", get(health))
}
