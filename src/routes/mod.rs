use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{services::documentation::ApiDoc, state::SharedState};

/// Liveness endpoint.
pub mod health;
/// Score submission and leaderboard endpoints.
pub mod scores;

/// Compose all route trees, wiring in shared state and the Swagger UI.
///
/// Static routes such as `/health` and `/docs` win over the `/{game}` capture,
/// so games with those names are unreachable under the root prefix.
pub fn router(state: SharedState) -> Router<()> {
    let prefix = state.config().route_prefix;
    let docs: Router<SharedState> = SwaggerUi::new("/docs")
        .url("/api-doc/openapi.json", ApiDoc::openapi())
        .into();

    health::router()
        .merge(scores::router(prefix))
        .merge(docs)
        .with_state(state)
}
