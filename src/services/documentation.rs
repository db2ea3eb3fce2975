use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the leaderboard backend.
#[openapi(
    paths(
        crate::routes::health::health,
        crate::routes::scores::get_scores,
        crate::routes::scores::submit_score,
    ),
    components(
        schemas(
            crate::dto::score::SubmitResponse,
            crate::error::ErrorBody,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "scores", description = "Score submission and leaderboards"),
    )
)]
pub struct ApiDoc;
