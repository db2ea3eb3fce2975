use std::{convert::Infallible, net::IpAddr, net::SocketAddr};

use axum::{
    Json, Router,
    body::Bytes,
    extract::{ConnectInfo, FromRequestParts, Path, State},
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE, request::Parts},
    routing::get,
};

use crate::{
    config::RoutePrefix,
    dto::score::SubmitResponse,
    error::AppError,
    services::score_service::{self, SubmitScore},
    state::SharedState,
};

/// Leaderboard routes, mounted at `/{game}` or `/scores/{game}`.
pub fn router(prefix: RoutePrefix) -> Router<SharedState> {
    Router::new().route(prefix.game_path(), get(get_scores).post(submit_score))
}

/// Peer address of the connection, absent when the server runs without connect info.
pub struct ClientAddr(pub Option<IpAddr>);

impl<S: Send + Sync> FromRequestParts<S> for ClientAddr {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(ClientAddr(
            parts
                .extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip()),
        ))
    }
}

#[utoipa::path(
    get,
    path = "/scores/{game}",
    tag = "scores",
    params(("game" = String, Path, description = "Leaderboard identifier")),
    responses(
        (status = 200, description = "One `initials,score[,color]` line per score, best first", body = String, content_type = "text/plain"),
        (status = 500, description = "Store failure", body = crate::error::ErrorBody)
    )
)]
/// Return the ranked scores of a game as plain text.
pub async fn get_scores(
    State(state): State<SharedState>,
    Path(game): Path<String>,
) -> Result<String, AppError> {
    let body = score_service::ranked_scores(&state, game).await?;
    Ok(body)
}

#[utoipa::path(
    post,
    path = "/scores/{game}",
    tag = "scores",
    params(("game" = String, Path, description = "Leaderboard identifier")),
    request_body(
        content = String,
        content_type = "text/plain",
        description = "`INITIALS,SCORE[,COLOR]`, or `{\"initials\": ..., \"score\": ...}` when JSON submissions are enabled"
    ),
    responses(
        (status = 201, description = "Score stored", body = SubmitResponse),
        (status = 400, description = "Invalid submission", body = crate::error::ErrorBody),
        (status = 500, description = "Store failure", body = crate::error::ErrorBody)
    )
)]
/// Validate and store one score for a game.
pub async fn submit_score(
    State(state): State<SharedState>,
    Path(game): Path<String>,
    ClientAddr(client_addr): ClientAddr,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<SubmitResponse>), AppError> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());
    let encoding = state.config().submission_format.resolve(content_type);

    let body = std::str::from_utf8(&body)
        .map_err(|_| AppError::BadRequest("Invalid request: body is not valid UTF-8".into()))?;

    score_service::submit_score(
        &state,
        SubmitScore {
            game,
            body,
            encoding,
            client_addr,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(SubmitResponse::submitted())))
}
