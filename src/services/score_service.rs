use std::net::IpAddr;

use time::{OffsetDateTime, PrimitiveDateTime};
use tracing::{debug, info, warn};

use crate::{
    config::BodyEncoding,
    dao::models::NewScoreEntity,
    dto::score::{ScoreSubmission, render_scores},
    error::ServiceError,
    state::SharedState,
};

/// Incoming submission as received by the HTTP layer.
#[derive(Debug)]
pub struct SubmitScore<'a> {
    /// Leaderboard the score is submitted to.
    pub game: String,
    /// Raw request body.
    pub body: &'a str,
    /// Encoding of [`SubmitScore::body`].
    pub encoding: BodyEncoding,
    /// Peer address of the submitter, when known.
    pub client_addr: Option<IpAddr>,
}

/// Validate a submission and append it to the game's leaderboard.
///
/// Validation runs entirely before the store is touched, so a rejected
/// submission never opens a connection.
pub async fn submit_score(
    state: &SharedState,
    request: SubmitScore<'_>,
) -> Result<(), ServiceError> {
    let config = state.config();
    let decoded = match request.encoding {
        BodyEncoding::Text => ScoreSubmission::from_text(request.body, config.color),
        BodyEncoding::Json => ScoreSubmission::from_json(request.body, config.color),
    };
    let submission = decoded.inspect_err(|err| {
        debug!(game = %request.game, error = %err, "rejected score submission");
    })?;

    let entity = NewScoreEntity {
        game: request.game,
        initials: submission.initials,
        score: submission.score,
        color: submission.color,
        timestamp: now_utc(),
        ip_addr: request.client_addr.filter(|_| config.capture_ip),
    };
    let (game, initials, score) = (entity.game.clone(), entity.initials.clone(), entity.score);
    debug!(%game, ip_addr = ?entity.ip_addr, "persisting score");

    state
        .store()
        .insert_score(entity)
        .await
        .inspect_err(|err| warn!(%game, error = %err, "failed to persist score"))?;

    info!(%game, %initials, score, "score submitted");
    Ok(())
}

/// Return the game's leaderboard as newline separated `initials,score[,color]` lines.
///
/// Unknown games simply have no rows and yield an empty body.
pub async fn ranked_scores(state: &SharedState, game: String) -> Result<String, ServiceError> {
    let config = state.config();
    let rows = state
        .store()
        .ranked_scores(game.clone(), config.query_limit)
        .await
        .inspect_err(|err| warn!(%game, error = %err, "failed to load scores"))?;

    debug!(%game, count = rows.len(), "loaded ranked scores");
    Ok(render_scores(&rows, config.color))
}

fn now_utc() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_utc();
    PrimitiveDateTime::new(now.date(), now.time())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use futures::future::BoxFuture;

    use super::*;
    use crate::{
        config::AppConfig,
        dao::{
            models::RankedScoreEntity,
            score_store::ScoreStore,
            storage::{StorageError, StorageResult},
        },
        error::SubmissionError,
        state::AppState,
    };

    /// In-memory store keeping rows in insertion order.
    #[derive(Default)]
    struct RecordingStore {
        rows: Mutex<Vec<NewScoreEntity>>,
        fail: bool,
    }

    impl ScoreStore for RecordingStore {
        fn insert_score(&self, score: NewScoreEntity) -> BoxFuture<'static, StorageResult<()>> {
            let result = if self.fail {
                Err(StorageError::unavailable(
                    "down".into(),
                    std::io::Error::other("connection refused"),
                ))
            } else {
                self.rows.lock().unwrap().push(score);
                Ok(())
            };
            Box::pin(async move { result })
        }

        fn ranked_scores(
            &self,
            game: String,
            limit: Option<u32>,
        ) -> BoxFuture<'static, StorageResult<Vec<RankedScoreEntity>>> {
            let mut rows: Vec<_> = self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|row| row.game == game)
                .map(|row| RankedScoreEntity {
                    initials: row.initials.clone(),
                    score: row.score,
                    color: row.color,
                })
                .collect();
            rows.sort_by(|a, b| b.score.total_cmp(&a.score));
            if let Some(limit) = limit {
                rows.truncate(limit as usize);
            }
            Box::pin(async move { Ok(rows) })
        }

        fn ensure_schema(&self) -> BoxFuture<'static, StorageResult<()>> {
            Box::pin(async { Ok(()) })
        }
    }

    fn state_with(store: Arc<RecordingStore>, config: AppConfig) -> SharedState {
        AppState::new(store, config)
    }

    fn text(game: &str, body: &'static str) -> SubmitScore<'static> {
        SubmitScore {
            game: game.into(),
            body,
            encoding: BodyEncoding::Text,
            client_addr: Some("10.0.0.7".parse().unwrap()),
        }
    }

    #[tokio::test]
    async fn rejected_submissions_are_not_persisted() {
        let store = Arc::new(RecordingStore::default());
        let state = state_with(store.clone(), AppConfig::default());

        let err = submit_score(&state, text("pacman", "AAA,-5"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::InvalidSubmission(SubmissionError::NegativeScore(_))
        ));
        assert!(store.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn ip_is_only_recorded_when_enabled() {
        let store = Arc::new(RecordingStore::default());
        let state = state_with(store.clone(), AppConfig::default());
        submit_score(&state, text("pacman", "aaa,1")).await.unwrap();

        let capturing = state_with(
            store.clone(),
            AppConfig {
                capture_ip: true,
                ..AppConfig::default()
            },
        );
        submit_score(&capturing, text("pacman", "bbb,2")).await.unwrap();

        let rows = store.rows.lock().unwrap();
        assert_eq!(rows[0].ip_addr, None);
        assert_eq!(rows[1].ip_addr, Some("10.0.0.7".parse::<IpAddr>().unwrap()));
        assert_eq!(rows[1].initials, "BBB");
    }

    #[tokio::test]
    async fn ranking_respects_limit_and_color() {
        let store = Arc::new(RecordingStore::default());
        let config = AppConfig {
            color: true,
            query_limit: Some(2),
            ..AppConfig::default()
        };
        let state = state_with(store, config);
        for body in ["AAA,10", "BBB,50,FF0000", "CCC,30"] {
            submit_score(&state, text("galaga", body)).await.unwrap();
        }

        let body = ranked_scores(&state, "galaga".into()).await.unwrap();
        assert_eq!(body, "BBB,50.0,16711680\nCCC,30.0,8421504");
    }

    #[tokio::test]
    async fn storage_failures_are_propagated() {
        let store = Arc::new(RecordingStore {
            fail: true,
            ..RecordingStore::default()
        });
        let state = state_with(store, AppConfig::default());

        let err = submit_score(&state, text("pacman", "AAA,1"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Storage(StorageError::Unavailable { .. })
        ));
    }
}
