//! Statements and store plumbing shared by the sqlx backends.
//!
//! Both dialects accept `?` placeholders and the same ranking query, so only the
//! DDL and connect options differ per backend.

pub(super) const INSERT_SCORE: &str = "INSERT INTO scores (initials, score, color, timestamp, game, ip_addr) \
     VALUES (?, ?, ?, ?, ?, ?)";

pub(super) const SELECT_RANKED: &str = "SELECT initials, score, color FROM scores \
     WHERE game = ? ORDER BY score DESC, id ASC";

pub(super) const SELECT_RANKED_LIMIT: &str = "SELECT initials, score, color FROM scores \
     WHERE game = ? ORDER BY score DESC, id ASC LIMIT ?";

/// Implement the query helpers and [`ScoreStore`](super::ScoreStore) for a
/// `#[derive(Clone)]` store holding a sqlx `pool`.
///
/// `$row` is the backend row type and `$schema` the DDL statements run in order
/// by `ensure_schema`.
macro_rules! sql_score_store {
    ($store:ty, $row:ty, $schema:expr) => {
        impl $store {
            async fn insert(
                &self,
                score: $crate::dao::models::NewScoreEntity,
            ) -> $crate::dao::score_store::SqlResult<()> {
                use sqlx::Connection;
                use $crate::dao::score_store::{SqlDaoError, sql::INSERT_SCORE};

                let mut conn = self
                    .pool
                    .acquire()
                    .await
                    .map_err(|source| SqlDaoError::Acquire { source })?;

                let game = score.game.clone();
                let insert_error = |source| SqlDaoError::Insert {
                    game: game.clone(),
                    source,
                };

                let mut tx = conn.begin().await.map_err(insert_error)?;
                sqlx::query(INSERT_SCORE)
                    .bind(&score.initials)
                    .bind(score.score)
                    .bind(score.color.map(i64::from))
                    .bind(score.timestamp)
                    .bind(&score.game)
                    .bind(score.ip_addr.map(|ip| ip.to_string()))
                    .execute(&mut *tx)
                    .await
                    .map_err(insert_error)?;
                tx.commit().await.map_err(insert_error)
            }

            async fn select(
                &self,
                game: String,
                limit: Option<u32>,
            ) -> $crate::dao::score_store::SqlResult<Vec<$crate::dao::models::RankedScoreEntity>>
            {
                use $crate::dao::score_store::{
                    SqlDaoError,
                    sql::{SELECT_RANKED, SELECT_RANKED_LIMIT},
                };

                let mut conn = self
                    .pool
                    .acquire()
                    .await
                    .map_err(|source| SqlDaoError::Acquire { source })?;

                let query = match limit {
                    Some(limit) => sqlx::query(SELECT_RANKED_LIMIT)
                        .bind(&game)
                        .bind(i64::from(limit)),
                    None => sqlx::query(SELECT_RANKED).bind(&game),
                };
                let rows = query
                    .fetch_all(&mut *conn)
                    .await
                    .map_err(|source| SqlDaoError::Select {
                        game: game.clone(),
                        source,
                    })?;

                rows.iter()
                    .map(|row| {
                        Self::decode_row(row).map_err(|source| SqlDaoError::Decode {
                            game: game.clone(),
                            source,
                        })
                    })
                    .collect()
            }

            async fn create_schema(&self) -> $crate::dao::score_store::SqlResult<()> {
                use $crate::dao::score_store::SqlDaoError;

                let mut conn = self
                    .pool
                    .acquire()
                    .await
                    .map_err(|source| SqlDaoError::Acquire { source })?;
                for statement in $schema {
                    sqlx::query(statement)
                        .execute(&mut *conn)
                        .await
                        .map_err(|source| SqlDaoError::Schema { source })?;
                }
                Ok(())
            }

            fn decode_row(row: &$row) -> Result<$crate::dao::models::RankedScoreEntity, sqlx::Error> {
                use sqlx::Row;

                Ok($crate::dao::models::RankedScoreEntity {
                    initials: row.try_get("initials")?,
                    score: row.try_get("score")?,
                    color: row
                        .try_get::<Option<i64>, _>("color")?
                        .and_then(|color| u32::try_from(color).ok()),
                })
            }
        }

        impl $crate::dao::score_store::ScoreStore for $store {
            fn insert_score(
                &self,
                score: $crate::dao::models::NewScoreEntity,
            ) -> futures::future::BoxFuture<'static, $crate::dao::storage::StorageResult<()>> {
                let store = self.clone();
                Box::pin(async move { store.insert(score).await.map_err(Into::into) })
            }

            fn ranked_scores(
                &self,
                game: String,
                limit: Option<u32>,
            ) -> futures::future::BoxFuture<
                'static,
                $crate::dao::storage::StorageResult<Vec<$crate::dao::models::RankedScoreEntity>>,
            > {
                let store = self.clone();
                Box::pin(async move { store.select(game, limit).await.map_err(Into::into) })
            }

            fn ensure_schema(
                &self,
            ) -> futures::future::BoxFuture<'static, $crate::dao::storage::StorageResult<()>> {
                let store = self.clone();
                Box::pin(async move { store.create_schema().await.map_err(Into::into) })
            }
        }
    };
}

pub(crate) use sql_score_store;
