mod config;
mod error;
/// MySQL-backed store, the production deployment target.
#[cfg(feature = "mysql-store")]
pub mod mysql;
/// SQLite-backed store for single-host deployments and tests.
#[cfg(feature = "sqlite-store")]
pub mod sqlite;
mod sql;

#[cfg(not(any(feature = "mysql-store", feature = "sqlite-store")))]
compile_error!("enable at least one of the `mysql-store` or `sqlite-store` features");

pub use config::{PoolConfig, StoreConfig};
pub use error::{SqlDaoError, SqlResult};

use crate::dao::models::{NewScoreEntity, RankedScoreEntity};
use crate::dao::storage::StorageResult;
use futures::future::BoxFuture;

/// Abstraction over the relational `scores` table.
///
/// Every call acquires its own pooled connection and hands it back before the
/// returned future resolves, whatever the outcome.
pub trait ScoreStore: Send + Sync {
    /// Append one score row inside a single transaction.
    fn insert_score(&self, score: NewScoreEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Fetch the scores of `game` ordered by descending score, earliest row first on ties.
    fn ranked_scores(
        &self,
        game: String,
        limit: Option<u32>,
    ) -> BoxFuture<'static, StorageResult<Vec<RankedScoreEntity>>>;
    /// Create the `scores` table and its ranking index when missing.
    fn ensure_schema(&self) -> BoxFuture<'static, StorageResult<()>>;
}
